//! Goals и goal structures.
//!
//! `Goal` = имя + чистый predicate над belief + tactic. `GoalStructure` -
//! leaf goal или упорядоченная последовательность подструктур. Обе
//! неизменяемы после построения, runtime-статус хранит solver.

pub mod definition;
pub mod structure;


pub use definition::{BeliefPredicate, Evaluation, Goal, Invariant, InvariantCheck};
pub use structure::{leaf, seq, GoalStructure};
