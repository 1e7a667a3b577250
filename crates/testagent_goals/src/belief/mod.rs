//! Belief state: что агент знает о SUT на момент последнего наблюдения.
//!
//! Belief обновляется только хостом (solver refresh), goal predicates
//! читают его как `&AgentBeliefState`.

pub mod entity;
pub mod state;


pub use entity::{PropertyValue, WorldEntity};
pub use state::{distance, AgentBeliefState, Observation};
