//! Leaf goal + builder.

use std::fmt;
use std::sync::Arc;

use crate::belief::AgentBeliefState;
use crate::tactic::Tactic;
use crate::verdict::{VerdictEvent, VerdictLog};

use super::GoalStructure;

pub type BeliefPredicate = Arc<dyn Fn(&AgentBeliefState) -> bool + Send + Sync>;
pub type InvariantCheck = Arc<dyn Fn(&AgentBeliefState) -> VerdictEvent + Send + Sync>;

/// Когда solver впервые проверяет predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Evaluation {
    /// Predicate проверяется до первого шага tactic (уже выполненный goal не действует)
    #[default]
    Eager,
    /// Сначала ровно один шаг tactic, потом predicate.
    /// Нужно goals с тривиальным predicate, которые существуют ради tactic.
    AfterAction,
}

/// Проверка состояния SUT, привязанная к verdict log агента
#[derive(Clone)]
pub struct Invariant {
    check: InvariantCheck,
    sink: VerdictLog,
}

impl Invariant {
    /// Выполняет проверку и пишет verdict в sink
    pub fn check(&self, belief: &AgentBeliefState) -> VerdictEvent {
        let verdict = (self.check)(belief);
        self.sink.record(verdict.clone());
        verdict
    }
}

#[derive(Clone)]
pub struct Goal {
    name: String,
    predicate: BeliefPredicate,
    tactic: Tactic,
    evaluation: Evaluation,
    invariant: Option<Invariant>,
}

impl Goal {
    /// Goal без predicate никогда не выполняется, без tactic - сразу abort
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            predicate: Arc::new(|_| false),
            tactic: Tactic::Abort,
            evaluation: Evaluation::Eager,
            invariant: None,
        }
    }

    /// Test goal: хост для проверки; predicate оценивается после шага tactic
    pub fn test_goal(name: impl Into<String>) -> Self {
        Self::new(name).evaluated(Evaluation::AfterAction)
    }

    pub fn to_solve<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&AgentBeliefState) -> bool + Send + Sync + 'static,
    {
        self.predicate = Arc::new(predicate);
        self
    }

    pub fn with_tactic(mut self, tactic: Tactic) -> Self {
        self.tactic = tactic;
        self
    }

    pub fn evaluated(mut self, evaluation: Evaluation) -> Self {
        self.evaluation = evaluation;
        self
    }

    pub fn invariant<F>(mut self, sink: &VerdictLog, check: F) -> Self
    where
        F: Fn(&AgentBeliefState) -> VerdictEvent + Send + Sync + 'static,
    {
        self.invariant = Some(Invariant {
            check: Arc::new(check),
            sink: sink.clone(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_satisfied(&self, belief: &AgentBeliefState) -> bool {
        (self.predicate)(belief)
    }

    pub fn tactic(&self) -> &Tactic {
        &self.tactic
    }

    pub fn evaluation(&self) -> Evaluation {
        self.evaluation
    }

    pub fn invariant_check(&self) -> Option<&Invariant> {
        self.invariant.as_ref()
    }

    pub fn lift(self) -> GoalStructure {
        GoalStructure::Leaf(self)
    }
}

impl fmt::Debug for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Goal")
            .field("name", &self.name)
            .field("tactic", &self.tactic)
            .field("evaluation", &self.evaluation)
            .field("has_invariant", &self.invariant.is_some())
            .finish()
    }
}
