//! Tactics: стратегии, которые solver применяет пока goal не выполнен.
//!
//! `Tactic` - дерево из primitive actions, `FirstOf` (первый применимый
//! побеждает, слева направо) и терминального `Abort`.

use std::fmt;
use std::sync::Arc;

use crate::belief::AgentBeliefState;

pub mod environment;
pub mod library;


pub use environment::{Environment, EnvironmentError};

pub type ActionGuard = Arc<dyn Fn(&AgentBeliefState) -> bool + Send + Sync>;
pub type ActionEffect =
    Arc<dyn Fn(&AgentBeliefState, &mut dyn Environment) -> Result<(), EnvironmentError> + Send + Sync>;

/// Primitive action: guard (применимость, чистая функция от belief) + effect на SUT
#[derive(Clone)]
pub struct Action {
    name: String,
    guard: ActionGuard,
    effect: ActionEffect,
}

impl Action {
    /// Action без guard'а (всегда применим)
    pub fn new<F>(name: impl Into<String>, effect: F) -> Self
    where
        F: Fn(&AgentBeliefState, &mut dyn Environment) -> Result<(), EnvironmentError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            guard: Arc::new(|_| true),
            effect: Arc::new(effect),
        }
    }

    pub fn on<G>(mut self, guard: G) -> Self
    where
        G: Fn(&AgentBeliefState) -> bool + Send + Sync + 'static,
    {
        self.guard = Arc::new(guard);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_applicable(&self, belief: &AgentBeliefState) -> bool {
        (self.guard)(belief)
    }

    pub fn execute(&self, belief: &AgentBeliefState, env: &mut dyn Environment) -> Result<(), EnvironmentError> {
        (self.effect)(belief, env)
    }

    pub fn lift(self) -> Tactic {
        Tactic::Primitive(self)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").field("name", &self.name).finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Tactic {
    Primitive(Action),
    /// Первый применимый (слева направо)
    FirstOf(Vec<Tactic>),
    /// Терминальное действие: goal переходит в Failed
    Abort,
}

/// Что tactic выбрал на текущем belief
#[derive(Debug)]
pub enum Selection<'a> {
    Act(&'a Action),
    Abort,
    /// Ни один вариант не применим и abort'а в цепочке нет
    NoneApplicable,
}

impl Tactic {
    pub fn select(&self, belief: &AgentBeliefState) -> Selection<'_> {
        match self {
            Tactic::Primitive(action) => {
                if action.is_applicable(belief) {
                    Selection::Act(action)
                } else {
                    Selection::NoneApplicable
                }
            }
            Tactic::FirstOf(options) => options
                .iter()
                .map(|option| option.select(belief))
                .find(|selection| !matches!(selection, Selection::NoneApplicable))
                .unwrap_or(Selection::NoneApplicable),
            Tactic::Abort => Selection::Abort,
        }
    }

    /// Tactic всегда что-то выбирает (в цепочке достижим Abort)
    pub fn is_total(&self) -> bool {
        match self {
            Tactic::Primitive(_) => false,
            Tactic::FirstOf(options) => options.iter().any(Tactic::is_total),
            Tactic::Abort => true,
        }
    }
}

impl From<Action> for Tactic {
    fn from(action: Action) -> Self {
        Tactic::Primitive(action)
    }
}
