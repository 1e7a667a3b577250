//! GoalStructure: leaf или последовательность.

use crate::belief::AgentBeliefState;
use crate::tactic::Tactic;

use super::Goal;

#[derive(Debug, Clone)]
pub enum GoalStructure {
    Leaf(Goal),
    /// Дети выполняются по порядку; провал любого = провал всей последовательности
    Seq(Vec<GoalStructure>),
}

pub fn leaf<P>(name: impl Into<String>, predicate: P, tactic: Tactic) -> GoalStructure
where
    P: Fn(&AgentBeliefState) -> bool + Send + Sync + 'static,
{
    Goal::new(name).to_solve(predicate).with_tactic(tactic).lift()
}

pub fn seq(children: impl IntoIterator<Item = GoalStructure>) -> GoalStructure {
    GoalStructure::Seq(children.into_iter().collect())
}

impl GoalStructure {
    /// Leaf goals в порядке выполнения (depth-first)
    pub fn leaves(&self) -> Vec<&Goal> {
        match self {
            GoalStructure::Leaf(goal) => vec![goal],
            GoalStructure::Seq(children) => children.iter().flat_map(GoalStructure::leaves).collect(),
        }
    }

    pub fn leaf_names(&self) -> Vec<String> {
        self.leaves().iter().map(|goal| goal.name().to_string()).collect()
    }

    /// Каждый leaf может дойти до abort, solver не зависнет навсегда
    pub fn is_total(&self) -> bool {
        self.leaves().iter().all(|goal| goal.tactic().is_total())
    }
}
