//! Reference solver: кооперативный цикл для одного агента.
//!
//! Каждый тик:
//! 1. refresh belief из `Environment::observe`
//! 2. оценка активного leaf goal (invariant один раз для after-action goals)
//! 3. если не выполнен - один шаг tactic (или abort → Failed)
//!
//! Последовательности - явный state machine (индекс текущего ребёнка + статус),
//! так что хост может прервать/продолжить между тиками.

use thiserror::Error;

use crate::belief::AgentBeliefState;
use crate::config::SolverConfig;
use crate::goal::{Evaluation, Goal, GoalStructure};
use crate::tactic::{Environment, EnvironmentError, Selection};


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalStatus {
    InProgress,
    Success,
    /// Причина провала (abort, budget)
    Failed(String),
}

impl GoalStatus {
    pub fn is_concluded(&self) -> bool {
        !matches!(self, GoalStatus::InProgress)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GoalStatus::Success)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, GoalStatus::Failed(_))
    }
}

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("environment fault: {0}")]
    Environment(#[from] EnvironmentError),

    #[error("agent {0} has no goal assigned")]
    NoGoal(String),
}

struct LeafRun {
    goal: Goal,
    status: GoalStatus,
    /// Tactic выполнил хотя бы один action
    acted: bool,
    invariant_checked: bool,
    /// Тики, в которые leaf был активен
    ticks: u32,
}

impl LeafRun {
    /// `max_ticks_per_goal` превышен (тики с ошибкой SUT тоже считаются)
    fn budget_exhausted(&self, config: &SolverConfig) -> bool {
        config.max_ticks_per_goal.is_some_and(|budget| self.ticks > budget)
    }

    fn fail(&mut self, reason: &str) {
        crate::log_warning(&format!("Goal failed: {} ({})", self.goal.name(), reason));
        self.status = GoalStatus::Failed(format!("{}: {}", self.goal.name(), reason));
    }
}

enum Node {
    Leaf(LeafRun),
    Seq {
        children: Vec<Node>,
        current: usize,
        status: GoalStatus,
    },
}

impl Node {
    fn from_structure(structure: GoalStructure) -> Self {
        match structure {
            GoalStructure::Leaf(goal) => Node::Leaf(LeafRun {
                goal,
                status: GoalStatus::InProgress,
                acted: false,
                invariant_checked: false,
                ticks: 0,
            }),
            GoalStructure::Seq(children) => {
                let mut node = Node::Seq {
                    children: children.into_iter().map(Node::from_structure).collect(),
                    current: 0,
                    status: GoalStatus::InProgress,
                };
                // пустая последовательность выполнена сразу
                node.settle();
                node
            }
        }
    }

    fn status(&self) -> &GoalStatus {
        match self {
            Node::Leaf(leaf) => &leaf.status,
            Node::Seq { status, .. } => status,
        }
    }

    fn active_leaf(&mut self) -> Option<&mut LeafRun> {
        match self {
            Node::Leaf(leaf) if !leaf.status.is_concluded() => Some(leaf),
            Node::Leaf(_) => None,
            Node::Seq { children, current, status } => {
                if status.is_concluded() {
                    return None;
                }
                children.get_mut(*current)?.active_leaf()
            }
        }
    }

    fn active_leaf_ref(&self) -> Option<&LeafRun> {
        match self {
            Node::Leaf(leaf) if !leaf.status.is_concluded() => Some(leaf),
            Node::Leaf(_) => None,
            Node::Seq { children, current, status } => {
                if status.is_concluded() {
                    return None;
                }
                children.get(*current)?.active_leaf_ref()
            }
        }
    }

    /// Пересчитывает статусы последовательностей снизу вверх.
    /// Переход к следующему ребёнку только из Success, любой Failed - провал (без backtracking).
    fn settle(&mut self) {
        let Node::Seq { children, current, status } = self else {
            return;
        };
        if status.is_concluded() {
            return;
        }

        while let Some(child) = children.get_mut(*current) {
            child.settle();
            match child.status() {
                GoalStatus::Success => *current += 1,
                GoalStatus::Failed(reason) => {
                    *status = GoalStatus::Failed(reason.clone());
                    return;
                }
                GoalStatus::InProgress => return,
            }
        }
        *status = GoalStatus::Success;
    }
}

/// Solver одной goal structure
pub struct GoalSolver {
    root: Node,
    config: SolverConfig,
    ticks: u64,
    /// Имена успешно выполненных actions, по порядку
    trace: Vec<String>,
}

impl GoalSolver {
    pub fn new(goal: GoalStructure, config: SolverConfig) -> Self {
        Self {
            root: Node::from_structure(goal),
            config,
            ticks: 0,
            trace: Vec::new(),
        }
    }

    pub fn status(&self) -> GoalStatus {
        self.root.status().clone()
    }

    pub fn is_concluded(&self) -> bool {
        self.root.status().is_concluded()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    pub fn active_goal_name(&self) -> Option<&str> {
        self.root.active_leaf_ref().map(|leaf| leaf.goal.name())
    }

    /// Один цикл решения. Ошибки SUT пробрасываются, провал goal - это статус.
    pub fn tick(&mut self, belief: &mut AgentBeliefState, env: &mut dyn Environment) -> Result<GoalStatus, SolverError> {
        if self.is_concluded() {
            return Ok(self.status());
        }

        self.ticks += 1;

        let Some(leaf) = self.root.active_leaf() else {
            return Ok(self.status());
        };

        if leaf.ticks == 0 {
            crate::log(&format!("Goal activated: {}", leaf.goal.name()));
        }
        leaf.ticks += 1;

        // тик с упавшим observe тоже расходует budget
        let observation = match env.observe(&belief.agent_id) {
            Ok(observation) => observation,
            Err(err) if leaf.budget_exhausted(&self.config) => {
                crate::log_error(&format!("Goal {}: observe failed: {}", leaf.goal.name(), err));
                leaf.fail("budget exhausted");
                self.root.settle();
                return Ok(self.status());
            }
            Err(err) => return Err(err.into()),
        };
        belief.update(observation);

        let ready = leaf.goal.evaluation() == Evaluation::Eager || leaf.acted;
        if ready {
            if leaf.acted && !leaf.invariant_checked {
                if let Some(invariant) = leaf.goal.invariant_check() {
                    invariant.check(belief);
                }
                leaf.invariant_checked = true;
            }

            if leaf.goal.is_satisfied(belief) {
                crate::log_info(&format!("Goal satisfied: {}", leaf.goal.name()));
                leaf.status = GoalStatus::Success;
                self.root.settle();
                return Ok(self.status());
            }
        }

        if leaf.budget_exhausted(&self.config) {
            leaf.fail("budget exhausted");
            self.root.settle();
            return Ok(self.status());
        }

        match leaf.goal.tactic().select(belief) {
            Selection::Abort => leaf.fail("aborted"),
            Selection::NoneApplicable => {
                crate::log_warning(&format!("Goal stalled: {} (no applicable action)", leaf.goal.name()));
            }
            Selection::Act(action) => {
                if self.config.log_tactic_selection {
                    crate::log(&format!("{} → {}", leaf.goal.name(), action.name()));
                }
                action.execute(belief, env)?;
                self.trace.push(action.name().to_string());
                leaf.acted = true;
            }
        }

        self.root.settle();
        Ok(self.status())
    }

    /// Тикает пока goal не завершится или не кончатся `max_ticks`
    pub fn run_to_completion(
        &mut self,
        belief: &mut AgentBeliefState,
        env: &mut dyn Environment,
        max_ticks: u64,
    ) -> Result<GoalStatus, SolverError> {
        for _ in 0..max_ticks {
            if self.tick(belief, env)?.is_concluded() {
                break;
            }
        }
        Ok(self.status())
    }
}
