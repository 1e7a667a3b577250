//! Bevy host для test agents.
//!
//! `TestAgent` - компонент (belief + goal solver + verdict log), SUT -
//! resource `SutEnvironment`. `drive_test_agents` тикает каждого агента
//! один раз за FixedUpdate и пересылает verdicts / завершения goals как events.

use bevy::prelude::*;

use crate::belief::AgentBeliefState;
use crate::config::SolverConfig;
use crate::goal::GoalStructure;
use crate::solver::{GoalSolver, GoalStatus, SolverError};
use crate::tactic::Environment;
use crate::verdict::{VerdictEvent, VerdictLog};


/// Test agent: belief о SUT, текущая goal structure, verdict log
#[derive(Component)]
pub struct TestAgent {
    id: String,
    belief: AgentBeliefState,
    solver: Option<GoalSolver>,
    verdicts: VerdictLog,
}

impl TestAgent {
    pub fn new(id: impl Into<String>) -> Self {
        let id: String = id.into();
        Self {
            belief: AgentBeliefState::new(id.clone()),
            id,
            solver: None,
            verdicts: VerdictLog::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn belief(&self) -> &AgentBeliefState {
        &self.belief
    }

    /// Handle на verdict log (клоны пишут в тот же log)
    pub fn verdicts(&self) -> VerdictLog {
        self.verdicts.clone()
    }

    /// Назначает новую goal structure, прежняя (если была) отбрасывается
    pub fn set_goal(&mut self, goal: GoalStructure, config: SolverConfig) {
        crate::log_info(&format!("Agent {}: new goal {:?}", self.id, goal.leaf_names()));
        self.solver = Some(GoalSolver::new(goal, config));
    }

    pub fn solver(&self) -> Option<&GoalSolver> {
        self.solver.as_ref()
    }

    pub fn goal_status(&self) -> Option<GoalStatus> {
        self.solver.as_ref().map(GoalSolver::status)
    }

    pub fn has_pending_goal(&self) -> bool {
        self.solver.as_ref().is_some_and(|solver| !solver.is_concluded())
    }

    /// Один тик solver'а против SUT
    pub fn update(&mut self, env: &mut dyn Environment) -> Result<GoalStatus, SolverError> {
        let solver = self
            .solver
            .as_mut()
            .ok_or_else(|| SolverError::NoGoal(self.id.clone()))?;
        solver.tick(&mut self.belief, env)
    }
}

/// SUT, к которому подключены агенты
#[derive(Resource)]
pub struct SutEnvironment(pub Box<dyn Environment + Send + Sync>);

impl SutEnvironment {
    pub fn new(env: impl Environment + Send + Sync + 'static) -> Self {
        Self(Box::new(env))
    }

    pub fn as_env(&mut self) -> &mut dyn Environment {
        self.0.as_mut()
    }
}

/// Goal structure агента завершилась (Success или Failed)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct GoalConcluded {
    pub agent: Entity,
    pub agent_id: String,
    pub status: GoalStatus,
}

/// Система: один тик solver'а для каждого агента с незавершённым goal
///
/// Агенты обрабатываются последовательно, SUT общий.
pub fn drive_test_agents(
    mut agents: Query<(Entity, &mut TestAgent)>,
    sut: Option<ResMut<SutEnvironment>>,
    mut verdict_events: EventWriter<VerdictEvent>,
    mut concluded_events: EventWriter<GoalConcluded>,
) {
    let Some(mut sut) = sut else {
        return;
    };

    for (entity, mut agent) in agents.iter_mut() {
        if !agent.has_pending_goal() {
            continue;
        }

        match agent.update(sut.as_env()) {
            Ok(status) if status.is_concluded() => {
                crate::log_info(&format!("Agent {}: goal concluded {:?}", agent.id(), status));
                concluded_events.write(GoalConcluded {
                    agent: entity,
                    agent_id: agent.id().to_string(),
                    status,
                });
            }
            Ok(_) => {}
            Err(err) => {
                crate::log_error(&format!("Agent {}: {}", agent.id(), err));
            }
        }

        for verdict in agent.verdicts().take_unreported() {
            verdict_events.write(verdict);
        }
    }
}

/// Регистрирует events, config и систему в FixedUpdate
pub struct GoalSolverPlugin;

impl Plugin for GoalSolverPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<VerdictEvent>()
            .add_event::<GoalConcluded>()
            .init_resource::<SolverConfig>()
            .add_systems(FixedUpdate, drive_test_agents);
    }
}
