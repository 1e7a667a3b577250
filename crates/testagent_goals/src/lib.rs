//! Test-agent goal library
//!
//! Параметризованные goal structures для автономного test agent'а, который
//! гоняет симулированный 3D SUT:
//! - `goal_lib` - три типовые цели (подойти, провзаимодействовать, проверить инвариант)
//! - `goal` / `tactic` - predicate + tactic, `seq`, `first_of`, `abort`
//! - `solver` - кооперативный цикл (refresh belief → predicate → шаг tactic)
//! - `agent` - bevy host: `TestAgent` компонент + `GoalSolverPlugin`
//!
//! Сам SUT подключается через `tactic::Environment`.

use bevy::prelude::*;

pub mod agent;
pub mod belief;
pub mod config;
pub mod goal;
pub mod goal_lib;
pub mod logger;
pub mod solver;
pub mod tactic;
pub mod verdict;

#[cfg(test)]
mod test_support;

pub use agent::{drive_test_agents, GoalConcluded, GoalSolverPlugin, SutEnvironment, TestAgent};
pub use belief::{distance, AgentBeliefState, Observation, PropertyValue, WorldEntity};
pub use config::{ConfigError, SolverConfig};
pub use goal::{leaf, seq, Evaluation, Goal, GoalStructure};
pub use goal_lib::{
    entity_in_close_range, entity_interacted, entity_interacted_within, entity_invariant_checked,
    INTERACTION_DISTANCE, OBSERVATION_DISTANCE,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel};
pub use solver::{GoalSolver, GoalStatus, SolverError};
pub use tactic::{Action, Environment, EnvironmentError, Tactic};
pub use verdict::{VerdictEvent, VerdictLog};

/// Создаёт minimal Bevy App для headless прогона test agents
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .add_plugins(GoalSolverPlugin);

    app
}
