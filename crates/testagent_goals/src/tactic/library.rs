//! Стандартные tactics для 3D SUT: navigate / explore / interact / observe.
//!
//! Сами алгоритмы движения живут в `Environment`, здесь только guards и
//! делегирование.

use crate::belief::AgentBeliefState;

use super::{Action, Environment, EnvironmentError, Tactic};

/// Двигаться к сущности; применимо только если её позиция известна
pub fn navigate_to_entity(entity_id: impl Into<String>) -> Tactic {
    let entity_id: String = entity_id.into();
    let guard_id = entity_id.clone();

    Action::new(
        format!("navigateTo({})", entity_id),
        move |belief: &AgentBeliefState, env: &mut dyn Environment| {
            let target = belief
                .get_entity(&entity_id)
                .ok_or_else(|| EnvironmentError::UnknownEntity(entity_id.clone()))?
                .position;
            env.move_toward(&belief.agent_id, target)
        },
    )
    .on(move |belief| belief.get_entity(&guard_id).is_some())
    .lift()
}

/// Исследовать мир; неприменимо когда SUT сообщил что исследовать нечего
pub fn explore() -> Tactic {
    Action::new("explore", |belief: &AgentBeliefState, env: &mut dyn Environment| {
        env.explore(&belief.agent_id)
    })
    .on(|belief| !belief.exploration_exhausted)
    .lift()
}

/// Interact; применимо только если SUT в последнем наблюдении разрешал interact
pub fn interact(entity_id: impl Into<String>) -> Tactic {
    let entity_id: String = entity_id.into();
    let guard_id = entity_id.clone();

    Action::new(
        format!("interact({})", entity_id),
        move |belief: &AgentBeliefState, env: &mut dyn Environment| env.interact(&belief.agent_id, &entity_id),
    )
    .on(move |belief| belief.can_interact(&guard_id))
    .lift()
}

/// Пассивное наблюдение: агент не двигается, solver обновит belief на следующем тике
pub fn observe() -> Tactic {
    Action::new("observe", |_: &AgentBeliefState, _: &mut dyn Environment| Ok(())).lift()
}

pub fn abort() -> Tactic {
    Tactic::Abort
}

pub fn first_of(options: impl IntoIterator<Item = Tactic>) -> Tactic {
    Tactic::FirstOf(options.into_iter().collect())
}
