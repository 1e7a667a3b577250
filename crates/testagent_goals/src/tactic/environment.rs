//! Environment - интерфейс к SUT, через который действуют tactics.
//!
//! Реализация (навигация, exploration, interaction) принадлежит SUT-адаптеру,
//! goal library знает только эти четыре операции.

use bevy::math::Vec3;
use thiserror::Error;

use crate::belief::Observation;

/// Ошибки SUT при выполнении действия
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvironmentError {
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    #[error("entity {0} is not present in the SUT")]
    UnknownEntity(String),

    #[error("entity {entity_id} is out of reach ({distance:.2} > {reach:.2})")]
    OutOfReach {
        entity_id: String,
        distance: f32,
        reach: f32,
    },

    #[error("action rejected by the SUT: {0}")]
    Rejected(String),
}

pub trait Environment {
    /// Текущее наблюдение агента (позиция + видимые сущности)
    fn observe(&mut self, agent_id: &str) -> Result<Observation, EnvironmentError>;

    /// Один шаг навигации к точке
    fn move_toward(&mut self, agent_id: &str, target: Vec3) -> Result<(), EnvironmentError>;

    /// Один шаг исследования неизвестной территории
    fn explore(&mut self, agent_id: &str) -> Result<(), EnvironmentError>;

    fn interact(&mut self, agent_id: &str, entity_id: &str) -> Result<(), EnvironmentError>;
}
