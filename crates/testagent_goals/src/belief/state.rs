//! AgentBeliefState + Observation merge.

use bevy::math::Vec3;
use std::collections::{HashMap, HashSet};

use super::entity::WorldEntity;

/// Euclidean distance в 3D
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}

/// Снимок того, что SUT отдал агенту за один observe
#[derive(Debug, Clone, Default)]
pub struct Observation {
    pub position: Vec3,
    pub entities: Vec<WorldEntity>,
    /// SUT сообщает что неисследованных зон не осталось
    pub exploration_exhausted: bool,
    /// Id сущностей, с которыми SUT сейчас разрешает interact
    pub interactable: HashSet<String>,
}

/// Belief агента
///
/// Сущности, однажды увиденные, остаются в belief с последней известной
/// позицией (даже если сейчас вне поля зрения). Отсутствие в map = ещё не видели.
#[derive(Debug, Clone, Default)]
pub struct AgentBeliefState {
    pub agent_id: String,
    pub position: Vec3,
    pub exploration_exhausted: bool,
    entities: HashMap<String, WorldEntity>,
    interactable: HashSet<String>,
    observations: u64,
}

impl AgentBeliefState {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_entity(mut self, entity: WorldEntity) -> Self {
        self.insert_entity(entity);
        self
    }

    pub fn insert_entity(&mut self, entity: WorldEntity) {
        self.entities.insert(entity.id.clone(), entity);
    }

    pub fn get_entity(&self, id: &str) -> Option<&WorldEntity> {
        self.entities.get(id)
    }

    pub fn with_interactable(mut self, id: impl Into<String>) -> Self {
        self.interactable.insert(id.into());
        self
    }

    /// SUT в последнем наблюдении разрешал interact с сущностью
    pub fn can_interact(&self, id: &str) -> bool {
        self.interactable.contains(id)
    }

    pub fn known_entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Сколько раз belief обновлялся из SUT
    pub fn observation_count(&self) -> u64 {
        self.observations
    }

    /// Расстояние агент → сущность, `None` если сущность неизвестна
    pub fn distance_to(&self, id: &str) -> Option<f32> {
        self.get_entity(id).map(|e| distance(self.position, e.position))
    }

    /// Merge наблюдения: позиция, флаг и interactable заменяются, сущности upsert'ятся
    pub fn update(&mut self, observation: Observation) {
        self.position = observation.position;
        self.exploration_exhausted = observation.exploration_exhausted;
        self.interactable = observation.interactable;
        for entity in observation.entities {
            self.insert_entity(entity);
        }
        self.observations += 1;
    }
}
