//! Scripted SUT для unit-тестов: всё видно сразу, explore открывает
//! заранее заданные сущности по одной, каждый вызов пишется в `calls`.

use bevy::math::Vec3;

use crate::belief::{Observation, WorldEntity};
use crate::tactic::{Environment, EnvironmentError};

pub(crate) struct ScriptedEnvironment {
    pub position: Vec3,
    pub visible: Vec<WorldEntity>,
    pub hidden: Vec<WorldEntity>,
    pub step: f32,
    pub reach: f32,
    pub calls: Vec<String>,
    /// observe падает (SUT недоступен)
    pub offline: bool,
}

impl ScriptedEnvironment {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            visible: Vec::new(),
            hidden: Vec::new(),
            step: 1.0,
            reach: 0.5,
            calls: Vec::new(),
            offline: false,
        }
    }

    pub fn with_visible(mut self, entity: WorldEntity) -> Self {
        self.visible.push(entity);
        self
    }

    /// Сущность появится после следующего explore
    pub fn with_hidden(mut self, entity: WorldEntity) -> Self {
        self.hidden.push(entity);
        self
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }
}

impl Environment for ScriptedEnvironment {
    fn observe(&mut self, _agent_id: &str) -> Result<Observation, EnvironmentError> {
        if self.offline {
            return Err(EnvironmentError::Rejected("SUT offline".to_string()));
        }
        let interactable = self
            .visible
            .iter()
            .filter(|e| e.position.distance(self.position) <= self.reach)
            .map(|e| e.id.clone())
            .collect();

        Ok(Observation {
            position: self.position,
            entities: self.visible.clone(),
            exploration_exhausted: self.hidden.is_empty(),
            interactable,
        })
    }

    fn move_toward(&mut self, _agent_id: &str, target: Vec3) -> Result<(), EnvironmentError> {
        self.calls.push(format!("move_toward({:?})", target));
        let offset = target - self.position;
        if offset.length() <= self.step {
            self.position = target;
        } else {
            self.position += offset.normalize() * self.step;
        }
        Ok(())
    }

    fn explore(&mut self, _agent_id: &str) -> Result<(), EnvironmentError> {
        self.calls.push("explore".to_string());
        if !self.hidden.is_empty() {
            let revealed = self.hidden.remove(0);
            self.visible.push(revealed);
        }
        Ok(())
    }

    fn interact(&mut self, _agent_id: &str, entity_id: &str) -> Result<(), EnvironmentError> {
        self.calls.push(format!("interact({})", entity_id));
        let entity = self
            .visible
            .iter()
            .find(|e| e.id == entity_id)
            .ok_or_else(|| EnvironmentError::UnknownEntity(entity_id.to_string()))?;
        let distance = self.position.distance(entity.position);
        if distance > self.reach {
            return Err(EnvironmentError::OutOfReach {
                entity_id: entity_id.to_string(),
                distance,
                reach: self.reach,
            });
        }
        Ok(())
    }
}
