//! Симулированный 3D SUT для интеграционных тестов.
//!
//! - агент видит сущности в радиусе `view_radius`
//! - `move_toward` - шаг не длиннее `speed`
//! - `explore` - прыжок к следующему waypoint'у (когда кончились - exhausted)
//! - `interact` - переключает `isOpen` и считает `interactions`, только в радиусе `reach`
//!   (observe сообщает такие сущности как interactable)

#![allow(dead_code)]

use std::collections::HashMap;

use bevy::math::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use testagent_goals::{Environment, EnvironmentError, Observation, PropertyValue, WorldEntity};

pub struct SimulatedSut {
    pub agents: HashMap<String, Vec3>,
    pub entities: Vec<WorldEntity>,
    pub waypoints: Vec<Vec3>,
    pub view_radius: f32,
    pub speed: f32,
    pub reach: f32,
    /// Журнал вызовов: "move", "explore", "interact(<id>)@<distance>"
    pub calls: Vec<String>,
}

impl SimulatedSut {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
            entities: Vec::new(),
            waypoints: Vec::new(),
            view_radius: 5.0,
            speed: 1.0,
            reach: 0.5,
            calls: Vec::new(),
        }
    }

    pub fn with_agent(mut self, id: &str, position: Vec3) -> Self {
        self.agents.insert(id.to_string(), position);
        self
    }

    pub fn with_entity(mut self, entity: WorldEntity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_waypoints(mut self, waypoints: impl IntoIterator<Item = Vec3>) -> Self {
        self.waypoints.extend(waypoints);
        self
    }

    pub fn with_reach(mut self, reach: f32) -> Self {
        self.reach = reach;
        self
    }

    pub fn with_view_radius(mut self, view_radius: f32) -> Self {
        self.view_radius = view_radius;
        self
    }

    /// Waypoints на плоскости y=0 в квадрате [-extent, extent], порядок задаёт seed
    pub fn with_random_waypoints(mut self, seed: u64, count: usize, extent: f32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..count {
            let x = rng.gen_range(-extent..=extent);
            let z = rng.gen_range(-extent..=extent);
            self.waypoints.push(Vec3::new(x, 0.0, z));
        }
        self
    }

    pub fn entity(&self, id: &str) -> Option<&WorldEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn agent_position(&self, id: &str) -> Option<Vec3> {
        self.agents.get(id).copied()
    }

    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn position_mut(&mut self, agent_id: &str) -> Result<&mut Vec3, EnvironmentError> {
        self.agents
            .get_mut(agent_id)
            .ok_or_else(|| EnvironmentError::UnknownAgent(agent_id.to_string()))
    }
}

impl Environment for SimulatedSut {
    fn observe(&mut self, agent_id: &str) -> Result<Observation, EnvironmentError> {
        let position = self
            .agent_position(agent_id)
            .ok_or_else(|| EnvironmentError::UnknownAgent(agent_id.to_string()))?;
        let entities = self
            .entities
            .iter()
            .filter(|e| e.position.distance(position) <= self.view_radius)
            .cloned()
            .collect();

        let interactable = self
            .entities
            .iter()
            .filter(|e| e.position.distance(position) <= self.reach)
            .map(|e| e.id.clone())
            .collect();

        Ok(Observation {
            position,
            entities,
            exploration_exhausted: self.waypoints.is_empty(),
            interactable,
        })
    }

    fn move_toward(&mut self, agent_id: &str, target: Vec3) -> Result<(), EnvironmentError> {
        let speed = self.speed;
        let position = self.position_mut(agent_id)?;
        let offset = target - *position;
        if offset.length() <= speed {
            *position = target;
        } else {
            *position += offset.normalize() * speed;
        }
        self.calls.push("move".to_string());
        Ok(())
    }

    fn explore(&mut self, agent_id: &str) -> Result<(), EnvironmentError> {
        if self.waypoints.is_empty() {
            return Err(EnvironmentError::Rejected("nothing left to explore".to_string()));
        }
        let next = self.waypoints.remove(0);
        *self.position_mut(agent_id)? = next;
        self.calls.push("explore".to_string());
        Ok(())
    }

    fn interact(&mut self, agent_id: &str, entity_id: &str) -> Result<(), EnvironmentError> {
        let position = self
            .agent_position(agent_id)
            .ok_or_else(|| EnvironmentError::UnknownAgent(agent_id.to_string()))?;
        let reach = self.reach;
        let entity = self
            .entities
            .iter_mut()
            .find(|e| e.id == entity_id)
            .ok_or_else(|| EnvironmentError::UnknownEntity(entity_id.to_string()))?;

        let distance = entity.position.distance(position);
        if distance > reach {
            return Err(EnvironmentError::OutOfReach {
                entity_id: entity_id.to_string(),
                distance,
                reach,
            });
        }

        let is_open = entity.bool_property("isOpen").unwrap_or(false);
        let interactions = entity.int_property("interactions").unwrap_or(0);
        entity.set_property("isOpen", PropertyValue::Bool(!is_open));
        entity.set_property("interactions", PropertyValue::Int(interactions + 1));

        self.calls.push(format!("interact({})@{:.2}", entity_id, distance));
        Ok(())
    }
}

pub fn door(id: &str, position: Vec3) -> WorldEntity {
    WorldEntity::new(id, "Door", position).with_property("isOpen", PropertyValue::Bool(false))
}

pub fn npc(id: &str, position: Vec3, hp: i64) -> WorldEntity {
    WorldEntity::new(id, "Npc", position).with_property("hp", PropertyValue::Int(hp))
}
