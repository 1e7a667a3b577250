//! WorldEntity - наблюдаемый объект SUT (дверь, NPC, кнопка).

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Значение свойства сущности (hp, isOpen, label...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Text(String),
}

impl PropertyValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Int тоже читается как float (hp часто приходит целым)
    pub fn as_float(&self) -> Option<f32> {
        match self {
            PropertyValue::Float(value) => Some(*value),
            PropertyValue::Int(value) => Some(*value as f32),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Объект в SUT, как его видит агент
///
/// Инвариант: `id` стабилен между наблюдениями, позиция - последняя увиденная.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldEntity {
    pub id: String,
    pub kind: String,
    pub position: Vec3,
    pub properties: HashMap<String, PropertyValue>,
}

impl WorldEntity {
    pub fn new(id: impl Into<String>, kind: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            position,
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    pub fn set_property(&mut self, name: impl Into<String>, value: PropertyValue) {
        self.properties.insert(name.into(), value);
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    pub fn int_property(&self, name: &str) -> Option<i64> {
        self.property(name).and_then(PropertyValue::as_int)
    }

    pub fn bool_property(&self, name: &str) -> Option<bool> {
        self.property(name).and_then(PropertyValue::as_bool)
    }
}
