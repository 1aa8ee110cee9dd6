use std::fmt;

use crate::domain::model::{AttackerId, InterpreterId};

/// Work a model endpoint can perform on an input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelAction {
    Predict,
    Interpret(InterpreterId),
    Attack(AttackerId),
}

impl ModelAction {
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Predict => "predict",
            Self::Interpret(_) => "interpret",
            Self::Attack(_) => "attack",
        }
    }

    pub fn target(&self) -> Option<&'static str> {
        match self {
            Self::Predict => None,
            Self::Interpret(id) => Some(id.as_str()),
            Self::Attack(id) => Some(id.as_str()),
        }
    }

    /// Path of the action relative to the model's base URL
    pub fn path(&self) -> String {
        match self.target() {
            Some(target) => format!("{}/{}", self.verb(), target),
            None => self.verb().to_string(),
        }
    }
}

impl fmt::Display for ModelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
