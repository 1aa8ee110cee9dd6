//! Interpreters and attackers offered by model endpoints

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Saliency interpreters available on `/interpret/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpreterId {
    SimpleGradient,
    SmoothGradient,
    IntegratedGradient,
}

impl InterpreterId {
    pub const ALL: [InterpreterId; 3] = [
        Self::SimpleGradient,
        Self::SmoothGradient,
        Self::IntegratedGradient,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SimpleGradient => "simple_gradient",
            Self::SmoothGradient => "smooth_gradient",
            Self::IntegratedGradient => "integrated_gradient",
        }
    }
}

impl FromStr for InterpreterId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| DomainError::not_found(format!("No interpreter with id {}", s)))
    }
}

impl fmt::Display for InterpreterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Adversarial attackers available on `/attack/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackerId {
    Hotflip,
    InputReduction,
}

impl AttackerId {
    pub const ALL: [AttackerId; 2] = [Self::Hotflip, Self::InputReduction];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hotflip => "hotflip",
            Self::InputReduction => "input_reduction",
        }
    }
}

impl FromStr for AttackerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| DomainError::not_found(format!("No attacker with id {}", s)))
    }
}

impl fmt::Display for AttackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpreter_parse() {
        assert_eq!(
            "simple_gradient".parse::<InterpreterId>().unwrap(),
            InterpreterId::SimpleGradient
        );
        assert_eq!(
            "integrated_gradient".parse::<InterpreterId>().unwrap(),
            InterpreterId::IntegratedGradient
        );
    }

    #[test]
    fn test_unknown_interpreter() {
        let err = "lime".parse::<InterpreterId>().unwrap_err();
        assert_eq!(err.to_string(), "Not found: No interpreter with id lime");
    }

    #[test]
    fn test_attacker_parse() {
        assert_eq!("hotflip".parse::<AttackerId>().unwrap(), AttackerId::Hotflip);
        assert_eq!(
            "input_reduction".parse::<AttackerId>().unwrap(),
            AttackerId::InputReduction
        );
        assert!("fgsm".parse::<AttackerId>().is_err());
    }

    #[test]
    fn test_serde_names_match_path_ids() {
        for id in InterpreterId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
        for id in AttackerId::ALL {
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.as_str()));
        }
    }
}
