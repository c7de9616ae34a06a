//! Ошибки AI контроллеров и конфигурации
//!
//! Таксономия:
//! - MissingComponent / OffNavigationMesh: фатально для инстанса (контроллер отключается)
//! - TargetUnavailable: recoverable, повторяем поиск каждый тик
//! - UnmappedAnimationParameter: игнорируем, максимум debug лог

use bevy::prelude::Vec3;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AiError {
    #[error("missing required component: {component}")]
    MissingComponent { component: &'static str },

    #[error("no navigable point within {radius}m of {position}")]
    OffNavigationMesh { position: Vec3, radius: f32 },

    #[error("no actor tagged \"{tag}\"")]
    TargetUnavailable { tag: String },

    #[error("animation parameter \"{name}\" is not defined")]
    UnmappedAnimationParameter { name: String },
}

impl AiError {
    /// Фатальные ошибки отключают контроллер навсегда
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AiError::MissingComponent { .. } | AiError::OffNavigationMesh { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite non-negative number, got {value}")]
    InvalidValue { field: &'static str, value: f32 },

    #[error("attack_range ({attack}) exceeds detection_range ({detection})")]
    AttackBeyondDetection { attack: f32, detection: f32 },

    #[error("attack_variants must be at least 1")]
    NoAttackVariants,

    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },

    #[error("failed to parse RON config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("failed to serialize RON config: {0}")]
    Serialize(#[from] ron::Error),
}
