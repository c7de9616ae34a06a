//! EnemyAiConfig: tunable параметры enemy AI (RON-friendly).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Параметры AI контроллера
///
/// Все поля имеют default: в RON можно указывать только отличия.
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyAiConfig {
    /// Радиус обнаружения цели (метры)
    pub detection_range: f32,
    /// Радиус атаки (метры)
    pub attack_range: f32,
    /// Минимальный интервал между атаками (секунды)
    pub attack_cooldown: f32,
    /// Скорость патруля (м/с)
    pub walk_speed: f32,
    /// Скорость погони (м/с)
    pub run_speed: f32,
    /// Количество вариантов атаки (триггеры Attack1..AttackN)
    pub attack_variants: u32,

    /// Тег цели для ActorLookup
    pub target_tag: String,
    /// Радиус поиска ближайшей точки NavMesh при старте
    pub navmesh_snap_radius: f32,
    /// Скорость сглаживания Speed параметра (× dt)
    pub speed_blend_rate: f32,
    /// Скорость поворота к цели (× dt)
    pub turn_rate: f32,
    /// Минимальная анимационная скорость пока путь считается
    pub pending_path_speed: f32,
    /// Ниже этой горизонтальной скорости агент считается стоящим
    pub idle_speed_threshold: f32,

    /// Имя float параметра скорости в аниматоре
    pub speed_parameter: String,
    /// Префикс триггеров атаки ("Attack" → Attack1, Attack2, ...)
    pub attack_trigger_prefix: String,
}

impl Default for EnemyAiConfig {
    fn default() -> Self {
        Self {
            detection_range: 15.0,
            attack_range: 2.0,
            attack_cooldown: 2.0,
            walk_speed: 2.0,
            run_speed: 5.0,
            attack_variants: 3,
            target_tag: "Player".to_string(),
            navmesh_snap_radius: 500.0,
            speed_blend_rate: 5.0,
            turn_rate: 5.0,
            pending_path_speed: 0.5,
            idle_speed_threshold: 0.1,
            speed_parameter: "Speed".to_string(),
            attack_trigger_prefix: "Attack".to_string(),
        }
    }
}

impl EnemyAiConfig {
    /// Имя триггера для варианта атаки (1-based)
    pub fn attack_trigger(&self, variant: u32) -> String {
        format!("{}{}", self.attack_trigger_prefix, variant)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("detection_range", self.detection_range),
            ("attack_range", self.attack_range),
            ("attack_cooldown", self.attack_cooldown),
            ("walk_speed", self.walk_speed),
            ("run_speed", self.run_speed),
            ("navmesh_snap_radius", self.navmesh_snap_radius),
            ("speed_blend_rate", self.speed_blend_rate),
            ("turn_rate", self.turn_rate),
            ("pending_path_speed", self.pending_path_speed),
            ("idle_speed_threshold", self.idle_speed_threshold),
        ];

        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if self.attack_range > self.detection_range {
            return Err(ConfigError::AttackBeyondDetection {
                attack: self.attack_range,
                detection: self.detection_range,
            });
        }

        if self.attack_variants == 0 {
            return Err(ConfigError::NoAttackVariants);
        }

        if self.target_tag.is_empty() {
            return Err(ConfigError::EmptyName { field: "target_tag" });
        }
        if self.speed_parameter.is_empty() {
            return Err(ConfigError::EmptyName { field: "speed_parameter" });
        }

        Ok(())
    }

    /// Парсинг + валидация
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }
}
