//! AnimatorParameters: in-memory параметры аниматора для headless хоста.

use std::collections::{BTreeMap, BTreeSet};

use super::AnimationSink;
use crate::logger;

/// Набор объявленных параметров + состояние триггеров
///
/// Как у движкового аниматора:
/// - писать можно только в объявленные параметры (иначе warning и игнор)
/// - trigger "защёлкивается" до consume_trigger()
#[derive(Debug, Clone, Default)]
pub struct AnimatorParameters {
    floats: BTreeMap<String, f32>,
    /// trigger name → latched
    triggers: BTreeMap<String, bool>,
    /// История всех сработавших триггеров (по порядку)
    fired: Vec<String>,
    /// Неизвестные имена, про которые уже предупредили
    warned: BTreeSet<String>,
}

impl AnimatorParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_float(mut self, name: &str, value: f32) -> Self {
        self.floats.insert(name.to_string(), value);
        self
    }

    pub fn with_trigger(mut self, name: &str) -> Self {
        self.triggers.insert(name.to_string(), false);
        self
    }

    /// Стандартный набор: "Speed" + триггеры Attack1..AttackN
    pub fn locomotion_with_attacks(speed_parameter: &str, attack_prefix: &str, attacks: u32) -> Self {
        (1..=attacks).fold(Self::new().with_float(speed_parameter, 0.0), |params, index| {
            params.with_trigger(&format!("{}{}", attack_prefix, index))
        })
    }

    pub fn is_triggered(&self, name: &str) -> bool {
        self.triggers.get(name).copied().unwrap_or(false)
    }

    /// Сбросить trigger (анимационный граф "съел" его); true если был взведён
    pub fn consume_trigger(&mut self, name: &str) -> bool {
        match self.triggers.get_mut(name) {
            Some(latched) if *latched => {
                *latched = false;
                true
            }
            _ => false,
        }
    }

    /// Имена взведённых триггеров
    pub fn latched_triggers(&self) -> Vec<String> {
        self.triggers
            .iter()
            .filter(|(_, latched)| **latched)
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn fired_triggers(&self) -> &[String] {
        &self.fired
    }

    fn warn_unknown(&mut self, name: &str) {
        if self.warned.insert(name.to_string()) {
            logger::log_warning(&format!("Animator: parameter \"{}\" does not exist", name));
        }
    }
}

impl AnimationSink for AnimatorParameters {
    fn set_float(&mut self, name: &str, value: f32) {
        match self.floats.get_mut(name) {
            Some(slot) => *slot = value,
            None => self.warn_unknown(name),
        }
    }

    fn get_float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    fn trigger(&mut self, name: &str) {
        match self.triggers.get_mut(name) {
            Some(latched) => {
                *latched = true;
                self.fired.push(name.to_string());
            }
            None => self.warn_unknown(name),
        }
    }

    fn has_parameter(&self, name: &str) -> bool {
        self.floats.contains_key(name) || self.triggers.contains_key(name)
    }
}
