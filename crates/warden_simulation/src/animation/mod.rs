//! Animation: контракт animation sink + headless таблица параметров
//!
//! Контроллер пишет только именованные параметры (float/trigger).
//! Блендинг/state graph: забота хоста.

pub mod parameters;

pub use parameters::AnimatorParameters;

/// Приёмник параметров анимации (Animator, AnimationTree, ...)
pub trait AnimationSink {
    fn set_float(&mut self, name: &str, value: f32);

    /// Неизвестный параметр → 0.0
    fn get_float(&self, name: &str) -> f32;

    fn trigger(&mut self, name: &str);

    fn has_parameter(&self, name: &str) -> bool;
}
