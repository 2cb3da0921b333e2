use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_STRENGTH: f32 = 0.7;
pub const DEFAULT_CHROMATIC_ABERRATION: f32 = 0.0;
pub const DEFAULT_OPACITY: f32 = 0.9;

/// Параметры эффекта «стекла».
///
/// Неизменяемый снимок: при перезагрузке заменяется целиком, поля по отдельности
/// никогда не меняются.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectParameters {
    pub strength: f32,
    pub chromatic_aberration: f32,
    pub opacity: f32,
}

impl EffectParameters {
    pub fn new(strength: f32, chromatic_aberration: f32, opacity: f32) -> Self {
        Self {
            strength,
            chromatic_aberration,
            opacity,
        }
    }
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self::new(DEFAULT_STRENGTH, DEFAULT_CHROMATIC_ABERRATION, DEFAULT_OPACITY)
    }
}

impl fmt::Display for EffectParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "strength={:.2} chromatic_aberration={:.2} opacity={:.2}",
            self.strength, self.chromatic_aberration, self.opacity
        )
    }
}

/// Решение для одного окна на одном проходе рендера.
///
/// Оба поля взяты из одного и того же снимка состояния движка.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderDecision {
    pub apply: bool,
    pub parameters: EffectParameters,
}
