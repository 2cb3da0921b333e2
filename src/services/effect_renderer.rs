use crate::debug_if_enabled;
use crate::events::{EffectParameters, WindowInfo};
use std::sync::atomic::{AtomicU64, Ordering};

/// Применение эффекта «стекла» к окну.
///
/// Шейдеры и размытие принадлежат хосту; ядро только решает, к какому окну
/// и с какими параметрами.
pub trait EffectRenderer: Send + Sync {
    fn apply(&self, window: &WindowInfo, parameters: EffectParameters);
}

/// Рендерер без реальной отрисовки: пишет в лог и считает применения
#[derive(Debug, Default)]
pub struct DryRunRenderer {
    applied: AtomicU64,
}

impl DryRunRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied_count(&self) -> u64 {
        self.applied.load(Ordering::Relaxed)
    }
}

impl EffectRenderer for DryRunRenderer {
    fn apply(&self, window: &WindowInfo, parameters: EffectParameters) {
        self.applied.fetch_add(1, Ordering::Relaxed);
        debug_if_enabled!("[DRY RUN] Эффект стекла для {}: {}", window, parameters);
    }
}
