//! GlassPlugin: владелец движка правил на время жизни плагина
//!
//! Создаётся хостом при загрузке и уничтожается при выгрузке. Хост вызывает
//! две точки входа: `on_render_trigger` на каждом проходе рендера для каждого
//! окна и `on_config_reload_trigger` при изменении конфигурации. Никакого
//! глобального состояния: хост держит плагин и передаёт ссылку туда, где она нужна.

use crate::config::ConfigSource;
use crate::error::Result;
use crate::events::{EffectParameters, RenderDecision, WindowInfo};
use crate::services::{EffectRenderer, NotificationSink, RuleEngine};
use std::sync::Arc;
use tracing::info;

pub const PLUGIN_NAME: &str = "glasswindow";
pub const PLUGIN_DESCRIPTION: &str = "Glass window effect plugin";
pub const PLUGIN_AUTHOR: &str = "purplelines";
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct GlassPlugin {
    engine: RuleEngine,
    source: Box<dyn ConfigSource>,
    renderer: Arc<dyn EffectRenderer>,
}

impl GlassPlugin {
    /// Загрузка плагина: движок создаётся пустым и сразу заполняется из источника
    pub fn load(
        source: Box<dyn ConfigSource>,
        sink: Arc<dyn NotificationSink>,
        renderer: Arc<dyn EffectRenderer>,
    ) -> Result<Self> {
        info!(
            "Загрузка {} v{} ({}, {})",
            PLUGIN_NAME, PLUGIN_VERSION, PLUGIN_DESCRIPTION, PLUGIN_AUTHOR
        );

        let plugin = Self {
            engine: RuleEngine::new(sink),
            source,
            renderer,
        };
        plugin.reload_from_source()?;

        Ok(plugin)
    }

    /// Вызывается хостом для каждого окна на каждом проходе рендера
    pub fn on_render_trigger(&self, window: &WindowInfo) -> RenderDecision {
        let decision = self.engine.classify(&window.title);
        if decision.apply {
            self.renderer.apply(window, decision.parameters);
        }
        decision
    }

    /// Вызывается хостом со всеми четырьмя значениями конфигурации сразу
    pub fn on_config_reload_trigger(&self, raw_rules: &str, parameters: EffectParameters) {
        self.engine.reload(raw_rules, parameters);
    }

    /// Перечитывает источник и применяет значения вместе.
    ///
    /// При ошибке источника остаётся прежнее состояние.
    pub fn reload_from_source(&self) -> Result<()> {
        let (raw_rules, parameters) = self.source.fetch()?;
        self.on_config_reload_trigger(&raw_rules, parameters);
        Ok(())
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }
}

impl Drop for GlassPlugin {
    fn drop(&mut self) {
        info!("{} выгружен", PLUGIN_NAME);
    }
}
