//! glasswindow: выбор окон композитора для эффекта «стекла»
//!
//! Строка правил из конфигурации (`;`-разделённые регулярные выражения)
//! компилируется в набор регистронезависимых правил. Хост на каждом проходе
//! рендера спрашивает, применять ли эффект к окну, и получает снимок
//! параметров эффекта. Перезагрузка конфигурации атомарно заменяет правила
//! и параметры, даже если рендер идёт в другом потоке.

pub mod config;
pub mod error;
pub mod events;
pub mod plugin;
pub mod rules;
pub mod services;
mod utils;

pub use config::{Config, ConfigSource, FileConfigSource, StaticConfigSource};
pub use error::{GlassError, Result, RuleCompileError};
pub use events::{EffectParameters, Notification, RenderDecision, WindowInfo};
pub use plugin::GlassPlugin;
pub use services::RuleEngine;
