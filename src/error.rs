use thiserror::Error;

/// Ошибка компиляции одного сегмента правил.
///
/// Не фатальна: сегмент отбрасывается, остальные правила перезагрузки сохраняются.
#[derive(Error, Debug, Clone)]
#[error("Неверное регулярное выражение '{segment}': {source}")]
pub struct RuleCompileError {
    pub segment: String,
    #[source]
    pub source: regex::Error,
}

#[derive(Error, Debug)]
pub enum GlassError {
    #[error(transparent)]
    RuleCompile(#[from] RuleCompileError),

    #[error("Ошибка конфигурации: {0}")]
    Config(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, GlassError>;

