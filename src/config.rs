use crate::error::Result as GlassResult;
use crate::events::effect::{
    DEFAULT_CHROMATIC_ABERRATION, DEFAULT_OPACITY, DEFAULT_STRENGTH,
};
use crate::events::EffectParameters;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Правило по умолчанию: эффект для всех окон
pub const DEFAULT_RULES: &str = ".*";

/// Префикс переменных окружения, вложенность через `__`
/// (например `GLASSWINDOW_PLUGIN__GLASSWINDOW__OPACITY=0.5`)
pub const ENV_PREFIX: &str = "GLASSWINDOW_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    pub plugin: PluginConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Секция `[plugin]`, повторяет пространство ключей хоста `plugin:glasswindow:*`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct PluginConfig {
    pub glasswindow: GlassWindowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GlassWindowConfig {
    /// Регулярные выражения через `;`
    pub rules: String,
    pub strength: f32,
    pub chromatic_aberration: f32,
    pub opacity: f32,
}

impl Default for GlassWindowConfig {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.to_string(),
            strength: DEFAULT_STRENGTH,
            chromatic_aberration: DEFAULT_CHROMATIC_ABERRATION,
            opacity: DEFAULT_OPACITY,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::new()
            .merge(Toml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    /// Синтаксис правил здесь не проверяется: ошибочные сегменты отбрасывает движок
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        let glass = &self.plugin.glasswindow;

        if !glass.strength.is_finite() || glass.strength < 0.0 {
            anyhow::bail!("strength должно быть неотрицательным числом: {}", glass.strength);
        }

        if !glass.chromatic_aberration.is_finite() || glass.chromatic_aberration < 0.0 {
            anyhow::bail!(
                "chromatic_aberration должно быть неотрицательным числом: {}",
                glass.chromatic_aberration
            );
        }

        if !(0.0..=1.0).contains(&glass.opacity) {
            anyhow::bail!("opacity должно быть в диапазоне [0, 1]: {}", glass.opacity);
        }

        Ok(())
    }

    pub fn rules(&self) -> &str {
        &self.plugin.glasswindow.rules
    }

    /// Снимок параметров эффекта
    pub fn effect_parameters(&self) -> EffectParameters {
        let glass = &self.plugin.glasswindow;
        EffectParameters::new(glass.strength, glass.chromatic_aberration, glass.opacity)
    }
}

/// Источник четырёх значений конфигурации плагина.
///
/// Все четыре значения читаются вместе при каждой перезагрузке.
pub trait ConfigSource: Send + Sync {
    fn fetch(&self) -> GlassResult<(String, EffectParameters)>;
}

/// Перечитывает файл и окружение при каждом вызове
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    path: PathBuf,
}

impl FileConfigSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigSource for FileConfigSource {
    fn fetch(&self) -> GlassResult<(String, EffectParameters)> {
        let config = Config::load(&self.path)?;
        Ok((config.rules().to_string(), config.effect_parameters()))
    }
}

/// Фиксированные значения, например уже полученные от хоста
#[derive(Debug, Clone)]
pub struct StaticConfigSource {
    rules: String,
    parameters: EffectParameters,
}

impl StaticConfigSource {
    pub fn new(rules: impl Into<String>, parameters: EffectParameters) -> Self {
        Self {
            rules: rules.into(),
            parameters,
        }
    }
}

impl Default for StaticConfigSource {
    fn default() -> Self {
        Self::new(DEFAULT_RULES, EffectParameters::default())
    }
}

impl ConfigSource for StaticConfigSource {
    fn fetch(&self) -> GlassResult<(String, EffectParameters)> {
        Ok((self.rules.clone(), self.parameters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rules(), ".*");
        assert_eq!(config.effect_parameters(), EffectParameters::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.plugin.glasswindow.opacity = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.plugin.glasswindow.strength = -0.1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.plugin.glasswindow.chromatic_aberration = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rule_text_is_not_a_config_error() {
        let mut config = Config::default();
        config.plugin.glasswindow.rules = "(broken;kitty".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config = Config::load("missing.toml").expect("конфигурация по умолчанию");
            assert_eq!(config.rules(), DEFAULT_RULES);
            assert_eq!(config.effect_parameters(), EffectParameters::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_and_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "glasswindow.toml",
                r#"
                [logging]
                level = "debug"

                [plugin.glasswindow]
                rules = "kitty;firefox"
                strength = 0.5
                "#,
            )?;
            jail.set_env("GLASSWINDOW_PLUGIN__GLASSWINDOW__OPACITY", "0.25");

            let config = Config::load("glasswindow.toml").expect("конфигурация загружается");
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.rules(), "kitty;firefox");
            assert_eq!(
                config.effect_parameters(),
                EffectParameters::new(0.5, 0.0, 0.25)
            );
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_out_of_range_opacity() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "glasswindow.toml",
                r#"
                [plugin.glasswindow]
                opacity = 2.0
                "#,
            )?;
            assert!(Config::load("glasswindow.toml").is_err());
            Ok(())
        });
    }

    #[test]
    fn test_file_source_refetches_every_call() {
        Jail::expect_with(|jail| {
            jail.create_file("glasswindow.toml", "[plugin.glasswindow]\nrules = \"one\"\n")?;
            let source = FileConfigSource::new("glasswindow.toml");
            let (rules, _) = source.fetch().expect("первое чтение");
            assert_eq!(rules, "one");

            jail.create_file(
                "glasswindow.toml",
                "[plugin.glasswindow]\nrules = \"two\"\nstrength = 1.0\n",
            )?;
            let (rules, params) = source.fetch().expect("второе чтение");
            assert_eq!(rules, "two");
            assert_eq!(params.strength, 1.0);
            Ok(())
        });
    }

    #[test]
    fn test_static_source() {
        let params = EffectParameters::new(0.1, 0.2, 0.3);
        let source = StaticConfigSource::new("a;b", params);
        let (rules, fetched) = source.fetch().unwrap();
        assert_eq!(rules, "a;b");
        assert_eq!(fetched, params);
    }
}
