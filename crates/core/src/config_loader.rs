use crate::config::AppConfig;
use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads application configuration by merging a TOML file and
    /// `LOTTO_`-prefixed environment variables (`__` separates sections, e.g.
    /// `LOTTO_ENGINE__ALPHA=1.0`). Keys still missing are filled from a JSON
    /// file with the same stem, then from built-in defaults.
    ///
    /// Missing files are treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or an environment value cannot be parsed,
    /// or if the merged engine settings fail validation.
    pub fn load(path: impl AsRef<Path>) -> Result<AppConfig> {
        let config: AppConfig = Self::figment(path.as_ref())
            .extract()
            .context("failed to extract configuration")?;

        config.engine.validate()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Loads configuration with a profile overlay, `Config.<profile>.toml`,
    /// located next to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_with_profile(path: impl AsRef<Path>, profile: &str) -> Result<AppConfig> {
        let path = path.as_ref();
        let overlay = path.with_file_name(format!("Config.{profile}.toml"));

        let config: AppConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Toml::file(&overlay))
            .merge(Env::prefixed("LOTTO_").split("__"))
            .join(Json::file(path.with_extension("json")))
            .join(Serialized::defaults(AppConfig::default()))
            .extract()
            .with_context(|| format!("failed to extract configuration for profile {profile}"))?;

        config.engine.validate()?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("LOTTO_").split("__"))
            .join(Json::file(path.with_extension("json")))
            .join(Serialized::defaults(AppConfig::default()))
    }
}
