use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

impl Config {
    pub fn load_or_init() -> Result<Self> {
        Self::load_or_init_at(&Self::default_path())
    }

    /// Load `config_path`, writing a default file first if it does not exist.
    /// Env overrides are applied after the file is read and never persisted.
    pub fn load_or_init_at(config_path: &Path) -> Result<Self> {
        if let Some(dir) = config_path.parent()
            && !dir.exists()
        {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }

        let mut config = if config_path.exists() {
            let contents = fs::read_to_string(config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            config.config_path = config_path.to_path_buf();
            config
        } else {
            let config = Self {
                config_path: config_path.to_path_buf(),
                ..Self::default()
            };
            config.save()?;
            config
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&self.config_path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
