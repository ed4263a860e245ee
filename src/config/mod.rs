use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::errors::ConfigError;

const CONFIG_ENV: &str = "FORMKIT_CONFIG";
const CONFIG_DIR_NAME: &str = "formkit";
const CONFIG_FILE_NAME: &str = "render.json";
const TMP_SUFFIX: &str = "tmp";

/// Presentation settings shared by both rendering strategies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub stylesheet_href: String,
    /// Lookup script referenced by the templated page; the fallback inlines it.
    pub script_href: String,
    /// View name handed to the template engine.
    pub view_name: String,
    pub lookup_debounce_ms: u64,
    pub submit_label: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            stylesheet_href: "/css/styles.css".into(),
            script_href: "/js/lookup-modal.js".into(),
            view_name: "screen".into(),
            lookup_debounce_ms: 180,
            submit_label: "Opslaan".into(),
        }
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Resolves `$FORMKIT_CONFIG`, falling back to the platform config dir.
    pub fn new() -> Self {
        let path = env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);
        Self { path }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the config; a missing file yields [`RenderConfig::default`].
    pub fn load(&self) -> Result<RenderConfig, ConfigError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(RenderConfig::default())
        }
    }

    pub fn save(&self, config: &RenderConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_synced(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(CONFIG_FILE_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_synced(path: &Path, data: &str) -> Result<(), ConfigError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
