use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::warn;

use crate::models::Switch;

pub mod inventory;
pub mod settings;

pub use inventory::{Inventory, SwitchDirectory};
pub use settings::{
    ConnectionSettings, DiscoverySettings, ProbeSettings, ServerSettings, Settings, VlanOids,
};

/// Путь к конфигурации по умолчанию
pub const DEFAULT_CONFIG_PATH: &str = "./config/netaccess.yaml";

/// Содержимое YAML файла
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    settings: Settings,
    switches: Vec<Switch>,
}

/// Главная конфигурация приложения
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Базовые настройки
    pub settings: Settings,
    /// Известные коммутаторы
    pub inventory: Inventory,
}

impl AppConfig {
    /// Загружает конфигурацию из YAML файла и применяет переменные окружения.
    /// Отсутствующий файл не ошибка: берутся значения по умолчанию.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.settings.apply_overrides(|key| env::var(key).ok());
        Ok(config)
    }

    /// Путь из `NETACCESS_CONFIG` или путь по умолчанию
    pub fn load_from_env() -> Result<Self> {
        let path = env::var("NETACCESS_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load(path)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Не удалось прочитать файл: {}", path.display()))?;
        Self::from_yaml(&content).context(format!("Ошибка в конфигурации {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_yml::from_str(content).context("Не удалось распарсить YAML")?;
        let inventory = Inventory::new(file.switches)?;

        Ok(Self {
            settings: file.settings,
            inventory,
        })
    }
}
