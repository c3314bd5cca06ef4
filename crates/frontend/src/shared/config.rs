//! Конфигурация консоли
//!
//! Значения по умолчанию зашиты в бинарник (TOML). Для стенда их можно
//! переопределить, положив TOML в localStorage под ключом [`STORAGE_KEY`].

use once_cell::sync::Lazy;
use serde::Deserialize;

pub const STORAGE_KEY: &str = "compliance_console_config";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000
prefix = "/api"

[list]
debounce_ms = 300
page_size = 25
page_size_options = [10, 25, 50, 100]
catalog_cap = 500

[stats]
expiring_window_days = 30
"#;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
    pub stats: StatsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Порт бэкенда; хост берётся из адреса страницы
    pub port: u16,
    /// Префикс всех REST-путей
    pub prefix: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListConfig {
    pub debounce_ms: u64,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    /// Сколько записей грузить для каталогов с клиентской пагинацией
    pub catalog_cap: usize,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StatsConfig {
    pub expiring_window_days: i64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        parse_config(DEFAULT_CONFIG).unwrap_or_else(|_| Self {
            api: ApiConfig {
                port: 3000,
                prefix: "/api".to_string(),
            },
            list: ListConfig {
                debounce_ms: 300,
                page_size: 25,
                page_size_options: vec![10, 25, 50, 100],
                catalog_cap: 500,
            },
            stats: StatsConfig {
                expiring_window_days: 30,
            },
        })
    }
}

/// Допустимое окно "скоро истекает", дней
pub const WINDOW_DAYS_RANGE: std::ops::RangeInclusive<i64> = 0..=3650;

/// Разобрать TOML и проверить значения
pub fn parse_config(raw: &str) -> anyhow::Result<ConsoleConfig> {
    let mut config: ConsoleConfig = toml::from_str(raw)?;
    if config.list.page_size == 0 {
        anyhow::bail!("list.page_size must be greater than zero");
    }
    if !WINDOW_DAYS_RANGE.contains(&config.stats.expiring_window_days) {
        anyhow::bail!(
            "stats.expiring_window_days must be within {}..={}",
            WINDOW_DAYS_RANGE.start(),
            WINDOW_DAYS_RANGE.end()
        );
    }
    config.list.page_size_options.retain(|s| *s > 0);
    if !config.list.page_size_options.contains(&config.list.page_size) {
        config.list.page_size_options.push(config.list.page_size);
        config.list.page_size_options.sort_unstable();
    }
    Ok(config)
}

fn load_override() -> Option<String> {
    let storage = web_sys::window()?.local_storage().ok()??;
    storage.get_item(STORAGE_KEY).ok()?
}

/// Load configuration: localStorage override, falls back to embedded default
pub fn load_config() -> ConsoleConfig {
    if let Some(raw) = load_override() {
        match parse_config(&raw) {
            Ok(config) => {
                log::info!("Loaded console config override from localStorage");
                return config;
            }
            Err(e) => log::warn!("Ignoring invalid console config override: {}", e),
        }
    }
    log::debug!("Using default embedded configuration");
    ConsoleConfig::default()
}

static CONFIG: Lazy<ConsoleConfig> = Lazy::new(load_config);

/// Конфигурация приложения (загружается один раз)
pub fn config() -> &'static ConsoleConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.list.debounce_ms, 300);
        assert_eq!(config.list.page_size, 25);
        assert_eq!(config.stats.expiring_window_days, 30);
        assert_eq!(config, ConsoleConfig::default());
    }

    #[test]
    fn test_page_size_added_to_options() {
        let raw = DEFAULT_CONFIG.replace("page_size = 25", "page_size = 20");
        let config = parse_config(&raw).unwrap();
        assert_eq!(config.list.page_size_options, vec![10, 20, 25, 50, 100]);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let raw = DEFAULT_CONFIG.replace("page_size = 25", "page_size = 0");
        assert!(parse_config(&raw).is_err());
    }

    #[test]
    fn test_window_out_of_range_rejected() {
        for bad in ["-1", "3651", "10000000000000"] {
            let raw = DEFAULT_CONFIG.replace(
                "expiring_window_days = 30",
                &format!("expiring_window_days = {}", bad),
            );
            assert!(parse_config(&raw).is_err(), "window {} accepted", bad);
        }
        let raw = DEFAULT_CONFIG.replace("expiring_window_days = 30", "expiring_window_days = 3650");
        assert_eq!(parse_config(&raw).unwrap().stats.expiring_window_days, 3650);
    }

    #[test]
    fn test_missing_section_rejected() {
        assert!(parse_config("[api]\nport = 1\nprefix = \"/\"").is_err());
    }
}
