use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub sources: SourceSettings,
    #[serde(default)]
    pub paging: PagingSettings,
    #[serde(default)]
    pub branding: BrandingSettings,
    #[serde(default)]
    pub zones: ZoneSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Locations of the three delimited-text resources
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    pub properties_url: String,
    pub matches_url: String,
    pub clients_url: String,
    /// Field delimiter of the property catalog; matches and clients are
    /// always comma-delimited.
    #[serde(default = "default_properties_delimiter")]
    pub properties_delimiter: String,
}

impl SourceSettings {
    pub fn delimiter_char(&self) -> char {
        self.properties_delimiter.chars().next().unwrap_or(';')
    }
}

fn default_properties_delimiter() -> String {
    ";".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PagingSettings {
    #[serde(default = "default_per_page")]
    pub per_page: usize,
}

impl Default for PagingSettings {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
        }
    }
}

fn default_per_page() -> usize {
    30
}

/// Own-brand advertiser recognition, injectable so the business rule stays
/// out of the engine
#[derive(Debug, Clone, Deserialize)]
pub struct BrandingSettings {
    #[serde(default = "default_own_fragments")]
    pub own_fragments: Vec<String>,
}

impl Default for BrandingSettings {
    fn default() -> Self {
        Self {
            own_fragments: default_own_fragments(),
        }
    }
}

fn default_own_fragments() -> Vec<String> {
    vec![
        "jbc".to_string(),
        "j.b.c".to_string(),
        "picó blanes".to_string(),
    ]
}

/// Strategic-zone recognition for the analytics emphasis
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneSettings {
    #[serde(default = "default_strategic_fragments")]
    pub strategic_fragments: Vec<String>,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            strategic_fragments: default_strategic_fragments(),
        }
    }
}

fn default_strategic_fragments() -> Vec<String> {
    vec![
        "barr".to_string(),
        "centro".to_string(),
        "desconocido".to_string(),
    ]
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with INMO_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with INMO_)
            // e.g., INMO_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("INMO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("INMO")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_branding_fragments() {
        let branding = BrandingSettings::default();
        assert!(branding.own_fragments.contains(&"jbc".to_string()));
        assert_eq!(branding.own_fragments.len(), 3);
    }

    #[test]
    fn test_default_strategic_fragments() {
        let zones = ZoneSettings::default();
        assert!(zones.strategic_fragments.contains(&"centro".to_string()));
    }

    #[test]
    fn test_default_paging_and_logging() {
        assert_eq!(PagingSettings::default().per_page, 30);
        assert_eq!(LoggingSettings::default().level, "info");
        assert_eq!(LoggingSettings::default().format, "json");
    }

    #[test]
    fn test_delimiter_char() {
        let sources = SourceSettings {
            properties_url: String::new(),
            matches_url: String::new(),
            clients_url: String::new(),
            properties_delimiter: ",".to_string(),
        };
        assert_eq!(sources.delimiter_char(), ',');
    }
}
