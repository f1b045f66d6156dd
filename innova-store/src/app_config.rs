use chrono_tz::Tz;
use innova_shared::AreaRecord;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub scheduling: SchedulingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL of the InnovaBuilding REST backend; empty runs against the in-memory store.
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Areas the in-memory store starts with. Ignored when `base_url` is set.
    #[serde(default)]
    pub seed_areas: Vec<AreaRecord>,
}

fn default_timeout() -> u64 { 10 }

impl BackendConfig {
    pub fn is_in_memory(&self) -> bool {
        self.base_url.trim().is_empty()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SchedulingConfig {
    pub first_slot_hour: u32,
    pub last_slot_hour: u32,
    /// IANA name of the building's timezone, e.g. `America/La_Paz`. Unset keeps
    /// whatever wall clock the backend's timestamps carry.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            first_slot_hour: 6,
            last_slot_hour: 23,
            timezone: None,
        }
    }
}

impl SchedulingConfig {
    pub fn building_timezone(&self) -> Result<Option<Tz>, config::ConfigError> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>()
                    .map_err(|e| config::ConfigError::Message(format!("Unknown timezone {}: {}", name, e)))
            })
            .transpose()
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Optional per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `INNOVA_BACKEND__BASE_URL=https://api.example.com`
            .add_source(config::Environment::with_prefix("INNOVA").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 8080

                [backend]
                base_url = ""

                [auth]
                jwt_secret = "secret"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let cfg: Config = s.try_deserialize().unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.backend.is_in_memory());
        assert_eq!(cfg.backend.timeout_seconds, 10);
        assert_eq!(cfg.scheduling, SchedulingConfig::default());
        assert_eq!(cfg.scheduling.building_timezone().unwrap(), None);
        assert!(cfg.backend.seed_areas.is_empty());
    }

    #[test]
    fn test_timezone_and_seed_areas() {
        let s = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [server]
                port = 8080

                [backend]
                base_url = ""

                [[backend.seed_areas]]
                id_area_comun = "gym"
                nombre = "Gimnasio"
                costo_hora = 60.0

                [auth]
                jwt_secret = "secret"

                [scheduling]
                first_slot_hour = 6
                last_slot_hour = 23
                timezone = "America/La_Paz"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let cfg: Config = s.try_deserialize().unwrap();
        assert_eq!(cfg.scheduling.building_timezone().unwrap(), Some(Tz::America__La_Paz));
        assert_eq!(cfg.backend.seed_areas.len(), 1);
        assert_eq!(cfg.backend.seed_areas[0].nombre, "Gimnasio");

        let bad = SchedulingConfig {
            timezone: Some("Mars/Olympus".to_string()),
            ..SchedulingConfig::default()
        };
        assert!(bad.building_timezone().is_err());
    }
}
