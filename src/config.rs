use crate::model::{Application, NavigationContext};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application the monitored agent belongs to
    #[serde(default)]
    pub application: Option<String>,
    /// Service type label shown next to the application
    #[serde(default = "default_service_type")]
    pub service_type: String,
    /// Identifier of the monitored agent
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Snapshot file to load on startup
    #[serde(default)]
    pub snapshot_path: Option<String>,
}

fn default_service_type() -> String {
    "UNKNOWN".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            application: None,
            service_type: default_service_type(),
            agent_id: None,
            snapshot_path: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".threaddump-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    pub fn load() -> Option<Config> {
        let config_path = Self::config_path()?;
        if !config_path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&config_path).ok()?;
        serde_json::from_str(&contents).ok()
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Build the page's navigation context from the configured identity
    pub fn navigation(&self) -> NavigationContext {
        let application = self.application.as_ref().map(|name| Application {
            name: name.clone(),
            service_type: self.service_type.clone(),
        });
        NavigationContext::new(application, self.agent_id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_maps_application() {
        let config = Config {
            application: Some("order-service".to_string()),
            service_type: "SPRING_BOOT".to_string(),
            agent_id: Some("agent-7".to_string()),
            snapshot_path: None,
        };

        let nav = config.navigation();
        let app = nav.application.unwrap();
        assert_eq!(app.name, "order-service");
        assert_eq!(app.service_type, "SPRING_BOOT");
        assert_eq!(nav.agent_id.as_deref(), Some("agent-7"));
    }

    #[test]
    fn test_navigation_without_application() {
        let config = Config::default();
        let nav = config.navigation();
        assert!(nav.application.is_none());
        assert!(nav.agent_id.is_none());
    }

    #[test]
    fn test_config_parses_partial_json() {
        let config: Config = serde_json::from_str(r#"{"application": "order-service"}"#).unwrap();
        assert_eq!(config.application.as_deref(), Some("order-service"));
        assert_eq!(config.service_type, "UNKNOWN");
        assert!(config.snapshot_path.is_none());
    }
}
