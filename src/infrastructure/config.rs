use crate::domain::{
    config::{GlobalConfig, RosComConfig, RouterConfig},
    error::{RosComError, RosComResult},
};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration manager
pub struct ConfigManager {
    global_config_path: PathBuf,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create new configuration manager
    pub fn new() -> RosComResult<Self> {
        let global_config_path = Self::get_global_config_path()?;
        let project_config_path = Self::find_project_config_path();

        Ok(Self {
            global_config_path,
            project_config_path,
        })
    }

    /// Load configuration from files
    pub fn load_config(&self) -> RosComResult<RosComConfig> {
        // Start with default configuration
        let mut config = RosComConfig::default();

        // Load global configuration if exists
        if self.global_config_path.exists() {
            let global_config = self.load_config_from_path(&self.global_config_path)?;
            config.global = global_config.global;
        }

        // Load and merge project configuration if exists
        if let Some(project_path) = &self.project_config_path {
            if project_path.exists() {
                let project_config = self.load_config_from_path(project_path)?;
                // Merge project routers with existing routers
                config.routers.extend(project_config.routers);
            }
        }

        Ok(config)
    }

    /// Save configuration to files
    pub fn save_config(&self, config: &RosComConfig) -> RosComResult<()> {
        // Ensure global config directory exists
        if let Some(parent) = self.global_config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| RosComError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        // Global config doesn't contain router entries
        let global_config = RosComConfig {
            global: config.global.clone(),
            routers: Vec::new(),
        };
        self.save_config_to_path(&self.global_config_path, &global_config)?;

        // Save project configuration if path is available
        if let Some(project_path) = &self.project_config_path {
            let project_config = RosComConfig {
                global: GlobalConfig::default(),
                routers: config.routers.clone(),
            };

            if let Some(parent) = project_path.parent() {
                fs::create_dir_all(parent).map_err(|e| RosComError::Config {
                    message: format!("Failed to create project config directory: {}", e),
                })?;
            }

            self.save_config_to_path(project_path, &project_config)?;
        }

        Ok(())
    }

    /// Get global configuration path
    fn get_global_config_path() -> RosComResult<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| RosComError::Config {
            message: "Could not determine home directory".to_string(),
        })?;

        Ok(home.join(".config").join("roscom").join("config.toml"))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let mut path = current_dir.as_path();

        loop {
            let config_path = path.join(".roscom").join("config.toml");
            if config_path.exists() {
                return Some(config_path);
            }

            path = path.parent()?;
        }
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(&self, path: &Path) -> RosComResult<RosComConfig> {
        let content = fs::read_to_string(path).map_err(|e| RosComError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| RosComError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(&self, path: &Path, config: &RosComConfig) -> RosComResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| RosComError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        fs::write(path, content).map_err(|e| RosComError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Create default project configuration
    pub fn init_project_config(&self, path: &Path) -> RosComResult<()> {
        let config_dir = path.join(".roscom");
        let config_file = config_dir.join("config.toml");

        if config_file.exists() {
            return Err(RosComError::Config {
                message: "Project configuration already exists".to_string(),
            });
        }

        fs::create_dir_all(&config_dir).map_err(|e| RosComError::Config {
            message: format!("Failed to create .roscom directory: {}", e),
        })?;

        let default_config = RosComConfig {
            global: GlobalConfig::default(),
            routers: vec![RouterConfig {
                name: "example_router".to_string(),
                description: "Example RouterOS device".to_string(),
                address: "192.168.88.1".to_string(),
                port: 0,
                username: "admin".to_string(),
                password: String::new(),
                local_id: 0,
                owner_id: 0,
                verbose: false,
            }],
        };

        self.save_config_to_path(&config_file, &default_config)?;

        Ok(())
    }

    /// Get the current project config path (if any)
    pub fn get_project_config_path(&self) -> Option<&PathBuf> {
        self.project_config_path.as_ref()
    }

    /// Get the global config path
    pub fn get_global_config_path_ref(&self) -> &PathBuf {
        &self.global_config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_manager_creation() {
        let _manager = ConfigManager::new().unwrap();
    }

    #[test]
    fn test_init_project_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();

        manager.init_project_config(temp_dir.path()).unwrap();

        let config_file = temp_dir.path().join(".roscom").join("config.toml");
        assert!(config_file.exists());

        let content = fs::read_to_string(&config_file).unwrap();
        let config: RosComConfig = toml::from_str(&content).unwrap();
        assert_eq!(config.routers.len(), 1);
        assert_eq!(config.routers[0].address, "192.168.88.1");
    }

    #[test]
    fn test_init_project_config_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();

        manager.init_project_config(temp_dir.path()).unwrap();
        let err = manager.init_project_config(temp_dir.path()).unwrap_err();

        assert!(matches!(err, RosComError::Config { .. }));
    }

    #[test]
    fn test_config_round_trip_through_path() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = RosComConfig {
            global: GlobalConfig::default(),
            routers: vec![RouterConfig {
                name: "edge".to_string(),
                description: String::new(),
                address: "10.0.0.1".to_string(),
                port: 8728,
                username: "admin".to_string(),
                password: "secret".to_string(),
                local_id: 3,
                owner_id: 4,
                verbose: true,
            }],
        };

        manager.save_config_to_path(&path, &config).unwrap();
        let loaded = manager.load_config_from_path(&path).unwrap();

        assert_eq!(loaded.routers.len(), 1);
        assert_eq!(loaded.routers[0].name, "edge");
        assert_eq!(loaded.routers[0].port, 8728);
        assert!(loaded.routers[0].verbose);
    }
}
