use adw::Application;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use directories::BaseDirs;

/// Environment override for the backend origin, checked before the config file.
pub const URL_ENV_VAR: &str = "LEADBOARD_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppState {
    pub backend_url: String,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    fn toml_path() -> Option<PathBuf> {
        let base = BaseDirs::new()?;
        let cfg_dir = base.config_dir();
        Some(cfg_dir.join("leadboard.toml"))
    }

    // The LEADBOARD_URL environment variable wins over the saved config, so
    // deployments can point the dashboard at a backend without touching disk.
    pub fn load() -> Self {
        if let Ok(url) = std::env::var(URL_ENV_VAR) {
            if !url.trim().is_empty() {
                return Self { backend_url: crate::utils::normalize_url(&url) };
            }
        }

        if let Some(path) = Self::toml_path() {
            if let Ok(bytes) = fs::read(&path) {
                if let Ok(text) = String::from_utf8(bytes) {
                    if let Ok(state) = toml::from_str::<AppState>(&text) {
                        return state;
                    }
                }
            }
        }

        Self::new()
    }

    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::toml_path() {
            if let Some(parent) = path.parent() { let _ = fs::create_dir_all(parent); }
            let toml = toml::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
            fs::write(path, toml)
        } else {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "No config dir"))
        }
    }
}

pub fn build_ui(app: &Application) {
    let state = AppState::load();
    if !state.backend_url.is_empty() {
        crate::ui::dashboard::show_dashboard(app);
    } else {
        crate::ui::setup::show_setup_window(app);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_round_trip() {
        let state = AppState { backend_url: "https://crm.example.com".to_string() };
        let text = toml::to_string_pretty(&state).unwrap();
        let back: AppState = toml::from_str(&text).unwrap();
        assert_eq!(back.backend_url, state.backend_url);
    }

    #[test]
    fn default_state_has_no_backend() {
        assert!(AppState::new().backend_url.is_empty());
    }
}
