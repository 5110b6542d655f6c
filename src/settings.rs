use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub show_grid: bool,
    pub show_prompt_preview: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_prompt_preview: false,
        }
    }
}

impl DisplaySettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "display").unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "display", self) {
            log::warn!("failed to save display settings: {e}");
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash-image".to_string(),
            api_key: String::new(),
            timeout_secs: 120,
        }
    }
}

impl GenerationSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "generation").unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "generation", self) {
            log::warn!("failed to save generation settings: {e}");
        }
    }

    /// Stored key, or the environment variable when none is stored.
    pub fn resolved_api_key(&self) -> Option<String> {
        resolve_api_key(&self.api_key, std::env::var(API_KEY_ENV).ok())
    }
}

fn resolve_api_key(stored: &str, from_env: Option<String>) -> Option<String> {
    let stored = stored.trim();
    if !stored.is_empty() {
        return Some(stored.to_string());
    }
    from_env
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiSettings {
    pub show_settings: bool,
    pub lock_camera: bool,
}

impl UiSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "ui").unwrap_or_default()
    }

    pub fn save(&self) {
        if let Err(e) = confy::store(CONFY_APP_NAME, "ui", self) {
            log::warn!("failed to save ui settings: {e}");
        }
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub display: DisplaySettings,
    pub generation: GenerationSettings,
    pub ui: UiSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            display: DisplaySettings::load(),
            generation: GenerationSettings::load(),
            ui: UiSettings::load(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_key_wins() {
        let key = resolve_api_key(" abc ", Some("env".to_string()));
        assert_eq!(key.as_deref(), Some("abc"));
    }

    #[test]
    fn env_key_is_the_fallback() {
        assert_eq!(
            resolve_api_key("", Some("env".to_string())).as_deref(),
            Some("env")
        );
        assert_eq!(resolve_api_key("  ", Some("   ".to_string())), None);
        assert_eq!(resolve_api_key("", None), None);
    }

    #[test]
    fn generation_defaults_point_at_a_real_endpoint() {
        let settings = GenerationSettings::default();
        assert!(settings.endpoint.starts_with("https://"));
        assert!(!settings.model.is_empty());
        assert!(settings.api_key.is_empty());
    }
}
