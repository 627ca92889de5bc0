//! Page configuration: default constants plus the serde-loaded `EnhanceConfig`.

use crate::EnhanceError;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

// Video player
pub const DEFAULT_PLAYER_ID: &str = "videoPlayer";
pub const DEFAULT_BLOCK_CONTEXT_MENU: bool = true;
pub const DEFAULT_BLOCKED_KEYS: [&str; 4] = [" ", "k", "ArrowRight", "ArrowLeft"];

// Forms
pub const DEFAULT_FORM_SELECTOR: &str = "form";
pub const DEFAULT_VALIDATED_CLASS: &str = "was-validated";

// Progress bars
pub const DEFAULT_PROGRESS_SELECTOR: &str = ".progress-bar";
pub const DEFAULT_PROGRESS_DELAY_MS: u32 = 100;
pub const DEFAULT_PROGRESS_TRANSITION: &str = "width 1s ease-in-out";
pub const PROGRESS_VALUE_ATTR: &str = "aria-valuenow";

// Media events
pub const EVENT_TIME_UPDATE: &str = "timeupdate";
pub const EVENT_SEEKING: &str = "seeking";
pub const EVENT_SEEKED: &str = "seeked";

/// Settings for every enhancement applied by `enhance_page`.
///
/// Any field left out of the JS object / JSON falls back to the constants above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhanceConfig {
    pub player_id: String,
    pub block_context_menu: bool,
    pub blocked_keys: Vec<String>,
    pub form_selector: String,
    pub validated_class: String,
    pub progress_selector: String,
    pub progress_delay_ms: u32,
    pub progress_transition: String,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            player_id: DEFAULT_PLAYER_ID.to_string(),
            block_context_menu: DEFAULT_BLOCK_CONTEXT_MENU,
            blocked_keys: DEFAULT_BLOCKED_KEYS.iter().map(|k| k.to_string()).collect(),
            form_selector: DEFAULT_FORM_SELECTOR.to_string(),
            validated_class: DEFAULT_VALIDATED_CLASS.to_string(),
            progress_selector: DEFAULT_PROGRESS_SELECTOR.to_string(),
            progress_delay_ms: DEFAULT_PROGRESS_DELAY_MS,
            progress_transition: DEFAULT_PROGRESS_TRANSITION.to_string(),
        }
    }
}

impl EnhanceConfig {
    /// Parse and validate a JSON configuration string.
    pub fn from_json(json: &str) -> Result<Self, EnhanceError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EnhanceError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Convert a plain JS object into a validated configuration.
    /// `undefined`/`null` yield the defaults.
    pub fn from_js(value: JsValue) -> Result<Self, EnhanceError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        let config: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| EnhanceError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the DOM lookups meaningless.
    pub fn validate(&self) -> Result<(), EnhanceError> {
        let required = [
            ("playerId", &self.player_id),
            ("formSelector", &self.form_selector),
            ("validatedClass", &self.validated_class),
            ("progressSelector", &self.progress_selector),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(EnhanceError::InvalidConfig(format!("{} must not be empty", name)));
            }
        }
        if self.validated_class.contains(char::is_whitespace) {
            return Err(EnhanceError::InvalidConfig(format!(
                "validatedClass must be a single class name, got {:?}",
                self.validated_class
            )));
        }
        Ok(())
    }
}
