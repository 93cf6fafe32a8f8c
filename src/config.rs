use log::warn;
use serde::Deserialize;
use web_sys::window;

use crate::pan::DEFAULT_PAN_STEP;
use crate::suggest::DEFAULT_SUGGESTION_LIMIT;

const CONFIG_ELEMENT_ID: &str = "game-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Prefix for the `/teams`, `/guess` and `/reset` endpoints.
    pub api_base: String,
    pub pan_step: f64,
    pub suggestion_limit: usize,
    pub suggestion_hide_delay_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            pan_step: DEFAULT_PAN_STEP,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            suggestion_hide_delay_ms: 120,
        }
    }
}

impl GameConfig {
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Reads overrides from `<script type="application/json" id="game-config">`.
pub fn load_config() -> GameConfig {
    let Some(text) = window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content())
    else {
        return GameConfig::default();
    };

    if text.trim().is_empty() {
        return GameConfig::default();
    }

    match GameConfig::from_json(&text) {
        Ok(config) => config,
        Err(err) => {
            warn!("Falling back to default game config: {}", err);
            GameConfig::default()
        }
    }
}
