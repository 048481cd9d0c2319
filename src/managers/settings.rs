use serde::{Deserialize, Serialize};

use crate::singleton;

/// 遊戲設定
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSettings {
    #[serde(default = "default_volume")]
    pub master_volume: f32,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_volume() -> f32 {
    0.8
}

fn default_language() -> String {
    "en".to_owned()
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            master_volume: default_volume(),
            language: default_language(),
        }
    }
}

singleton!(GameSettings);
