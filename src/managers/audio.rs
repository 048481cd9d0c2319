use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::settings::GameSettings;
use crate::comp::ActivationContext;
use crate::singleton;

/// Needs [`GameSettings`] as soon as it wakes up, which only works because
/// every singleton is made current before the first `on_awake`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AudioManager {
    #[serde(default)]
    pub muted: bool,
    #[serde(skip)]
    pub settings_ready: bool,
}

singleton!(AudioManager {
    fn on_awake(&mut self, ctx: &mut ActivationContext<'_>) {
        self.settings_ready = ctx.singleton::<GameSettings>().is_some();
        if self.settings_ready {
            info!("audio manager `{}` ready, muted: {}", ctx.name(), self.muted);
        } else {
            warn!("audio manager `{}` woke up without game settings", ctx.name());
        }
    }
});
