use chrono::{DateTime, Local};
use log::info;

use crate::comp::ActivationContext;
use crate::singleton;

/// Counts how many times the session object got enabled.
#[derive(Clone, Debug, Default)]
pub struct SessionTracker {
    pub started_at: Option<DateTime<Local>>,
    pub enable_count: u32,
}

singleton!(SessionTracker {
    fn on_awake(&mut self, _ctx: &mut ActivationContext<'_>) {
        let now = Local::now();
        info!("session started at {}", now.format("%Y-%m-%d %H:%M:%S"));
        self.started_at = Some(now);
    }

    fn on_enable(&mut self, _ctx: &mut ActivationContext<'_>) {
        self.enable_count += 1;
    }
});
