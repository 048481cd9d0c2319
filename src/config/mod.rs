pub mod boot_config;

pub use self::boot_config::{BootConfig, BootSetting, LogSetting};
