/// Persistent Object Bootstrap Library
///
/// Builds the long-lived part of a scene from a template before the first
/// scene loads, and keeps one current instance per singleton type.

pub mod comp;
pub mod config;
pub mod error;
pub mod json_preprocessor;
pub mod managers;
pub mod persist;
pub mod scene;
pub mod template;
pub mod util;

// Re-export commonly used types
pub use crate::comp::*;
pub use crate::error::{BootError, BootResult};
pub use crate::persist::*;
pub use crate::scene::Scene;
pub use crate::template::*;
