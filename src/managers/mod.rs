/// 內建管理器
///
/// Stock singletons shipped with the binary and usable from template files
/// under their short type names.

pub mod audio;
pub mod session;
pub mod settings;

pub use self::{audio::AudioManager, session::SessionTracker, settings::GameSettings};

use crate::template::BehaviourCatalog;

pub fn register_builtin(catalog: &mut BehaviourCatalog) {
    catalog.register_deserialize::<GameSettings>("GameSettings");
    catalog.register_deserialize::<AudioManager>("AudioManager");
    catalog.register_default::<SessionTracker>("SessionTracker");
}
