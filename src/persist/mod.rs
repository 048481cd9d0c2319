/// 常駐物件模塊
///
/// The initialization capability, the singleton layer built on it, and the
/// one-shot bootstrap that ties them to a template.

pub mod bootstrap;
pub mod persistent_object;
pub mod singleton;

pub use bootstrap::{initialize_persistent_objects, BootReport, Bootstrapper, WRAPPER_NAME};
pub use persistent_object::{InitContext, PersistentObject};
pub use singleton::{Singleton, SingletonRegistry};
