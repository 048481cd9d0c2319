use log::{debug, warn};
use specs::Entity as EcsEntity;

use super::singleton::{Singleton, SingletonRegistry};

/// Receives exactly one `initialize` call from the bootstrap, before any
/// activation callback of the objects created by that bootstrap.
///
/// There is no ordering between two persistent objects: `initialize` must not
/// rely on another object's `initialize` having run.
pub trait PersistentObject {
    fn initialize(&mut self, ctx: &mut InitContext<'_>);
}

/// Passed to [`PersistentObject::initialize`].
pub struct InitContext<'a> {
    entity: EcsEntity,
    name: &'a str,
    registry: &'a SingletonRegistry,
}

impl<'a> InitContext<'a> {
    pub(crate) fn new(entity: EcsEntity, name: &'a str, registry: &'a SingletonRegistry) -> Self {
        Self { entity, name, registry }
    }

    pub fn entity(&self) -> EcsEntity {
        self.entity
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn registry(&self) -> &SingletonRegistry {
        self.registry
    }

    /// Writes the owning object into `T`'s slot. Last writer wins.
    pub(crate) fn make_current<T: Singleton>(&mut self) {
        let type_name = std::any::type_name::<T>();
        match self.registry.set::<T>(self.entity) {
            Some(previous) if previous != self.entity => {
                warn!(
                    "singleton {} replaced: {:?} -> {:?} (`{}`)",
                    type_name, previous, self.entity, self.name
                );
            }
            _ => {
                debug!("singleton {} -> {:?} (`{}`)", type_name, self.entity, self.name);
            }
        }
    }
}
