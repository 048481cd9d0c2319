/// 行為元件
///
/// A behaviour is the unit of user logic attached to an object. The scene
/// drives its activation callbacks; the bootstrap looks for the
/// [`PersistentObject`] capability through [`Behaviour::as_persistent_mut`].

use specs::storage::DenseVecStorage;
use specs::{Component, Entity as EcsEntity};
use std::any::Any;

use crate::persist::{PersistentObject, Singleton, SingletonRegistry};

/// Object-safe access to [`Any`] for every `'static` type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub trait Behaviour: AsAny + Send + Sync + 'static {
    /// Used in logs.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Capability check. Hand-written [`PersistentObject`] types return
    /// `Some(self)`, otherwise the bootstrap skips them. `singleton!` writes
    /// this for singletons.
    fn as_persistent_mut(&mut self) -> Option<&mut dyn PersistentObject> {
        None
    }

    /// First time the object becomes active in the hierarchy.
    fn on_awake(&mut self, _ctx: &mut ActivationContext<'_>) {}

    /// Every time the object becomes active in the hierarchy, after `on_awake`.
    fn on_enable(&mut self, _ctx: &mut ActivationContext<'_>) {}

    fn on_disable(&mut self, _ctx: &mut ActivationContext<'_>) {}

    /// Only called for objects that were awoken.
    fn on_destroy(&mut self, _ctx: &mut ActivationContext<'_>) {}
}

impl dyn Behaviour {
    pub fn downcast_ref<T: Behaviour>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Behaviour>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}

/// All behaviours of one object, in attach order.
#[derive(Default)]
pub struct Behaviours(pub Vec<Box<dyn Behaviour>>);

impl std::fmt::Debug for Behaviours {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|b| b.type_name()))
            .finish()
    }
}

impl Component for Behaviours {
    type Storage = DenseVecStorage<Self>;
}

/// Passed to activation callbacks.
pub struct ActivationContext<'a> {
    entity: EcsEntity,
    name: &'a str,
    registry: &'a SingletonRegistry,
}

impl<'a> ActivationContext<'a> {
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

    /// Current instance of another singleton type, if it was made current.
    pub fn singleton<T: Singleton>(&self) -> Option<EcsEntity> {
        T::current(self.registry)
    }
}
