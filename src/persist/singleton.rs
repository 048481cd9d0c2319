/// 單例登記表
///
/// One slot per concrete singleton type. A slot goes from unset to set
/// during the bootstrap and is not cleared afterwards; [`SingletonRegistry::reset`]
/// only exists so tests can start from a clean process-wide registry.

use hashbrown::HashMap;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use specs::Entity as EcsEntity;
use std::any::TypeId;
use std::sync::Arc;

use super::persistent_object::{InitContext, PersistentObject};
use crate::comp::Behaviour;
use crate::scene::Scene;

#[derive(Copy, Clone, Debug)]
struct Slot {
    entity: EcsEntity,
    type_name: &'static str,
}

/// Cheap to clone, clones share the same slots.
#[derive(Clone, Default)]
pub struct SingletonRegistry {
    slots: Arc<RwLock<HashMap<TypeId, Slot>>>,
}

lazy_static! {
    static ref GLOBAL_SINGLETONS: SingletonRegistry = SingletonRegistry::new();
}

impl SingletonRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Self {
        GLOBAL_SINGLETONS.clone()
    }

    pub fn get<T: 'static>(&self) -> Option<EcsEntity> {
        self.slots.read().get(&TypeId::of::<T>()).map(|slot| slot.entity)
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.slots.read().contains_key(&TypeId::of::<T>())
    }

    /// Returns the previous occupant.
    pub(crate) fn set<T: 'static>(&self, entity: EcsEntity) -> Option<EcsEntity> {
        let slot = Slot {
            entity,
            type_name: std::any::type_name::<T>(),
        };
        self.slots
            .write()
            .insert(TypeId::of::<T>(), slot)
            .map(|old| old.entity)
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }

    /// `(type name, entity)` pairs sorted by type name.
    pub fn entries(&self) -> Vec<(&'static str, EcsEntity)> {
        let mut entries: Vec<_> = self
            .slots
            .read()
            .values()
            .map(|slot| (slot.type_name, slot.entity))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn reset(&self) {
        self.slots.write().clear();
    }

    pub fn ptr_eq(&self, other: &SingletonRegistry) -> bool {
        Arc::ptr_eq(&self.slots, &other.slots)
    }
}

impl std::fmt::Debug for SingletonRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries()).finish()
    }
}

/// Behaviour that registers itself as "the current instance" of its type.
///
/// Declare singletons with [`singleton!`](crate::singleton), which also
/// exposes the type to the bootstrap through `Behaviour::as_persistent_mut`.
/// `initialize` is provided by a blanket impl and cannot be overridden, so a
/// slot always holds exactly what the bootstrap put there. Two instances of
/// the same type in one template both write the slot; the later one in
/// traversal order wins.
pub trait Singleton: Behaviour + Sized {
    #[doc(hidden)]
    fn declared() -> Declared;

    fn current(registry: &SingletonRegistry) -> Option<EcsEntity> {
        registry.get::<Self>()
    }

    fn instance(scene: &Scene) -> Option<EcsEntity> {
        Self::current(&scene.registry())
    }
}

/// Only produced by [`singleton!`](crate::singleton).
#[doc(hidden)]
pub struct Declared;

impl<T: Singleton> PersistentObject for T {
    fn initialize(&mut self, ctx: &mut InitContext<'_>) {
        ctx.make_current::<T>();
    }
}

/// 宣告單例
///
/// Implements `Behaviour` and `Singleton` for a type. Lifecycle hooks go in
/// the optional braces:
///
/// ```ignore
/// singleton!(AudioManager {
///     fn on_awake(&mut self, ctx: &mut ActivationContext<'_>) { /* .. */ }
/// });
/// ```
#[macro_export]
macro_rules! singleton {
    ($ty:ident) => {
        $crate::singleton!($ty {});
    };
    ($ty:ident { $($hooks:tt)* }) => {
        impl $crate::comp::Behaviour for $ty {
            fn as_persistent_mut(&mut self) -> Option<&mut dyn $crate::persist::PersistentObject> {
                Some(self)
            }

            $($hooks)*
        }

        impl $crate::persist::Singleton for $ty {
            fn declared() -> $crate::persist::singleton::Declared {
                $crate::persist::singleton::Declared
            }
        }
    };
}
