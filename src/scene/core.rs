/// 場景核心結構
///
/// Object hierarchy stored in a specs world. Every structural change ends
/// with an activation refresh of the touched subtree, so callbacks fire as
/// soon as an object becomes active in the hierarchy and never before.

use log::{debug, error, info};
use specs::{Builder, Entity as EcsEntity, Join, World, WorldExt};

use crate::comp::*;
use crate::error::{BootError, BootResult};
use crate::persist::{Singleton, SingletonRegistry};

pub struct Scene {
    /// ECS 世界
    ecs: World,
}

impl Scene {
    /// Scene with its own private singleton registry.
    pub fn new() -> Self {
        Self::with_registry(SingletonRegistry::new())
    }

    pub fn with_registry(registry: SingletonRegistry) -> Self {
        let mut ecs = World::new();

        ecs.register::<Name>();
        ecs.register::<ActiveSelf>();
        ecs.register::<Parent>();
        ecs.register::<Children>();
        ecs.register::<Behaviours>();
        ecs.register::<Awoken>();
        ecs.register::<Enabled>();
        ecs.register::<Persistent>();

        ecs.insert(registry);
        ecs.insert(LoadedScene::default());

        Self { ecs }
    }

    pub fn ecs(&self) -> &World {
        &self.ecs
    }

    pub fn registry(&self) -> SingletonRegistry {
        (*self.ecs.read_resource::<SingletonRegistry>()).clone()
    }

    pub fn singleton<T: Singleton>(&self) -> Option<EcsEntity> {
        T::current(&self.registry())
    }

    pub fn loaded_scene(&self) -> String {
        self.ecs.read_resource::<LoadedScene>().0.clone()
    }

    /// Creates an empty object. With `active == false` nothing under it will
    /// be activated until the flag is set.
    pub fn spawn(&mut self, name: &str, parent: Option<EcsEntity>, active: bool) -> BootResult<EcsEntity> {
        if let Some(p) = parent {
            self.ensure_alive(p)?;
        }
        let entity = self.create_detached(name, active);
        if let Some(p) = parent {
            self.attach(entity, p);
        }
        self.refresh_activation(entity);
        Ok(entity)
    }

    /// Appends a behaviour. If the object is already enabled the behaviour is
    /// awoken and enabled right away.
    pub fn add_behaviour(&mut self, entity: EcsEntity, behaviour: Box<dyn Behaviour>) -> BootResult<()> {
        self.ensure_alive(entity)?;
        let index = {
            let mut behaviours = self.ecs.write_storage::<Behaviours>();
            match behaviours.get_mut(entity) {
                Some(list) => {
                    list.0.push(behaviour);
                    list.0.len() - 1
                }
                None => {
                    behaviours
                        .insert(entity, Behaviours(vec![behaviour]))
                        .map_err(|_| BootError::DeadEntity(entity))?;
                    0
                }
            }
        };
        if self.is_enabled(entity) {
            self.start_behaviour(entity, index);
        }
        Ok(())
    }

    pub fn set_active(&mut self, entity: EcsEntity, active: bool) -> BootResult<()> {
        self.ensure_alive(entity)?;
        {
            let mut flags = self.ecs.write_storage::<ActiveSelf>();
            if let Some(flag) = flags.get_mut(entity) {
                if flag.0 == active {
                    return Ok(());
                }
                flag.0 = active;
            }
        }
        self.refresh_activation(entity);
        Ok(())
    }

    /// Moves `entity` (with its subtree) under `parent`, or to top level.
    ///
    /// Moving under a parent adopts the parent's partition. Moving to top
    /// level keeps the current one.
    pub fn set_parent(&mut self, entity: EcsEntity, parent: Option<EcsEntity>) -> BootResult<()> {
        self.ensure_alive(entity)?;
        if let Some(p) = parent {
            self.ensure_alive(p)?;
            if p == entity || self.is_ancestor_of(entity, p) {
                return Err(BootError::HierarchyCycle { child: entity, parent: p });
            }
        }
        if self.parent(entity) == parent {
            return Ok(());
        }
        self.detach(entity);
        if let Some(p) = parent {
            self.attach(entity, p);
        }
        self.refresh_activation(entity);
        Ok(())
    }

    /// Flags a root object and everything under it to survive `load_scene`.
    pub fn mark_persistent(&mut self, entity: EcsEntity) -> BootResult<()> {
        self.ensure_alive(entity)?;
        if self.parent(entity).is_some() {
            return Err(BootError::NotRoot(entity));
        }
        let subtree = self.descendants(entity);
        self.set_partition(&subtree, true);
        debug!("{} object(s) moved to the long-lived partition", subtree.len());
        Ok(())
    }

    /// Destroys the object and its subtree. Children are torn down before
    /// their parent.
    pub fn destroy(&mut self, entity: EcsEntity) -> BootResult<()> {
        self.ensure_alive(entity)?;
        let subtree = self.descendants(entity);
        for &e in subtree.iter().rev() {
            self.teardown(e);
        }
        self.detach(entity);
        self.purge(&subtree);
        Ok(())
    }

    /// Destroys every root that is not persistent. Returns how many root
    /// trees were removed.
    pub fn load_scene(&mut self, name: &str) -> usize {
        let doomed: Vec<EcsEntity> = {
            let entities = self.ecs.entities();
            let parents = self.ecs.read_storage::<Parent>();
            let persistent = self.ecs.read_storage::<Persistent>();
            (&entities, !&parents, !&persistent)
                .join()
                .map(|(e, _, _)| e)
                .collect()
        };
        for &root in &doomed {
            if let Err(e) = self.destroy(root) {
                error!("load_scene could not destroy {:?}: {}", root, e);
            }
        }
        self.ecs.write_resource::<LoadedScene>().0 = name.to_owned();
        info!("scene `{}` loaded, {} transient root(s) destroyed", name, doomed.len());
        doomed.len()
    }

    pub fn is_alive(&self, entity: EcsEntity) -> bool {
        self.ecs.is_alive(entity)
    }

    pub fn name(&self, entity: EcsEntity) -> Option<String> {
        self.ecs.read_storage::<Name>().get(entity).map(|n| n.0.clone())
    }

    /// First live object with that name, lowest id first.
    pub fn find(&self, name: &str) -> Option<EcsEntity> {
        let entities = self.ecs.entities();
        let names = self.ecs.read_storage::<Name>();
        let found = (&entities, &names)
            .join()
            .find(|(_, n)| n.0 == name)
            .map(|(e, _)| e);
        found
    }

    pub fn parent(&self, entity: EcsEntity) -> Option<EcsEntity> {
        self.ecs.read_storage::<Parent>().get(entity).map(|p| p.0)
    }

    pub fn children(&self, entity: EcsEntity) -> Vec<EcsEntity> {
        self.ecs
            .read_storage::<Children>()
            .get(entity)
            .map(|c| c.0.clone())
            .unwrap_or_default()
    }

    /// `entity` followed by all its descendants, depth-first pre-order.
    pub fn descendants(&self, entity: EcsEntity) -> Vec<EcsEntity> {
        let children = self.ecs.read_storage::<Children>();
        let mut out = Vec::new();
        let mut stack = vec![entity];
        while let Some(e) = stack.pop() {
            out.push(e);
            if let Some(c) = children.get(e) {
                stack.extend(c.0.iter().rev());
            }
        }
        out
    }

    pub fn roots(&self) -> Vec<EcsEntity> {
        let entities = self.ecs.entities();
        let parents = self.ecs.read_storage::<Parent>();
        let roots = (&entities, !&parents).join().map(|(e, _)| e).collect();
        roots
    }

    /// Top-level members of the long-lived partition.
    pub fn persistent_roots(&self) -> Vec<EcsEntity> {
        let entities = self.ecs.entities();
        let parents = self.ecs.read_storage::<Parent>();
        let persistent = self.ecs.read_storage::<Persistent>();
        let roots = (&entities, !&parents, &persistent)
            .join()
            .map(|(e, _, _)| e)
            .collect();
        roots
    }

    pub fn object_count(&self) -> usize {
        let entities = self.ecs.entities();
        let count = (&entities).join().count();
        count
    }

    pub fn is_persistent(&self, entity: EcsEntity) -> bool {
        self.ecs.read_storage::<Persistent>().contains(entity)
    }

    pub fn is_awake(&self, entity: EcsEntity) -> bool {
        self.ecs.read_storage::<Awoken>().contains(entity)
    }

    pub fn is_enabled(&self, entity: EcsEntity) -> bool {
        self.ecs.read_storage::<Enabled>().contains(entity)
    }

    pub fn is_active_self(&self, entity: EcsEntity) -> bool {
        self.ecs
            .read_storage::<ActiveSelf>()
            .get(entity)
            .map_or(false, |a| a.0)
    }

    pub fn is_active_in_hierarchy(&self, entity: EcsEntity) -> bool {
        let flags = self.ecs.read_storage::<ActiveSelf>();
        let parents = self.ecs.read_storage::<Parent>();
        let mut current = Some(entity);
        while let Some(e) = current {
            if !flags.get(e).map_or(false, |a| a.0) {
                return false;
            }
            current = parents.get(e).map(|p| p.0);
        }
        true
    }

    /// Runs `f` on the first behaviour of type `T` on `entity`.
    pub fn with_behaviour<T: Behaviour, R>(&self, entity: EcsEntity, f: impl FnOnce(&T) -> R) -> Option<R> {
        let behaviours = self.ecs.read_storage::<Behaviours>();
        let found = behaviours
            .get(entity)?
            .0
            .iter()
            .find_map(|b| (**b).downcast_ref::<T>())
            .map(f);
        found
    }

    pub fn with_behaviour_mut<T: Behaviour, R>(
        &mut self,
        entity: EcsEntity,
        f: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        let mut behaviours = self.ecs.write_storage::<Behaviours>();
        let found = behaviours
            .get_mut(entity)?
            .0
            .iter_mut()
            .find_map(|b| (**b).downcast_mut::<T>())
            .map(f);
        found
    }

    /// Visits every behaviour under `root` (inclusive), depth-first, without
    /// looking at active flags.
    pub fn visit_behaviours_mut<F>(&mut self, root: EcsEntity, mut f: F)
    where
        F: FnMut(EcsEntity, &str, &mut dyn Behaviour),
    {
        let order = self.descendants(root);
        let names = self.ecs.read_storage::<Name>();
        let mut behaviours = self.ecs.write_storage::<Behaviours>();
        for e in order {
            let name = names.get(e).map_or("", |n| n.0.as_str());
            if let Some(list) = behaviours.get_mut(e) {
                for b in list.0.iter_mut() {
                    f(e, name, &mut **b);
                }
            }
        }
    }

    pub(crate) fn ensure_alive(&self, entity: EcsEntity) -> BootResult<()> {
        if self.ecs.is_alive(entity) {
            Ok(())
        } else {
            Err(BootError::DeadEntity(entity))
        }
    }

    /// New top-level object in the transient partition, no activation refresh.
    pub(crate) fn create_detached(&mut self, name: &str, active: bool) -> EcsEntity {
        self.ecs
            .create_entity()
            .with(Name(name.to_owned()))
            .with(ActiveSelf(active))
            .with(Children::default())
            .build()
    }

    pub(crate) fn attach(&mut self, child: EcsEntity, parent: EcsEntity) {
        {
            let mut parents = self.ecs.write_storage::<Parent>();
            let mut children = self.ecs.write_storage::<Children>();
            let _ = parents.insert(child, Parent(parent));
            if let Some(c) = children.get_mut(parent) {
                c.0.push(child);
            }
        }
        let persistent = self.is_persistent(parent);
        let subtree = self.descendants(child);
        self.set_partition(&subtree, persistent);
    }

    pub(crate) fn detach(&mut self, child: EcsEntity) {
        let mut parents = self.ecs.write_storage::<Parent>();
        let mut children = self.ecs.write_storage::<Children>();
        if let Some(Parent(old)) = parents.remove(child) {
            if let Some(c) = children.get_mut(old) {
                c.0.retain(|&e| e != child);
            }
        }
    }

    /// Deletes entities without running any callback.
    pub(crate) fn purge(&mut self, entities: &[EcsEntity]) {
        if let Err(e) = self.ecs.delete_entities(entities) {
            error!("purge hit a stale entity: {:?}", e);
        }
    }

    fn set_partition(&mut self, entities: &[EcsEntity], persistent: bool) {
        let mut flags = self.ecs.write_storage::<Persistent>();
        for &e in entities {
            if persistent {
                let _ = flags.insert(e, Persistent);
            } else {
                flags.remove(e);
            }
        }
    }

    fn is_ancestor_of(&self, ancestor: EcsEntity, entity: EcsEntity) -> bool {
        let parents = self.ecs.read_storage::<Parent>();
        let mut current = parents.get(entity).map(|p| p.0);
        while let Some(e) = current {
            if e == ancestor {
                return true;
            }
            current = parents.get(e).map(|p| p.0);
        }
        false
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
