/// 啟用狀態傳播

use log::debug;
use specs::{Entity as EcsEntity, WorldExt};

use super::core::Scene;
use crate::comp::*;

impl Scene {
    /// Brings every object under `root` in line with its active-in-hierarchy
    /// state: newly active objects get `on_awake` (first time only) and
    /// `on_enable`, newly inactive ones get `on_disable`. Parents go first.
    pub(crate) fn refresh_activation(&mut self, root: EcsEntity) {
        for e in self.descendants(root) {
            let active = self.is_active_in_hierarchy(e);
            let enabled = self.is_enabled(e);
            if active && !enabled {
                self.activate(e);
            } else if !active && enabled {
                self.deactivate(e);
            }
        }
    }

    fn activate(&mut self, entity: EcsEntity) {
        let first_time = !self.is_awake(entity);
        {
            let mut awoken = self.ecs().write_storage::<Awoken>();
            let mut enabled = self.ecs().write_storage::<Enabled>();
            let _ = awoken.insert(entity, Awoken);
            let _ = enabled.insert(entity, Enabled);
        }
        if first_time {
            debug!("awake {:?} `{}`", entity, self.name(entity).unwrap_or_default());
        }
        self.each_behaviour(entity, None, |b, ctx| {
            if first_time {
                b.on_awake(ctx);
            }
            b.on_enable(ctx);
        });
    }

    fn deactivate(&mut self, entity: EcsEntity) {
        self.ecs().write_storage::<Enabled>().remove(entity);
        self.each_behaviour(entity, None, |b, ctx| b.on_disable(ctx));
    }

    /// Awake and enable a single behaviour added to an enabled object.
    pub(crate) fn start_behaviour(&mut self, entity: EcsEntity, index: usize) {
        self.each_behaviour(entity, Some(index), |b, ctx| {
            b.on_awake(ctx);
            b.on_enable(ctx);
        });
    }

    /// Callbacks owed to an object about to be deleted.
    pub(crate) fn teardown(&mut self, entity: EcsEntity) {
        let was_enabled = self.is_enabled(entity);
        let was_awake = self.is_awake(entity);
        if !was_enabled && !was_awake {
            return;
        }
        self.each_behaviour(entity, None, |b, ctx| {
            if was_enabled {
                b.on_disable(ctx);
            }
            if was_awake {
                b.on_destroy(ctx);
            }
        });
        self.ecs().write_storage::<Enabled>().remove(entity);
    }

    fn each_behaviour<F>(&self, entity: EcsEntity, only: Option<usize>, mut f: F)
    where
        F: FnMut(&mut dyn Behaviour, &mut ActivationContext<'_>),
    {
        let registry = self.registry();
        let names = self.ecs().read_storage::<Name>();
        let mut behaviours = self.ecs().write_storage::<Behaviours>();
        let name = names.get(entity).map_or("", |n| n.0.as_str());
        if let Some(list) = behaviours.get_mut(entity) {
            let mut ctx = ActivationContext::new(entity, name, &registry);
            for (i, b) in list.0.iter_mut().enumerate() {
                if only.map_or(true, |o| o == i) {
                    f(&mut **b, &mut ctx);
                }
            }
        }
    }
}
