/// 模板實例化

use log::{debug, error};
use specs::{Entity as EcsEntity, WorldExt};

use super::core::Scene;
use crate::comp::Behaviours;
use crate::error::{BootError, BootResult};
use crate::template::{Template, TemplateNode};

impl Scene {
    /// Creates a fresh copy of `template` under `parent` (or at top level)
    /// and returns the copy's root.
    ///
    /// The whole tree is built before the activation refresh, so callbacks
    /// see a complete instance. If a behaviour factory fails, everything
    /// created so far is deleted without callbacks and the scene is left as
    /// it was.
    pub fn instantiate(&mut self, template: &Template, parent: Option<EcsEntity>) -> BootResult<EcsEntity> {
        if let Some(p) = parent {
            self.ensure_alive(p)?;
        }
        let root = self.create_detached(template.name(), true);
        let built = template
            .children()
            .iter()
            .try_for_each(|node| self.instantiate_node(node, root).map(|_| ()));
        if let Err(reason) = built {
            let partial = self.descendants(root);
            self.purge(&partial);
            error!("instantiating template `{}` failed: {}", template.name(), reason);
            return Err(BootError::Instantiate {
                template: template.name().to_owned(),
                reason: reason.to_string(),
            });
        }
        if let Some(p) = parent {
            self.attach(root, p);
        }
        debug!(
            "template `{}` instantiated as {:?}, {} node(s)",
            template.name(),
            root,
            template.node_count()
        );
        self.refresh_activation(root);
        Ok(root)
    }

    fn instantiate_node(&mut self, node: &TemplateNode, parent: EcsEntity) -> Result<EcsEntity, failure::Error> {
        let mut behaviours = Vec::with_capacity(node.behaviours().len());
        for spawner in node.behaviours() {
            behaviours.push(spawner.spawn()?);
        }
        let entity = self.create_detached(node.name(), node.is_active());
        if !behaviours.is_empty() {
            let _ = self
                .ecs()
                .write_storage::<Behaviours>()
                .insert(entity, Behaviours(behaviours));
        }
        self.attach(entity, parent);
        for child in node.children() {
            self.instantiate_node(child, entity)?;
        }
        Ok(entity)
    }
}
