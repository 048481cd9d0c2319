/// 常駐物件啟動流程
///
/// instantiate under an inactive wrapper → initialize every persistent
/// object → flag the wrapper long-lived → detach the template root's
/// children to top level → destroy the wrapper.

use hashbrown::HashSet;
use log::{debug, info};
use specs::Entity as EcsEntity;

use super::persistent_object::InitContext;
use crate::error::{BootError, BootResult};
use crate::scene::Scene;
use crate::template::{Template, TemplateLibrary};

pub const WRAPPER_NAME: &str = "[PersistentObjects]";

#[derive(Clone, Debug, Default)]
pub struct BootReport {
    pub template: String,
    /// Number of `initialize` calls made.
    pub initialized: usize,
    /// New top-level objects of the long-lived partition, in template order.
    pub relocated: Vec<EcsEntity>,
}

pub fn initialize_persistent_objects(scene: &mut Scene, template: &Template) -> BootResult<BootReport> {
    info!("bootstrapping persistent objects from `{}`", template.name());

    // Inactive from the start: nothing below it may activate.
    let wrapper = scene.spawn(WRAPPER_NAME, None, false)?;

    let instance = match scene.instantiate(template, Some(wrapper)) {
        Ok(instance) => instance,
        Err(err) => {
            scene.destroy(wrapper)?;
            return Err(err);
        }
    };

    let registry = scene.registry();
    let mut initialized = 0;
    scene.visit_behaviours_mut(instance, |entity, name, behaviour| {
        let type_name = behaviour.type_name();
        if let Some(persistent) = behaviour.as_persistent_mut() {
            debug!("initialize {} on {:?} `{}`", type_name, entity, name);
            let mut ctx = InitContext::new(entity, name, &registry);
            persistent.initialize(&mut ctx);
            initialized += 1;
        }
    });

    scene.mark_persistent(wrapper)?;

    let relocated = scene.children(instance);
    for &object in &relocated {
        // Activation callbacks for this subtree fire here.
        scene.set_parent(object, None)?;
    }

    scene.destroy(wrapper)?;

    info!(
        "`{}` bootstrapped: {} persistent object(s) initialized, {} object(s) relocated",
        template.name(),
        initialized,
        relocated.len()
    );
    Ok(BootReport {
        template: template.name().to_owned(),
        initialized,
        relocated,
    })
}

/// Resolves templates by name and lets each of them run once.
#[derive(Debug, Default)]
pub struct Bootstrapper {
    library: TemplateLibrary,
    completed: HashSet<String>,
}

impl Bootstrapper {
    pub fn new(library: TemplateLibrary) -> Self {
        Self {
            library,
            completed: HashSet::new(),
        }
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut TemplateLibrary {
        &mut self.library
    }

    pub fn has_run(&self, name: &str) -> bool {
        self.completed.contains(name)
    }

    /// A missing template is reported before the scene is touched.
    pub fn run(&mut self, scene: &mut Scene, name: &str) -> BootResult<BootReport> {
        let template = self
            .library
            .get(name)
            .ok_or_else(|| BootError::MissingTemplate(name.to_owned()))?;
        if self.completed.contains(name) {
            return Err(BootError::AlreadyBootstrapped(name.to_owned()));
        }
        let report = initialize_persistent_objects(scene, template)?;
        self.completed.insert(name.to_owned());
        Ok(report)
    }
}
