use std::fmt;
use std::sync::Arc;

use crate::comp::Behaviour;

pub type SpawnFn = dyn Fn() -> Result<Box<dyn Behaviour>, failure::Error> + Send + Sync;

/// Named factory producing a fresh behaviour for every instantiation.
#[derive(Clone)]
pub struct BehaviourSpawner {
    type_name: String,
    spawn: Arc<SpawnFn>,
}

impl BehaviourSpawner {
    pub fn new<F>(type_name: impl Into<String>, spawn: F) -> Self
    where
        F: Fn() -> Result<Box<dyn Behaviour>, failure::Error> + Send + Sync + 'static,
    {
        Self {
            type_name: type_name.into(),
            spawn: Arc::new(spawn),
        }
    }

    /// Every instance starts as a clone of `prototype`.
    pub fn of<B: Behaviour + Clone>(prototype: B) -> Self {
        Self::new(std::any::type_name::<B>(), move || {
            Ok(Box::new(prototype.clone()) as Box<dyn Behaviour>)
        })
    }

    pub fn from_default<B: Behaviour + Default>() -> Self {
        Self::new(std::any::type_name::<B>(), || {
            Ok(Box::new(B::default()) as Box<dyn Behaviour>)
        })
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn spawn(&self) -> Result<Box<dyn Behaviour>, failure::Error> {
        (self.spawn)()
    }
}

impl fmt::Debug for BehaviourSpawner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("BehaviourSpawner").field(&self.type_name).finish()
    }
}

#[derive(Clone, Debug)]
pub struct TemplateNode {
    name: String,
    active: bool,
    behaviours: Vec<BehaviourSpawner>,
    children: Vec<TemplateNode>,
}

impl TemplateNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            behaviours: vec![],
            children: vec![],
        }
    }

    pub fn inactive(self) -> Self {
        self.with_active(false)
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_behaviour(mut self, spawner: BehaviourSpawner) -> Self {
        self.behaviours.push(spawner);
        self
    }

    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn behaviours(&self) -> &[BehaviourSpawner] {
        &self.behaviours
    }

    pub fn children(&self) -> &[TemplateNode] {
        &self.children
    }

    fn count(&self, out: &mut (usize, usize)) {
        out.0 += 1;
        out.1 += self.behaviours.len();
        for child in &self.children {
            child.count(out);
        }
    }
}

/// Inert object tree. The root is a plain container: its children are what
/// ends up as top-level objects after a bootstrap.
#[derive(Clone, Debug)]
pub struct Template {
    name: String,
    children: Vec<TemplateNode>,
}

impl Template {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: vec![],
        }
    }

    pub fn with_child(mut self, child: TemplateNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[TemplateNode] {
        &self.children
    }

    /// Nodes including the root container.
    pub fn node_count(&self) -> usize {
        self.totals().0
    }

    pub fn behaviour_count(&self) -> usize {
        self.totals().1
    }

    fn totals(&self) -> (usize, usize) {
        let mut out = (1, 0);
        for child in &self.children {
            child.count(&mut out);
        }
        out
    }
}
