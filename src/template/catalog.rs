/// 行為型別目錄
///
/// Maps the type names used in template files to behaviour factories.

use serde::de::DeserializeOwned;
use serde_json::Value;
use hashbrown::HashMap;
use std::sync::Arc;

use super::prefab::BehaviourSpawner;
use crate::comp::Behaviour;
use crate::error::{BootError, BootResult};

pub type BehaviourFactory = dyn Fn(&Value) -> Result<Box<dyn Behaviour>, failure::Error> + Send + Sync;

pub struct BehaviourCatalog {
    factories: HashMap<String, Arc<BehaviourFactory>>,
}

impl std::fmt::Debug for BehaviourCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviourCatalog")
            .field("factories", &format!("{} factories", self.factories.len()))
            .finish()
    }
}

impl BehaviourCatalog {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory, replacing any previous one with the same name.
    pub fn register<F>(&mut self, type_name: &str, factory: F)
    where
        F: Fn(&Value) -> Result<Box<dyn Behaviour>, failure::Error> + Send + Sync + 'static,
    {
        self.factories.insert(type_name.to_owned(), Arc::new(factory));
    }

    /// Behaviour built from `Default`, `params` ignored.
    pub fn register_default<B: Behaviour + Default>(&mut self, type_name: &str) {
        self.register(type_name, |_| Ok(Box::new(B::default()) as Box<dyn Behaviour>));
    }

    /// Behaviour deserialized from `params`. A missing `params` (`null`) is
    /// read as an empty object so `#[serde(default)]` fields work.
    pub fn register_deserialize<B: Behaviour + DeserializeOwned>(&mut self, type_name: &str) {
        self.register(type_name, |params| {
            let params = if params.is_null() {
                Value::Object(Default::default())
            } else {
                params.clone()
            };
            let behaviour: B = serde_json::from_value(params)?;
            Ok(Box::new(behaviour) as Box<dyn Behaviour>)
        });
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Binds a type name and its parameters into a spawner. Parameters are
    /// only validated when the spawner runs.
    pub fn spawner(&self, type_name: &str, params: Value) -> BootResult<BehaviourSpawner> {
        let factory = self
            .factories
            .get(type_name)
            .cloned()
            .ok_or_else(|| BootError::UnknownBehaviour(type_name.to_owned()))?;
        Ok(BehaviourSpawner::new(type_name, move || factory(&params)))
    }
}

impl Default for BehaviourCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Default, Deserialize)]
    struct Volume {
        #[serde(default)]
        level: f32,
    }

    impl Behaviour for Volume {}

    #[test]
    fn test_unknown_type_is_rejected() {
        let catalog = BehaviourCatalog::new();
        let err = catalog.spawner("Nope", Value::Null).unwrap_err();
        assert!(matches!(err, BootError::UnknownBehaviour(ref name) if name == "Nope"));
    }

    #[test]
    fn test_deserialized_params_reach_the_behaviour() {
        let mut catalog = BehaviourCatalog::new();
        catalog.register_deserialize::<Volume>("Volume");
        catalog.register_default::<Volume>("Silent");
        assert_eq!(catalog.type_names(), vec!["Silent", "Volume"]);

        let spawner = catalog.spawner("Volume", json!({ "level": 0.5 })).unwrap();
        let behaviour = spawner.spawn().unwrap();
        assert_eq!(behaviour.downcast_ref::<Volume>().unwrap().level, 0.5);

        let defaulted = catalog.spawner("Volume", Value::Null).unwrap().spawn().unwrap();
        assert_eq!(defaulted.downcast_ref::<Volume>().unwrap().level, 0.0);
    }

    #[test]
    fn test_bad_params_fail_at_spawn_time() {
        let mut catalog = BehaviourCatalog::new();
        catalog.register_deserialize::<Volume>("Volume");
        let spawner = catalog.spawner("Volume", json!({ "level": "loud" })).unwrap();
        assert!(spawner.spawn().is_err());
    }
}
