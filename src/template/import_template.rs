use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog::BehaviourCatalog;
use super::prefab::{Template, TemplateNode};
use crate::error::BootResult;
use crate::json_preprocessor::JsonPreprocessor;

/// On-disk template, resolved against a [`BehaviourCatalog`].
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TemplateData {
    pub name: String,
    #[serde(default)]
    pub children: Vec<NodeData>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NodeData {
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub behaviours: Vec<BehaviourData>,
    #[serde(default)]
    pub children: Vec<NodeData>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BehaviourData {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub params: Value,
}

fn default_active() -> bool {
    true
}

impl TemplateData {
    pub fn from_json_str(s: &str) -> Result<Self, serde_json::Error> {
        JsonPreprocessor::parse_json_with_comments(s)
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// Fails on the first behaviour type the catalog does not know.
    pub fn resolve(&self, catalog: &BehaviourCatalog) -> BootResult<Template> {
        self.children
            .iter()
            .try_fold(Template::new(self.name.clone()), |template, node| {
                Ok(template.with_child(node.resolve(catalog)?))
            })
    }
}

impl NodeData {
    fn resolve(&self, catalog: &BehaviourCatalog) -> BootResult<TemplateNode> {
        let mut node = TemplateNode::new(self.name.clone()).with_active(self.active);
        for b in &self.behaviours {
            node = node.with_behaviour(catalog.spawner(&b.type_name, b.params.clone())?);
        }
        for child in &self.children {
            node = node.with_child(child.resolve(catalog)?);
        }
        Ok(node)
    }
}
