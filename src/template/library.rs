/// 模板庫
///
/// Stand-in for the engine's asset store: templates addressed by name,
/// loaded from `.json`, `.yaml` or `.yml` files.

use log::{info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::catalog::BehaviourCatalog;
use super::import_template::TemplateData;
use super::prefab::Template;
use crate::error::{BootError, BootResult};

#[derive(Clone, Debug, Default)]
pub struct TemplateLibrary {
    templates: BTreeMap<String, Template>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the template previously stored under the same name.
    pub fn insert(&mut self, template: Template) -> Option<Template> {
        let name = template.name().to_owned();
        let old = self.templates.insert(name.clone(), template);
        if old.is_some() {
            warn!("template `{}` replaced", name);
        }
        old
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Loads one template file and returns the template's name.
    pub fn load_file(&mut self, path: &Path, catalog: &BehaviourCatalog) -> BootResult<String> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| BootError::Io {
            path: display.clone(),
            source,
        })?;

        let parse_error = |reason: String| BootError::Parse {
            path: display.clone(),
            reason,
        };
        let data = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => {
                TemplateData::from_yaml_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            _ => TemplateData::from_json_str(&content).map_err(|e| parse_error(e.to_string()))?,
        };

        let template = data.resolve(catalog)?;
        let name = template.name().to_owned();
        info!(
            "載入模板 `{}` from {}: {} node(s), {} behaviour(s)",
            name,
            display,
            template.node_count(),
            template.behaviour_count()
        );
        self.insert(template);
        Ok(name)
    }

    /// Loads every template file in `dir`, in file name order. Other files
    /// are ignored.
    pub fn load_dir(&mut self, dir: &Path, catalog: &BehaviourCatalog) -> BootResult<usize> {
        let io_error = |source| BootError::Io {
            path: dir.display().to_string(),
            source,
        };
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            let is_template = matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("json") | Some("yaml") | Some("yml")
            );
            if path.is_file() && is_template {
                paths.push(path);
            }
        }
        paths.sort();

        for path in &paths {
            self.load_file(path, catalog)?;
        }
        Ok(paths.len())
    }
}
