pub mod catalog;
pub mod import_template;
pub mod library;
pub mod prefab;

pub use self::{
    catalog::{BehaviourCatalog, BehaviourFactory},
    import_template::{BehaviourData, NodeData, TemplateData},
    library::TemplateLibrary,
    prefab::{BehaviourSpawner, Template, TemplateNode},
};
