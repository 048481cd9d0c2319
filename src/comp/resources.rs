/// Name of the scene most recently loaded through `Scene::load_scene`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedScene(pub String);
