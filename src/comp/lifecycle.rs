use specs::storage::NullStorage;
use specs::Component;

/// `on_awake` already ran for this object.
#[derive(Copy, Clone, Debug, Default)]
pub struct Awoken;

impl Component for Awoken {
    type Storage = NullStorage<Self>;
}

/// The object is currently active in the hierarchy and its behaviours got
/// `on_enable`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Enabled;

impl Component for Enabled {
    type Storage = NullStorage<Self>;
}

/// Member of the long-lived partition, kept across `load_scene`.
#[derive(Copy, Clone, Debug, Default)]
pub struct Persistent;

impl Component for Persistent {
    type Storage = NullStorage<Self>;
}
