use specs::storage::{DenseVecStorage, VecStorage};
use specs::{Component, Entity as EcsEntity};

/// Display name of an object, copied from the template node it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Name(pub String);

impl Component for Name {
    type Storage = VecStorage<Self>;
}

/// The object's own active flag. Whether it is active in the hierarchy also
/// depends on every ancestor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActiveSelf(pub bool);

impl Component for ActiveSelf {
    type Storage = VecStorage<Self>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Parent(pub EcsEntity);

impl Component for Parent {
    type Storage = DenseVecStorage<Self>;
}

/// Ordered child list, kept in sync with [`Parent`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Children(pub Vec<EcsEntity>);

impl Component for Children {
    type Storage = DenseVecStorage<Self>;
}
