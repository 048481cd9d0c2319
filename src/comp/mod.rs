pub mod behaviour;
pub mod hierarchy;
pub mod lifecycle;
pub mod resources;

pub use self::{
    behaviour::*,
    hierarchy::*,
    lifecycle::*,
    resources::*,
};
