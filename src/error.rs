/// 啟動錯誤定義
///
/// Everything in here is fatal for startup: callers are expected to abort
/// instead of continuing with a partially-ready singleton set.

use specs::Entity;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BootError {
    #[error("template `{0}` not found")]
    MissingTemplate(String),

    #[error("template `{0}` was already bootstrapped")]
    AlreadyBootstrapped(String),

    #[error("unknown behaviour type `{0}`")]
    UnknownBehaviour(String),

    #[error("failed to instantiate template `{template}`: {reason}")]
    Instantiate { template: String, reason: String },

    #[error("entity {0:?} is not alive")]
    DeadEntity(Entity),

    #[error("cannot parent {child:?} under {parent:?}: would create a cycle")]
    HierarchyCycle { child: Entity, parent: Entity },

    #[error("only root objects can be made persistent, {0:?} has a parent")]
    NotRoot(Entity),

    #[error("failed to read `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template `{path}`: {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type BootResult<T> = Result<T, BootError>;
