use skyline_common::EntityId;
use skyline_ecs::EcsError;
use skyline_world::LayoutError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("entity {0:?} not found")]
    EntityNotFound(EntityId),
    #[error(transparent)]
    Ecs(#[from] EcsError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("layout: {0}")]
    Layout(#[from] LayoutError),
}
