use crate::component::ComponentKind;

/// Errors from entity and component operations. None of them are fatal to
/// the frame; callers log and carry on.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum EcsError {
    #[error("entity '{entity}' has no {kind} component")]
    MissingComponent { entity: String, kind: ComponentKind },
    #[error("invalid physics parameter {field}: {value}")]
    InvalidPhysics { field: &'static str, value: f32 },
}
