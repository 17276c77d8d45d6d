//! # Framework Errors
//!
//! Errors raised by the actor layer itself, shared by every resource type.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    /// The id counter produced an id that is already stored.
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
    /// The id counter cannot advance any further.
    #[error("Id space exhausted")]
    IdsExhausted,
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// True for faults in the actor plumbing rather than in the caller's request.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            FrameworkError::ActorClosed
                | FrameworkError::ActorDropped
                | FrameworkError::DuplicateId(_)
                | FrameworkError::IdsExhausted
        )
    }
}
