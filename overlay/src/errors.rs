use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositioningError {
    #[error("trigger has no screen geometry")]
    Unresolved,
    #[error("trigger is detached from the render tree")]
    Detached,
    #[error("trigger geometry is not finite")]
    NonFinite,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayError {
    #[error("cannot position popup: {0}")]
    Positioning(#[from] PositioningError),
}

impl OverlayError {
    pub fn error_code(&self) -> &'static str {
        match self {
            OverlayError::Positioning(PositioningError::Unresolved) => "unresolved_trigger",
            OverlayError::Positioning(PositioningError::Detached) => "detached_trigger",
            OverlayError::Positioning(PositioningError::NonFinite) => "non_finite_trigger",
        }
    }
}
