use crate::controller::SurfaceId;
use crate::geometry::Point;

/// Raw interaction forwarded by the view layer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A click that landed on the backdrop, i.e. outside the popup surface.
    BackdropClick,
    KeyDown { key: String },
}

impl InputEvent {
    pub fn key(key: impl Into<String>) -> Self {
        InputEvent::KeyDown { key: key.into() }
    }

    pub fn is_escape(&self) -> bool {
        matches!(self, InputEvent::KeyDown { key } if key == "Escape" || key == "Esc")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Explicit,
    BackdropClick,
    EscapeKey,
}

impl CloseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseReason::Explicit => "explicit",
            CloseReason::BackdropClick => "backdrop_click",
            CloseReason::EscapeKey => "escape_key",
        }
    }
}

impl std::fmt::Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Notification sent to popup observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupEvent {
    Opened { surface: SurfaceId, position: Point },
    Closed { surface: SurfaceId, reason: CloseReason },
}
