use crate::errors::PositioningError;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned screen rectangle, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    // Detached elements report an all-zero box
    fn is_detached(&self) -> bool {
        *self == Rect::default()
    }
}

/// Something a popup can be anchored to. The view layer implements this for
/// its rendered trigger element; `None` means the element has no geometry.
pub trait Anchor {
    fn bounding_rect(&self) -> Option<Rect>;
}

impl Anchor for Rect {
    fn bounding_rect(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl Anchor for Option<Rect> {
    fn bounding_rect(&self) -> Option<Rect> {
        *self
    }
}

/// Resolves the trigger's rect and places the popup below its left edge.
pub fn anchor_below_left(
    trigger: &dyn Anchor,
    offset_x: f64,
    offset_y: f64,
) -> Result<Point, PositioningError> {
    let rect = trigger
        .bounding_rect()
        .ok_or(PositioningError::Unresolved)?;

    if !rect.is_finite() {
        return Err(PositioningError::NonFinite);
    }
    if rect.is_detached() {
        return Err(PositioningError::Detached);
    }

    Ok(Point::new(rect.left() + offset_x, rect.bottom() + offset_y))
}
