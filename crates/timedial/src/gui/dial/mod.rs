use clockhand::Rect;

pub mod view;

pub use view::draw;

pub const DIAL_SIZE: i32 = 256;
pub const BORDER_WIDTH: f64 = 2.0;
pub const HAND_WIDTH: f64 = 4.0;
pub const CENTER_DOT_RADIUS: f64 = 6.0;
pub const LABEL_FONT_SIZE: f64 = 14.0;

/// Largest square centered in the drawing area. Drawing and hit testing both
/// go through it, so a click lands on what is drawn under it.
pub fn face_rect(width: f64, height: f64) -> Rect {
    let side = width.min(height);
    Rect::new((width - side) / 2.0, (height - side) / 2.0, side, side)
}
