pub mod command;
pub mod geometry;
pub mod macros;
pub mod picker;
pub mod selection;
pub mod time;
pub mod timer;

pub use geometry::{DialValue, Point, Rect};
pub use picker::{PickerProps, TimePicker};
pub use selection::SelectionMode;
pub use time::{Hour, Minute, TimeValue};
