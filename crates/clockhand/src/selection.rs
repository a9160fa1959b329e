use crate::geometry::{self, DialValue};
use crate::time::{Hour, Minute, TimeValue};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum SelectionMode {
    #[default]
    Hours,
    Minutes,
}

impl SelectionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Hours => Self::Minutes,
            Self::Minutes => Self::Hours,
        }
    }

    /// Degrees between adjacent positions on the face.
    pub fn step_degrees(self) -> f64 {
        match self {
            Self::Hours => 15.0,
            Self::Minutes => 6.0,
        }
    }

    pub fn marking_count(self) -> u32 {
        match self {
            Self::Hours => 24,
            Self::Minutes => 12,
        }
    }

    pub fn marking_stride(self) -> u32 {
        match self {
            Self::Hours => 1,
            Self::Minutes => 5,
        }
    }

    pub fn prompt(self) -> &'static str {
        match self {
            Self::Hours => "Select hour",
            Self::Minutes => "Select minute",
        }
    }

    /// Label of the button that switches away from this mode.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::Hours => "MIN",
            Self::Minutes => "HR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerAction {
    #[default]
    Keep,
    Restart,
    Cancel,
}

/// What a transition asks of its owner: a value to report, and what to do
/// with the pending auto-advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SelectionAction {
    pub changed: Option<TimeValue>,
    pub timer: TimerAction,
}

impl SelectionAction {
    pub fn new(changed: Option<TimeValue>, timer: TimerAction) -> Self {
        Self { changed, timer }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    mode: SelectionMode,
    hour: Hour,
    minute: Minute,
}

impl Selection {
    pub fn new(time: TimeValue) -> Self {
        Self {
            mode: SelectionMode::Hours,
            hour: time.hour,
            minute: time.minute,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn hour(&self) -> Hour {
        self.hour
    }

    pub fn minute(&self) -> Minute {
        self.minute
    }

    /// The value the hand points at on the current face.
    pub fn selected(&self) -> DialValue {
        match self.mode {
            SelectionMode::Hours => DialValue::Hour(self.hour),
            SelectionMode::Minutes => DialValue::Minute(self.minute),
        }
    }

    pub fn hand_angle(&self) -> f64 {
        geometry::hand_angle(self.mode, self.hour, self.minute)
    }

    pub fn readout(&self) -> TimeValue {
        TimeValue::new(self.hour, self.minute)
    }

    /// Applies a resolved dial value against the caller's `snapshot`.
    ///
    /// Only the field matching the current mode is touched. A value for the
    /// other face is ignored.
    pub fn pick(&mut self, value: DialValue, snapshot: TimeValue) -> SelectionAction {
        match (self.mode, value) {
            (SelectionMode::Hours, DialValue::Hour(hour)) => {
                self.hour = hour;
                SelectionAction::new(Some(snapshot.with_hour(hour)), TimerAction::Restart)
            }
            (SelectionMode::Minutes, DialValue::Minute(minute)) => {
                self.minute = minute;
                SelectionAction::new(Some(snapshot.with_minute(minute)), TimerAction::Keep)
            }
            (mode, value) => {
                log::debug!("Ignoring {:?} while selecting {}", value, mode);
                SelectionAction::none()
            }
        }
    }

    pub fn toggle_mode(&mut self) -> SelectionAction {
        self.set_mode(self.mode.toggled())
    }

    /// An explicit mode choice always drops a pending auto-advance, so a stale
    /// timer can never override it.
    pub fn set_mode(&mut self, mode: SelectionMode) -> SelectionAction {
        self.mode = mode;
        SelectionAction::new(None, TimerAction::Cancel)
    }

    /// Auto-advance from hours to minutes. Returns whether the mode changed.
    pub fn advance(&mut self) -> bool {
        let advanced = self.mode == SelectionMode::Hours;
        self.mode = SelectionMode::Minutes;
        advanced
    }

    pub fn reset(&mut self, time: TimeValue) -> SelectionAction {
        *self = Self::new(time);
        SelectionAction::new(None, TimerAction::Cancel)
    }
}
