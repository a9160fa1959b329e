use crate::selection::SelectionMode;
use crate::time::{Hour, Minute};

/// Fraction of the face size at which markings sit and the hand ends.
pub const REFERENCE_RADIUS: f64 = 0.40;

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

/// Bounding box of the dial face, in the same coordinate space as pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Clockwise angle in degrees, in `[0, 360)`, of `pointer` as seen from the
    /// center of the face, with zero at 12 o'clock.
    pub fn angle_at(&self, pointer: Point) -> f64 {
        let center = self.center();
        let (dx, dy) = (pointer.x - center.x, pointer.y - center.y);

        // atan2 measures from +x; shift so zero points straight up
        let angle = dy.atan2(dx).to_degrees() + 90.0;
        let angle = if angle < 0.0 { angle + 360.0 } else { angle };
        // a hair below zero rounds up to a full turn
        if angle >= 360.0 { 0.0 } else { angle }
    }

    /// Point at `angle` (clockwise from 12 o'clock) and `fraction` of the face
    /// size away from the center. Each axis scales with its own dimension.
    pub fn point_at(&self, angle: f64, fraction: f64) -> Point {
        let rad = (angle - 90.0).to_radians();
        let center = self.center();
        Point::new(
            center.x + self.width * fraction * rad.cos(),
            center.y + self.height * fraction * rad.sin(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialValue {
    Hour(Hour),
    Minute(Minute),
}

impl DialValue {
    pub fn get(self) -> u8 {
        match self {
            Self::Hour(h) => h.get(),
            Self::Minute(m) => m.get(),
        }
    }
}

/// Resolves a face angle to the discrete value under it for `mode`.
///
/// Rounds to the nearest position with [`f64::round`]; exact half-steps go to
/// the upper position, and a full turn wraps back onto zero.
pub fn resolve(mode: SelectionMode, angle: f64) -> DialValue {
    let position = (angle / mode.step_degrees()).round() as u32;
    match mode {
        SelectionMode::Hours => DialValue::Hour(Hour::wrapping(position)),
        SelectionMode::Minutes => DialValue::Minute(Minute::wrapping(position)),
    }
}

pub fn hand_angle(mode: SelectionMode, hour: Hour, minute: Minute) -> f64 {
    let position = match mode {
        SelectionMode::Hours => hour.get(),
        SelectionMode::Minutes => minute.get(),
    };
    f64::from(position) * mode.step_degrees()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marking {
    pub value: DialValue,
    pub label: String,
    pub angle: f64,
    pub position: Point,
}

/// Labelled positions drawn on the face for `mode`: every hour, or every fifth minute.
pub fn markings(mode: SelectionMode, rect: Rect, fraction: f64) -> Vec<Marking> {
    (0..mode.marking_count())
        .map(|i| {
            let raw = i * mode.marking_stride();
            let value = match mode {
                SelectionMode::Hours => DialValue::Hour(Hour::wrapping(raw)),
                SelectionMode::Minutes => DialValue::Minute(Minute::wrapping(raw)),
            };
            let angle = f64::from(raw) * mode.step_degrees();
            Marking {
                value,
                label: format!("{:02}", value.get()),
                angle,
                position: rect.point_at(angle, fraction),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn face() -> Rect {
        Rect::new(0.0, 0.0, 200.0, 200.0)
    }

    fn hour_at(angle: f64) -> u8 {
        resolve(SelectionMode::Hours, angle).get()
    }

    fn minute_at(angle: f64) -> u8 {
        resolve(SelectionMode::Minutes, angle).get()
    }

    #[test]
    fn test_angle_is_clockwise_from_twelve() {
        let rect = face();
        let cases = vec![
            (Point::new(100.0, 20.0), 0.0),
            (Point::new(180.0, 100.0), 90.0),
            (Point::new(100.0, 180.0), 180.0),
            (Point::new(20.0, 100.0), 270.0),
            (Point::new(180.0, 20.0), 45.0),
            (Point::new(20.0, 20.0), 315.0),
        ];

        for (pointer, expected) in cases {
            let angle = rect.angle_at(pointer);
            assert!((angle - expected).abs() < EPS, "{pointer:?}: {angle}");
        }
    }

    #[test]
    fn test_angle_respects_rect_offset() {
        let rect = Rect::new(300.0, 50.0, 200.0, 200.0);
        assert!((rect.angle_at(Point::new(400.0, 230.0)) - 180.0).abs() < EPS);
        assert!((rect.angle_at(Point::new(320.0, 150.0)) - 270.0).abs() < EPS);
    }

    #[test]
    fn test_angle_stays_in_range() {
        let rect = face();
        for i in 0..720 {
            let rad = f64::from(i) * std::f64::consts::PI / 360.0;
            let pointer = Point::new(100.0 + 70.0 * rad.cos(), 100.0 + 70.0 * rad.sin());
            let angle = rect.angle_at(pointer);
            assert!((0.0..360.0).contains(&angle), "{angle}");
        }
        // dead center still resolves
        assert!((rect.angle_at(rect.center()) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_just_left_of_twelve_wraps_to_zero() {
        let rect = face();
        let pointer = Point {
            x: 99.99999999999999,
            y: 30.0,
        };

        let angle = rect.angle_at(pointer);

        assert!((0.0..360.0).contains(&angle), "{angle}");
        assert_eq!(hour_at(angle), 0);
        assert_eq!(minute_at(angle), 0);
    }

    #[test]
    fn test_hours_follow_fifteen_degree_steps() {
        for i in 0..3600 {
            let angle = f64::from(i) / 10.0;
            let expected = ((angle / 15.0).round() as u32 % 24) as u8;
            assert_eq!(hour_at(angle), expected, "{angle}");
        }
        assert_eq!(hour_at(0.0), 0);
        assert_eq!(hour_at(180.0), 12);
        assert_eq!(hour_at(7.4), 0);
        assert_eq!(hour_at(7.6), 1);
    }

    #[test]
    fn test_hours_wrap_near_full_turn() {
        assert_eq!(hour_at(352.5), 0);
        assert_eq!(hour_at(355.0), 0);
        assert_eq!(hour_at(359.999), 0);
        assert_eq!(hour_at(352.4), 23);
    }

    #[test]
    fn test_minutes_follow_six_degree_steps() {
        for i in 0..3600 {
            let angle = f64::from(i) / 10.0;
            let expected = ((angle / 6.0).round() as u32 % 60) as u8;
            assert_eq!(minute_at(angle), expected, "{angle}");
        }
        assert_eq!(minute_at(270.0), 45);
        assert_eq!(minute_at(359.0), 0);
        // full granularity, not only fives
        assert_eq!(minute_at(42.0), 7);
    }

    #[test]
    fn test_hand_angle_tracks_mode() {
        let (h, m) = (Hour::new(6).unwrap(), Minute::new(45).unwrap());
        assert_eq!(hand_angle(SelectionMode::Hours, h, m), 90.0);
        assert_eq!(hand_angle(SelectionMode::Minutes, h, m), 270.0);
    }

    #[test]
    fn test_markings() {
        let rect = face();

        let hours = markings(SelectionMode::Hours, rect, REFERENCE_RADIUS);
        assert_eq!(hours.len(), 24);
        assert_eq!(hours[0].label, "00");
        assert_eq!(hours[23].label, "23");
        // 00 sits straight above the center
        assert!((hours[0].position.x - 100.0).abs() < EPS);
        assert!((hours[0].position.y - 20.0).abs() < EPS);
        // 06 sits to the right
        assert!((hours[6].position.x - 180.0).abs() < EPS);
        assert!((hours[6].position.y - 100.0).abs() < EPS);

        let minutes = markings(SelectionMode::Minutes, rect, REFERENCE_RADIUS);
        assert_eq!(minutes.len(), 12);
        assert_eq!(minutes[1].label, "05");
        assert_eq!(minutes[9].value, DialValue::Minute(Minute::new(45).unwrap()));
        assert!((minutes[9].angle - 270.0).abs() < EPS);
    }

    #[test]
    fn test_click_on_marking_resolves_to_it() {
        let rect = Rect::new(12.0, 40.0, 256.0, 256.0);
        for mode in [SelectionMode::Hours, SelectionMode::Minutes] {
            for marking in markings(mode, rect, REFERENCE_RADIUS) {
                let angle = rect.angle_at(marking.position);
                assert_eq!(resolve(mode, angle), marking.value, "{}", marking.label);
            }
        }
    }
}
