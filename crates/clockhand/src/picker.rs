use crate::geometry::{self, DialValue, Point, Rect};
use crate::selection::{Selection, SelectionAction, SelectionMode, TimerAction};
use crate::time::{Hour, Minute, TimeValue};
use crate::timer::{AutoAdvance, Ticket};

pub type ChangeCallback = Box<dyn FnMut(TimeValue)>;
pub type ToggleCallback = Box<dyn FnMut()>;

/// Everything the caller hands the picker on each render.
pub struct PickerProps {
    pub time: TimeValue,
    pub on_change: ChangeCallback,
    pub keyboard_visible: bool,
    pub on_toggle_keyboard: ToggleCallback,
}

/// The assembled control: dial geometry, selection state and auto-advance.
///
/// The caller's time is only a snapshot. Picks are reported through
/// `on_change` as modified copies and reach the picker again through
/// [`TimePicker::sync`] once the caller has taken them in.
pub struct TimePicker {
    time: TimeValue,
    selection: Selection,
    advance: AutoAdvance,
    keyboard_visible: bool,
    on_change: ChangeCallback,
    on_toggle_keyboard: ToggleCallback,
}

impl TimePicker {
    pub fn new(props: PickerProps, advance: AutoAdvance) -> Self {
        Self {
            time: props.time,
            selection: Selection::new(props.time),
            advance,
            keyboard_visible: props.keyboard_visible,
            on_change: props.on_change,
            on_toggle_keyboard: props.on_toggle_keyboard,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn selected_hour(&self) -> Hour {
        self.selection.hour()
    }

    pub fn selected_minute(&self) -> Minute {
        self.selection.minute()
    }

    pub fn selected_value(&self) -> DialValue {
        self.selection.selected()
    }

    pub fn hand_angle(&self) -> f64 {
        self.selection.hand_angle()
    }

    pub fn readout(&self) -> TimeValue {
        self.selection.readout()
    }

    pub fn time(&self) -> TimeValue {
        self.time
    }

    pub fn keyboard_visible(&self) -> bool {
        self.keyboard_visible
    }

    pub fn is_advance_pending(&self) -> bool {
        self.advance.is_pending()
    }

    pub fn advance_timer(&mut self) -> &mut AutoAdvance {
        &mut self.advance
    }

    /// Resolves a click on the face and picks the value under it.
    pub fn click(&mut self, pointer: Point, rect: Rect) -> DialValue {
        let angle = rect.angle_at(pointer);
        let value = geometry::resolve(self.mode(), angle);
        log::debug!("Click at {:.1}° resolved to {:?}", angle, value);
        self.pick(value);
        value
    }

    pub fn pick(&mut self, value: DialValue) {
        let action = self.selection.pick(value, self.time);
        self.apply(action);
    }

    pub fn toggle_mode(&mut self) {
        let action = self.selection.toggle_mode();
        log::debug!("Mode toggled to {}", self.mode());
        self.apply(action);
    }

    pub fn set_mode(&mut self, mode: SelectionMode) {
        let action = self.selection.set_mode(mode);
        log::debug!("Mode set to {}", mode);
        self.apply(action);
    }

    pub fn toggle_keyboard(&mut self) {
        (self.on_toggle_keyboard)();
    }

    /// Handles a fired auto-advance. Returns whether the mode changed.
    pub fn on_timer(&mut self, ticket: Ticket) -> bool {
        if !self.advance.accept(ticket) {
            return false;
        }
        let advanced = self.selection.advance();
        if advanced {
            log::debug!("Auto-advanced to {}", self.mode());
        }
        advanced
    }

    /// Takes in a re-render from the caller. The selection is left alone.
    pub fn sync(&mut self, time: TimeValue, keyboard_visible: bool) {
        self.time = time;
        self.keyboard_visible = keyboard_visible;
    }

    /// Re-seeds the selection from `time` and returns to hour selection.
    pub fn reset(&mut self, time: TimeValue) {
        self.time = time;
        let action = self.selection.reset(time);
        log::debug!("Reset to {}", time);
        self.apply(action);
    }

    fn apply(&mut self, action: SelectionAction) {
        if let Some(changed) = action.changed {
            (self.on_change)(changed);
        }
        match action.timer {
            TimerAction::Keep => {}
            TimerAction::Restart => {
                self.advance.restart();
            }
            TimerAction::Cancel => self.advance.cancel(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::DEFAULT_DELAY;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;
    use tokio::runtime::Handle;
    use tokio::time::{Instant, timeout};

    const FACE: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 200.0,
        height: 200.0,
    };
    const BOTTOM: Point = Point { x: 100.0, y: 180.0 };
    const LEFT: Point = Point { x: 20.0, y: 100.0 };
    const RIGHT: Point = Point { x: 180.0, y: 100.0 };

    struct Harness {
        picker: TimePicker,
        changes: Rc<RefCell<Vec<TimeValue>>>,
        keyboard_toggles: Rc<Cell<u32>>,
        rx: async_channel::Receiver<Ticket>,
    }

    fn harness(h: u8, m: u8) -> Harness {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let keyboard_toggles = Rc::new(Cell::new(0));
        let (tx, rx) = async_channel::unbounded();

        let props = PickerProps {
            time: TimeValue::from_hm(h, m).unwrap(),
            on_change: Box::new({
                let changes = changes.clone();
                move |t| changes.borrow_mut().push(t)
            }),
            keyboard_visible: false,
            on_toggle_keyboard: Box::new({
                let toggles = keyboard_toggles.clone();
                move || toggles.set(toggles.get() + 1)
            }),
        };
        let advance = AutoAdvance::new(Handle::current(), tx, DEFAULT_DELAY);

        Harness {
            picker: TimePicker::new(props, advance),
            changes,
            keyboard_toggles,
            rx,
        }
    }

    fn time(h: u8, m: u8) -> TimeValue {
        TimeValue::from_hm(h, m).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_hour_click_emits_copy_with_new_hour() {
        let mut h = harness(14, 37);

        let value = h.picker.click(BOTTOM, FACE);

        assert_eq!(value, DialValue::Hour(Hour::new(12).unwrap()));
        assert_eq!(*h.changes.borrow(), vec![time(12, 37)]);
        assert_eq!(h.picker.selected_hour().get(), 12);
        assert_eq!(h.picker.hand_angle(), 180.0);
        // the snapshot is the caller's, untouched until it syncs
        assert_eq!(h.picker.time(), time(14, 37));
        assert!(h.picker.is_advance_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_minute_click_emits_copy_with_new_minute() {
        let mut h = harness(9, 5);
        h.picker.toggle_mode();

        let value = h.picker.click(LEFT, FACE);

        assert_eq!(value, DialValue::Minute(Minute::new(45).unwrap()));
        assert_eq!(*h.changes.borrow(), vec![time(9, 45)]);
        assert_eq!(h.picker.hand_angle(), 270.0);
        assert!(!h.picker.is_advance_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_advances_once() {
        let mut h = harness(8, 0);
        let start = Instant::now();
        h.picker.click(RIGHT, FACE);

        let ticket = h.rx.recv().await.unwrap();
        assert!(start.elapsed() >= DEFAULT_DELAY);
        assert!(h.picker.on_timer(ticket));
        assert_eq!(h.picker.mode(), SelectionMode::Minutes);

        assert!(!h.picker.on_timer(ticket));
        assert!(timeout(Duration::from_secs(10), h.rx.recv()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_hour_pick_restarts_delay() {
        let mut h = harness(8, 0);
        h.picker.click(RIGHT, FACE);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        let second = Instant::now();
        h.picker.click(BOTTOM, FACE);

        assert!(
            timeout(Duration::from_millis(1999), h.rx.recv())
                .await
                .is_err()
        );
        assert_eq!(h.picker.mode(), SelectionMode::Hours);

        let ticket = h.rx.recv().await.unwrap();
        assert!(second.elapsed() >= DEFAULT_DELAY);
        assert!(h.picker.on_timer(ticket));
        assert_eq!(h.picker.mode(), SelectionMode::Minutes);
        assert_eq!(h.changes.borrow().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_back_to_hours_is_not_overridden() {
        let mut h = harness(8, 0);
        h.picker.click(RIGHT, FACE);

        tokio::time::sleep(Duration::from_millis(500)).await;
        h.picker.toggle_mode();
        tokio::time::sleep(Duration::from_millis(500)).await;
        h.picker.toggle_mode();
        assert_eq!(h.picker.mode(), SelectionMode::Hours);

        assert!(timeout(Duration::from_secs(10), h.rx.recv()).await.is_err());
        assert_eq!(h.picker.mode(), SelectionMode::Hours);
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_flight_ticket_is_stale_after_toggle() {
        let mut h = harness(8, 0);
        h.picker.click(RIGHT, FACE);

        // fired but not yet handled when the user picks a mode
        let ticket = h.rx.recv().await.unwrap();
        h.picker.set_mode(SelectionMode::Hours);

        assert!(!h.picker.on_timer(ticket));
        assert_eq!(h.picker.mode(), SelectionMode::Hours);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_keeps_selection() {
        let mut h = harness(9, 5);
        h.picker.click(BOTTOM, FACE);
        h.picker.sync(time(12, 5), true);

        h.picker.set_mode(SelectionMode::Minutes);
        h.picker.click(LEFT, FACE);

        assert_eq!(*h.changes.borrow(), vec![time(12, 5), time(12, 45)]);
        assert_eq!(h.picker.readout(), time(12, 45));
        assert!(h.picker.keyboard_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_and_reseeds() {
        let mut h = harness(9, 5);
        h.picker.click(BOTTOM, FACE);
        h.picker.reset(time(6, 30));

        assert_eq!(h.picker.mode(), SelectionMode::Hours);
        assert_eq!(h.picker.readout(), time(6, 30));
        assert!(!h.picker.is_advance_pending());
        assert!(timeout(Duration::from_secs(10), h.rx.recv()).await.is_err());
        // reset is not a pick and reports nothing
        assert_eq!(h.changes.borrow().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_keyboard_asks_caller() {
        let mut h = harness(0, 0);
        h.picker.toggle_keyboard();
        h.picker.toggle_keyboard();

        assert_eq!(h.keyboard_toggles.get(), 2);
        // visibility belongs to the caller
        assert!(!h.picker.keyboard_visible());
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_cancels_pending() {
        let mut h = harness(0, 0);
        h.picker.click(RIGHT, FACE);
        drop(h.picker);

        assert!(h.rx.recv().await.is_err());
    }
}
