use super::{BORDER_WIDTH, CENTER_DOT_RADIUS, HAND_WIDTH, LABEL_FONT_SIZE};
use crate::config::DialConfig;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use clockhand::geometry::{self, Marking};
use clockhand::{Rect, TimePicker};
use palette::Srgba;
use std::f64::consts::PI;

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct MarkingRenderer<'a> {
    marking: &'a Marking,
    selected: bool,
}

impl<'a> MarkingRenderer<'a> {
    fn new(marking: &'a Marking, selected: bool) -> Self {
        Self { marking, selected }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color = if self.selected {
            colors.selected
        } else {
            colors.marking
        };
        set_color(cr, color);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
        cr.set_font_size(LABEL_FONT_SIZE);

        let ext = cr.text_extents(&self.marking.label)?;
        // center on the marking position, like translate(-50%, -50%)
        cr.move_to(
            self.marking.position.x - ext.width() / 2.0 - ext.x_bearing(),
            self.marking.position.y - ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(&self.marking.label)
    }
}

pub fn draw(
    cr: &Context,
    picker: &TimePicker,
    rect: Rect,
    colors: &ThemeColors,
    dial: &DialConfig,
) -> Result<(), cairo::Error> {
    draw_face(cr, rect, colors)?;

    let selected = picker.selected_value();
    for marking in geometry::markings(picker.mode(), rect, dial.label_radius) {
        MarkingRenderer::new(&marking, marking.value == selected).draw(cr, colors)?;
    }

    draw_hand(cr, rect, picker.hand_angle(), dial.hand_length, colors)?;
    draw_center_dot(cr, rect, colors)
}

fn draw_face(cr: &Context, rect: Rect, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = rect.center();
    let radius = rect.width.min(rect.height) / 2.0 - BORDER_WIDTH / 2.0;

    cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
    set_color(cr, colors.face);
    cr.fill_preserve()?;
    set_color(cr, colors.border);
    cr.set_line_width(BORDER_WIDTH);
    cr.stroke()
}

fn draw_hand(
    cr: &Context,
    rect: Rect,
    angle: f64,
    length: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let (center, tip) = (rect.center(), rect.point_at(angle, length));

    set_color(cr, colors.hand);
    cr.set_line_width(HAND_WIDTH);
    cr.set_line_cap(cairo::LineCap::Round);
    cr.move_to(center.x, center.y);
    cr.line_to(tip.x, tip.y);
    cr.stroke()
}

fn draw_center_dot(cr: &Context, rect: Rect, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let center = rect.center();
    set_color(cr, colors.hand);
    cr.arc(center.x, center.y, CENTER_DOT_RADIUS, 0.0, 2.0 * PI);
    cr.fill()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gui::dial::{DIAL_SIZE, face_rect};
    use clockhand::timer::{AutoAdvance, DEFAULT_DELAY};
    use clockhand::{PickerProps, TimeValue};
    use tokio::runtime::Handle;

    fn pixel_at(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> u32 {
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        // ARGB32 pixels are native-endian words
        u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    }

    #[tokio::test]
    async fn test_draws_face_hand_and_leaves_corners_clear() {
        let (tx, _rx) = async_channel::unbounded();
        let picker = TimePicker::new(
            PickerProps {
                time: TimeValue::from_hm(3, 0).unwrap(),
                on_change: Box::new(|_| {}),
                keyboard_visible: false,
                on_toggle_keyboard: Box::new(|| {}),
            },
            AutoAdvance::new(Handle::current(), tx, DEFAULT_DELAY),
        );

        let size = DIAL_SIZE as usize;
        let mut surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, DIAL_SIZE, DIAL_SIZE).unwrap();
        {
            let cr = Context::new(&surface).unwrap();
            let rect = face_rect(DIAL_SIZE as f64, DIAL_SIZE as f64);
            draw(&cr, &picker, rect, &ThemeColors::default(), &DialConfig::default()).unwrap();
        }
        surface.flush();

        let alpha = |pixel: u32| pixel >> 24;
        let blue = |pixel: u32| pixel & 0xff;

        // outside the round face
        assert_eq!(alpha(pixel_at(&mut surface, 0, 0)), 0);
        assert_eq!(alpha(pixel_at(&mut surface, size - 1, size - 1)), 0);
        // plain face, away from hand and labels
        let face = pixel_at(&mut surface, size / 2, size * 3 / 4);
        assert_eq!(alpha(face), 255);
        assert!(blue(face) < 100);
        // hour 03 points at 45 degrees; sample halfway along the hand
        let along = 0.2 * size as f64;
        let (x, y) = (
            (size / 2) as f64 + along * (-45f64).to_radians().cos(),
            (size / 2) as f64 + along * (-45f64).to_radians().sin(),
        );
        assert!(blue(pixel_at(&mut surface, x as usize, y as usize)) > 150);
        assert!(blue(pixel_at(&mut surface, size / 2, size / 2)) > 150);
    }
}
