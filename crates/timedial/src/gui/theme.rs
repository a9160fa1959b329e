use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub face: Srgba<f64>,
    pub border: Srgba<f64>,
    pub marking: Srgba<f64>,
    pub selected: Srgba<f64>,
    pub hand: Srgba<f64>,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            face: Srgba::new(0.15, 0.15, 0.15, 1.0),
            border: Srgba::new(0.4, 0.4, 0.8, 0.2),
            marking: Srgba::new(0.6, 0.6, 0.6, 1.0),
            selected: Srgba::new(0.4, 0.4, 0.8, 1.0),
            hand: Srgba::new(0.4, 0.4, 0.8, 1.0),
        }
    }
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        let fallback = Self::default();
        Self {
            face: Self::lookup_color(context, "theme_base_color", fallback.face, None),
            border: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.border,
                Some(0.2),
            ),
            marking: Self::lookup_color(
                context,
                "insensitive_fg_color",
                fallback.marking,
                None,
            ),
            selected: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.selected,
                Some(1.0),
            ),
            hand: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                fallback.hand,
                Some(1.0),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.timedial-readout {
    font-size: 24px;
    font-weight: 300;
}
.timedial-prompt {
    opacity: 0.6;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
