use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub text: Srgba<f64>,
    pub muted: Srgba<f64>,
    pub card: Srgba<f64>,
    pub track: Srgba<f64>,
    pub control: Srgba<f64>,
    pub success: Srgba<f64>,
    pub failure: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.93, 0.93, 0.95, 1.0),
                None,
            ),
            muted: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.93, 0.93, 0.95, 0.6),
                Some(0.6),
            ),
            card: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.12, 0.12, 0.14, 0.95),
                Some(0.95),
            ),
            track: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.5, 0.5, 0.5, 0.2),
                Some(0.15),
            ),
            control: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.5, 0.5, 0.5, 0.15),
                Some(0.1),
            ),
            success: Self::lookup_color(
                context,
                "success_color",
                Srgba::new(0.2, 0.7, 0.4, 1.0),
                None,
            ),
            failure: Self::lookup_color(
                context,
                "error_color",
                Srgba::new(0.85, 0.25, 0.25, 1.0),
                None,
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
.showcase-deck {
    background-color: @theme_bg_color;
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
