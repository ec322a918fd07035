//! Paleta do tema pronta para o painter do egui.

use egui::Color32;
use vitals_core::theme::{self, Theme};

/// Cores do overlay já convertidas. Guarda o tema do core para o
/// [`RenderStyle`](vitals_core::render::RenderStyle).
#[derive(Clone)]
pub struct EguiTheme {
    source: Theme,
    pub panel: Color32,
    pub track: Color32,
    pub text: Color32,
    pub dim: Color32,
    pub critical: Color32,
}

impl From<&Theme> for EguiTheme {
    fn from(t: &Theme) -> Self {
        Self {
            source: t.clone(),
            panel: hex_color(&t.panel),
            track: hex_color(&t.track),
            text: hex_color(&t.text),
            dim: hex_color(&t.dim),
            critical: hex_color(&t.critical),
        }
    }
}

impl EguiTheme {
    pub fn name(&self) -> &str {
        &self.source.name
    }

    pub fn core(&self) -> &Theme {
        &self.source
    }
}

pub fn hex_color(hex: &str) -> Color32 {
    let (r, g, b) = theme::hex_to_rgb(hex);
    Color32::from_rgb(r, g, b)
}

/// Temas na ordem de troca da tecla T.
pub fn all_themes() -> Vec<EguiTheme> {
    theme::theme_names()
        .into_iter()
        .map(|name| EguiTheme::from(&theme::get_theme(name)))
        .collect()
}
