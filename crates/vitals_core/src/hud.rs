//! Fachada do HUD: dono único do store, do estilo e dos handles.

use crate::alerts::{self, Alert};
use crate::bridge;
use crate::protocol::HudMessage;
use crate::render::{DisplaySurface, ElementHandle, RenderBinding, RenderStyle, VisualState, visual_state};
use crate::vitals::{VitalKind, VitalStateStore};
use tracing::{debug, info};

/// Operações expostas para quem embute o HUD sem passar pelo canal de mensagens.
pub trait VitalsApi {
    /// Atualiza um vital vindo do client. Nome desconhecido é logado.
    fn update_vital(&mut self, name: &str, value: f64);
    /// Valor atual; 0 para nomes desconhecidos.
    fn get_vital_value(&self, name: &str) -> u32;
    /// Define um vital diretamente.
    fn set_vital_value(&mut self, name: &str, value: f64);
}

/// HUD de vitais ligado a uma superfície de exibição.
pub struct VitalsHud<H> {
    store: VitalStateStore,
    style: RenderStyle,
    binding: RenderBinding<H>,
}

impl<H: ElementHandle> VitalsHud<H> {
    /// Resolve os handles (uma única vez) e desenha os valores iniciais.
    pub fn new<S: DisplaySurface<Handle = H>>(surface: &S, style: RenderStyle) -> Self {
        let binding = RenderBinding::resolve(surface);
        let mut hud = Self {
            store: VitalStateStore::new(),
            style,
            binding,
        };
        hud.render_all();
        info!(
            "HUD inicializado ({} vitais na superfície)",
            VitalKind::ALL.iter().filter(|k| hud.binding.is_bound(**k)).count()
        );
        hud
    }

    pub fn store(&self) -> &VitalStateStore {
        &self.store
    }

    /// Troca o estilo (tema) e redesenha tudo.
    pub fn set_style(&mut self, style: RenderStyle) {
        self.style = style;
        self.render_all();
    }

    /// Recalcula e aplica o estado visual de um vital.
    pub fn render(&mut self, kind: VitalKind) -> VisualState {
        let visual = visual_state(&self.store, kind, &self.style);
        self.binding.apply(&visual);
        visual
    }

    pub fn render_all(&mut self) {
        for kind in VitalKind::ALL {
            self.render(kind);
        }
    }

    /// Processa uma mensagem externa: clamp/grava e redesenha os afetados.
    pub fn handle_message(&mut self, message: &HudMessage) -> Vec<VisualState> {
        let rendered = bridge::ingest(&mut self.store, &self.style, message);
        for visual in &rendered {
            self.binding.apply(visual);
        }
        debug!("Mensagem aplicada: {} vitais redesenhados", rendered.len());
        rendered
    }

    /// Vitais fora da faixa saudável.
    pub fn alerts(&self) -> Vec<Alert> {
        alerts::evaluate_alerts(&self.store, &self.style.thresholds)
    }

    fn set_and_render(&mut self, name: &str, value: f64) -> Option<u32> {
        let stored = self.store.set_value(name, value)?;
        if let Some(kind) = VitalKind::from_name(name) {
            self.render(kind);
        }
        Some(stored)
    }
}

impl<H: ElementHandle> VitalsApi for VitalsHud<H> {
    fn update_vital(&mut self, name: &str, value: f64) {
        self.set_and_render(name, value);
    }

    fn get_vital_value(&self, name: &str) -> u32 {
        self.store.get_value(name)
    }

    fn set_vital_value(&mut self, name: &str, value: f64) {
        self.set_and_render(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::StyleProperty;
    use crate::render::tests::FakeSurface;

    fn hud(names: &[&'static str]) -> (FakeSurface, VitalsHud<crate::render::tests::FakeElement>) {
        let surface = FakeSurface::with(names);
        let hud = VitalsHud::new(&surface, RenderStyle::default());
        (surface, hud)
    }

    #[test]
    fn startup_renders_defaults() {
        let (surface, _hud) = hud(&["health", "food", "stress"]);
        assert_eq!(
            surface.binding("health").label.unwrap().log(),
            vec![StyleProperty::Text("200".into())]
        );
        assert_eq!(
            surface.binding("food").label.unwrap().log(),
            vec![StyleProperty::Text("50".into())]
        );
        assert_eq!(
            surface.binding("stress").label.unwrap().log(),
            vec![StyleProperty::Text("0".into())]
        );
    }

    #[test]
    fn api_set_and_get() {
        let (surface, mut hud) = hud(&["health"]);
        hud.set_vital_value("health", 150.0);
        assert_eq!(hud.get_vital_value("health"), 150);
        assert_eq!(hud.store().percentage("health"), 75.0);
        let log = surface.binding("health").label.unwrap().log();
        assert_eq!(log.last(), Some(&StyleProperty::Text("150".into())));
    }

    #[test]
    fn api_unknown_name_is_silent() {
        let (_surface, mut hud) = hud(&["water"]);
        hud.update_vital("mood", 50.0);
        assert_eq!(hud.get_vital_value("mood"), 0);
        assert_eq!(hud.get_vital_value("water"), 100);
    }

    #[test]
    fn message_updates_display() {
        let (surface, mut hud) = hud(&["pee", "water"]);
        let rendered = hud.handle_message(&HudMessage::UpdateVital {
            vital: "pee".into(),
            value: 81.0,
        });
        assert_eq!(rendered.len(), 1);
        assert!(rendered[0].warning.is_on());

        let ring = surface.binding("pee").ring.unwrap().log();
        assert_eq!(ring.last(), Some(&StyleProperty::StrokeColor("#ef4444".into())));
        // water só recebeu o render inicial
        assert_eq!(surface.binding("water").label.unwrap().log().len(), 1);
    }

    #[test]
    fn vitals_without_surface_still_update() {
        let (_surface, mut hud) = hud(&[]);
        hud.update_vital("armor", 42.0);
        assert_eq!(hud.get_vital_value("armor"), 42);
    }

    #[test]
    fn style_swap_rerenders_with_new_palette() {
        let (surface, mut hud) = hud(&["stress"]);
        hud.update_vital("stress", 95.0);
        hud.set_style(RenderStyle::new(
            &crate::config::OverlayConfig::default(),
            &crate::theme::light_theme(),
        ));
        let ring = surface.binding("stress").ring.unwrap().log();
        assert_eq!(ring.last(), Some(&StyleProperty::StrokeColor("#dc2626".into())));
        assert_eq!(hud.get_vital_value("stress"), 95);
    }
}
