//! Superfície de exibição do overlay: um anel por vital configurado.
//!
//! O core escreve propriedades nos [`GaugeElement`]; o painter só lê.

use crate::theme_egui::{EguiTheme, hex_color};
use egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};
use std::cell::RefCell;
use std::f32::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;
use tracing::warn;
use vitals_core::config::OverlayConfig;
use vitals_core::render::{
    Animation, DisplayBinding, DisplaySurface, ElementHandle, RING_RADIUS, RingDash, StyleProperty,
};
use vitals_core::VitalKind;

const RING_WIDTH: f32 = 5.0;
const WARNING_DOT_RADIUS: f32 = 5.0;

/// Propriedades visuais de um elemento, como o core as deixou.
#[derive(Debug, Clone)]
pub struct ElementStyle {
    pub stroke: Option<String>,
    pub dash: Option<RingDash>,
    pub text: Option<String>,
    pub opacity: f32,
    pub animation: Animation,
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            stroke: None,
            dash: None,
            text: None,
            opacity: 0.0,
            animation: Animation::None,
        }
    }
}

/// Handle compartilhado entre o HUD (escrita) e o painter (leitura).
#[derive(Debug, Clone, Default)]
pub struct GaugeElement(Rc<RefCell<ElementStyle>>);

impl GaugeElement {
    pub fn style(&self) -> ElementStyle {
        self.0.borrow().clone()
    }
}

impl ElementHandle for GaugeElement {
    fn set(&mut self, property: StyleProperty) {
        let mut style = self.0.borrow_mut();
        match property {
            StyleProperty::StrokeColor(color) => style.stroke = Some(color),
            StyleProperty::StrokeDash(dash) => style.dash = Some(dash),
            StyleProperty::Text(text) => style.text = Some(text),
            StyleProperty::Opacity(opacity) => style.opacity = opacity,
            StyleProperty::Animation(animation) => style.animation = animation,
        }
    }
}

/// Um anel do layout.
#[derive(Debug, Clone)]
pub struct Gauge {
    pub kind: VitalKind,
    pub ring: GaugeElement,
    pub label: GaugeElement,
    pub warning: Option<GaugeElement>,
}

/// Layout do overlay, montado a partir do config.
#[derive(Debug, Clone, Default)]
pub struct GaugeBoard {
    gauges: Vec<Gauge>,
}

impl GaugeBoard {
    pub fn from_config(overlay: &OverlayConfig) -> Self {
        let mut gauges: Vec<Gauge> = Vec::new();
        for name in &overlay.gauges {
            let Some(kind) = VitalKind::from_name(name) else {
                warn!("Vital desconhecido no layout: {name}");
                continue;
            };
            if gauges.iter().any(|g| g.kind == kind) {
                warn!("Vital repetido no layout: {name}");
                continue;
            }
            gauges.push(Gauge {
                kind,
                ring: GaugeElement::default(),
                label: GaugeElement::default(),
                warning: overlay.warning_indicators.then(GaugeElement::default),
            });
        }
        Self { gauges }
    }

    pub fn gauges(&self) -> &[Gauge] {
        &self.gauges
    }
}

impl DisplaySurface for GaugeBoard {
    type Handle = GaugeElement;

    fn lookup(&self, name: &str) -> Option<DisplayBinding<GaugeElement>> {
        let gauge = self.gauges.iter().find(|g| g.kind.name() == name)?;
        Some(DisplayBinding {
            ring: Some(gauge.ring.clone()),
            label: Some(gauge.label.clone()),
            warning: gauge.warning.clone(),
        })
    }
}

/// Tamanho ocupado por um anel na escala dada.
pub fn gauge_size(scale: f32) -> Vec2 {
    let diameter = (RING_RADIUS as f32 * 2.0 + RING_WIDTH * 2.0) * scale;
    Vec2::new(diameter, diameter + 14.0 * scale)
}

/// Tamanho da janela para a faixa de anéis do layout.
pub fn window_size(overlay: &OverlayConfig) -> Vec2 {
    let gauge = gauge_size(overlay.scale);
    let count = overlay.gauge_kinds().len().max(1) as f32;
    Vec2::new(gauge.x * count + 32.0 + 8.0 * count, gauge.y + 48.0)
}

/// Multiplicador de opacidade do pulso (1 → 0.5 → 1 a cada período).
pub fn pulse_factor(animation: Animation, time: f64) -> f32 {
    match animation {
        Animation::None => 1.0,
        Animation::Pulse { period_ms } => {
            let period = f64::from(period_ms.max(1)) / 1000.0;
            let phase = (time % period) / period;
            (0.75 + 0.25 * (phase * std::f64::consts::TAU).cos()) as f32
        }
    }
}

/// Pontos do arco preenchido, começando no topo e seguindo no sentido horário.
fn arc_points(center: Pos2, radius: f32, fraction: f32) -> Vec<Pos2> {
    let segments = ((64.0 * fraction).ceil() as usize).max(2);
    (0..=segments)
        .map(|i| {
            let angle = -FRAC_PI_2 + TAU * fraction * i as f32 / segments as f32;
            center + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Desenha um anel com o estado atual dos seus elementos.
pub fn paint_gauge(ui: &mut Ui, gauge: &Gauge, theme: &EguiTheme, scale: f32, time: f64) {
    let (rect, _) = ui.allocate_exact_size(gauge_size(scale), Sense::hover());
    if !ui.is_rect_visible(rect) {
        return;
    }
    let painter = ui.painter_at(rect);
    let radius = RING_RADIUS as f32 * scale;
    let width = RING_WIDTH * scale;
    let center = Pos2::new(rect.center().x, rect.top() + radius + width);

    // Trilho
    painter.circle_stroke(center, radius, Stroke::new(width, theme.track));

    // Arco preenchido
    let ring = gauge.ring.style();
    let color = ring.stroke.as_deref().map_or(theme.text, hex_color);
    let fraction = ring.dash.map_or(0.0, |d| d.filled_fraction() as f32);
    if fraction > 0.0 {
        painter.add(Shape::line(
            arc_points(center, radius, fraction),
            Stroke::new(width, color),
        ));
    }

    // Valor numérico
    if let Some(text) = gauge.label.style().text {
        painter.text(
            center,
            Align2::CENTER_CENTER,
            text,
            FontId::monospace(14.0 * scale),
            theme.text,
        );
    }

    // Nome do vital
    painter.text(
        Pos2::new(center.x, rect.bottom()),
        Align2::CENTER_BOTTOM,
        gauge.kind.name().to_uppercase(),
        FontId::monospace(9.0 * scale),
        theme.dim,
    );

    // Indicador de aviso
    if let Some(warning) = &gauge.warning {
        let style = warning.style();
        let alpha = style.opacity * pulse_factor(style.animation, time);
        if alpha > 0.0 {
            let dot = center + Vec2::new(radius, -radius) * 0.75;
            painter.circle_filled(
                dot,
                WARNING_DOT_RADIUS * scale,
                theme.critical.gamma_multiply(alpha.clamp(0.0, 1.0)),
            );
        }
    }
}

/// `true` se algum indicador está pulsando (precisa de repaint contínuo).
pub fn any_animating(board: &GaugeBoard) -> bool {
    board.gauges().iter().any(|g| {
        g.warning
            .as_ref()
            .is_some_and(|w| matches!(w.style().animation, Animation::Pulse { .. }))
    })
}

/// Cor de fundo translúcida da faixa de anéis.
pub fn strip_fill(theme: &EguiTheme) -> Color32 {
    theme.panel.gamma_multiply(0.6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitals_core::VitalsApi;
    use vitals_core::VitalsHud;
    use vitals_core::render::RenderStyle;

    #[test]
    fn board_follows_layout_and_skips_unknown() {
        let overlay = OverlayConfig {
            gauges: vec!["stress".into(), "mood".into(), "water".into(), "stress".into()],
            ..Default::default()
        };
        let board = GaugeBoard::from_config(&overlay);
        let kinds: Vec<VitalKind> = board.gauges().iter().map(|g| g.kind).collect();
        assert_eq!(kinds, vec![VitalKind::Stress, VitalKind::Water]);
        assert!(board.lookup("food").is_none());
    }

    #[test]
    fn window_width_ignores_repeated_gauges() {
        let repeated = OverlayConfig {
            gauges: vec!["stress".into(), "water".into(), "stress".into()],
            ..Default::default()
        };
        let plain = OverlayConfig {
            gauges: vec!["stress".into(), "water".into()],
            ..Default::default()
        };
        assert_eq!(
            GaugeBoard::from_config(&repeated).gauges().len(),
            repeated.gauge_kinds().len()
        );
        assert_eq!(window_size(&repeated), window_size(&plain));
    }

    #[test]
    fn hud_writes_into_gauge_elements() {
        let board = GaugeBoard::from_config(&OverlayConfig::default());
        let mut hud = VitalsHud::new(&board, RenderStyle::default());
        hud.update_vital("stress", 90.0);

        let gauge = board.gauges().iter().find(|g| g.kind == VitalKind::Stress).unwrap();
        assert_eq!(gauge.label.style().text.as_deref(), Some("90"));
        assert_eq!(gauge.ring.style().stroke.as_deref(), Some("#ef4444"));
        let warning = gauge.warning.as_ref().unwrap().style();
        assert_eq!(warning.opacity, 1.0);
        assert!(any_animating(&board));
    }

    #[test]
    fn warning_indicators_can_be_disabled() {
        let overlay = OverlayConfig {
            warning_indicators: false,
            ..Default::default()
        };
        let board = GaugeBoard::from_config(&overlay);
        assert!(board.gauges().iter().all(|g| g.warning.is_none()));
        let binding = board.lookup("water").unwrap();
        assert!(binding.warning.is_none());
        assert!(binding.ring.is_some());
    }

    #[test]
    fn pulse_stays_visible() {
        let pulse = Animation::Pulse { period_ms: 1000 };
        assert_eq!(pulse_factor(Animation::None, 3.3), 1.0);
        assert!((pulse_factor(pulse, 0.0) - 1.0).abs() < 1e-6);
        assert!((pulse_factor(pulse, 0.5) - 0.5).abs() < 1e-6);
        assert!((pulse_factor(pulse, 2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn arc_starts_at_top() {
        let points = arc_points(Pos2::ZERO, 10.0, 0.25);
        let first = points[0];
        let last = *points.last().unwrap();
        assert!(first.x.abs() < 1e-4 && (first.y + 10.0).abs() < 1e-4);
        assert!((last.x - 10.0).abs() < 1e-3 && last.y.abs() < 1e-3);
    }
}
