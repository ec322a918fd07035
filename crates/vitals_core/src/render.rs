//! RenderBinding – traduz o valor de um vital em estado visual e o aplica
//! nos handles da superfície de exibição.
//!
//! O cálculo ([`visual_state`]) é puro. A aplicação ([`RenderBinding::apply`])
//! escreve só nos handles do próprio vital; handles ausentes são ignorados.
//!
//! ```text
//!   VitalStateStore ──► visual_state() ──► VisualState ──► RenderBinding::apply()
//!                                                             │
//!                                          ring / label / warning handles
//! ```

use crate::alerts::{self, AlertLevel};
use crate::config::{CustomColors, OverlayConfig, WarningThresholds};
use crate::theme::Theme;
use crate::vitals::{VitalKind, VitalStateStore};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use tracing::debug;

/// Raio fixo do anel (unidades de layout).
pub const RING_RADIUS: f64 = 26.0;

/// Circunferência do anel: `2π·26`.
pub const RING_CIRCUMFERENCE: f64 = 2.0 * PI * RING_RADIUS;

/// Período do pulso do indicador de aviso.
pub const PULSE_PERIOD_MS: u32 = 1000;

// ──────────────────────────────────────────────
// Estado visual
// ──────────────────────────────────────────────

/// Padrão de traço do anel (técnica stroke-dashoffset).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingDash {
    /// Comprimento total do traço (sempre a circunferência)
    pub dash_array: f64,
    /// Parte não preenchida: `circunferência − preenchido`
    pub dash_offset: f64,
}

impl RingDash {
    pub fn from_percentage(percentage: f64) -> Self {
        let filled = percentage / 100.0 * RING_CIRCUMFERENCE;
        Self {
            dash_array: RING_CIRCUMFERENCE,
            dash_offset: RING_CIRCUMFERENCE - filled,
        }
    }

    /// Fração preenchida (0.0–1.0) recuperada do padrão de traço.
    pub fn filled_fraction(&self) -> f64 {
        if self.dash_array <= 0.0 {
            return 0.0;
        }
        ((self.dash_array - self.dash_offset) / self.dash_array).clamp(0.0, 1.0)
    }
}

/// Animação do indicador de aviso.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Animation {
    None,
    /// Pulso infinito com o período dado
    Pulse { period_ms: u32 },
}

/// Estado do indicador de aviso. Não existe estado intermediário.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarningIndicator {
    pub opacity: f32,
    pub animation: Animation,
}

impl WarningIndicator {
    pub const ON: Self = Self {
        opacity: 1.0,
        animation: Animation::Pulse {
            period_ms: PULSE_PERIOD_MS,
        },
    };
    pub const OFF: Self = Self {
        opacity: 0.0,
        animation: Animation::None,
    };

    pub fn is_on(&self) -> bool {
        *self == Self::ON
    }
}

/// Estado visual completo de um vital.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualState {
    pub vital: VitalKind,
    pub value: u32,
    pub percentage: f64,
    pub ring: RingDash,
    /// Valor inteiro exato, sem escala
    pub label: String,
    pub warning: WarningIndicator,
    /// Cor do traço do anel ("#RRGGBB")
    pub color: String,
    pub level: AlertLevel,
}

/// Parâmetros de estilo compartilhados por todos os vitais.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub thresholds: WarningThresholds,
    pub warning_color: String,
    pub critical_color: String,
    pub custom_colors: CustomColors,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::new(&OverlayConfig::default(), &crate::theme::dark_theme())
    }
}

impl RenderStyle {
    pub fn new(overlay: &OverlayConfig, theme: &Theme) -> Self {
        Self {
            thresholds: overlay.thresholds.clone(),
            warning_color: theme.warning.clone(),
            critical_color: theme.critical.clone(),
            custom_colors: overlay.custom_colors.clone(),
        }
    }

    /// Cor base do vital, já com override do config.
    pub fn base_color(&self, kind: VitalKind) -> &str {
        self.custom_colors
            .get(kind)
            .unwrap_or(kind.definition().base_color)
    }

    pub fn color_for(&self, kind: VitalKind, level: AlertLevel) -> &str {
        match level {
            AlertLevel::Critical => &self.critical_color,
            AlertLevel::Warning => &self.warning_color,
            AlertLevel::Normal => self.base_color(kind),
        }
    }
}

/// Calcula o estado visual de um vital. Lê apenas o próprio vital.
pub fn visual_state(store: &VitalStateStore, kind: VitalKind, style: &RenderStyle) -> VisualState {
    let state = store.state(kind);
    let inverted = state.definition.inverted;
    let percentage = state.percentage();
    let level = alerts::level_for_percentage(percentage, inverted, &style.thresholds);
    let warning = if alerts::should_warn(percentage, inverted, &style.thresholds) {
        WarningIndicator::ON
    } else {
        WarningIndicator::OFF
    };

    VisualState {
        vital: kind,
        value: state.current(),
        percentage,
        ring: RingDash::from_percentage(percentage),
        label: state.current().to_string(),
        warning,
        color: style.color_for(kind, level).to_string(),
        level,
    }
}

// ──────────────────────────────────────────────
// Handles de exibição
// ──────────────────────────────────────────────

/// Propriedade visual que o core escreve num elemento.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleProperty {
    StrokeColor(String),
    StrokeDash(RingDash),
    Text(String),
    Opacity(f32),
    Animation(Animation),
}

/// Handle opaco para um elemento da superfície de exibição.
pub trait ElementHandle {
    fn set(&mut self, property: StyleProperty);
}

/// Handles de um vital. Qualquer um pode estar ausente.
#[derive(Debug, Clone)]
pub struct DisplayBinding<H> {
    pub ring: Option<H>,
    pub label: Option<H>,
    pub warning: Option<H>,
}

/// Superfície de exibição que resolve handles pelo nome do vital.
pub trait DisplaySurface {
    type Handle: ElementHandle;

    /// Retorna `None` quando o container do vital não existe.
    fn lookup(&self, name: &str) -> Option<DisplayBinding<Self::Handle>>;
}

/// Handles resolvidos uma única vez na inicialização.
#[derive(Debug)]
pub struct RenderBinding<H> {
    bindings: BTreeMap<VitalKind, DisplayBinding<H>>,
}

impl<H: ElementHandle> RenderBinding<H> {
    /// Faz o lookup de todos os vitais na superfície. Nunca é refeito.
    pub fn resolve<S: DisplaySurface<Handle = H>>(surface: &S) -> Self {
        let mut bindings = BTreeMap::new();
        for kind in VitalKind::ALL {
            match surface.lookup(kind.name()) {
                Some(binding) => {
                    bindings.insert(kind, binding);
                }
                None => debug!("Vital {kind} sem container na superfície"),
            }
        }
        Self { bindings }
    }

    pub fn is_bound(&self, kind: VitalKind) -> bool {
        self.bindings.contains_key(&kind)
    }

    /// Aplica o estado visual nos handles do vital.
    pub fn apply(&mut self, visual: &VisualState) {
        let Some(binding) = self.bindings.get_mut(&visual.vital) else {
            return;
        };

        if let Some(ring) = binding.ring.as_mut() {
            ring.set(StyleProperty::StrokeDash(visual.ring));
        }
        if let Some(label) = binding.label.as_mut() {
            label.set(StyleProperty::Text(visual.label.clone()));
        }
        if let Some(warning) = binding.warning.as_mut() {
            warning.set(StyleProperty::Opacity(visual.warning.opacity));
            warning.set(StyleProperty::Animation(visual.warning.animation));
        }
        if let Some(ring) = binding.ring.as_mut() {
            ring.set(StyleProperty::StrokeColor(visual.color.clone()));
        }
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────
