//! Overlay principal – App eframe/egui.

use crate::gauges::{self, GaugeBoard, GaugeElement};
use crate::net_thread::NetMessage;
use crate::theme_egui::{self, EguiTheme};
use crossbeam_channel::Receiver;
use egui::{Color32, RichText};
use std::collections::BTreeSet;
use std::time::{Duration, Instant};
use tracing::{info, warn};
use vitals_core::alerts::AlertLevel;
use vitals_core::config::AppConfig;
use vitals_core::render::RenderStyle;
use vitals_core::{VitalKind, VitalsHud};

const CONNECTION_TIMEOUT_SECS: f64 = 10.0;

/// Estado do overlay.
pub struct HudOverlay {
    config: AppConfig,
    theme: EguiTheme,
    theme_index: usize,
    all_themes: Vec<EguiTheme>,

    // Dados
    rx: Receiver<NetMessage>,
    board: GaugeBoard,
    hud: VitalsHud<GaugeElement>,
    last_message_time: Option<Instant>,
    source_addr: String,
    critical: BTreeSet<VitalKind>,
}

impl HudOverlay {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: AppConfig,
        rx: Receiver<NetMessage>,
    ) -> Self {
        let all_themes = theme_egui::all_themes();
        let theme_index = all_themes
            .iter()
            .position(|t| t.name() == config.overlay.theme)
            .unwrap_or(0);
        let theme = all_themes[theme_index].clone();

        // Lookup único dos handles
        let board = GaugeBoard::from_config(&config.overlay);
        let style = RenderStyle::new(&config.overlay, theme.core());
        let hud = VitalsHud::new(&board, style);

        let mut overlay = Self {
            config,
            theme,
            theme_index,
            all_themes,
            rx,
            board,
            hud,
            last_message_time: None,
            source_addr: String::new(),
            critical: BTreeSet::new(),
        };
        overlay.track_alerts();
        overlay
    }

    /// Processa mensagens pendentes da thread de rede, na ordem de chegada.
    fn poll_network(&mut self) {
        let mut received = false;
        while let Ok(msg) = self.rx.try_recv() {
            self.hud.handle_message(&msg.message);
            self.last_message_time = Some(Instant::now());
            self.source_addr = msg.source_addr;
            received = true;
        }
        if received {
            self.track_alerts();
        }
    }

    /// Loga vitais que entram ou saem da faixa crítica.
    fn track_alerts(&mut self) {
        let now: BTreeSet<VitalKind> = self
            .hud
            .alerts()
            .into_iter()
            .filter(|a| a.level == AlertLevel::Critical)
            .map(|a| a.vital)
            .collect();

        for kind in now.difference(&self.critical) {
            warn!(
                "Vital crítico: {kind} = {}",
                self.hud.store().get(*kind)
            );
        }
        for kind in self.critical.difference(&now) {
            info!("Vital normalizado: {kind}");
        }
        self.critical = now;
    }

    fn is_connected(&self) -> bool {
        self.last_message_time
            .is_some_and(|t| t.elapsed().as_secs_f64() < CONNECTION_TIMEOUT_SECS)
    }

    fn cycle_theme(&mut self) {
        self.theme_index = (self.theme_index + 1) % self.all_themes.len();
        self.theme = self.all_themes[self.theme_index].clone();
        self.hud
            .set_style(RenderStyle::new(&self.config.overlay, self.theme.core()));
        info!("Tema: {}", self.theme.name());
    }
}

impl eframe::App for HudOverlay {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0] // janela transparente
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Poll rede ──
        self.poll_network();

        // ── Repaint: 60 FPS com pulso ativo, senão só para checar o channel ──
        if gauges::any_animating(&self.board) {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // ── Atalhos de teclado ──
        let (cycle_theme, quit) = ctx.input(|i: &egui::InputState| {
            (
                i.key_pressed(egui::Key::T),
                i.key_pressed(egui::Key::Q) || i.key_pressed(egui::Key::Escape),
            )
        });
        if cycle_theme {
            self.cycle_theme();
        }
        if quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }

        let time = ctx.input(|i| i.time);
        let scale = self.config.overlay.scale;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(Color32::TRANSPARENT))
            .show(ctx, |ui: &mut egui::Ui| {
                egui::Frame::new()
                    .fill(gauges::strip_fill(&self.theme))
                    .corner_radius(8.0)
                    .inner_margin(8.0)
                    .show(ui, |ui: &mut egui::Ui| {
                        ui.horizontal(|ui: &mut egui::Ui| {
                            for gauge in self.board.gauges() {
                                gauges::paint_gauge(ui, gauge, &self.theme, scale, time);
                            }
                        });

                        // ── Status de conexão ──
                        let (text, color) = if self.is_connected() {
                            (format!("● {}", self.source_addr), self.theme.dim)
                        } else {
                            (
                                format!("○ porta {}", self.config.overlay.port),
                                self.theme.critical,
                            )
                        };
                        ui.label(RichText::new(text).color(color).monospace().size(9.0));
                    });
            });
    }
}
