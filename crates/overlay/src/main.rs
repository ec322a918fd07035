//! # Vitals HUD Overlay
//!
//! Overlay transparente (sempre no topo) com os anéis de vitais do
//! servidor: vida, colete, fome, sede, higiene, stress, xixi e cocô.
//!
//! Recebe mensagens `updateVital` / `updateVitals` do client via UDP e
//! redesenha só os vitais afetados.
//!
//! ## Atalhos
//! - `T`: Alternar tema
//! - `Q` / `Esc`: Sair

mod gauges;
mod net_thread;
mod overlay;
mod theme_egui;

use overlay::HudOverlay;
use tracing::{error, warn};
use vitals_core::config::AppConfig;

fn main() -> eframe::Result<()> {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }
    for err in config.validate() {
        warn!("Config: {err}");
    }

    // ── Thread de rede ──
    let rx = match net_thread::spawn_receiver_thread(
        config.overlay.port,
        config.overlay.sender_ip.clone(),
    ) {
        Ok(rx) => rx,
        Err(e) => {
            error!("Falha ao criar thread de rede: {e}");
            return Ok(());
        }
    };

    // ── Janela eframe ──
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Vitals HUD")
            .with_inner_size(gauges::window_size(&config.overlay))
            .with_transparent(true)
            .with_decorations(false)
            .with_always_on_top(),
        ..Default::default()
    };

    eframe::run_native(
        "Vitals HUD",
        options,
        Box::new(move |cc| Ok(Box::new(HudOverlay::new(cc, config, rx)))),
    )
}
