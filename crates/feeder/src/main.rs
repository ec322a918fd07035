//! # Vitals Feeder
//!
//! Envia atualizações de vitais para o overlay via UDP, no mesmo formato
//! JSON que o client do jogo usa. Serve para testar o HUD sem o servidor.
//!
//! ## Uso
//! ```bash
//! vitals_feeder                       # Demo: simulação contínua
//! vitals_feeder set stress 80         # Um vital
//! vitals_feeder bulk water=10 pee=0   # Vários de uma vez
//! ```

mod command;
mod simulator;

use command::{Command, USAGE};
use simulator::SurvivalSimulator;
use std::net::UdpSocket;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};
use vitals_core::config::{AppConfig, FeederConfig};
use vitals_core::protocol::{HudMessage, encode_message};

fn main() {
    // ── Logging ──
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // ── Argumentos ──
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match command::parse_args(&args) {
        Ok(Command::Help) => {
            println!("{USAGE}");
            return;
        }
        Ok(cmd) => cmd,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    // ── Carregar config ──
    let config_path = AppConfig::default_path();
    let config = AppConfig::load(&config_path);

    // Salva config padrão se não existir
    if !config_path.exists() {
        if let Err(e) = config.save(&config_path) {
            warn!("Não foi possível salvar config padrão: {e}");
        }
    }
    for err in config.validate() {
        warn!("Config: {err}");
    }

    let feeder_cfg = &config.feeder;
    let dest_addr = format!("{}:{}", feeder_cfg.dest_ip, feeder_cfg.port);

    // ── Socket UDP ──
    let sock = match open_socket(feeder_cfg) {
        Ok(sock) => sock,
        Err(e) => {
            error!("Falha ao criar socket UDP: {e}");
            std::process::exit(1);
        }
    };

    if let Some(message) = command.message() {
        send(&sock, &dest_addr, &message);
        return;
    }

    // ── Banner ──
    println!();
    println!("══════════════════════════════════════════════");
    println!("   ♥ VITALS FEEDER – DEMO");
    println!("══════════════════════════════════════════════");
    println!("  Destino:   {dest_addr}");
    println!("  Intervalo: {:.1}s", feeder_cfg.interval_secs);
    println!("══════════════════════════════════════════════");
    println!();

    run_demo(&sock, &dest_addr, feeder_cfg);
}

fn open_socket(cfg: &FeederConfig) -> std::io::Result<UdpSocket> {
    let sock = UdpSocket::bind(if cfg.bind_ip.is_empty() {
        "0.0.0.0:0".to_string()
    } else {
        format!("{}:0", cfg.bind_ip)
    })?;

    if cfg.mode == "broadcast" || cfg.dest_ip == "255.255.255.255" {
        sock.set_broadcast(true)?;
        info!("Modo BROADCAST ativado");
    } else {
        info!("Modo UNICAST → {}", cfg.dest_ip);
    }
    Ok(sock)
}

fn send(sock: &UdpSocket, dest_addr: &str, message: &HudMessage) {
    match encode_message(message) {
        Ok(frame) => match sock.send_to(&frame, dest_addr) {
            Ok(sent) => info!("→ {sent} bytes para {dest_addr}: {message:?}"),
            Err(e) => error!("Erro ao enviar UDP: {e}"),
        },
        Err(e) => error!("Erro ao serializar mensagem: {e}"),
    }
}

fn run_demo(sock: &UdpSocket, dest_addr: &str, cfg: &FeederConfig) {
    let interval = Duration::from_secs_f64(cfg.interval_secs.clamp(0.1, 60.0));
    let mut sim = SurvivalSimulator::new();

    // ── Loop principal ──
    loop {
        let cycle_start = Instant::now();

        let bulk = sim.step();
        send(sock, dest_addr, &HudMessage::UpdateVitals(bulk));
        if sim.tick() % 30 == 0 {
            info!("Demo: {} ciclos", sim.tick());
        }

        // Dormir pelo tempo restante do intervalo
        let elapsed = cycle_start.elapsed();
        if elapsed < interval {
            std::thread::sleep(interval - elapsed);
        }
    }
}
