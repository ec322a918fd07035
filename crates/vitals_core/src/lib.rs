//! # Vitals Core
//!
//! Crate compartilhada do HUD de vitais (vida, colete, fome, sede, higiene,
//! stress, xixi e cocô): store dos valores, cálculo visual dos anéis,
//! ingestão de mensagens do client do jogo e configuração TOML.
//!
//! ## Módulos
//! - [`vitals`] – Definições estáticas e `VitalStateStore` (clamp + piso)
//! - [`render`] – Estado visual dos anéis e aplicação nos handles
//! - [`bridge`] – Ingestão de mensagens `updateVital` / `updateVitals`
//! - [`hud`] – Fachada `VitalsHud` e a API procedural `VitalsApi`
//! - [`protocol`] – Encode/decode JSON dos datagramas
//! - [`config`] – Configuração unificada via TOML
//! - [`theme`] – Temas (Dark, Light, High Contrast)
//! - [`alerts`] – Thresholds e níveis de alerta

pub mod vitals;
pub mod render;
pub mod bridge;
pub mod hud;
pub mod protocol;
pub mod config;
pub mod theme;
pub mod alerts;

// Re-exports convenientes
pub use vitals::{VitalKind, VitalStateStore};
pub use hud::{VitalsApi, VitalsHud};
pub use protocol::{BulkUpdate, HudMessage, decode_message, encode_message};
pub use config::{AppConfig, FeederConfig, OverlayConfig};
