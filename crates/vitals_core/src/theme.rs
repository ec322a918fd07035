//! Definição de temas visuais para o overlay.
//!
//! As cores de alerta (vermelho) e aviso (laranja) do tema escuro são as
//! mesmas da NUI do servidor.

use serde::{Deserialize, Serialize};

/// Cor em formato hex string (ex: "#ef4444") para serialização.
/// A conversão para `egui::Color32` é feita no overlay.
pub type Color32Hex = String;

/// Definição completa de um tema de cores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub panel: Color32Hex,
    /// Trilho do anel (parte não preenchida)
    pub track: Color32Hex,
    // Texto
    pub text: Color32Hex,
    pub dim: Color32Hex,
    // Faixas de alerta
    pub warning: Color32Hex,
    pub critical: Color32Hex,
}

/// Converte uma string hex "#RRGGBB" para tupla (r, g, b).
pub fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    if !is_valid_hex(hex) {
        return (255, 255, 255); // fallback branco
    }
    let hex = hex.trim_start_matches('#');
    let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
    let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
    let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);
    (r, g, b)
}

/// `true` para "#RRGGBB" ou "RRGGBB".
pub fn is_valid_hex(hex: &str) -> bool {
    let hex = hex.trim_start_matches('#');
    hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit())
}

/// Tema Escuro (padrão).
pub fn dark_theme() -> Theme {
    Theme {
        name: "dark".into(),
        panel: "#111827".into(),
        track: "#374151".into(),
        text: "#ffffff".into(),
        dim: "#9ca3af".into(),
        warning: "#f59e0b".into(),
        critical: "#ef4444".into(),
    }
}

/// Tema Claro.
pub fn light_theme() -> Theme {
    Theme {
        name: "light".into(),
        panel: "#ffffff".into(),
        track: "#d1d5db".into(),
        text: "#111827".into(),
        dim: "#6b7280".into(),
        warning: "#d97706".into(),
        critical: "#dc2626".into(),
    }
}

/// Tema High Contrast (acessibilidade).
pub fn high_contrast_theme() -> Theme {
    Theme {
        name: "high_contrast".into(),
        panel: "#000000".into(),
        track: "#ffffff".into(),
        text: "#ffffff".into(),
        dim: "#cccccc".into(),
        warning: "#ffff00".into(),
        critical: "#ff0000".into(),
    }
}

/// Retorna tema pelo nome.
pub fn get_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "light" => light_theme(),
        "high_contrast" => high_contrast_theme(),
        _ => dark_theme(),
    }
}

/// Nomes de temas disponíveis.
pub fn theme_names() -> Vec<&'static str> {
    vec!["dark", "light", "high_contrast"]
}
