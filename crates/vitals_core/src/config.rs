//! Configuração unificada via TOML.
//!
//! Um único `config.toml` ao lado do executável serve overlay e feeder.

use crate::theme;
use crate::vitals::VitalKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Configuração do Feeder (lado do client do jogo).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeederConfig {
    /// Modo de envio: "broadcast" ou "unicast"
    pub mode: String,
    /// IP de destino do overlay
    pub dest_ip: String,
    /// Porta UDP
    pub port: u16,
    /// Intervalo entre atualizações no modo demo (segundos)
    pub interval_secs: f64,
    /// IP local para bind (vazio = auto)
    pub bind_ip: String,
}

impl Default for FeederConfig {
    fn default() -> Self {
        Self {
            mode: "unicast".into(),
            dest_ip: "127.0.0.1".into(),
            port: 5006,
            interval_secs: 1.0,
            bind_ip: String::new(),
        }
    }
}

/// Thresholds percentuais das faixas de cor e do indicador de aviso.
///
/// Os mesmos três valores valem para vitais normais (lidos de baixo)
/// e invertidos (lidos de cima).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WarningThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for WarningThresholds {
    fn default() -> Self {
        Self {
            low: 20.0,
            medium: 50.0,
            high: 80.0,
        }
    }
}

/// Cores base customizadas por vital (override da definição).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomColors {
    pub health: String,
    pub armor: String,
    pub food: String,
    pub water: String,
    pub shower: String,
    pub stress: String,
    pub pee: String,
    pub poop: String,
}

impl CustomColors {
    /// Cor customizada do vital, se configurada.
    pub fn get(&self, kind: VitalKind) -> Option<&str> {
        let color = match kind {
            VitalKind::Health => &self.health,
            VitalKind::Armor => &self.armor,
            VitalKind::Food => &self.food,
            VitalKind::Water => &self.water,
            VitalKind::Shower => &self.shower,
            VitalKind::Stress => &self.stress,
            VitalKind::Pee => &self.pee,
            VitalKind::Poop => &self.poop,
        };
        (!color.is_empty()).then_some(color.as_str())
    }
}

/// Configuração do Overlay (HUD).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Porta UDP para escutar
    pub port: u16,
    /// IP do feeder (vazio = aceita qualquer origem)
    pub sender_ip: String,
    /// Tema: "dark", "light", "high_contrast"
    pub theme: String,
    /// Vitais exibidos, na ordem do layout
    pub gauges: Vec<String>,
    /// Exibe o ponto pulsante de aviso nos anéis
    pub warning_indicators: bool,
    /// Escala dos anéis (1.0 = raio 26)
    pub scale: f32,
    /// Cores customizadas
    pub custom_colors: CustomColors,
    /// Thresholds de alerta
    pub thresholds: WarningThresholds,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            port: 5006,
            sender_ip: String::new(),
            theme: "dark".into(),
            gauges: VitalKind::ALL.iter().map(|k| k.name().to_string()).collect(),
            warning_indicators: true,
            scale: 1.0,
            custom_colors: CustomColors::default(),
            thresholds: WarningThresholds::default(),
        }
    }
}

impl OverlayConfig {
    /// Vitais do layout reconhecidos, na ordem configurada, sem repetição.
    pub fn gauge_kinds(&self) -> Vec<VitalKind> {
        let mut kinds = Vec::new();
        for kind in self.gauges.iter().filter_map(|name| VitalKind::from_name(name)) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }
}

/// Configuração raiz do aplicativo (unifica overlay e feeder).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub feeder: FeederConfig,
    pub overlay: OverlayConfig,
}

impl AppConfig {
    /// Carrega configuração de um arquivo TOML.
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => {
                        info!("Configuração carregada de {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Erro ao parsear {}: {}", path.display(), e);
                    }
                },
                Err(e) => {
                    warn!("Erro ao ler {}: {}", path.display(), e);
                }
            }
        }

        info!("Usando configuração padrão");
        AppConfig::default()
    }

    /// Salva configuração em arquivo TOML.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content = toml::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(path, content).map_err(|e| e.to_string())?;
        info!("Configuração salva em {}", path.display());
        Ok(())
    }

    /// Retorna o caminho padrão do config.toml.
    pub fn default_path() -> PathBuf {
        let exe_dir = std::env::current_exe()
            .map(|p| p.parent().unwrap_or(Path::new(".")).to_path_buf())
            .unwrap_or_else(|_| PathBuf::from("."));
        exe_dir.join("config.toml")
    }

    /// Valida a configuração e retorna lista de erros.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.feeder.port == 0 {
            errors.push("Porta do feeder não pode ser 0".into());
        }
        if self.feeder.interval_secs < 0.1 || self.feeder.interval_secs > 60.0 {
            errors.push(format!(
                "Intervalo do feeder inválido: {} (0.1–60.0)",
                self.feeder.interval_secs
            ));
        }
        if self.overlay.port == 0 {
            errors.push("Porta do overlay não pode ser 0".into());
        }
        if self.overlay.scale <= 0.0 {
            errors.push(format!("Escala inválida: {}", self.overlay.scale));
        }

        let th = &self.overlay.thresholds;
        if !(0.0 <= th.low && th.low < th.medium && th.medium < th.high && th.high <= 100.0) {
            errors.push(format!(
                "Thresholds inválidos: low={} medium={} high={} (0 ≤ low < medium < high ≤ 100)",
                th.low, th.medium, th.high
            ));
        }

        for name in &self.overlay.gauges {
            if VitalKind::from_name(name).is_none() {
                errors.push(format!("Vital desconhecido no layout: {name}"));
            }
        }

        for kind in VitalKind::ALL {
            if let Some(color) = self.overlay.custom_colors.get(kind) {
                if !theme::is_valid_hex(color) {
                    errors.push(format!("Cor inválida para {kind}: {color}"));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        let errors = config.validate();
        assert!(errors.is_empty(), "Erros: {:?}", errors);
    }

    #[test]
    fn roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.feeder.port, parsed.feeder.port);
        assert_eq!(config.overlay.theme, parsed.overlay.theme);
        assert_eq!(config.overlay.gauges, parsed.overlay.gauges);
        assert_eq!(config.overlay.thresholds, parsed.overlay.thresholds);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let partial = r#"
[overlay]
port = 9999
gauges = ["health", "stress"]
"#;
        let config: AppConfig = toml::from_str(partial).unwrap();
        assert_eq!(config.overlay.port, 9999);
        assert_eq!(
            config.overlay.gauge_kinds(),
            vec![VitalKind::Health, VitalKind::Stress]
        );
        // Outros campos devem ter valor padrão
        assert_eq!(config.overlay.thresholds.low, 20.0);
        assert!(config.overlay.warning_indicators);
        assert_eq!(config.feeder.port, 5006);
    }

    #[test]
    fn gauge_kinds_skip_repeated_names() {
        let overlay = OverlayConfig {
            gauges: vec!["water".into(), "mood".into(), "water".into(), "food".into()],
            ..Default::default()
        };
        assert_eq!(overlay.gauge_kinds(), vec![VitalKind::Water, VitalKind::Food]);
    }

    #[test]
    fn rejects_unordered_thresholds() {
        let mut config = AppConfig::default();
        config.overlay.thresholds.medium = 90.0;
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Thresholds"));
    }

    #[test]
    fn rejects_unknown_gauge_and_bad_color() {
        let mut config = AppConfig::default();
        config.overlay.gauges.push("mood".into());
        config.overlay.custom_colors.stress = "roxo".into();
        let errors = config.validate();
        assert_eq!(errors.len(), 2, "Erros: {:?}", errors);
    }

    #[test]
    fn custom_colors_skip_empty() {
        let colors = CustomColors {
            water: "#00ffff".into(),
            ..Default::default()
        };
        assert_eq!(colors.get(VitalKind::Water), Some("#00ffff"));
        assert_eq!(colors.get(VitalKind::Food), None);
    }
}
