//! Sistema de alertas – faixas de cor e indicador de aviso.
//!
//! Vitais normais alertam por baixo (`<= low`), vitais invertidos
//! (stress, pee, poop) alertam por cima (`>= high`).

use crate::config::WarningThresholds;
use crate::vitals::{VitalKind, VitalStateStore};
use serde::{Deserialize, Serialize};

/// Nível de alerta. Corresponde à faixa de cor do anel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AlertLevel {
    /// Cor base do vital
    Normal,
    /// Laranja
    Warning,
    /// Vermelho
    Critical,
}

/// Um vital fora da faixa saudável.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub vital: VitalKind,
    pub value: u32,
    pub percentage: f64,
    pub level: AlertLevel,
}

/// Retorna o [`AlertLevel`] para um percentual, respeitando a inversão.
pub fn level_for_percentage(percentage: f64, inverted: bool, th: &WarningThresholds) -> AlertLevel {
    if inverted {
        if percentage >= th.high {
            AlertLevel::Critical
        } else if percentage >= th.medium {
            AlertLevel::Warning
        } else {
            AlertLevel::Normal
        }
    } else if percentage <= th.low {
        AlertLevel::Critical
    } else if percentage <= th.medium {
        AlertLevel::Warning
    } else {
        AlertLevel::Normal
    }
}

/// Indicador de aviso (pulso) ligado?
pub fn should_warn(percentage: f64, inverted: bool, th: &WarningThresholds) -> bool {
    if inverted {
        percentage >= th.high
    } else {
        percentage <= th.low
    }
}

/// Avalia todos os vitais do store e retorna os que estão fora do normal.
pub fn evaluate_alerts(store: &VitalStateStore, th: &WarningThresholds) -> Vec<Alert> {
    store
        .iter()
        .filter_map(|state| {
            let percentage = state.percentage();
            let level = level_for_percentage(percentage, state.definition.inverted, th);
            (level != AlertLevel::Normal).then(|| Alert {
                vital: state.definition.kind,
                value: state.current(),
                percentage,
                level,
            })
        })
        .collect()
}
