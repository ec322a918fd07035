//! Definição dos vitais e do store que guarda o valor atual de cada um.
//!
//! Todo valor que entra no store passa por [`clamp_value`]: piso + clamp em
//! `[0, max_value]`. Não existe outro caminho de escrita.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;

// ──────────────────────────────────────────────
// Identificadores
// ──────────────────────────────────────────────

/// Os oito vitais exibidos pelo HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalKind {
    Health,
    Armor,
    Food,
    Water,
    Shower,
    Stress,
    Pee,
    Poop,
}

impl VitalKind {
    /// Todos os vitais, na ordem de declaração.
    pub const ALL: [VitalKind; 8] = [
        VitalKind::Health,
        VitalKind::Armor,
        VitalKind::Food,
        VitalKind::Water,
        VitalKind::Shower,
        VitalKind::Stress,
        VitalKind::Pee,
        VitalKind::Poop,
    ];

    /// Nome usado nas mensagens e no layout (`"health"`, `"pee"`…).
    pub fn name(self) -> &'static str {
        match self {
            VitalKind::Health => "health",
            VitalKind::Armor => "armor",
            VitalKind::Food => "food",
            VitalKind::Water => "water",
            VitalKind::Shower => "shower",
            VitalKind::Stress => "stress",
            VitalKind::Pee => "pee",
            VitalKind::Poop => "poop",
        }
    }

    /// Resolve um nome exato. Retorna `None` para nomes desconhecidos.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Definição estática do vital.
    pub fn definition(self) -> &'static VitalDefinition {
        &DEFINITIONS[self as usize]
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VitalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Erro de parse de um nome de vital.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Vital desconhecido: {0}")]
pub struct UnknownVital(pub String);

impl FromStr for VitalKind {
    type Err = UnknownVital;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| UnknownVital(s.to_string()))
    }
}

// ──────────────────────────────────────────────
// Definições estáticas
// ──────────────────────────────────────────────

/// Metadados imutáveis de um vital.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalDefinition {
    pub kind: VitalKind,
    /// Limite superior da faixa (o inferior é sempre 0)
    pub max_value: u32,
    /// Cor usada na faixa saudável ("#RRGGBB")
    pub base_color: &'static str,
    /// `true` quando valor maior significa condição pior
    pub inverted: bool,
    /// Valor inicial ao subir o HUD
    pub default_value: u32,
}

/// Definições, indexadas pela ordem de [`VitalKind`].
///
/// Health segue a faixa nativa do vRP (0 = morto, 200 = cheio).
pub static DEFINITIONS: [VitalDefinition; 8] = [
    VitalDefinition {
        kind: VitalKind::Health,
        max_value: 200,
        base_color: "#ef4444",
        inverted: false,
        default_value: 200,
    },
    VitalDefinition {
        kind: VitalKind::Armor,
        max_value: 100,
        base_color: "#3b82f6",
        inverted: false,
        default_value: 100,
    },
    VitalDefinition {
        kind: VitalKind::Food,
        max_value: 100,
        base_color: "#f59e0b",
        inverted: false,
        default_value: 50,
    },
    VitalDefinition {
        kind: VitalKind::Water,
        max_value: 100,
        base_color: "#0ea5e9",
        inverted: false,
        default_value: 100,
    },
    VitalDefinition {
        kind: VitalKind::Shower,
        max_value: 100,
        base_color: "#22c55e",
        inverted: false,
        default_value: 100,
    },
    VitalDefinition {
        kind: VitalKind::Stress,
        max_value: 100,
        base_color: "#a855f7",
        inverted: true,
        default_value: 0,
    },
    VitalDefinition {
        kind: VitalKind::Pee,
        max_value: 100,
        base_color: "#fbbf24",
        inverted: true,
        default_value: 0,
    },
    VitalDefinition {
        kind: VitalKind::Poop,
        max_value: 100,
        base_color: "#78350f",
        inverted: true,
        default_value: 0,
    },
];

/// Normaliza um valor bruto: clamp em `[0, max]` seguido de piso.
///
/// `NaN` vira 0; infinitos saturam nos limites.
pub fn clamp_value(raw: f64, max_value: u32) -> u32 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, f64::from(max_value)).floor() as u32
}

// ──────────────────────────────────────────────
// Estado mutável
// ──────────────────────────────────────────────

/// Valor atual de um vital. Invariante: `0 <= current <= definition.max_value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VitalState {
    pub definition: &'static VitalDefinition,
    current: u32,
}

impl VitalState {
    fn new(definition: &'static VitalDefinition) -> Self {
        Self {
            definition,
            current: definition.default_value,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    /// Percentual preenchido (0–100).
    pub fn percentage(&self) -> f64 {
        f64::from(self.current) / f64::from(self.definition.max_value) * 100.0
    }
}

/// Dono exclusivo dos valores dos vitais.
#[derive(Debug, Clone)]
pub struct VitalStateStore {
    states: [VitalState; 8],
}

impl Default for VitalStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl VitalStateStore {
    /// Cria o store com os valores padrão de cada definição.
    pub fn new() -> Self {
        Self {
            states: DEFINITIONS.each_ref().map(VitalState::new),
        }
    }

    /// Estado tipado de um vital.
    pub fn state(&self, kind: VitalKind) -> &VitalState {
        &self.states[kind.index()]
    }

    /// Clampa e grava o valor, retornando o valor armazenado.
    pub fn set(&mut self, kind: VitalKind, raw: f64) -> u32 {
        let state = &mut self.states[kind.index()];
        state.current = clamp_value(raw, state.definition.max_value);
        state.current
    }

    pub fn get(&self, kind: VitalKind) -> u32 {
        self.state(kind).current
    }

    /// Versão por nome de [`Self::set`]. Nome desconhecido é só logado.
    pub fn set_value(&mut self, name: &str, raw: f64) -> Option<u32> {
        match VitalKind::from_name(name) {
            Some(kind) => Some(self.set(kind, raw)),
            None => {
                info!("Vital {name} não encontrado");
                None
            }
        }
    }

    /// Valor atual pelo nome; 0 para nomes desconhecidos.
    pub fn get_value(&self, name: &str) -> u32 {
        VitalKind::from_name(name).map_or(0, |kind| self.get(kind))
    }

    /// Percentual pelo nome; 0 para nomes desconhecidos.
    pub fn percentage(&self, name: &str) -> f64 {
        VitalKind::from_name(name).map_or(0.0, |kind| self.state(kind).percentage())
    }

    /// Itera sobre todos os estados na ordem de [`VitalKind::ALL`].
    pub fn iter(&self) -> impl Iterator<Item = &VitalState> {
        self.states.iter()
    }
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_are_indexed_by_kind() {
        for kind in VitalKind::ALL {
            assert_eq!(kind.definition().kind, kind);
            assert!(kind.definition().max_value > 0);
        }
    }

    #[test]
    fn names_roundtrip() {
        for kind in VitalKind::ALL {
            assert_eq!(VitalKind::from_name(kind.name()), Some(kind));
            assert_eq!(kind.name().parse::<VitalKind>(), Ok(kind));
        }
        assert_eq!(VitalKind::from_name("mood"), None);
        assert_eq!(VitalKind::from_name("Health"), None);
    }

    #[test]
    fn defaults_match_startup_values() {
        let store = VitalStateStore::new();
        assert_eq!(store.get(VitalKind::Health), 200);
        assert_eq!(store.get(VitalKind::Armor), 100);
        assert_eq!(store.get(VitalKind::Water), 100);
        assert_eq!(store.get(VitalKind::Shower), 100);
        assert_eq!(store.get(VitalKind::Food), 50);
        assert_eq!(store.get(VitalKind::Stress), 0);
        assert_eq!(store.get(VitalKind::Pee), 0);
        assert_eq!(store.get(VitalKind::Poop), 0);
    }

    #[test]
    fn set_value_clamps_and_floors() {
        let mut store = VitalStateStore::new();
        for kind in VitalKind::ALL {
            let max = kind.definition().max_value;
            for raw in [-10.0_f64, -0.5, 0.0, 0.99, 42.7, 99.999, 150.0, 250.0, 1e9] {
                let expected = raw.clamp(0.0, f64::from(max)).floor() as u32;
                assert_eq!(store.set_value(kind.name(), raw), Some(expected));
                assert_eq!(store.get_value(kind.name()), expected, "{kind} <- {raw}");
            }
        }
    }

    #[test]
    fn non_finite_input_is_normalized() {
        let mut store = VitalStateStore::new();
        assert_eq!(store.set(VitalKind::Water, f64::NAN), 0);
        assert_eq!(store.set(VitalKind::Water, f64::INFINITY), 100);
        assert_eq!(store.set(VitalKind::Water, f64::NEG_INFINITY), 0);
    }

    #[test]
    fn unknown_vital_is_a_noop() {
        let mut store = VitalStateStore::new();
        let before: Vec<u32> = store.iter().map(|s| s.current()).collect();
        assert_eq!(store.set_value("mood", 50.0), None);
        let after: Vec<u32> = store.iter().map(|s| s.current()).collect();
        assert_eq!(before, after);
        assert_eq!(store.get_value("mood"), 0);
        assert_eq!(store.percentage("mood"), 0.0);
    }

    #[test]
    fn health_uses_native_range() {
        let mut store = VitalStateStore::new();
        assert_eq!(store.set_value("health", 150.0), Some(150));
        assert_eq!(store.percentage("health"), 75.0);
        assert_eq!(store.set_value("armor", 150.0), Some(100));
        assert_eq!(store.percentage("armor"), 100.0);
    }
}
