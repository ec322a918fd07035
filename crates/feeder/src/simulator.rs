//! Simulação determinística do sistema de sobrevivência para o modo demo.
//!
//! Sede, fome e higiene caem; xixi, cocô e stress sobem. Ao chegar no
//! limite o "personagem" bebe, come, toma banho ou vai ao banheiro.

use vitals_core::VitalKind;
use vitals_core::protocol::BulkUpdate;

/// Estado simulado dos vitais (em unidades nativas, 0–max).
#[derive(Debug, Clone)]
pub struct SurvivalSimulator {
    tick: u64,
    health: f64,
    armor: f64,
    food: f64,
    water: f64,
    shower: f64,
    stress: f64,
    pee: f64,
    poop: f64,
}

impl Default for SurvivalSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SurvivalSimulator {
    pub fn new() -> Self {
        let def = |k: VitalKind| f64::from(k.definition().default_value);
        Self {
            tick: 0,
            health: def(VitalKind::Health),
            armor: def(VitalKind::Armor),
            food: def(VitalKind::Food),
            water: def(VitalKind::Water),
            shower: def(VitalKind::Shower),
            stress: def(VitalKind::Stress),
            pee: def(VitalKind::Pee),
            poop: def(VitalKind::Poop),
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Avança um ciclo e retorna a atualização em lote com todos os vitais.
    pub fn step(&mut self) -> BulkUpdate {
        self.tick += 1;

        self.water = refill(self.water - 0.8, 100.0);
        self.food = refill(self.food - 0.5, 100.0);
        self.shower = refill(self.shower - 0.3, 100.0);
        self.armor = refill(self.armor - 0.25, 100.0);

        self.pee += 1.2;
        self.poop += 0.6;
        for need in [&mut self.pee, &mut self.poop] {
            if *need >= 100.0 {
                *need = 0.0;
                self.stress = (self.stress - 10.0).max(0.0);
            }
        }

        let starving = self.water < 20.0 || self.food < 20.0;
        self.stress = if starving {
            (self.stress + 0.8).min(100.0)
        } else {
            (self.stress + 0.1).min(100.0)
        };

        let max_health = f64::from(VitalKind::Health.definition().max_value);
        self.health = if self.water <= 10.0 || self.food <= 10.0 {
            (self.health - 2.0).max(0.0)
        } else {
            (self.health + 1.0).min(max_health)
        };

        BulkUpdate {
            water: Some(self.water),
            food: Some(self.food),
            pee: Some(self.pee),
            poop: Some(self.poop),
            shower: Some(self.shower),
            stress: Some(self.stress),
            health: Some(self.health),
            armor: Some(self.armor),
        }
    }
}

/// Zerou? Reabastece.
fn refill(value: f64, full: f64) -> f64 {
    if value <= 0.0 { full } else { value }
}
