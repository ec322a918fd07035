//! Protocolo de mensagens entre o client do jogo e o HUD.
//!
//! Cada datagrama UDP carrega um único documento JSON, no mesmo formato
//! das mensagens NUI:
//!
//! ```text
//! {"type":"updateVital","vital":"water","value":42}
//! {"type":"updateVitals","water":42,"stress":0}
//! ```
//!
//! Um `type` desconhecido vira [`HudMessage::Unknown`] e é ignorado.

use crate::vitals::VitalKind;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tamanho máximo de pacote UDP seguro (sem fragmentação).
pub const MAX_DATAGRAM: usize = 65507;

/// Ordem fixa de aplicação de uma atualização em lote.
pub const BULK_ORDER: [VitalKind; 8] = [
    VitalKind::Water,
    VitalKind::Food,
    VitalKind::Pee,
    VitalKind::Poop,
    VitalKind::Shower,
    VitalKind::Stress,
    VitalKind::Health,
    VitalKind::Armor,
];

/// Mensagem recebida do client do jogo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HudMessage {
    /// Atualiza um único vital.
    #[serde(rename = "updateVital")]
    UpdateVital {
        vital: String,
        #[serde(deserialize_with = "value_or_zero")]
        value: f64,
    },
    /// Atualiza qualquer subconjunto dos vitais.
    #[serde(rename = "updateVitals")]
    UpdateVitals(BulkUpdate),
    #[serde(other)]
    Unknown,
}

/// Campos opcionais de uma atualização em lote.
///
/// Ausência (ou `null`) pula o vital; `0` é um valor válido e é aplicado.
/// Cada campo é lido isoladamente: um campo que não é número (nem texto
/// numérico) é descartado sem derrubar os demais.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkUpdate {
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub water: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub food: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub pee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub poop: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub shower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub stress: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub health: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_number")]
    pub armor: Option<f64>,
}

impl BulkUpdate {
    fn slot(&mut self, kind: VitalKind) -> &mut Option<f64> {
        match kind {
            VitalKind::Water => &mut self.water,
            VitalKind::Food => &mut self.food,
            VitalKind::Pee => &mut self.pee,
            VitalKind::Poop => &mut self.poop,
            VitalKind::Shower => &mut self.shower,
            VitalKind::Stress => &mut self.stress,
            VitalKind::Health => &mut self.health,
            VitalKind::Armor => &mut self.armor,
        }
    }

    pub fn get(&self, kind: VitalKind) -> Option<f64> {
        match kind {
            VitalKind::Water => self.water,
            VitalKind::Food => self.food,
            VitalKind::Pee => self.pee,
            VitalKind::Poop => self.poop,
            VitalKind::Shower => self.shower,
            VitalKind::Stress => self.stress,
            VitalKind::Health => self.health,
            VitalKind::Armor => self.armor,
        }
    }

    pub fn set(&mut self, kind: VitalKind, value: f64) {
        *self.slot(kind) = Some(value);
    }

    /// Campos presentes, em [`BULK_ORDER`].
    pub fn entries(&self) -> impl Iterator<Item = (VitalKind, f64)> + '_ {
        BULK_ORDER
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|value| (kind, value)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }
}

/// Número JSON ou texto numérico ("50"). Qualquer outra coisa vira `None`.
fn number_from(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let number = number_from(&value);
    if number.is_none() && !value.is_null() {
        tracing::debug!("Campo de vital ignorado: {value}");
    }
    Ok(number)
}

/// `null` conta como zero na atualização de um vital; o valor é obrigatório.
fn value_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(0.0);
    }
    number_from(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("valor não numérico: {value}")))
}

/// Erros do protocolo.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("Datagrama vazio")]
    Empty,

    #[error("Datagrama muito grande ({0} bytes, máximo {MAX_DATAGRAM})")]
    TooLarge(usize),

    #[error("Erro de serialização: {0}")]
    Serialize(String),

    #[error("Erro de deserialização: {0}")]
    Deserialize(String),
}

/// Codifica uma [`HudMessage`] em JSON para envio UDP.
pub fn encode_message(message: &HudMessage) -> Result<Vec<u8>, ProtocolError> {
    let frame = serde_json::to_vec(message).map_err(|e| ProtocolError::Serialize(e.to_string()))?;
    if frame.len() > MAX_DATAGRAM {
        return Err(ProtocolError::TooLarge(frame.len()));
    }
    Ok(frame)
}

/// Decodifica um datagrama recebido em [`HudMessage`].
pub fn decode_message(data: &[u8]) -> Result<HudMessage, ProtocolError> {
    if data.is_empty() {
        return Err(ProtocolError::Empty);
    }
    if data.len() > MAX_DATAGRAM {
        return Err(ProtocolError::TooLarge(data.len()));
    }
    serde_json::from_slice(data).map_err(|e| ProtocolError::Deserialize(e.to_string()))
}

// ──────────────────────────────────────────────
// Testes
// ──────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_single_update() {
        let msg = decode_message(br#"{"type":"updateVital","vital":"water","value":42.5}"#).unwrap();
        assert_eq!(
            msg,
            HudMessage::UpdateVital {
                vital: "water".into(),
                value: 42.5
            }
        );
    }

    #[test]
    fn decodes_bulk_update_with_zero() {
        let msg = decode_message(br#"{"type":"updateVitals","stress":0,"food":10}"#).unwrap();
        let HudMessage::UpdateVitals(bulk) = msg else {
            panic!("esperado updateVitals");
        };
        assert_eq!(bulk.stress, Some(0.0));
        assert_eq!(bulk.food, Some(10.0));
        assert_eq!(bulk.water, None);
    }

    #[test]
    fn null_field_counts_as_absent() {
        let msg = decode_message(br#"{"type":"updateVitals","water":null}"#).unwrap();
        assert_eq!(msg, HudMessage::UpdateVitals(BulkUpdate::default()));
    }

    #[test]
    fn bad_bulk_field_keeps_the_others() {
        let msg =
            decode_message(br#"{"type":"updateVitals","water":"50","food":10,"pee":true}"#).unwrap();
        let HudMessage::UpdateVitals(bulk) = msg else {
            panic!("esperado updateVitals");
        };
        assert_eq!(bulk.water, Some(50.0));
        assert_eq!(bulk.food, Some(10.0));
        assert_eq!(bulk.pee, None);
    }

    #[test]
    fn single_update_null_is_zero() {
        let msg = decode_message(br#"{"type":"updateVital","vital":"stress","value":null}"#).unwrap();
        assert_eq!(
            msg,
            HudMessage::UpdateVital {
                vital: "stress".into(),
                value: 0.0
            }
        );
        assert!(decode_message(br#"{"type":"updateVital","vital":"stress","value":[1]}"#).is_err());
    }

    #[test]
    fn unknown_type_is_not_an_error() {
        let msg = decode_message(br#"{"type":"toggleHud","visible":false}"#).unwrap();
        assert_eq!(msg, HudMessage::Unknown);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(decode_message(b""), Err(ProtocolError::Empty)));
        assert!(matches!(
            decode_message(b"not json"),
            Err(ProtocolError::Deserialize(_))
        ));
        assert!(matches!(
            decode_message(br#"{"vital":"water"}"#),
            Err(ProtocolError::Deserialize(_))
        ));
    }

    #[test]
    fn encoded_bulk_omits_absent_fields() {
        let mut bulk = BulkUpdate::default();
        bulk.set(VitalKind::Stress, 0.0);
        let frame = encode_message(&HudMessage::UpdateVitals(bulk.clone())).unwrap();
        let text = String::from_utf8(frame.clone()).unwrap();
        assert_eq!(text, r#"{"type":"updateVitals","stress":0.0}"#);
        assert_eq!(decode_message(&frame).unwrap(), HudMessage::UpdateVitals(bulk));
    }

    #[test]
    fn entries_follow_bulk_order() {
        let bulk = BulkUpdate {
            armor: Some(1.0),
            water: Some(2.0),
            stress: Some(3.0),
            ..Default::default()
        };
        let order: Vec<VitalKind> = bulk.entries().map(|(k, _)| k).collect();
        assert_eq!(order, vec![VitalKind::Water, VitalKind::Stress, VitalKind::Armor]);
        assert!(!bulk.is_empty());
        assert!(BulkUpdate::default().is_empty());
    }
}
