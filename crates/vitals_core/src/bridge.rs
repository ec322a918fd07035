//! IngestBridge – aplica mensagens externas no store.
//!
//! [`ingest`] não toca na superfície de exibição: devolve o estado visual
//! de cada vital afetado, na ordem de aplicação. Quem registra o listener
//! (thread UDP, callback NUI…) é um adaptador externo.

use crate::protocol::HudMessage;
use crate::render::{RenderStyle, VisualState, visual_state};
use crate::vitals::{VitalKind, VitalStateStore};
use tracing::{debug, trace};

/// Clampa/grava os valores da mensagem e retorna o estado visual resultante.
pub fn ingest(
    store: &mut VitalStateStore,
    style: &RenderStyle,
    message: &HudMessage,
) -> Vec<VisualState> {
    match message {
        HudMessage::UpdateVital { vital, value } => {
            let Some(kind) = VitalKind::from_name(vital) else {
                // Mesmo caminho do set_value: loga e não faz nada
                store.set_value(vital, *value);
                return Vec::new();
            };
            store.set(kind, *value);
            vec![visual_state(store, kind, style)]
        }
        HudMessage::UpdateVitals(bulk) => {
            let mut rendered = Vec::with_capacity(8);
            for (kind, value) in bulk.entries() {
                let stored = store.set(kind, value);
                trace!("{kind} ← {value} (armazenado {stored})");
                rendered.push(visual_state(store, kind, style));
            }
            rendered
        }
        HudMessage::Unknown => {
            debug!("Mensagem de tipo desconhecido ignorada");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{BulkUpdate, decode_message};

    fn ingest_json(store: &mut VitalStateStore, json: &str) -> Vec<VisualState> {
        let message = decode_message(json.as_bytes()).unwrap();
        ingest(store, &RenderStyle::default(), &message)
    }

    #[test]
    fn single_update_renders_one_vital() {
        let mut store = VitalStateStore::new();
        let rendered = ingest_json(&mut store, r#"{"type":"updateVital","vital":"water","value":33.9}"#);
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].vital, VitalKind::Water);
        assert_eq!(rendered[0].label, "33");
        assert_eq!(store.get(VitalKind::Water), 33);
    }

    #[test]
    fn single_update_unknown_vital_is_noop() {
        let mut store = VitalStateStore::new();
        let before = store.clone();
        let rendered = ingest_json(&mut store, r#"{"type":"updateVital","vital":"mood","value":50}"#);
        assert!(rendered.is_empty());
        for kind in VitalKind::ALL {
            assert_eq!(store.get(kind), before.get(kind));
        }
    }

    #[test]
    fn bulk_zero_is_applied() {
        let mut store = VitalStateStore::new();
        store.set(VitalKind::Stress, 70.0);
        let rendered = ingest_json(&mut store, r#"{"type":"updateVitals","stress":0}"#);
        assert_eq!(store.get(VitalKind::Stress), 0);
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].label, "0");
    }

    #[test]
    fn bulk_absent_field_is_untouched() {
        let mut store = VitalStateStore::new();
        store.set(VitalKind::Water, 37.0);
        ingest_json(&mut store, r#"{"type":"updateVitals","food":10}"#);
        assert_eq!(store.get(VitalKind::Food), 10);
        assert_eq!(store.get(VitalKind::Water), 37);
    }

    #[test]
    fn bulk_applies_in_fixed_order() {
        let mut store = VitalStateStore::new();
        let bulk = BulkUpdate {
            armor: Some(5.0),
            health: Some(300.0),
            poop: Some(-1.0),
            water: Some(50.0),
            ..Default::default()
        };
        let rendered = ingest(&mut store, &RenderStyle::default(), &HudMessage::UpdateVitals(bulk));
        let order: Vec<VitalKind> = rendered.iter().map(|v| v.vital).collect();
        assert_eq!(
            order,
            vec![VitalKind::Water, VitalKind::Poop, VitalKind::Health, VitalKind::Armor]
        );
        assert_eq!(store.get(VitalKind::Health), 200);
        assert_eq!(store.get(VitalKind::Poop), 0);
    }

    #[test]
    fn unknown_message_is_ignored() {
        let mut store = VitalStateStore::new();
        let rendered = ingest_json(&mut store, r#"{"type":"openMenu"}"#);
        assert!(rendered.is_empty());
    }
}
