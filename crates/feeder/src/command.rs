//! Parse dos argumentos de linha de comando.

use vitals_core::protocol::{BulkUpdate, HudMessage};
use vitals_core::VitalKind;

pub const USAGE: &str = "\
Uso:
  vitals_feeder                         # demo (simulação contínua)
  vitals_feeder demo
  vitals_feeder set <vital> <valor>     # ex: set water 20
  vitals_feeder bulk <vital>=<valor>... # ex: bulk food=10 stress=0

Vitais: health armor food water shower stress pee poop";

/// Comando pedido pelo usuário.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Uma mensagem `updateVital`. O nome não é validado: o HUD ignora
    /// nomes desconhecidos, útil para testar esse caminho.
    Set { vital: String, value: f64 },
    /// Uma mensagem `updateVitals`.
    Bulk(BulkUpdate),
    /// Loop de simulação.
    Demo,
    Help,
}

impl Command {
    /// Mensagem única do comando (`None` para demo/help).
    pub fn message(&self) -> Option<HudMessage> {
        match self {
            Command::Set { vital, value } => Some(HudMessage::UpdateVital {
                vital: vital.clone(),
                value: *value,
            }),
            Command::Bulk(bulk) => Some(HudMessage::UpdateVitals(bulk.clone())),
            Command::Demo | Command::Help => None,
        }
    }
}

fn parse_value(text: &str) -> Result<f64, String> {
    text.parse::<f64>()
        .map_err(|_| format!("Valor inválido: {text}"))
}

/// Interpreta os argumentos (sem o nome do executável).
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let Some((cmd, rest)) = args.split_first() else {
        return Ok(Command::Demo);
    };

    match cmd.as_str() {
        "demo" => Ok(Command::Demo),
        "help" | "-h" | "--help" => Ok(Command::Help),
        "set" => match rest {
            [vital, value] => Ok(Command::Set {
                vital: vital.clone(),
                value: parse_value(value)?,
            }),
            _ => Err("set espera <vital> <valor>".into()),
        },
        "bulk" => {
            if rest.is_empty() {
                return Err("bulk espera ao menos um <vital>=<valor>".into());
            }
            let mut bulk = BulkUpdate::default();
            for pair in rest {
                let (name, value) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("Esperado <vital>=<valor>, recebido: {pair}"))?;
                let kind: VitalKind = name.parse().map_err(|e| format!("{e}"))?;
                bulk.set(kind, parse_value(value)?);
            }
            Ok(Command::Bulk(bulk))
        }
        other => Err(format!("Comando desconhecido: {other}")),
    }
}
