//! Escuta UDP do HUD.
//!
//! A thread só decodifica datagramas e repassa [`HudMessage`]s para a UI,
//! que é a dona única do HUD. Fila cheia descarta; UI fechada encerra a
//! thread.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use std::io::ErrorKind;
use std::net::{IpAddr, SocketAddr, UdpSocket};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use vitals_core::protocol::{HudMessage, MAX_DATAGRAM, decode_message};

/// Mensagens pendentes antes de começar a descartar.
pub const CHANNEL_CAPACITY: usize = 64;

const READ_TIMEOUT: Duration = Duration::from_secs(1);
const BIND_RETRY: Duration = Duration::from_secs(2);

/// Mensagem decodificada, com a origem para a linha de status.
#[derive(Debug, Clone)]
pub struct NetMessage {
    pub message: HudMessage,
    pub source_addr: String,
}

/// Quem pode falar com o HUD (`sender_ip` da config).
#[derive(Debug, Clone, PartialEq)]
pub enum SourceFilter {
    Any,
    Only(IpAddr),
    /// IP mal escrito na config: nada passa.
    Nobody,
}

impl SourceFilter {
    pub fn new(sender_ip: &str) -> Self {
        let sender_ip = sender_ip.trim();
        if sender_ip.is_empty() {
            return Self::Any;
        }
        match sender_ip.parse() {
            Ok(ip) => Self::Only(ip),
            Err(_) => {
                warn!("sender_ip inválido ({sender_ip}): nenhum pacote será aceito");
                Self::Nobody
            }
        }
    }

    pub fn accepts(&self, ip: IpAddr) -> bool {
        match self {
            Self::Any => true,
            Self::Only(allowed) => *allowed == ip,
            Self::Nobody => false,
        }
    }
}

/// Filtra e decodifica um datagrama. `None` quando ele deve ser ignorado.
pub fn accept_datagram(data: &[u8], from: SocketAddr, filter: &SourceFilter) -> Option<NetMessage> {
    if !filter.accepts(from.ip()) {
        debug!("Datagrama de {from} fora do filtro");
        return None;
    }
    match decode_message(data) {
        Ok(message) => Some(NetMessage {
            message,
            source_addr: from.ip().to_string(),
        }),
        Err(e) => {
            debug!("Datagrama descartado de {from}: {e}");
            None
        }
    }
}

/// Repassa para a UI. `false` quando a UI já foi encerrada.
fn forward(tx: &Sender<NetMessage>, msg: NetMessage) -> bool {
    match tx.try_send(msg) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            debug!("UI atrasada, mensagem descartada");
            true
        }
        Err(TrySendError::Disconnected(_)) => false,
    }
}

/// Abre o socket, tentando de novo enquanto a porta estiver ocupada.
fn bind_with_retry(port: u16) -> UdpSocket {
    loop {
        match UdpSocket::bind(("0.0.0.0", port)) {
            Ok(sock) => return sock,
            Err(e) => {
                error!("Porta UDP {port} indisponível ({e}), nova tentativa em {BIND_RETRY:?}");
                std::thread::sleep(BIND_RETRY);
            }
        }
    }
}

fn listen(tx: &Sender<NetMessage>, port: u16, filter: &SourceFilter) {
    let sock = bind_with_retry(port);
    if let Err(e) = sock.set_read_timeout(Some(READ_TIMEOUT)) {
        warn!("Sem timeout de leitura no socket: {e}");
    }
    info!("HUD ouvindo UDP na porta {port} ({filter:?})");

    let mut buf = vec![0u8; MAX_DATAGRAM + 1];
    loop {
        let (size, from) = match sock.recv_from(&mut buf) {
            Ok(received) => received,
            Err(e) if matches!(e.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock) => continue,
            Err(e) => {
                warn!("Falha ao ler UDP: {e}");
                continue;
            }
        };

        if let Some(msg) = accept_datagram(&buf[..size], from, filter) {
            if !forward(tx, msg) {
                break;
            }
        }
    }
    info!("UI encerrada, thread UDP saindo");
}

/// Inicia a thread de escuta e devolve a ponta de leitura do channel.
pub fn spawn_receiver_thread(
    port: u16,
    sender_ip: String,
) -> std::io::Result<Receiver<NetMessage>> {
    let (tx, rx) = bounded(CHANNEL_CAPACITY);
    let filter = SourceFilter::new(&sender_ip);

    std::thread::Builder::new()
        .name("hud-udp".into())
        .spawn(move || listen(&tx, port, &filter))?;

    Ok(rx)
}
