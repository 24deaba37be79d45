//! Transport lifecycle: connect, join handshake, keepalive, teardown.
//!
//! One [`run_session`] call owns one connection from open to close. Inbound
//! frames are decoded, answered (keepalive) and routed synchronously, in
//! order; outgoing sends are fire-and-forget. Connection loss is terminal:
//! the session is torn down to neutral and the function returns. Any
//! reconnection means a fresh session and a fresh join, driven by the
//! caller.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use crate::net::errors::ConnectionError;
use crate::net::messages::{ClientMessage, ServerMessage};
use crate::router;
use crate::session::SessionContext;
use crate::view::ViewCommand;

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Coarse connection lifecycle, logged on every transition.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Joined,
}

/// Local player intent from the render layer. Translated into at most one
/// outgoing message through the session's action controller.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayerIntent {
    /// Submit a bet amount; −1 folds/passes, 0 checks.
    Bet(i64),
    /// Exchange the cards at these indices.
    CardsChange(Vec<usize>),
    /// Ask the server to start a hand.
    StartGame,
}

/// Drive one connection to completion.
///
/// Returns an error only when the initial connect or join handshake fails;
/// once joined, any termination (server close, transport error, intent
/// channel closed) ends in an orderly local teardown and `Ok(())`.
pub async fn run_session(
    url: &str,
    session: &mut SessionContext,
    view_tx: mpsc::UnboundedSender<ViewCommand>,
    mut intents: mpsc::UnboundedReceiver<PlayerIntent>,
) -> Result<(), ConnectionError> {
    let mut state = ConnectionState::Connecting;
    log::info!("connecting to {url}");
    let (ws, _) = connect_async(url).await?;
    let (mut write, mut read) = ws.split();

    // Identify the local player before anything else.
    send(&mut write, &session.join_message()).await?;
    let _ = view_tx.send(ViewCommand::Status("Connected :)".to_string()));

    loop {
        tokio::select! {
            intent = intents.recv() => {
                let Some(intent) = intent else {
                    log::info!("local side hung up, closing the connection");
                    break;
                };
                if let Some(outgoing) = translate(session, intent, &view_tx)
                    && let Err(error) = send(&mut write, &outgoing).await
                {
                    log::error!("send failed: {error}");
                    break;
                }
            }
            frame = read.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        let decoded = router::decode(&text);
                        if let Ok(message) = &decoded {
                            if message.wants_pong()
                                && let Err(error) = send(&mut write, &ClientMessage::Pong).await
                            {
                                log::error!("pong reply failed: {error}");
                                break;
                            }
                            if state != ConnectionState::Joined
                                && matches!(
                                    message,
                                    ServerMessage::JoinSuccess | ServerMessage::Connect { .. }
                                )
                            {
                                state = ConnectionState::Joined;
                                log::info!("join confirmed for {}", session.local.id);
                            }
                        }
                        for command in session.apply_decoded(decoded) {
                            let _ = view_tx.send(command);
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        log::info!("server closed the connection");
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(error)) => {
                        log::error!("websocket error: {error}");
                        break;
                    }
                }
            }
        }
    }

    state = ConnectionState::Disconnected;
    log::info!("connection is {state:?}, tearing down local state");
    for command in session.teardown() {
        let _ = view_tx.send(command);
    }
    Ok(())
}

/// Turn a local intent into an outgoing message, if the action controller
/// has a matching window pending. A rejected intent costs one status line.
fn translate(
    session: &mut SessionContext,
    intent: PlayerIntent,
    view_tx: &mpsc::UnboundedSender<ViewCommand>,
) -> Option<ClientMessage> {
    let outgoing = match intent {
        PlayerIntent::Bet(amount) => session.interaction.submit_bet(amount),
        PlayerIntent::CardsChange(cards) => session.interaction.submit_cards_change(cards),
        PlayerIntent::StartGame => Some(ClientMessage::StartGame),
    };
    if outgoing.is_none() {
        let _ = view_tx.send(ViewCommand::Status(
            "The server is not waiting on that action.".to_string(),
        ));
    }
    outgoing
}

async fn send(write: &mut WsSink, message: &ClientMessage) -> Result<(), ConnectionError> {
    let json = serde_json::to_string(message)?;
    write.send(Message::Text(json.into())).await?;
    Ok(())
}
