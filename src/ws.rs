use crate::{
    error::GameError,
    game::{player::PlayerId, Command},
    session::{SessionHandle, SessionManager},
};
use futures_util::{select, FutureExt, SinkExt, StreamExt, TryStreamExt};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::watch;
use tokio_tungstenite::tungstenite::Message;

#[derive(Error, Debug)]
enum WsError {
    #[error("violation of the application-layer protocol")]
    ProtocolError,
    #[error("not subscribed to a game")]
    NotSubscribed,
    #[error("{0}")]
    GameError(#[from] GameError),
}

/// The game a connection is following, and how far through its log it has read.
struct Subscription {
    session: SessionHandle,
    updates: watch::Receiver<u64>,
    viewer: Option<PlayerId>,
    next: u64,
}

pub async fn accept_connection(stream: TcpStream, manager: &SessionManager) {
    log::info!("Accepted new connection");

    let Ok(stream) = tokio_tungstenite::accept_async(stream).await else {
        log::error!("Error occured during websocket handshake");
        return;
    };
    let (mut write, read) = stream.split();
    let mut read = read.fuse();

    let mut sub: Option<Subscription> = None;

    loop {
        let wake = select! {
            msg = read.try_next() => Wake::Message(msg.ok().flatten()),
            () = next_update(&mut sub).fuse() => Wake::Update,
        };
        let reply = match wake {
            Wake::Message(Some(Message::Text(msg))) => {
                let Ok(msg) = serde_json::from_str::<Value>(&msg) else {
                    log::error!("Invalid JSON received: {}", &msg);
                    break;
                };
                match parse_request(msg).and_then(|req| process_request(req, manager, &mut sub)) {
                    Ok(reply) => reply,
                    Err(err) => {
                        log::warn!("Rejected request: {}", err);
                        json!({
                            "type": "error",
                            "error": err.to_string()
                        })
                    }
                }
            }
            Wake::Message(Some(_)) => continue,
            Wake::Message(None) => break,
            Wake::Update => match flush(&mut sub) {
                Ok(reply) => reply,
                Err(err) => {
                    log::error!("Could not read game log: {}", err);
                    break;
                }
            },
        };
        if write.send(Message::Text(reply.to_string())).await.is_err() {
            log::error!("Could not send websockets message");
            break;
        }
    }
}

/// Why the connection loop woke up.
enum Wake {
    Message(Option<Message>),
    Update,
}

/// A message sent by a game client to the server.
enum Request {
    Subscribe {
        game_id: String,
        viewer: Option<PlayerId>,
        since: u64,
    },
    Command {
        actor: PlayerId,
        command: Command,
    },
}

/// Parses a websockets message from the client.
fn parse_request(req: Value) -> Result<Request, WsError> {
    match req["type"].as_str().unwrap_or("") {
        "subscribe" => {
            let game_id = req["game_id"]
                .as_str()
                .ok_or(WsError::ProtocolError)?
                .to_ascii_uppercase();
            let viewer = req["viewer"].as_u64().map(|id| PlayerId(id as usize));
            let since = req["since"].as_u64().unwrap_or(0);
            Ok(Request::Subscribe { game_id, viewer, since })
        }
        "command" => {
            let actor = req["actor"].as_u64().ok_or(WsError::ProtocolError)?;
            let command =
                serde_json::from_value(req["command"].clone()).map_err(|_| WsError::ProtocolError)?;
            Ok(Request::Command {
                actor: PlayerId(actor as usize),
                command,
            })
        }
        _ => Err(WsError::ProtocolError),
    }
}

/// Processes a request from the client, producing the reply to send back.
fn process_request(
    req: Request,
    manager: &SessionManager,
    sub: &mut Option<Subscription>,
) -> Result<Value, WsError> {
    match req {
        Request::Subscribe { game_id, viewer, since } => {
            let session = manager.find_game(&game_id)?;
            let mut updates = session.subscribe();
            updates.borrow_and_update();
            let page = session.events(since, viewer)?;
            *sub = Some(Subscription {
                session,
                updates,
                viewer,
                next: page.next_sequence,
            });
            Ok(json!({
                "type": "subscribed",
                "game_id": game_id,
                "page": page
            }))
        }
        Request::Command { actor, command } => {
            let sub = sub.as_ref().ok_or(WsError::NotSubscribed)?;
            let next_sequence = sub.session.apply(actor, command)?;
            Ok(json!({
                "type": "accepted",
                "next_sequence": next_sequence
            }))
        }
    }
}

/// Resolves once the subscribed game has appended events, and never if there is no subscription.
async fn next_update(sub: &mut Option<Subscription>) {
    match sub {
        Some(sub) => {
            if sub.updates.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
        None => std::future::pending::<()>().await,
    }
}

/// Reads everything the subscriber has not yet seen.
fn flush(sub: &mut Option<Subscription>) -> Result<Value, WsError> {
    let sub = sub.as_mut().ok_or(WsError::NotSubscribed)?;
    let page = sub.session.events(sub.next, sub.viewer)?;
    sub.next = page.next_sequence;
    Ok(json!({
        "type": "events",
        "page": page
    }))
}
