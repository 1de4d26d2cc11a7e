//! Realtime change feed over WebSocket.

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use usersync_engine::{ClientMessage, ServerMessage, UserChange};

use crate::client::UsersClient;
use crate::error::{ClientError, Result};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// An open subscription to the server's change feed.
pub struct RealtimeSubscription {
    socket: Socket,
}

impl RealtimeSubscription {
    /// Open the feed of the server `client` talks to.
    pub async fn connect(client: &UsersClient) -> Result<Self> {
        let url = client.realtime_url();
        let (socket, _) = connect_async(url.as_str()).await?;

        info!(url = %url, "Subscribed to realtime feed");

        Ok(Self { socket })
    }

    /// Send a keep-alive ping.
    pub async fn ping(&mut self) -> Result<()> {
        let text = serde_json::to_string(&ClientMessage::Ping)
            .map_err(|e| ClientError::ParseError(e.to_string()))?;
        self.socket.send(Message::text(text)).await?;
        Ok(())
    }

    /// Next message from the server, or `None` once the socket is closed.
    ///
    /// Frames that are not valid server messages are skipped.
    pub async fn next_message(&mut self) -> Result<Option<ServerMessage>> {
        while let Some(frame) = self.socket.next().await {
            match frame? {
                Message::Text(text) => match serde_json::from_str(text.as_str()) {
                    Ok(message) => return Ok(Some(message)),
                    Err(e) => warn!("Ignoring malformed realtime message: {}", e),
                },
                Message::Close(_) => {
                    debug!("Realtime feed closed by server");
                    return Ok(None);
                }
                _ => {}
            }
        }

        Ok(None)
    }

    /// Next committed change, or `None` once the socket is closed.
    pub async fn next_change(&mut self) -> Result<Option<UserChange>> {
        while let Some(message) = self.next_message().await? {
            match message {
                ServerMessage::Change { change } => return Ok(Some(change)),
                ServerMessage::Pong => debug!("Realtime pong"),
                ServerMessage::Error { message } => {
                    warn!(message = %message, "Realtime server error")
                }
            }
        }

        Ok(None)
    }

    /// Close the subscription.
    pub async fn close(mut self) -> Result<()> {
        self.socket.close(None).await?;
        Ok(())
    }
}
