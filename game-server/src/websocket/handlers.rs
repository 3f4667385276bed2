use std::sync::Arc;
use tracing::{debug, warn};

use crate::game_manager::GameManager;
use crate::websocket::connection::{ConnectionId, ConnectionManager};
use game_types::{ClientMessage, ServerMessage};

#[derive(Clone)]
pub struct MessageHandler {
    connection_id: ConnectionId,
    connection_manager: Arc<ConnectionManager>,
    game_manager: Arc<GameManager>,
}

impl MessageHandler {
    pub fn new(
        connection_id: ConnectionId,
        connection_manager: Arc<ConnectionManager>,
        game_manager: Arc<GameManager>,
    ) -> Self {
        Self {
            connection_id,
            connection_manager,
            game_manager,
        }
    }

    pub async fn handle_message(&self, message: ClientMessage) -> Result<(), String> {
        self.connection_manager
            .update_activity(self.connection_id)
            .await;

        debug!("Connection {} sent {:?}", self.connection_id, message);

        match self.game_manager.apply(message).await {
            Ok(Some(reply)) => self.send_message(reply).await,
            Ok(None) => Ok(()),
            Err(error) => {
                warn!("Rejected command from {}: {}", self.connection_id, error);
                self.send_error(&error.user_message()).await
            }
        }
    }

    /// Bring a freshly opened view up to date with the live session.
    pub async fn send_initial_state(&self) -> Result<(), String> {
        match self.game_manager.current_state().await {
            Some(state) => self.send_message(ServerMessage::StateUpdate { state }).await,
            None => Ok(()),
        }
    }

    pub async fn send_error(&self, error_message: &str) -> Result<(), String> {
        self.send_message(ServerMessage::Error {
            message: error_message.to_string(),
        })
        .await
    }

    async fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.connection_manager
            .send_to_connection(self.connection_id, message)
            .await
    }
}
