use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use warp::Filter;
use warp::test::{WsClient, ws};

use super::connection::ConnectionManager;
use crate::create_routes;
use crate::game_manager::GameManager;
use game_core::{DwellTimings, GameSettings, WordBank};
use game_types::{ClientMessage, GameMode, RoundOutcome, ServerMessage, SessionPhase};

fn test_routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let connection_manager = Arc::new(ConnectionManager::new());
    let settings = GameSettings {
        dwell: DwellTimings::instant(),
        ..GameSettings::default()
    };
    let game_manager = Arc::new(GameManager::new(
        connection_manager.clone(),
        settings,
        WordBank::default(),
    ));
    create_routes(connection_manager, game_manager)
}

async fn send(client: &mut WsClient, message: ClientMessage) {
    client
        .send_text(serde_json::to_string(&message).unwrap())
        .await;
}

async fn recv(client: &mut WsClient) -> ServerMessage {
    let message = timeout(Duration::from_secs(1), client.recv())
        .await
        .expect("Timeout waiting for server message")
        .expect("WebSocket error");
    serde_json::from_str(message.to_str().expect("text frame")).expect("valid server message")
}

async fn recv_state(client: &mut WsClient) -> game_types::SessionSnapshot {
    match recv(client).await {
        ServerMessage::StateUpdate { state } => state,
        other => panic!("Expected StateUpdate, got {:?}", other),
    }
}

async fn assert_silent(client: &mut WsClient) {
    let result = timeout(Duration::from_millis(100), client.recv()).await;
    assert!(result.is_err(), "Expected no message, got {:?}", result);
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = warp::test::request()
        .method("GET")
        .path("/health")
        .reply(&test_routes())
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.body(), "OK");
}

#[tokio::test]
async fn test_state_endpoint_without_session() {
    let response = warp::test::request()
        .method("GET")
        .path("/state")
        .reply(&test_routes())
        .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_solo_round_over_websocket() {
    let mut client = ws()
        .path("/ws")
        .handshake(test_routes())
        .await
        .expect("WebSocket handshake failed");

    send(&mut client, ClientMessage::SelectMode { mode: GameMode::SoloPlayers }).await;
    let state = recv_state(&mut client).await;
    assert_eq!(state.phase, SessionPhase::Setup);

    for name in ["سارة", "عمر"] {
        send(
            &mut client,
            ClientMessage::AddParticipant {
                team: None,
                name: name.to_string(),
            },
        )
        .await;
        recv_state(&mut client).await;
    }

    send(&mut client, ClientMessage::StartMatch).await;
    let state = recv_state(&mut client).await;
    assert_eq!(state.phase, SessionPhase::AwaitingSecretWord);
    assert_eq!(state.word_master.as_deref(), Some("سارة"));

    send(
        &mut client,
        ClientMessage::SubmitSecretWord {
            word: "بيت".to_string(),
            hint: "مكان نسكن فيه".to_string(),
        },
    )
    .await;
    let state = recv_state(&mut client).await;
    assert_eq!(state.phase, SessionPhase::InProgress);
    assert_eq!(state.word.len(), 3);

    for letter in ["ب", "ي"] {
        send(
            &mut client,
            ClientMessage::GuessLetter {
                letter: letter.to_string(),
            },
        )
        .await;
        recv_state(&mut client).await;
    }

    send(
        &mut client,
        ClientMessage::GuessLetter {
            letter: "ت".to_string(),
        },
    )
    .await;
    let state = recv_state(&mut client).await;
    assert_eq!(
        state.phase,
        SessionPhase::Resolved {
            outcome: RoundOutcome::Win
        }
    );

    match recv(&mut client).await {
        ServerMessage::RoundEnded { summary } => {
            assert_eq!(summary.outcome, RoundOutcome::Win);
            assert_eq!(summary.word, "بيت");
        }
        other => panic!("Expected RoundEnded, got {:?}", other),
    }
    let state = recv_state(&mut client).await;
    assert_eq!(state.phase, SessionPhase::RoundOver);

    send(&mut client, ClientMessage::Continue).await;
    let state = recv_state(&mut client).await;
    assert_eq!(state.phase, SessionPhase::AwaitingSecretWord);
    assert_eq!(state.word_master.as_deref(), Some("عمر"));
}

#[tokio::test]
async fn test_rejected_command_reports_error_to_sender() {
    let mut client = ws()
        .path("/ws")
        .handshake(test_routes())
        .await
        .expect("WebSocket handshake failed");

    send(&mut client, ClientMessage::StartMatch).await;
    match recv(&mut client).await {
        ServerMessage::Error { message } => {
            assert_eq!(message, game_types::GameError::NoActiveSession.user_message());
        }
        other => panic!("Expected Error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_json_keeps_connection_open() {
    let mut client = ws()
        .path("/ws")
        .handshake(test_routes())
        .await
        .expect("WebSocket handshake failed");

    client.send_text("{not json").await;
    match recv(&mut client).await {
        ServerMessage::Error { message } => assert!(message.contains("Invalid JSON message")),
        other => panic!("Expected Error, got {:?}", other),
    }

    send(&mut client, ClientMessage::SelectMode { mode: GameMode::Teams }).await;
    let state = recv_state(&mut client).await;
    assert_eq!(state.mode, GameMode::Teams);
}

#[tokio::test]
async fn test_every_view_sees_updates_but_suggestions_stay_private() {
    let routes = test_routes();
    let mut first = ws()
        .path("/ws")
        .handshake(routes.clone())
        .await
        .expect("WebSocket handshake failed");
    let mut second = ws()
        .path("/ws")
        .handshake(routes.clone())
        .await
        .expect("WebSocket handshake failed");

    send(&mut first, ClientMessage::SelectMode { mode: GameMode::Teams }).await;
    let first_state = recv_state(&mut first).await;
    let second_state = recv_state(&mut second).await;
    assert_eq!(first_state.id, second_state.id);

    send(&mut first, ClientMessage::RequestSuggestions).await;
    match recv(&mut first).await {
        ServerMessage::Suggestions { suggestions } => assert_eq!(suggestions.len(), 3),
        other => panic!("Expected Suggestions, got {:?}", other),
    }
    assert_silent(&mut second).await;

    // A view opened later is synced straight away
    let mut late = ws()
        .path("/ws")
        .handshake(routes)
        .await
        .expect("WebSocket handshake failed");
    let late_state = recv_state(&mut late).await;
    assert_eq!(late_state.id, first_state.id);

    send(&mut second, ClientMessage::ReturnToMenu).await;
    for client in [&mut first, &mut second, &mut late] {
        assert!(matches!(recv(client).await, ServerMessage::ReturnedToMenu));
    }
}

#[tokio::test]
async fn test_ignored_pick_sends_nothing() {
    let mut client = ws()
        .path("/ws")
        .handshake(test_routes())
        .await
        .expect("WebSocket handshake failed");

    send(&mut client, ClientMessage::SelectMode { mode: GameMode::SoloPlayers }).await;
    recv_state(&mut client).await;

    send(
        &mut client,
        ClientMessage::GuessLetter {
            letter: "x".to_string(),
        },
    )
    .await;
    send(&mut client, ClientMessage::Heartbeat).await;
    assert_silent(&mut client).await;
}
