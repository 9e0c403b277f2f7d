//! End-to-end relay behavior
//!
//! Each test spawns a fresh server over an empty database and drives it with
//! real WebSocket clients.

use anyhow::Result;
use integration_tests::TestServer;
use serde_json::json;
use std::time::Duration;

#[tokio::test]
async fn new_client_receives_empty_history() -> Result<()> {
    let server = TestServer::start().await?;
    let mut client = server.connect().await?;

    let history = client.recv_json().await?;

    assert_eq!(history["type"], "history");
    assert_eq!(history["messages"], json!([]));
    Ok(())
}

#[tokio::test]
async fn chat_is_broadcast_to_every_client_including_the_sender() -> Result<()> {
    let server = TestServer::start().await?;
    let mut alice = server.connect().await?;
    let mut bob = server.connect().await?;
    let mut carol = server.connect().await?;

    for client in [&mut alice, &mut bob, &mut carol] {
        client.recv_json().await?; // drain history
    }

    alice
        .send_json(&json!({"type": "chat", "sender": "alice", "message": "hello"}))
        .await?;

    for client in [&mut alice, &mut bob, &mut carol] {
        let frame = client.recv_json().await?;
        assert_eq!(frame["type"], "chat");
        assert_eq!(frame["id"], 1);
        assert_eq!(frame["sender"], "alice");
        assert_eq!(frame["message"], "hello");
    }

    // Exactly once: nothing further arrives anywhere.
    for client in [&mut alice, &mut bob, &mut carol] {
        client.expect_silence().await?;
    }
    Ok(())
}

#[tokio::test]
async fn sequential_chats_arrive_in_send_order_with_increasing_ids() -> Result<()> {
    let server = TestServer::start().await?;
    let mut alice = server.connect().await?;
    let mut bob = server.connect().await?;
    alice.recv_json().await?;
    bob.recv_json().await?;

    for text in ["one", "two", "three"] {
        alice
            .send_json(&json!({"type": "chat", "sender": "alice", "message": text}))
            .await?;
    }

    let mut last_id = 0;
    for expected in ["one", "two", "three"] {
        let frame = bob.recv_json().await?;
        assert_eq!(frame["message"], expected);
        let id = frame["id"].as_i64().unwrap();
        assert!(id > last_id);
        last_id = id;
    }
    Ok(())
}

#[tokio::test]
async fn history_replays_messages_with_tallies_in_id_order() -> Result<()> {
    let server = TestServer::start().await?;
    let mut alice = server.connect().await?;
    alice.recv_json().await?;

    alice
        .send_json(&json!({"type": "chat", "sender": "alice", "message": "first"}))
        .await?;
    let first = alice.recv_json().await?;
    let first_id = first["id"].as_i64().unwrap();

    alice
        .send_json(&json!({"type": "chat", "sender": "alice", "message": "second"}))
        .await?;
    alice.recv_json().await?;

    alice
        .send_json(&json!({"type": "reaction", "messageId": first_id, "emoji": "👍", "user": "alice"}))
        .await?;
    alice.recv_json().await?; // reaction fan-out

    let mut bob = server.connect().await?;
    let history = bob.recv_json().await?;

    assert_eq!(history["type"], "history");
    let messages = history["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);

    assert_eq!(messages[0]["message"], "first");
    assert_eq!(messages[0]["reactions"], json!([{"emoji": "👍", "count": 1}]));
    assert_eq!(messages[1]["message"], "second");
    assert_eq!(messages[1]["reactions"], json!([]));

    assert!(messages[0]["id"].as_i64().unwrap() < messages[1]["id"].as_i64().unwrap());
    assert!(messages[0]["timestamp"].is_string());
    Ok(())
}

#[tokio::test]
async fn reaction_fans_out_fresh_tallies_to_everyone() -> Result<()> {
    let server = TestServer::start().await?;
    let mut alice = server.connect().await?;
    let mut bob = server.connect().await?;
    alice.recv_json().await?;
    bob.recv_json().await?;

    alice
        .send_json(&json!({"type": "chat", "sender": "alice", "message": "react to me"}))
        .await?;
    let id = alice.recv_json().await?["id"].as_i64().unwrap();
    bob.recv_json().await?;

    alice
        .send_json(&json!({"type": "reaction", "messageId": id, "emoji": "👍", "user": "alice"}))
        .await?;
    for client in [&mut alice, &mut bob] {
        let update = client.recv_json().await?;
        assert_eq!(update["type"], "reaction");
        assert_eq!(update["messageId"], id);
        assert_eq!(update["reactions"], json!([{"emoji": "👍", "count": 1}]));
    }

    // Same (message, emoji, user) again still counts: raw rows, no dedup.
    bob.send_json(&json!({"type": "reaction", "messageId": id, "emoji": "👍", "user": "alice"}))
        .await?;
    for client in [&mut alice, &mut bob] {
        let update = client.recv_json().await?;
        assert_eq!(update["reactions"], json!([{"emoji": "👍", "count": 2}]));
    }

    bob.send_json(&json!({"type": "reaction", "messageId": id, "emoji": "😂", "user": "bob"}))
        .await?;
    for client in [&mut alice, &mut bob] {
        let update = client.recv_json().await?;
        assert_eq!(
            update["reactions"],
            json!([{"emoji": "👍", "count": 2}, {"emoji": "😂", "count": 1}])
        );
    }
    Ok(())
}

#[tokio::test]
async fn malformed_frames_are_ignored_and_the_connection_stays_usable() -> Result<()> {
    let server = TestServer::start().await?;
    let mut alice = server.connect().await?;
    let mut bob = server.connect().await?;
    alice.recv_json().await?;
    bob.recv_json().await?;

    alice.send_text("definitely not json").await?;
    alice
        .send_json(&json!({"type": "reaction", "messageId": "not-a-number", "emoji": "👍", "user": "alice"}))
        .await?;
    alice.send_json(&json!({"type": "warp", "to": "narnia"})).await?;

    alice.expect_silence().await?;
    bob.expect_silence().await?;

    // The same connection still relays valid frames afterwards.
    alice
        .send_json(&json!({"type": "chat", "sender": "alice", "message": "still here"}))
        .await?;
    let frame = bob.recv_json().await?;
    assert_eq!(frame["message"], "still here");
    Ok(())
}

#[tokio::test]
async fn reaction_to_a_missing_message_is_dropped() -> Result<()> {
    let server = TestServer::start().await?;
    let mut alice = server.connect().await?;
    let mut bob = server.connect().await?;
    alice.recv_json().await?;
    bob.recv_json().await?;

    alice
        .send_json(&json!({"type": "reaction", "messageId": 999, "emoji": "👍", "user": "alice"}))
        .await?;

    alice.expect_silence().await?;
    bob.expect_silence().await?;

    // New clients see no trace of it either.
    let mut carol = server.connect().await?;
    let history = carol.recv_json().await?;
    assert_eq!(history["messages"], json!([]));
    Ok(())
}

#[tokio::test]
async fn accepted_chats_survive_reconnect_verbatim() -> Result<()> {
    let server = TestServer::start().await?;
    let mut alice = server.connect().await?;
    alice.recv_json().await?;

    alice
        .send_json(&json!({"type": "chat", "sender": "alice", "message": "  keep my spacing  "}))
        .await?;
    alice.recv_json().await?;
    alice.close().await?;

    let mut again = server.connect().await?;
    let history = again.recv_json().await?;
    let messages = history["messages"].as_array().unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender"], "alice");
    assert_eq!(messages[0]["message"], "  keep my spacing  ");
    Ok(())
}

#[tokio::test]
async fn a_departed_client_does_not_disturb_the_rest() -> Result<()> {
    let server = TestServer::start().await?;
    let mut alice = server.connect().await?;
    let bob = server.connect().await?;
    alice.recv_json().await?;
    bob.close().await?;

    // Give the server a moment to notice the disconnect.
    tokio::time::sleep(Duration::from_millis(100)).await;

    alice
        .send_json(&json!({"type": "chat", "sender": "alice", "message": "anyone there?"}))
        .await?;
    let frame = alice.recv_json().await?;
    assert_eq!(frame["message"], "anyone there?");
    Ok(())
}

#[tokio::test]
async fn binary_frames_are_decoded_as_text() -> Result<()> {
    let server = TestServer::start().await?;
    let mut alice = server.connect().await?;
    alice.recv_json().await?;

    let payload = json!({"type": "chat", "sender": "alice", "message": "via bytes"});
    alice.send_binary(payload.to_string().into_bytes()).await?;

    let frame = alice.recv_json().await?;
    assert_eq!(frame["type"], "chat");
    assert_eq!(frame["message"], "via bytes");
    Ok(())
}

#[tokio::test]
async fn closed_relay_refuses_new_websocket_clients() -> Result<()> {
    let server = TestServer::start().await?;

    server.state.close().await;

    assert!(server.connect().await.is_err());

    // Closing again is a no-op.
    server.state.close().await;
    Ok(())
}
