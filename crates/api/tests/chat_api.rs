//! Integration tests for support chat endpoints.

mod common;

use axum::http::StatusCode;
use ballie_db::DataStores;
use ballie_events::{AdminEvent, MutationAction};
use common::{body_json, build_test_app, get, post_json};
use serde_json::json;

fn admin_reply(text: &str) -> serde_json::Value {
    json!({
        "textMessage": text,
        "sentBy": "U001",
        "senderName": "Alice Johnson",
        "isAdmin": true,
        "adminName": "Alice Johnson"
    })
}

// ---------------------------------------------------------------------------
// Threads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chats_list_latest_activity_first() {
    let response = get(build_test_app(), "/api/v1/chats").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let ids: Vec<_> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["_id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["c2", "c1", "c3"]);
    assert_eq!(json[0]["lastMessage"], "📎 venue-license.pdf");
    assert_eq!(json[2]["chatName"], "Chat");
    assert!(json[2]["lastMessageTime"].is_null());
}

#[tokio::test]
async fn messages_are_returned_oldest_first() {
    let json = body_json(get(build_test_app(), "/api/v1/chats/c1/messages").await).await;
    assert_eq!(json[0]["_id"], "m1");
    assert_eq!(json[1]["_id"], "m2");
    assert_eq!(json[1]["isAdmin"], true);
}

#[tokio::test]
async fn unknown_chat_returns_404() {
    let response = get(build_test_app(), "/api/v1/chats/nope/messages").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Sending
// ---------------------------------------------------------------------------

#[tokio::test]
async fn send_returns_201_and_updates_thread_summary() {
    let state = common::test_state(DataStores::seeded());
    let mut events = state.event_bus.subscribe();
    let app = common::app_with(state);

    let response = post_json(
        app.clone(),
        "/api/v1/chats/c3/messages",
        admin_reply("Welcome to Ballie!"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let sent = body_json(response).await;
    assert_eq!(sent["chatId"], "c3");
    assert_eq!(sent["textMessage"], "Welcome to Ballie!");
    let id = sent["_id"].as_str().unwrap().to_string();

    let chats = body_json(get(app.clone(), "/api/v1/chats").await).await;
    assert_eq!(chats[0]["_id"], "c3");
    assert_eq!(chats[0]["lastMessage"], "Welcome to Ballie!");
    assert_eq!(chats[0]["lastMessageTime"], sent["sentAt"]);

    let thread = body_json(get(app, "/api/v1/chats/c3/messages").await).await;
    assert_eq!(thread.as_array().unwrap().len(), 1);

    match events.try_recv().unwrap() {
        AdminEvent::Mutation {
            action, entity, id: event_id, actor, ..
        } => {
            assert_eq!(action, MutationAction::Created);
            assert_eq!(entity, "ChatMessage");
            assert_eq!(event_id, id);
            assert_eq!(actor.as_deref(), Some("U001"));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test]
async fn attachment_only_message_is_accepted() {
    let app = build_test_app();
    let response = post_json(
        app.clone(),
        "/api/v1/chats/c1/messages",
        json!({
            "sentBy": "U001",
            "senderName": "Alice Johnson",
            "isAdmin": true,
            "attachment": {
                "url": "https://files.ballie.app/receipt.pdf",
                "name": "receipt.pdf",
                "type": "application/pdf",
                "size": 5120
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["attachment"]["name"], "receipt.pdf");

    let chats = body_json(get(app, "/api/v1/chats").await).await;
    assert_eq!(chats[0]["lastMessage"], "📎 receipt.pdf");
}

#[tokio::test]
async fn empty_message_returns_400_and_is_not_stored() {
    let app = build_test_app();
    let response = post_json(app.clone(), "/api/v1/chats/c1/messages", admin_reply("  ")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["fields"]["textMessage"].is_string());

    let thread = body_json(get(app, "/api/v1/chats/c1/messages").await).await;
    assert_eq!(thread.as_array().unwrap().len(), 2);
}
