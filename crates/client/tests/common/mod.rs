//! A live `ballie-api` server for client tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::net::TcpListener;

use ballie_api::config::ServerConfig;
use ballie_api::router::build_app_router;
use ballie_api::state::AppState;
use ballie_client::HttpCollaborator;
use ballie_core::resource::Resource;
use ballie_core::resources::user::{User, UserDraft};
use ballie_core::resources::Users;
use ballie_db::{DataStores, MemoryStore};
use ballie_events::EventBus;

fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        seed_data: false,
        store_latency_ms: 0,
    }
}

pub fn user_draft(name: &str, email: &str) -> UserDraft {
    UserDraft {
        name: name.into(),
        email: email.into(),
        ..UserDraft::default()
    }
}

/// `n` users with ids `U000..`, where `U000` is the oldest.
pub fn users(n: usize) -> Vec<User> {
    let base = Utc::now() - chrono::Duration::days(n as i64 + 1);
    (0..n)
        .map(|i| {
            Users::build(
                format!("U{i:03}"),
                &user_draft(&format!("User {i}"), &format!("user{i}@example.com")),
                base + chrono::Duration::days(i as i64),
            )
        })
        .collect()
}

pub struct Server {
    pub url: String,
    pub stores: DataStores,
}

/// Serve `stores` on an ephemeral port until the test runtime shuts down.
pub async fn serve(stores: DataStores) -> Server {
    let state = AppState {
        stores: stores.clone(),
        config: Arc::new(test_config()),
        event_bus: Arc::new(EventBus::default()),
    };
    let app = build_app_router(state, &test_config());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Server {
        url: format!("http://{addr}"),
        stores,
    }
}

/// A server whose users collection holds `n` generated rows.
pub async fn serve_users(n: usize) -> Server {
    let mut stores = DataStores::empty();
    stores.users = Arc::new(MemoryStore::with_rows(users(n)));
    serve(stores).await
}

pub fn collaborator<R: Resource>(server: &Server) -> HttpCollaborator<R> {
    HttpCollaborator::new(&server.url, Duration::from_secs(5)).unwrap()
}
