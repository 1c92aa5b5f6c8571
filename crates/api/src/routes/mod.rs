pub mod health;
pub mod resource;

use axum::routing::{get, put};
use axum::Router;
use ballie_core::resources::{Integrations, Plans, Posts, Products, Roles, Subscribers, Users};
use ballie_db::StoredResource;

use crate::handlers::{chat, settings, stats};
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /health                                  service health
///
/// /users                                   list, create
/// /users/{id}                              get, update, delete
/// /users/stats                             user statistics
/// /subscribers[/{id}]
/// /products[/{id}]
/// /blog/posts[/{id}]
/// /plans[/{id}]
/// /settings/integrations[/{id}]
/// /settings/roles[/{id}]
///
/// /settings                                all sections (GET)
/// /settings/{section}                      save one section (PUT)
///
/// /chats                                   chat threads, latest activity first
/// /chats/{id}/messages                     thread messages (GET), send (POST)
///
/// /dashboard/summary                       row totals per resource
/// /dashboard/trends                        monthly signups, last 12 months
/// /dashboard/recent-users                  newest users (?limit=)
/// ```
pub fn api_routes() -> Router<AppState> {
    let users = resource::router::<Users>().route("/stats", get(stats::user_stats));

    let router = Router::new()
        .merge(health::router())
        .nest("/users", users)
        .route("/settings", get(settings::get_all))
        .route("/settings/{section}", put(settings::update_section))
        .route("/chats", get(chat::list_chats))
        .route(
            "/chats/{id}/messages",
            get(chat::messages).post(chat::send_message),
        )
        .route("/dashboard/summary", get(stats::dashboard_summary))
        .route("/dashboard/trends", get(stats::dashboard_trends))
        .route("/dashboard/recent-users", get(stats::recent_users));

    let router = mount::<Subscribers>(router);
    let router = mount::<Products>(router);
    let router = mount::<Posts>(router);
    let router = mount::<Plans>(router);
    let router = mount::<Integrations>(router);
    mount::<Roles>(router)
}

fn mount<R: StoredResource>(router: Router<AppState>) -> Router<AppState> {
    router.nest(&format!("/{}", R::PATH), resource::router::<R>())
}
