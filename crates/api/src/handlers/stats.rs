use axum::extract::{Query, State};
use axum::Json;
use ballie_core::stats::{DashboardSummary, DashboardTrends, RecentUser, UserStats, RECENT_USERS_LIMIT};
use serde::Deserialize;

use crate::state::AppState;

/// Largest `limit` accepted by the recent users endpoint.
const MAX_RECENT_USERS: usize = 50;

/// GET /api/v1/users/stats
pub async fn user_stats(State(state): State<AppState>) -> Json<UserStats> {
    Json(state.stores.user_stats().await)
}

/// GET /api/v1/dashboard/summary
pub async fn dashboard_summary(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(state.stores.summary().await)
}

/// GET /api/v1/dashboard/trends
pub async fn dashboard_trends(State(state): State<AppState>) -> Json<DashboardTrends> {
    Json(state.stores.trends().await)
}

#[derive(Debug, Deserialize)]
pub struct RecentUsersParams {
    limit: Option<String>,
}

/// GET /api/v1/dashboard/recent-users?limit=
///
/// A missing or unparsable `limit` falls back to the default; larger values
/// are capped.
pub async fn recent_users(
    State(state): State<AppState>,
    Query(params): Query<RecentUsersParams>,
) -> Json<Vec<RecentUser>> {
    let limit = params
        .limit
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(RECENT_USERS_LIMIT)
        .min(MAX_RECENT_USERS);
    Json(state.stores.recent_users(limit).await)
}
