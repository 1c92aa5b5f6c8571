//! Generic handlers for every resource collection.
//!
//! Each handler is instantiated once per resource in
//! [`routes::resource`](crate::routes::resource).

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use ballie_core::collaborator::Collaborator;
use ballie_core::query::ListQuery;
use ballie_db::StoredResource;
use ballie_events::{AdminEvent, MutationAction};

use crate::error::AppResult;
use crate::response::ListResponse;
use crate::state::AppState;

/// GET /api/v1/{path}?page=&limit=&q=&{filter}=
pub async fn list<R: StoredResource>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<ListResponse<R::Row>>> {
    let query = ListQuery::from_params(&params, R::FILTERS);
    let page = R::store(&state.stores).list(&query).await?;
    Ok(Json(ListResponse {
        items: page.items,
        total: page.total,
        page: query.page,
        limit: query.page_size,
    }))
}

/// GET /api/v1/{path}/{id}
pub async fn get_by_id<R: StoredResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<R::Row>> {
    let row = R::store(&state.stores).get(&id).await?;
    Ok(Json(row))
}

/// POST /api/v1/{path}
pub async fn create<R: StoredResource>(
    State(state): State<AppState>,
    Json(draft): Json<R::Draft>,
) -> AppResult<(StatusCode, Json<R::Row>)> {
    let row = R::store(&state.stores).create(&draft).await?;
    state
        .event_bus
        .publish(AdminEvent::mutation(MutationAction::Created, R::ENTITY, R::id(&row)));
    Ok((StatusCode::CREATED, Json(row)))
}

/// PUT /api/v1/{path}/{id}
pub async fn update<R: StoredResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(draft): Json<R::Draft>,
) -> AppResult<Json<R::Row>> {
    let row = R::store(&state.stores).update(&id, &draft).await?;
    state
        .event_bus
        .publish(AdminEvent::mutation(MutationAction::Updated, R::ENTITY, id));
    Ok(Json(row))
}

/// DELETE /api/v1/{path}/{id}
pub async fn delete<R: StoredResource>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    R::store(&state.stores).delete(&id).await?;
    state
        .event_bus
        .publish(AdminEvent::mutation(MutationAction::Deleted, R::ENTITY, id));
    Ok(StatusCode::NO_CONTENT)
}
