//! Route definitions shared by every resource collection.

use axum::routing::get;
use axum::Router;
use ballie_db::StoredResource;

use crate::handlers::resource;
use crate::state::AppState;

/// Routes mounted at `/{R::PATH}`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router<R: StoredResource>() -> Router<AppState> {
    Router::new()
        .route("/", get(resource::list::<R>).post(resource::create::<R>))
        .route(
            "/{id}",
            get(resource::get_by_id::<R>)
                .put(resource::update::<R>)
                .delete(resource::delete::<R>),
        )
}
