//! Handlers for `/settings`.

use axum::extract::{Path, State};
use axum::Json;
use ballie_core::settings::{Settings, SettingsPatch, SettingsSection};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn get_all(State(state): State<AppState>) -> Json<Settings> {
    Json(state.stores.settings.get().await)
}

/// PUT /api/v1/settings/{section}
///
/// The body is a partial patch of one section. Returns the saved section.
pub async fn update_section(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
    let section: SettingsSection = section.parse()?;
    if !body.is_object() {
        return Err(AppError::BadRequest(
            "Settings patch must be a JSON object".into(),
        ));
    }
    let patch = SettingsPatch::from_json(section, body)?;
    let saved = state.stores.settings.save(&patch).await?;
    Ok(Json(saved))
}
