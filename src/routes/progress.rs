use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::validate_player_id;
use crate::{errors::AppResult, models::Progress, AppState};

pub async fn get_progress(
    State(state): State<Arc<AppState>>,
    Path(player): Path<String>,
) -> AppResult<Json<Progress>> {
    let player_id = validate_player_id(&player)?;
    let progress = state.progress.load(&player_id).await?;
    Ok(Json(progress))
}

pub async fn reset_progress(
    State(state): State<Arc<AppState>>,
    Path(player): Path<String>,
) -> AppResult<StatusCode> {
    let player_id = validate_player_id(&player)?;
    state.progress.reset(&player_id).await?;
    tracing::info!("Progress reset for player {}", player_id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{routes::create_routes, state::test_state};
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_get_then_reset_progress() {
        let state = Arc::new(test_state());
        state.progress.record_completion("ada", 1, 30, 3).await.unwrap();

        let response = create_routes()
            .with_state(state.clone())
            .oneshot(
                Request::builder()
                    .uri("/api/progress/ada")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let progress: Progress = serde_json::from_slice(&bytes).unwrap();
        assert!(progress.is_completed(1));

        let response = create_routes()
            .with_state(state.clone())
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/progress/ada")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.progress.load("ada").await.unwrap(), Progress::default());
    }
}
