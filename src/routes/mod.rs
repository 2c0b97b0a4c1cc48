pub mod health;
pub mod levels;
pub mod progress;

use std::sync::Arc;

use axum::{routing::get, Router};
use serde::Deserialize;

use crate::{
    errors::{AppError, AppResult},
    AppState,
};

/// Player id used when a client does not send one
pub const GUEST_PLAYER_ID: &str = "guest";
const MAX_PLAYER_ID_LEN: usize = 64;

/// `?player=` query parameter shared by the REST and WebSocket endpoints
#[derive(Debug, Default, Deserialize)]
pub struct PlayerQuery {
    pub player: Option<String>,
}

impl PlayerQuery {
    pub fn player_id(&self) -> AppResult<String> {
        match self.player.as_deref().map(str::trim) {
            None | Some("") => Ok(GUEST_PLAYER_ID.to_string()),
            Some(id) => validate_player_id(id),
        }
    }
}

pub fn validate_player_id(id: &str) -> AppResult<String> {
    let valid = !id.is_empty()
        && id.len() <= MAX_PLAYER_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

    if valid {
        Ok(id.to_string())
    } else {
        Err(AppError::Validation(format!(
            "player id must be 1-{} characters of A-Z, a-z, 0-9, '-' or '_'",
            MAX_PLAYER_ID_LEN
        )))
    }
}

pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/levels", get(levels::list_levels))
        .route("/levels/{id}", get(levels::get_level))
        .route(
            "/progress/{player}",
            get(progress::get_progress).delete(progress::reset_progress),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_player_is_guest() {
        assert_eq!(PlayerQuery::default().player_id().unwrap(), GUEST_PLAYER_ID);

        let blank = PlayerQuery {
            player: Some("  ".to_string()),
        };
        assert_eq!(blank.player_id().unwrap(), GUEST_PLAYER_ID);
    }

    #[test]
    fn test_player_id_validation() {
        assert_eq!(validate_player_id("ada_99").unwrap(), "ada_99");
        assert!(validate_player_id("ada lovelace").is_err());
        assert!(validate_player_id("../etc").is_err());
        assert!(validate_player_id(&"x".repeat(65)).is_err());
    }
}
