use crate::{
    errors::{AppError, AppResult},
    game::{GeneratedPuzzle, PuzzleSession, Scorer, SelectionOutcome},
    levels,
    models::{Cell, LevelDefinition, WordSpec},
    routes::PlayerQuery,
    state::ActivePuzzle,
    websocket::messages::{ClientMessage, ServerMessage, WordInfo},
    AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::{IntoResponse, Response},
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// The puzzle a connection is currently playing
#[derive(Debug)]
pub struct ActiveGame {
    pub puzzle_id: Uuid,
    pub level: Option<&'static LevelDefinition>,
    pub session: PuzzleSession,
    /// Set once a solved level has been written to the progress store
    pub completion_recorded: bool,
}

/// Per-socket state. A connection plays at most one puzzle at a time.
#[derive(Debug)]
pub struct PlayerConnection {
    pub connection_id: Uuid,
    pub player_id: String,
    pub active: Option<ActiveGame>,
}

impl PlayerConnection {
    pub fn new(player_id: String) -> Self {
        Self {
            connection_id: Uuid::new_v4(),
            player_id,
            active: None,
        }
    }

    fn game_mut(&mut self) -> AppResult<&mut ActiveGame> {
        self.active.as_mut().ok_or(AppError::NoActivePuzzle)
    }
}

/// WebSocket upgrade handler. `?player=` picks whose progress is used.
pub async fn handle_websocket(
    ws: WebSocketUpgrade,
    Query(query): Query<PlayerQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let player_id = match query.player_id() {
        Ok(id) => id,
        Err(e) => return e.into_response(),
    };

    tracing::info!("WebSocket upgrade requested by player {}", player_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, player_id))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, player_id: String) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);

    let mut conn = PlayerConnection::new(player_id);
    let connection_id = conn.connection_id;
    let player_for_log = conn.player_id.clone();

    tracing::info!(
        "WebSocket connection established for player {} ({})",
        conn.player_id,
        connection_id
    );

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    let replies = match serde_json::from_str::<ClientMessage>(&text) {
                        Ok(client_msg) => {
                            match handle_client_message(client_msg, &state_for_recv, &mut conn)
                                .await
                            {
                                Ok(replies) => replies,
                                Err(e) => {
                                    tracing::warn!(
                                        "Error handling message from {}: {}",
                                        conn.player_id,
                                        e
                                    );
                                    vec![error_message(&e)]
                                }
                            }
                        }
                        Err(e) => {
                            tracing::warn!("Failed to parse message: {}", e);
                            vec![ServerMessage::Error {
                                code: "INVALID_MESSAGE".to_string(),
                                message: format!("Invalid message format: {}", e),
                            }]
                        }
                    };

                    for reply in replies {
                        if tx.send(reply).await.is_err() {
                            return;
                        }
                    }
                }
                Message::Close(_) => {
                    tracing::info!("Client disconnected: {}", conn.player_id);
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    state.release_connection(connection_id);

    tracing::info!(
        "WebSocket connection closed for player {} ({})",
        player_for_log,
        connection_id
    );
}

fn error_message(error: &AppError) -> ServerMessage {
    ServerMessage::Error {
        code: error.code().to_string(),
        message: error.to_string(),
    }
}

/// Apply one client message to the connection and return the replies in
/// the order they should be sent
pub async fn handle_client_message(
    msg: ClientMessage,
    state: &AppState,
    conn: &mut PlayerConnection,
) -> AppResult<Vec<ServerMessage>> {
    match msg {
        ClientMessage::StartLevel { level_id } => {
            let level = levels::get_level_by_id(level_id)
                .ok_or_else(|| AppError::NotFound(format!("level {}", level_id)))?;

            if !state
                .progress
                .is_unlocked(&conn.player_id, level_id)
                .await?
            {
                return Err(AppError::LevelLocked(level_id));
            }

            let puzzle = state.generate_puzzle(level.grid_size, &level.words)?;
            tracing::info!("Player {} starting level {}", conn.player_id, level_id);
            Ok(vec![start_puzzle(state, conn, Some(level), puzzle)])
        }
        ClientMessage::StartCustom { grid_size, words } => {
            let words: Vec<WordSpec> = words
                .iter()
                .map(|spec| WordSpec::new(&spec.word, &spec.clue))
                .collect();
            if let Some(empty) = words.iter().position(WordSpec::is_empty) {
                return Err(AppError::Validation(format!("word {} is blank", empty + 1)));
            }

            let puzzle = state.generate_puzzle(grid_size, &words)?;
            tracing::info!(
                "Player {} starting custom {}x{} puzzle with {} words",
                conn.player_id,
                grid_size,
                grid_size,
                words.len()
            );
            Ok(vec![start_puzzle(state, conn, None, puzzle)])
        }
        ClientMessage::SelectStart { row, col } => {
            let game = conn.game_mut()?;
            let cells = game.session.begin_selection(Cell::new(row, col)).to_vec();
            Ok(vec![ServerMessage::SelectionUpdated { cells }])
        }
        ClientMessage::SelectMove { row, col } => {
            let game = conn.game_mut()?;
            let cells = game.session.extend_selection(Cell::new(row, col)).to_vec();
            Ok(vec![ServerMessage::SelectionUpdated { cells }])
        }
        ClientMessage::SelectEnd => select_end(state, conn).await,
        ClientMessage::RequestHint => {
            if !state.config.game.hints_enabled {
                return Err(AppError::Validation("hints are disabled".to_string()));
            }

            let game = conn.game_mut()?;
            let hint = game.session.hint(&mut rand::rng());
            Ok(hint
                .map(|hint| ServerMessage::Hint {
                    word: hint.word,
                    cells: hint.cells,
                })
                .into_iter()
                .collect())
        }
        ClientMessage::ResetPuzzle => {
            let game = conn.game_mut()?;
            game.session.reset();
            game.completion_recorded = false;
            Ok(vec![ServerMessage::PuzzleReset {
                status: game.session.status(),
            }])
        }
    }
}

fn start_puzzle(
    state: &AppState,
    conn: &mut PlayerConnection,
    level: Option<&'static LevelDefinition>,
    puzzle: GeneratedPuzzle,
) -> ServerMessage {
    if let Some(previous) = conn.active.take() {
        state.active_puzzles.remove(&previous.puzzle_id);
    }

    let puzzle_id = Uuid::new_v4();
    state.active_puzzles.insert(
        puzzle_id,
        ActivePuzzle {
            connection_id: conn.connection_id,
            player_id: conn.player_id.clone(),
            level_id: level.map(|l| l.id),
            started_at: chrono::Utc::now(),
        },
    );

    let message = ServerMessage::PuzzleStarted {
        puzzle_id: puzzle_id.to_string(),
        level_id: level.map(|l| l.id),
        title: level.map(|l| l.title.clone()),
        difficulty: level.map(|l| l.difficulty),
        grid: puzzle.grid.clone(),
        words: puzzle.placed_words.iter().map(WordInfo::from).collect(),
        dropped: puzzle.dropped.iter().map(|spec| spec.word.clone()).collect(),
    };

    conn.active = Some(ActiveGame {
        puzzle_id,
        level,
        session: PuzzleSession::new(puzzle),
        completion_recorded: false,
    });

    message
}

async fn select_end(
    state: &AppState,
    conn: &mut PlayerConnection,
) -> AppResult<Vec<ServerMessage>> {
    let player_id = conn.player_id.clone();
    let game = conn.game_mut()?;

    let (word, cells) = match game.session.end_selection() {
        SelectionOutcome::Found { word, cells } => (word, cells),
        SelectionOutcome::AlreadyFound(word) => {
            return Ok(vec![ServerMessage::AlreadyFound { word }]);
        }
        SelectionOutcome::NoMatch => return Ok(vec![ServerMessage::NoMatch]),
        SelectionOutcome::Idle => return Ok(Vec::new()),
    };

    let mut replies = vec![ServerMessage::WordFound {
        word,
        cells,
        found_count: game.session.found_words().len(),
        total: game.session.placed_words().len(),
    }];

    if !game.session.is_solved() {
        return Ok(replies);
    }

    let elapsed_secs = game.session.elapsed().as_secs();
    let (stars, best) = match game.level {
        Some(level) if !game.completion_recorded => {
            let stars = Scorer::stars_for(level.difficulty, elapsed_secs);
            let progress = state
                .progress
                .record_completion(&player_id, level.id, elapsed_secs, stars)
                .await?;
            game.completion_recorded = true;
            (Some(stars), progress.best_score(level.id))
        }
        Some(level) => (
            Some(Scorer::stars_for(level.difficulty, elapsed_secs)),
            None,
        ),
        None => (None, None),
    };

    replies.push(ServerMessage::PuzzleSolved {
        elapsed_secs,
        stars,
        best,
    });
    Ok(replies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::PlacedWord, state::test_state};

    fn run(
        state: &AppState,
        conn: &mut PlayerConnection,
        msg: ClientMessage,
    ) -> AppResult<Vec<ServerMessage>> {
        tokio_test::block_on(handle_client_message(msg, state, conn))
    }

    /// Drag from the first to the last letter of a placed word
    fn select_word(
        state: &AppState,
        conn: &mut PlayerConnection,
        placed: &PlacedWord,
    ) -> Vec<ServerMessage> {
        let cells = placed.cells();
        let first = cells[0];
        let last = cells[cells.len() - 1];

        run(
            state,
            conn,
            ClientMessage::SelectStart {
                row: first.row,
                col: first.col,
            },
        )
        .unwrap();
        run(
            state,
            conn,
            ClientMessage::SelectMove {
                row: last.row,
                col: last.col,
            },
        )
        .unwrap();
        run(state, conn, ClientMessage::SelectEnd).unwrap()
    }

    fn placed_words(conn: &PlayerConnection) -> Vec<PlacedWord> {
        conn.active.as_ref().unwrap().session.placed_words().to_vec()
    }

    #[test]
    fn test_selection_without_puzzle_is_an_error() {
        let state = test_state();
        let mut conn = PlayerConnection::new("ada".to_string());

        let err = run(&state, &mut conn, ClientMessage::SelectStart { row: 0, col: 0 })
            .unwrap_err();
        assert!(matches!(err, AppError::NoActivePuzzle));

        let json = serde_json::to_value(error_message(&err)).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], "NO_ACTIVE_PUZZLE");
    }

    #[test]
    fn test_locked_level_is_refused() {
        let state = test_state();
        let mut conn = PlayerConnection::new("ada".to_string());

        let err = run(&state, &mut conn, ClientMessage::StartLevel { level_id: 2 }).unwrap_err();
        assert!(matches!(err, AppError::LevelLocked(2)));
        assert!(conn.active.is_none());
        assert!(state.active_puzzles.is_empty());
    }

    #[test]
    fn test_custom_puzzle_found_and_solved() {
        let state = test_state();
        let mut conn = PlayerConnection::new("ada".to_string());

        let words = vec![WordSpec::new("cat", "Feline"), WordSpec::new("dog", "Canine")];
        let replies = run(
            &state,
            &mut conn,
            ClientMessage::StartCustom {
                grid_size: 6,
                words,
            },
        )
        .unwrap();
        match &replies[0] {
            ServerMessage::PuzzleStarted {
                level_id,
                grid,
                words,
                ..
            } => {
                assert_eq!(*level_id, None);
                assert_eq!(grid.len(), 6);
                assert_eq!(words.len(), 2);
            }
            other => panic!("unexpected reply {:?}", other),
        }
        assert_eq!(state.active_puzzles.len(), 1);

        let placed = placed_words(&conn);
        let replies = select_word(&state, &mut conn, &placed[0]);
        assert!(matches!(
            &replies[..],
            [ServerMessage::WordFound { found_count: 1, total: 2, .. }]
        ));

        let replies = select_word(&state, &mut conn, &placed[0]);
        assert!(matches!(&replies[..], [ServerMessage::AlreadyFound { .. }]));

        let replies = select_word(&state, &mut conn, &placed[1]);
        assert_eq!(replies.len(), 2);
        assert!(matches!(
            replies[1],
            ServerMessage::PuzzleSolved {
                stars: None,
                best: None,
                ..
            }
        ));
    }

    #[test]
    fn test_single_cell_selection_is_no_match() {
        let state = test_state();
        let mut conn = PlayerConnection::new("ada".to_string());
        run(
            &state,
            &mut conn,
            ClientMessage::StartCustom {
                grid_size: 6,
                words: vec![WordSpec::new("CAT", "")],
            },
        )
        .unwrap();

        run(&state, &mut conn, ClientMessage::SelectStart { row: 0, col: 0 }).unwrap();
        let replies = run(&state, &mut conn, ClientMessage::SelectEnd).unwrap();
        assert!(matches!(&replies[..], [ServerMessage::NoMatch]));

        let replies = run(&state, &mut conn, ClientMessage::SelectEnd).unwrap();
        assert!(replies.is_empty());
    }

    #[test]
    fn test_solving_level_records_progress_and_unlocks_next() {
        let state = test_state();
        let mut conn = PlayerConnection::new("ada".to_string());

        run(&state, &mut conn, ClientMessage::StartLevel { level_id: 1 }).unwrap();
        let placed = placed_words(&conn);

        let mut last = Vec::new();
        for word in &placed {
            last = select_word(&state, &mut conn, word);
        }

        match last.last() {
            Some(ServerMessage::PuzzleSolved { stars, best, .. }) => {
                assert_eq!(*stars, Some(3));
                assert_eq!(best.map(|b| b.stars), Some(3));
            }
            other => panic!("unexpected reply {:?}", other),
        }

        let progress = tokio_test::block_on(state.progress.load("ada")).unwrap();
        assert!(progress.is_completed(1));
        assert!(progress.is_unlocked(2));

        let replies = run(&state, &mut conn, ClientMessage::StartLevel { level_id: 2 }).unwrap();
        assert!(matches!(
            &replies[..],
            [ServerMessage::PuzzleStarted {
                level_id: Some(2),
                ..
            }]
        ));
        assert_eq!(state.active_puzzles.len(), 1);
    }

    #[test]
    fn test_hint_and_reset() {
        let state = test_state();
        let mut conn = PlayerConnection::new("ada".to_string());
        run(
            &state,
            &mut conn,
            ClientMessage::StartCustom {
                grid_size: 8,
                words: vec![WordSpec::new("CAT", ""), WordSpec::new("DOG", "")],
            },
        )
        .unwrap();

        let placed = placed_words(&conn);
        select_word(&state, &mut conn, &placed[0]);

        let replies = run(&state, &mut conn, ClientMessage::RequestHint).unwrap();
        match &replies[..] {
            [ServerMessage::Hint { word, cells }] => {
                assert_eq!(word, &placed[1].word);
                assert_eq!(cells, &placed[1].cells());
            }
            other => panic!("unexpected reply {:?}", other),
        }

        let replies = run(&state, &mut conn, ClientMessage::ResetPuzzle).unwrap();
        assert!(matches!(
            &replies[..],
            [ServerMessage::PuzzleReset {
                status: crate::game::PuzzleStatus::Unsolved
            }]
        ));
        assert!(conn.active.as_ref().unwrap().session.found_words().is_empty());
    }

    #[test]
    fn test_repeated_or_reversed_custom_words_are_rejected() {
        let state = test_state();
        let mut conn = PlayerConnection::new("ada".to_string());

        for words in [
            vec![WordSpec::new("CAT", ""), WordSpec::new("CAT", "")],
            vec![WordSpec::new("CAT", ""), WordSpec::new("TAC", "")],
        ] {
            let err = run(
                &state,
                &mut conn,
                ClientMessage::StartCustom {
                    grid_size: 8,
                    words,
                },
            )
            .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert!(conn.active.is_none());
    }

    #[test]
    fn test_word_found_reports_dragged_cells() {
        let state = test_state();
        let mut conn = PlayerConnection::new("ada".to_string());
        run(
            &state,
            &mut conn,
            ClientMessage::StartCustom {
                grid_size: 8,
                words: vec![WordSpec::new("HOPE", ""), WordSpec::new("LOVE", "")],
            },
        )
        .unwrap();

        let placed = placed_words(&conn);
        let mut dragged = placed[0].cells();
        dragged.reverse();
        let (first, last) = (dragged[0], dragged[dragged.len() - 1]);

        run(&state, &mut conn, ClientMessage::SelectStart { row: first.row, col: first.col }).unwrap();
        run(&state, &mut conn, ClientMessage::SelectMove { row: last.row, col: last.col }).unwrap();
        let replies = run(&state, &mut conn, ClientMessage::SelectEnd).unwrap();

        match &replies[..] {
            [ServerMessage::WordFound { word, cells, .. }] => {
                assert_eq!(word, &placed[0].word);
                assert_eq!(cells, &dragged);
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn test_blank_custom_word_is_rejected() {
        let state = test_state();
        let mut conn = PlayerConnection::new("ada".to_string());

        let err = run(
            &state,
            &mut conn,
            ClientMessage::StartCustom {
                grid_size: 8,
                words: vec![WordSpec::new("CAT", ""), WordSpec::new("  ", "")],
            },
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_release_connection_drops_active_puzzle() {
        let state = test_state();
        let mut conn = PlayerConnection::new("ada".to_string());
        run(&state, &mut conn, ClientMessage::StartLevel { level_id: 1 }).unwrap();
        assert_eq!(state.active_puzzles.len(), 1);

        state.release_connection(conn.connection_id);
        assert!(state.active_puzzles.is_empty());
    }
}
