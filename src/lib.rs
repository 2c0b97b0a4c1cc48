//! Word-search puzzle backend: grid generation, drag selection and word
//! matching, plus level progress served over HTTP and WebSocket.

pub mod config;
pub mod db;
pub mod errors;
pub mod game;
pub mod levels;
pub mod models;
pub mod progress;
pub mod routes;
pub mod state;
pub mod utils;
pub mod websocket;

pub use state::AppState;
