//! Web layer for the Z-line departure board.
//!
//! Serves the next-departure JSON API and the dashboard page that polls it.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
