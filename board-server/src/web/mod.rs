//! Read-only JSON surface over the published boards.

mod dto;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
