//! Headless skirmish client: configuration, logging, board rendering and the
//! end-of-match summary. The binary in `main.rs` wires them to the runtime.

pub mod config;
pub mod logging;
pub mod render;
pub mod summary;

pub use config::ClientConfig;
pub use render::{render_board, render_roster};
pub use summary::MatchSummary;
