//! Chalkboard Visualization Server
//!
//! Hosts the sorting stepper, the transit map and the classroom data
//! structure boards behind a JSON API.
//!
//! Every visitor names a session in the URL. The first request for a session
//! creates its [`Workbench`]; later requests edit the same boards. The
//! transit network is built once at startup and shared read-only.
//!
//! # Example
//!
//! ```no_run
//! use chalkboard_vis::{VisConfig, VisServer};
//!
//! #[tokio::main]
//! async fn main() -> chalkboard_vis::Result<()> {
//!     let config = VisConfig::from_env()?;
//!     VisServer::new(config).serve().await
//! }
//! ```

mod config;
mod error;
mod server;
mod state;
mod workbench;

pub use config::{VisConfig, DEFAULT_ADDR, DEFAULT_MAX_SESSIONS};
pub use error::{Error, Result};
pub use server::VisServer;
pub use state::{AppState, SessionStore, MAX_SESSION_ID};
pub use workbench::{
    BackView, Board, BoardView, DetachView, HeightView, MaxView, Scalar, SearchView, Workbench,
    MAX_PENDING,
};
