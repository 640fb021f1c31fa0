//! Dashboard view-model and polling loop.

pub mod state;
pub mod watch;

pub use state::{Action, DashboardState};
