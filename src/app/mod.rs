mod action;
mod handler;
mod inspect;
mod poller;
mod runtime;
mod state;


pub use action::Action;
pub use inspect::run_inspect;
pub use runtime::{run_tui, RunOptions};
pub use state::AppState;
