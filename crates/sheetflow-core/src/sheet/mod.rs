//! Sheet document state and mutation pipeline (UI-agnostic).

mod ops;
mod state;

pub use state::Sheet;
