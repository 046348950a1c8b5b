//! View layer - pure functions from state to what the screen shows

pub mod compose;
pub mod derive;

pub use compose::compose;
pub use derive::{derive_view, Tab, ViewState};
