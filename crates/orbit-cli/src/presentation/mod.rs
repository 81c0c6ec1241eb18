//! Terminal presentation.
//!
//! - Keep this module format-only: no domain transforms
//! - Services reach the terminal through [`TerminalEmitter`]; handlers use
//!   the `format_*` helpers for command output

pub mod display;
pub mod terminal;

// Re-export commonly used items
pub use display::{format_history, format_planet, format_planet_list, format_position, format_status};
pub use terminal::{Rendered, TerminalEmitter, render_event};
