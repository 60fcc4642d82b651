//! Display module for formatted CLI output

pub mod colors;
pub mod icons;
pub mod state;
pub mod table;

pub use colors::ColorTheme;
pub use icons::StatusIcon;
pub use state::{status_phase, ObjectState};
pub use table::TableRenderer;
