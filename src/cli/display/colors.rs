//! Color theme for CLI output

use super::state::ObjectState;
use crate::domain::schema::Presence;
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub success: TableColor,
    pub warning: TableColor,
    pub error: TableColor,
    pub info: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            success: TableColor::Green,
            warning: TableColor::Yellow,
            error: TableColor::Red,
            info: TableColor::Cyan,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    /// Get color based on object state
    pub fn get_state_color(&self, state: ObjectState) -> TableColor {
        match state {
            ObjectState::Ready => self.success,
            ObjectState::Progressing => self.warning,
            ObjectState::Failed => self.error,
            ObjectState::Unknown => self.muted,
        }
    }

    pub fn get_presence_color(&self, presence: Presence) -> TableColor {
        match presence {
            Presence::Required => self.warning,
            Presence::Optional => self.info,
            Presence::OptionalComputed => self.muted,
        }
    }
}
