//! Status icons for CLI output

use super::state::ObjectState;

/// Status icons for different states
pub struct StatusIcon;

impl StatusIcon {
    /// Success icon (object reconciled)
    pub const SUCCESS: &'static str = "✓";

    /// Warning icon (object missing)
    pub const WARNING: &'static str = "⚠";

    /// Error icon (operator reported a failure)
    pub const ERROR: &'static str = "✗";

    /// Pending icon (reconciliation in progress)
    pub const PENDING: &'static str = "⏳";

    /// Unknown icon
    pub const UNKNOWN: &'static str = "?";

    pub fn get_state_icon(state: ObjectState) -> &'static str {
        match state {
            ObjectState::Ready => Self::SUCCESS,
            ObjectState::Progressing => Self::PENDING,
            ObjectState::Failed => Self::ERROR,
            ObjectState::Unknown => Self::UNKNOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_state_icon() {
        assert_eq!(StatusIcon::get_state_icon(ObjectState::Ready), StatusIcon::SUCCESS);
        assert_eq!(StatusIcon::get_state_icon(ObjectState::Progressing), StatusIcon::PENDING);
        assert_eq!(StatusIcon::get_state_icon(ObjectState::Failed), StatusIcon::ERROR);
        assert_eq!(StatusIcon::get_state_icon(ObjectState::Unknown), StatusIcon::UNKNOWN);
    }
}
