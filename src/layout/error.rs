//! Error types for the layout engine.

use thiserror::Error;

use crate::package::{Direction, Group, Pin, PhysicalLayoutCode};

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Errors raised while laying out pins.
///
/// Pin and group classification errors are recoverable: the strategy logs
/// them, keeps them in its diagnostics and drops the offending item.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// An ungrouped pin matches no placement bucket.
    #[error("Unsupported pin classification: {pin} (#{designator}), type {pin_type}, direction {direction}")]
    UnsupportedPinClassification {
        /// Pin name.
        pin: String,
        /// Pin designator.
        designator: String,
        /// Electrical type code, or "none".
        pin_type: String,
        /// Pin direction.
        direction: Direction,
    },

    /// A group direction matches no placement bucket.
    #[error("Unsupported group classification: {group}, direction {direction}")]
    UnsupportedGroupClassification {
        /// Group designator.
        group: String,
        /// Group direction.
        direction: Direction,
    },

    /// The package layout code has no placement rule.
    #[error("Unsupported physical layout: {code}")]
    UnsupportedPhysicalLayout {
        /// Layout code, or "none" when the package has none.
        code: String,
    },
}

impl LayoutError {
    /// Creates an unsupported pin classification error.
    #[must_use]
    pub fn unsupported_pin(pin: &Pin) -> Self {
        Self::UnsupportedPinClassification {
            pin: pin.name.clone(),
            designator: pin.designator.fullname.clone(),
            pin_type: pin
                .pin_type
                .map_or_else(|| "none".to_string(), |t| t.code().to_string()),
            direction: pin.direction,
        }
    }

    /// Creates an unsupported group classification error.
    #[must_use]
    pub fn unsupported_group(group: &Group) -> Self {
        Self::UnsupportedGroupClassification {
            group: group.designator.clone(),
            direction: group.direction,
        }
    }

    /// Creates an unsupported physical layout error.
    #[must_use]
    pub fn unsupported_layout(code: Option<PhysicalLayoutCode>) -> Self {
        Self::UnsupportedPhysicalLayout {
            code: code.map_or_else(|| "none".to_string(), |c| c.to_string()),
        }
    }

    /// Whether the error aborts the layout of the whole package.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::UnsupportedPhysicalLayout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_error_display() {
        let pin = Pin::new("NC", 12, None, Direction::None);
        let err = LayoutError::unsupported_pin(&pin);
        assert_eq!(
            err.to_string(),
            "Unsupported pin classification: NC (#12), type none, direction NONE"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn layout_error_display() {
        let err = LayoutError::unsupported_layout(Some(PhysicalLayoutCode::Bga));
        assert_eq!(err.to_string(), "Unsupported physical layout: BGA");
        assert!(err.is_fatal());

        let err = LayoutError::unsupported_layout(None);
        assert_eq!(err.to_string(), "Unsupported physical layout: none");
    }
}
