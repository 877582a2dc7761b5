//! Sheet construction settings.

use serde::Deserialize;

use crate::document::Color;
use crate::error::{Result, SheetError};

/// Largest number of cells a single sheet may hold.
pub const MAX_CELLS: usize = 1_000_000;

/// Dimensions and defaults for a new [`crate::Sheet`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SheetConfig {
    pub rows: usize,
    pub cols: usize,
    /// Background color of untouched cells
    pub default_color: Color,
    /// Maximum number of undo entries to keep
    pub history_limit: usize,
}

impl Default for SheetConfig {
    fn default() -> Self {
        SheetConfig {
            rows: 50,
            cols: 26,
            default_color: Color::WHITE,
            history_limit: 100,
        }
    }
}

impl SheetConfig {
    /// Check that the grid is non-empty and no larger than [`MAX_CELLS`].
    pub fn validate(&self) -> Result<()> {
        match self.rows.checked_mul(self.cols) {
            Some(count) if (1..=MAX_CELLS).contains(&count) => Ok(()),
            _ => Err(SheetError::InvalidSize {
                rows: self.rows,
                cols: self.cols,
                max: MAX_CELLS,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SheetConfig::default();
        assert_eq!((config.rows, config.cols), (50, 26));
        assert_eq!(config.default_color, Color::WHITE);
        assert_eq!(config.history_limit, 100);
    }

    #[test]
    fn test_validate_rejects_empty_and_oversized_grids() {
        let size = |rows, cols| SheetConfig {
            rows,
            cols,
            ..SheetConfig::default()
        };
        assert!(size(50, 26).validate().is_ok());
        assert!(size(1_000, 1_000).validate().is_ok());
        assert!(size(0, 26).validate().is_err());
        assert!(size(1_001, 1_000).validate().is_err());
        assert!(matches!(
            size(usize::MAX, 2).validate(),
            Err(SheetError::InvalidSize { rows: usize::MAX, cols: 2, .. })
        ));
    }
}
