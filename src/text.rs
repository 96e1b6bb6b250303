//! Text layout parameters

use crate::state::{CHAR_HEIGHT, COLUMNS, DOUBLE_CHAR_HEIGHT, DOUBLE_WIDTH_COLUMNS};

/// Horizontal justification (ESC a)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Justify {
    /// Flush left
    #[default]
    Left = 0,
    /// Centered
    Center = 1,
    /// Flush right
    Right = 2,
}

impl From<char> for Justify {
    /// `'L'`, `'C'` or `'R'` in either case; anything else is left.
    fn from(value: char) -> Self {
        match value.to_ascii_uppercase() {
            'C' => Self::Center,
            'R' => Self::Right,
            _ => Self::Left,
        }
    }
}

/// Character size (GS !)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Size {
    /// Normal width and height
    #[default]
    Small,
    /// Double height
    Medium,
    /// Double width and height
    Large,
}

impl Size {
    /// Parameter byte for `GS !`
    pub const fn code(self) -> u8 {
        match self {
            Self::Small => 0x00,
            Self::Medium => 0x01,
            Self::Large => 0x11,
        }
    }

    /// Character cell height in dots
    pub const fn char_height(self) -> u8 {
        match self {
            Self::Small => CHAR_HEIGHT,
            Self::Medium | Self::Large => DOUBLE_CHAR_HEIGHT,
        }
    }

    /// Characters per line
    pub const fn max_column(self) -> u8 {
        match self {
            Self::Small | Self::Medium => COLUMNS,
            Self::Large => DOUBLE_WIDTH_COLUMNS,
        }
    }
}

impl From<char> for Size {
    /// `'S'`, `'M'` or `'L'` in either case; anything else is small.
    fn from(value: char) -> Self {
        match value.to_ascii_uppercase() {
            'M' => Self::Medium,
            'L' => Self::Large,
            _ => Self::Small,
        }
    }
}

/// Thickest underline the printer supports
pub const MAX_UNDERLINE_WEIGHT: u8 = 2;
/// Highest international character set index
pub const MAX_CHARSET: u8 = 15;
/// Highest character code table index
pub const MAX_CODE_PAGE: u8 = 47;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_justify_from_char() {
        assert_eq!(Justify::from('c'), Justify::Center);
        assert_eq!(Justify::from('R'), Justify::Right);
        assert_eq!(Justify::from('x'), Justify::Left);
    }

    #[test]
    fn test_size_codes() {
        assert_eq!(Size::from('s').code(), 0x00);
        assert_eq!(Size::from('M').code(), 0x01);
        assert_eq!(Size::from('l').code(), 0x11);
        assert_eq!(Size::from('?'), Size::Small);
    }
}
