//! B/W and tri-color color types

/// Only for the B/W displays
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Color {
    /// Black color
    Black,
    /// White color
    White,
}

/// For the black/white/chromatic (red) displays
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TriColor {
    /// Black color
    Black,
    /// White color
    White,
    /// Chromatic color, red for the ThinkInk panels
    Chromatic,
}

impl Color {
    /// Get the color encoding of the color for one bit
    ///
    /// The IL0373 RAM channels are written with inverted polarity:
    /// 1 is white, 0 is black
    pub fn get_bit_value(self) -> u8 {
        match self {
            Color::White => 1u8,
            Color::Black => 0u8,
        }
    }

    /// Gets a full byte of black or white pixels
    pub fn get_byte_value(self) -> u8 {
        match self {
            Color::White => 0xff,
            Color::Black => 0x00,
        }
    }

    /// Returns the inverse of the given color.
    ///
    /// Black returns White and White returns Black
    pub fn inverse(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl TriColor {
    /// Get the color encoding of the color for one bit
    pub fn get_bit_value(self) -> u8 {
        match self {
            TriColor::White => 1u8,
            TriColor::Black | TriColor::Chromatic => 0u8,
        }
    }

    /// Gets a full byte of color pixels
    pub fn get_byte_value(self) -> u8 {
        match self {
            TriColor::White => 0xff,
            TriColor::Black | TriColor::Chromatic => 0x00,
        }
    }
}

impl From<u8> for Color {
    fn from(value: u8) -> Self {
        match value {
            0 => Color::Black,
            1 => Color::White,
            e => panic!("DisplayColor only parses 0 and 1 (Black and White) and not `{}`", e),
        }
    }
}

impl From<Color> for TriColor {
    fn from(b: Color) -> TriColor {
        match b {
            Color::Black => TriColor::Black,
            Color::White => TriColor::White,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_u8() {
        assert_eq!(Color::Black, Color::from(0u8));
        assert_eq!(Color::White, Color::from(1u8));
    }

    // test all values aside from 0 and 1 which all should panic
    #[test]
    fn from_u8_panic() {
        for val in 2..=u8::MAX {
            let result = std::panic::catch_unwind(|| Color::from(val));
            assert!(result.is_err());
        }
    }

    #[test]
    fn u8_conversion_black() {
        assert_eq!(Color::from(Color::Black.get_bit_value()), Color::Black);
        assert_eq!(Color::from(0u8).get_bit_value(), 0u8);
    }

    #[test]
    fn u8_conversion_white() {
        assert_eq!(Color::from(Color::White.get_bit_value()), Color::White);
        assert_eq!(Color::from(1u8).get_bit_value(), 1u8);
    }

    #[test]
    fn tricolor_byte_values() {
        assert_eq!(TriColor::White.get_byte_value(), 0xff);
        assert_eq!(TriColor::Black.get_byte_value(), 0x00);
        assert_eq!(TriColor::Chromatic.get_byte_value(), 0x00);
    }

    #[test]
    fn inverse() {
        assert_eq!(Color::Black.inverse(), Color::White);
        assert_eq!(Color::White.inverse(), Color::Black);
    }
}
