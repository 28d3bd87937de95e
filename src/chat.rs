//! Legacy chat color codes used in messages sent to players.
//!
//! Colors are rendered as a section sign followed by a single code
//! character, which is what game clients parse in chat text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix character that introduces a color code.
pub const COLOR_CHAR: char = '\u{00A7}';

/// Chat colors understood by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
    Reset,
}

impl ChatColor {
    /// The code character that follows [`COLOR_CHAR`].
    pub const fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
            Self::Reset => 'r',
        }
    }
}

impl fmt::Display for ChatColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", COLOR_CHAR, self.code())
    }
}

/// Remove every color code from `text`.
///
/// A trailing lone [`COLOR_CHAR`] is dropped as well.
pub fn strip_colors(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == COLOR_CHAR {
            chars.next();
            continue;
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aqua_renders_section_code() {
        assert_eq!(ChatColor::Aqua.to_string(), "\u{00A7}b");
        assert_eq!(ChatColor::Reset.to_string(), "\u{00A7}r");
    }

    #[test]
    fn test_strip_colors() {
        let colored = format!("{}Hello {}world{}", ChatColor::Aqua, ChatColor::Red, ChatColor::Reset);
        assert_eq!(strip_colors(&colored), "Hello world");
        assert_eq!(strip_colors("plain"), "plain");
        assert_eq!(strip_colors("dangling\u{00A7}"), "dangling");
    }
}
