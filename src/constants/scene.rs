use std::time::Duration;

use ratatui::style::Color;

pub const TITLE_TEXT: &str = "🎄 Merry Christmas! 🎄";
pub const TITLE_COLOR: Color = Color::LightGreen;

pub const FOOTERS: [(&str, Color); 2] =
    [("✨ Jingle Bells! ✨", Color::LightRed), ("⭐ Merry Christmas! ⭐", Color::LightYellow)];

pub const TEARDOWN_FAREWELL: &str = "🎄 Happy Solo Christmas 🎄";
pub const INTERRUPT_FAREWELL: &str = "🎄 Happy Holidays! 🎄";
pub const FAREWELL_COLOR: Color = Color::LightGreen;
pub const FAREWELL_HOLD: Duration = Duration::from_secs(2);
