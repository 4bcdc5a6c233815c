use ratatui::style::Color;

pub const LIGHT_PALETTE: [Color; 5] =
    [Color::LightRed, Color::LightYellow, Color::LightCyan, Color::White, Color::Rgb(255, 192, 203)];

pub const TREE_COLORS: [Color; 3] = [Color::LightGreen, Color::Rgb(34, 139, 34), Color::Rgb(0, 100, 0)];
pub const UNLIT_COLOR: Color = Color::Rgb(0, 80, 0);
pub const TRUNK_COLOR: Color = Color::Rgb(139, 69, 19);
pub const STAR_COLOR: Color = Color::LightYellow;

pub const FILL_GLYPH: char = '*';
pub const LIGHT_GLYPH: char = '●';
pub const TRUNK_GLYPH: char = '*';
pub const STAR_GLYPH: &str = "✨";

pub const SINGLE_BASE: i32 = 41;
pub const SINGLE_MARGIN: i32 = 2;
pub const SINGLE_HEIGHT: i32 = 20;

pub const TOP_BASE: i32 = 21;
pub const TOP_MARGIN: i32 = 10;
pub const TOP_HEIGHT: i32 = 10;
pub const BOTTOM_BASE: i32 = 41;
pub const BOTTOM_MARGIN: i32 = 2;
pub const BOTTOM_HEIGHT: i32 = 11;

pub const TRUNK_ROWS: usize = 4;
pub const TRUNK_RATIO: i32 = 13;
pub const DOUBLE_TRUNK_WIDTH: i32 = 3;

// A light is lit while (frame + phase) % BLINK_PERIOD < BLINK_LIT.
pub const BLINK_PERIOD: u64 = 4;
pub const BLINK_LIT: u64 = 2;
pub const BLINK_PHASES: u8 = 4;
