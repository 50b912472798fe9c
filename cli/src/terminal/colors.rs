use colored::Color;

pub const PRIMARY: Color = Color::BrightBlue;
pub const SECONDARY: Color = Color::BrightMagenta;
pub const ACCENT: Color = Color::BrightYellow;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IPV4_ADDR: Color = Color::BrightCyan;
pub const IPV4_PREFIX: Color = Color::Cyan;
pub const IPV6_ADDR: Color = Color::BrightMagenta;
pub const IPV6_PREFIX: Color = Color::Magenta;
pub const MAC_ADDR: Color = Color::BrightYellow;

pub const OPEN: Color = Color::BrightGreen;
pub const CLOSED: Color = Color::Red;
pub const FILTERED: Color = Color::Yellow;
pub const TIMEOUT: Color = Color::BrightBlack;
