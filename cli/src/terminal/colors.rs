use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 34, g: 211, b: 238 };
pub const ACCENT: Color = Color::TrueColor { r: 6, g: 182, b: 212 };
pub const SEPARATOR: Color = Color::TrueColor { r: 100, g: 116, b: 139 };
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 203, g: 213, b: 225 };

pub const SECURE: Color = Color::TrueColor { r: 16, g: 185, b: 129 };
pub const WARNING: Color = Color::TrueColor { r: 251, g: 191, b: 36 };
pub const EXPIRED: Color = Color::TrueColor { r: 239, g: 68, b: 68 };
