//! Named colors for battlefronts.

use crate::error::CoreError;

/// Color assigned when none is given.
pub const DEFAULT_COLOR: &str = "#6b7280";

const PALETTE: &[(&str, &str)] = &[
    ("red", "#ef4444"),
    ("orange", "#f97316"),
    ("amber", "#f59e0b"),
    ("yellow", "#eab308"),
    ("lime", "#84cc16"),
    ("green", "#22c55e"),
    ("emerald", "#10b981"),
    ("teal", "#14b8a6"),
    ("cyan", "#06b6d4"),
    ("sky", "#0ea5e9"),
    ("blue", "#3b82f6"),
    ("indigo", "#6366f1"),
    ("violet", "#8b5cf6"),
    ("purple", "#a855f7"),
    ("fuchsia", "#d946ef"),
    ("pink", "#ec4899"),
    ("rose", "#f43f5e"),
    ("slate", "#64748b"),
    ("gray", "#6b7280"),
];

/// Looks up a color name, ignoring case.
pub fn color_hex(name: &str) -> Option<&'static str> {
    let name = name.trim();
    PALETTE
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, hex)| *hex)
}

pub fn color_names() -> impl Iterator<Item = &'static str> {
    PALETTE.iter().map(|(name, _)| *name)
}

/// Accepts a palette name or a `#rrggbb` literal and returns the hex form.
pub fn resolve_color(input: &str) -> Result<String, CoreError> {
    if let Some(hex) = color_hex(input) {
        return Ok(hex.to_string());
    }
    let input = input.trim();
    if hex_to_rgb(input).is_some() {
        return Ok(input.to_ascii_lowercase());
    }
    Err(CoreError::InvalidInput(format!(
        "Unknown color '{}'. Use #rrggbb or one of: {}",
        input,
        color_names().collect::<Vec<_>>().join(", ")
    )))
}

/// Decodes `#rrggbb` into its components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lookup() {
        assert_eq!(color_hex("red"), Some("#ef4444"));
        assert_eq!(color_hex(" Blue "), Some("#3b82f6"));
        assert_eq!(color_hex("mauve"), None);
        assert_eq!(color_hex("gray"), Some(DEFAULT_COLOR));
    }

    #[test]
    fn test_resolve_color() {
        assert_eq!(resolve_color("emerald").unwrap(), "#10b981");
        assert_eq!(resolve_color("#AABBCC").unwrap(), "#aabbcc");
        assert!(matches!(resolve_color("#abc"), Err(CoreError::InvalidInput(_))));
        assert!(matches!(resolve_color("chartreuse"), Err(CoreError::InvalidInput(_))));
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#ef4444"), Some((0xef, 0x44, 0x44)));
        assert_eq!(hex_to_rgb("ef4444"), None);
        assert_eq!(hex_to_rgb("#zz4444"), None);
    }
}
