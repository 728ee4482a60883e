use std::sync::OnceLock;

use ratatui::style::Color;
use regex::Regex;

/// Palette offered by the color pickers. Entry 0 is the theme default.
pub const PALETTE: [&str; 40] = [
    "", "#ffadad", "#ffd6a5", "#fdffb6", "#caffbf", "#9bf6ff", "#a0c4ff", "#bdb2ff", "#ffc6ff", "#ffd9d9",
    "#000000", "#e03524", "#f07c12", "#ffc200", "#90bc1a", "#21b534", "#0095ac", "#1f64ad", "#4040a0", "#903498",
    "#888888", "#f94144", "#f3722c", "#f8961e", "#f9c74f", "#90be6d", "#43aa8b", "#4d908e", "#577590", "#277da1",
    "#ffffff", "#ef476f", "#f78c6b", "#ffd166", "#83d483", "#06d6a0", "#0cb0a9", "#118ab2", "#0c637f", "#073b4c",
];

pub const PALETTE_COLUMNS: usize = 10;

fn rgb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^rgba?\((\d+),\s*(\d+),\s*(\d+)(?:,\s*[\d.]+)?\)$").expect("static regex")
    })
}

/// `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` or `rgba(r, g, b, a)`.
pub fn parse_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let color = color.trim();
    if let Some(hex) = color.strip_prefix('#') {
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        return match hex.len() {
            3 | 4 => {
                let d: Vec<String> = hex.chars().take(3).map(|c| format!("{c}{c}")).collect();
                Some((channel(&d[0])?, channel(&d[1])?, channel(&d[2])?))
            }
            6 | 8 if hex.is_ascii() => Some((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
            _ => None,
        };
    }
    let caps = rgb_regex().captures(color)?;
    let c = |i: usize| caps[i].parse::<u16>().ok().map(|v| v.min(255) as u8);
    Some((c(1)?, c(2)?, c(3)?))
}

/// Hue in degrees (0..360). Unparsable and achromatic colors give 0.
pub fn hue(color: &str) -> f64 {
    let Some((r, g, b)) = parse_rgb(color) else { return 0.0; };
    let (r, g, b) = (r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == min {
        return 0.0;
    }
    let d = max - min;
    if max == r {
        ((g - b) / d + if g < b { 6.0 } else { 0.0 }) * 60.0
    } else if max == g {
        ((b - r) / d + 2.0) * 60.0
    } else {
        ((r - g) / d + 4.0) * 60.0
    }
}

/// Terminal color for a stored color string; empty means "use the theme".
pub fn to_terminal_color(color: &str) -> Option<Color> {
    parse_rgb(color).map(|(r, g, b)| Color::Rgb(r, g, b))
}

/// Palette entry selected for `color`; colors outside the palette select the
/// theme default.
pub fn palette_index(color: &str) -> usize {
    let color = color.trim();
    PALETTE
        .iter()
        .position(|p| p.eq_ignore_ascii_case(color))
        .unwrap_or(0)
}

/// Accepts the empty string (theme default) or anything [`parse_rgb`] reads.
pub fn is_valid(color: &str) -> bool {
    color.trim().is_empty() || parse_rgb(color).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    #[test]
    fn hue_of_primaries() {
        assert!(close(hue("#ff0000"), 0.0));
        assert!(close(hue("#00ff00"), 120.0));
        assert!(close(hue("#0000ff"), 240.0));
        assert!(close(hue("#f0f"), 300.0));
    }

    #[test]
    fn hue_accepts_rgb_functions_and_alpha_hex() {
        assert!(close(hue("rgb(0, 255, 0)"), 120.0));
        assert!(close(hue("rgba(0,0,255,0.5)"), 240.0));
        assert!(close(hue("#00ff0080"), 120.0));
    }

    #[test]
    fn hue_defaults_to_zero() {
        assert_eq!(hue(""), 0.0);
        assert_eq!(hue("#888888"), 0.0);
        assert_eq!(hue("#12345"), 0.0);
        assert_eq!(hue("teal"), 0.0);
    }

    #[test]
    fn palette_lookup() {
        assert_eq!(palette_index(""), 0);
        assert_eq!(palette_index("#FFADAD"), 1);
        assert_eq!(palette_index("#123456"), 0);
        assert_eq!(PALETTE.len() % PALETTE_COLUMNS, 0);
    }

    #[test]
    fn terminal_colors() {
        assert_eq!(to_terminal_color("#43aa8b"), Some(Color::Rgb(0x43, 0xaa, 0x8b)));
        assert_eq!(to_terminal_color(""), None);
        assert!(is_valid(""));
        assert!(!is_valid("#zzzzzz"));
    }
}
