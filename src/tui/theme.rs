use std::fs;
use std::path::Path;

use ratatui::style::Color;
use serde::Deserialize;

use crate::color::to_terminal_color;
use crate::config::path::theme_path;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
}

#[derive(Deserialize)]
struct Config {
    bg: Option<String>,
    fg: Option<String>,
    accent: Option<String>,
    muted: Option<String>,
}

pub fn load() -> Theme {
    load_from(&theme_path())
}

/// Charge `theme.toml`; les clés absentes ou invalides gardent zenburn.
pub fn load_from(path: &Path) -> Theme {
    let fallback = zenburn();
    let Ok(content) = fs::read_to_string(path) else { return fallback; };
    let cfg = match toml::from_str::<Config>(&content) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid theme file, using zenburn");
            return fallback;
        }
    };
    let pick = |v: &Option<String>, default: Color| v.as_deref().and_then(to_terminal_color).unwrap_or(default);
    Theme {
        bg: pick(&cfg.bg, fallback.bg),
        fg: pick(&cfg.fg, fallback.fg),
        accent: pick(&cfg.accent, fallback.accent),
        muted: pick(&cfg.muted, fallback.muted),
    }
}

pub fn zenburn() -> Theme {
    Theme {
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(220, 220, 204),
        accent: Color::Rgb(181, 189, 104),
        muted: Color::Rgb(150, 150, 150),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_theme_keeps_zenburn_for_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.toml");
        fs::write(&path, "accent = \"#3794ff\"\nfg = \"nope\"\n").unwrap();
        let t = load_from(&path);
        assert_eq!(t.accent, Color::Rgb(0x37, 0x94, 0xff));
        assert_eq!(t.fg, zenburn().fg);
    }

    #[test]
    fn missing_file_is_zenburn() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_from(&dir.path().join("none.toml")).bg, zenburn().bg);
    }
}
