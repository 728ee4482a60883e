//! Host icon catalog. Icons are stored as `lucide:<name>`; the TUI shows a
//! glyph for each one.

use crate::models::HostKind;

pub const DEFAULT_ICON: &str = "lucide:server";
pub const DOCKER_ICON: &str = "docker";

/// (lucide name, terminal glyph)
pub const CATALOG: &[(&str, &str)] = &[
    // servers
    ("server", "▤"),
    ("server-cog", "⚙"),
    ("server-off", "▢"),
    ("server-crash", "✖"),
    // machines
    ("computer", "🖥"),
    ("laptop", "💻"),
    ("monitor", "▭"),
    ("tablet", "▯"),
    ("smartphone", "📱"),
    ("cpu", "▣"),
    ("hard-drive", "⛁"),
    // platforms
    ("apple", "◖"),
    ("box", "☐"),
    ("container", "⬚"),
    // cloud & network
    ("cloud", "☁"),
    ("cloud-off", "⛅"),
    ("network", "⋔"),
    ("wifi", "≋"),
    ("wifi-off", "≉"),
    ("router", "⌬"),
    ("globe", "◍"),
    ("globe-2", "◎"),
    // development
    ("code", "⟨⟩"),
    ("code-2", "</>"),
    ("terminal", "❯_"),
    ("folder", "▰"),
    ("folder-open", "▱"),
    ("file", "▯"),
    ("file-code", "⌨"),
    ("git-branch", "⑂"),
    ("git-commit", "⊸"),
    // security
    ("shield", "⛨"),
    ("shield-check", "✓"),
    ("lock", "🔒"),
    ("key", "⚷"),
    ("fingerprint", "◉"),
    // storage
    ("database", "⛃"),
    ("database-backup", "⛂"),
    // monitoring
    ("activity", "∿"),
    ("gauge", "◔"),
    ("bar-chart", "▥"),
    ("trending-up", "↗"),
    // misc
    ("home", "⌂"),
    ("settings", "⚙"),
    ("cog", "✲"),
    ("wrench", "⚒"),
    ("package", "⧈"),
    ("layers", "≣"),
    ("grid", "▦"),
    ("zap", "⚡"),
];

/// `lucide:cloud` -> `cloud`; bare names are accepted as is.
pub fn icon_name(icon: &str) -> &str {
    let icon = icon.trim();
    match icon.get(..7) {
        Some(p) if p.eq_ignore_ascii_case("lucide:") => icon[7..].trim(),
        _ => icon,
    }
}

/// Canonical stored form, or None when the icon is not in the catalog.
pub fn normalize(icon: &str) -> Option<String> {
    let icon = icon.trim();
    if icon.is_empty() {
        return Some(String::new());
    }
    let name = icon_name(icon);
    CATALOG
        .iter()
        .any(|(n, _)| *n == name)
        .then(|| format!("lucide:{name}"))
}

/// Icon a card uses: Docker is fixed, otherwise the stored one or the default.
pub fn effective_icon(kind: HostKind, stored: &str) -> String {
    if kind == HostKind::Docker {
        return DOCKER_ICON.to_string();
    }
    if stored.trim().is_empty() {
        DEFAULT_ICON.to_string()
    } else {
        stored.trim().to_string()
    }
}

pub fn glyph(icon: &str) -> &'static str {
    if icon == DOCKER_ICON {
        return "🐳";
    }
    let name = icon_name(icon);
    CATALOG
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, g)| *g)
        .unwrap_or("▤")
}

/// Position in the catalog, used to preselect the picker.
pub fn catalog_index(icon: &str) -> usize {
    let name = icon_name(icon);
    CATALOG.iter().position(|(n, _)| *n == name).unwrap_or(0)
}
