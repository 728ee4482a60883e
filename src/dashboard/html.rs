//! Static HTML rendering of the dashboard (`dasshboard export --html`).
//! Folder buttons link to the `vscode-remote://` URI and carry the
//! `openFolder` payload in `data-*` attributes.

use std::fmt::Write;

use super::{Card, Dashboard, Section};
use crate::color;
use crate::icons;
use crate::models::{HostKind, Layout};
use crate::remote::{self, RemoteContext};

const STYLE: &str = r#"
:root { --accent: #3794ff; --bg: #1e1e1e; --fg: #d4d4d4; --muted: #8c8c8c; --card: #252526; }
body { background: var(--bg); color: var(--fg); font-family: system-ui, sans-serif; margin: 2rem; }
h1 { font-weight: 500; }
.context { color: var(--muted); margin-bottom: 1.5rem; }
.section-title { display: flex; align-items: center; gap: .5rem; color: var(--section-color, var(--accent)); }
.section-count { color: var(--muted); font-size: .9em; }
.host-grid.layout-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; }
.host-grid.layout-list { display: flex; flex-direction: column; gap: .5rem; }
.host-card { background: var(--card); border-radius: 8px; padding: 1rem; border-left: 3px solid var(--host-color, var(--accent)); }
.host-header-row { display: flex; justify-content: space-between; align-items: center; }
.host-name { font-size: 1.1rem; margin: 0; }
.host-icon { color: var(--host-color, var(--accent)); margin-right: .4rem; }
.host-connection { color: var(--muted); font-size: .9em; }
.host-type-badge { font-size: .7rem; padding: .1rem .4rem; border-radius: 4px; border: 1px solid var(--muted); }
.folder-entry { display: flex; justify-content: space-between; margin-top: .5rem; }
.folder-path { font-family: monospace; }
.action-button { color: var(--host-color, var(--accent)); text-decoration: none; margin-left: .5rem; }
.empty { color: var(--muted); font-style: italic; }
"#;

/// Escape text and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Inline CSS variables for a host or section color; nothing for the theme default.
fn color_style(var: &str, c: &str) -> String {
    if c.trim().is_empty() || !color::is_valid(c) {
        return String::new();
    }
    format!(
        r#" style="{var}: {}; {var}-hue: {:.0};""#,
        escape(c.trim()),
        color::hue(c)
    )
}

fn render_card(out: &mut String, card: &Card) {
    let style = color_style("--host-color", &card.color);
    let _ = write!(
        out,
        r#"<div class="host-card {kind}-host"{style}>
  <div class="host-header">
    <div class="host-header-row">
      <div class="host-name-container"><span class="host-icon" data-icon="{icon}">{glyph}</span><h2 class="host-name">{name}</h2></div>
      <span class="host-type-badge {kind}-badge">{badge}</span>
    </div>
    <div class="host-connection-row"><span class="host-connection">{detail}</span></div>
  </div>
  <div class="folders-container">
"#,
        kind = card.kind.as_str(),
        icon = escape(&card.icon),
        glyph = icons::glyph(&card.icon),
        name = escape(&card.name),
        badge = card.kind.badge(),
        detail = escape(&card.detail),
    );

    for folder in &card.folders {
        let _ = write!(
            out,
            r#"    <div class="folder-entry">
      <span class="folder-path" title="{folder}">{folder}</span>
      <div class="folder-actions">
"#,
            folder = escape(folder)
        );
        for new_window in [false, true] {
            let href = remote::folder_uri(card.kind, &card.name, folder).unwrap_or_default();
            let label = if new_window { "Open in new window" } else { "Open in current window" };
            let _ = writeln!(
                out,
                r#"        <a class="action-button" href="{href}" data-host="{host}" data-folder="{folder}" data-type="{kind}" data-new-window="{new_window}" title="{label}">{text}</a>"#,
                href = escape(&href),
                host = escape(&card.name),
                folder = escape(folder),
                kind = card.kind.as_str(),
                text = if new_window { "⧉" } else { "↵" },
            );
        }
        out.push_str("      </div>\n    </div>\n");
    }
    out.push_str("  </div>\n</div>\n");
}

fn render_section(out: &mut String, section: &Section, layout: Layout) {
    let style = color_style("--section-color", &section.color);
    let _ = write!(
        out,
        r#"<section class="host-section {kind}-section" data-section="{kind}" data-collapsed="{collapsed}"{style}>
<h2 class="section-title">{title} <span class="section-count">({count})</span></h2>
"#,
        kind = section.kind.as_str(),
        collapsed = section.collapsed,
        title = escape(&section.title),
        count = section.count(),
    );
    if section.collapsed {
        out.push_str("</section>\n");
        return;
    }
    let layout_class = match layout {
        Layout::Grid => "layout-grid",
        Layout::List => "layout-list",
    };
    let _ = writeln!(out, r#"<div class="host-grid {layout_class}">"#);
    if section.cards.is_empty() {
        let what = match section.kind {
            HostKind::Ssh => "No SSH hosts found in your SSH config.",
            HostKind::Wsl => "No WSL distros found.",
            HostKind::Docker => "No running containers.",
        };
        let _ = writeln!(out, r#"<p class="empty">{what}</p>"#);
    }
    for card in &section.cards {
        render_card(out, card);
    }
    out.push_str("</div>\n</section>\n");
}

/// Full standalone document.
pub fn render(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>DaSSHboard</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>DaSSHboard</h1>\n"
    );
    if dashboard.context != RemoteContext::Local {
        let _ = writeln!(out, r#"<p class="context">Running inside a {}</p>"#, dashboard.context.label());
    }
    // Sections with no hosts other than SSH are hidden, like the editor view.
    for section in &dashboard.sections {
        if section.kind != HostKind::Ssh && section.cards.is_empty() {
            continue;
        }
        render_section(&mut out, section, dashboard.layout);
    }
    out.push_str("</body>\n</html>\n");
    out
}
