use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, info, warn};

use super::process::run_with_timeout;
use crate::error::{DashboardError, Result};
use crate::models::{Host, HostKind};

/// Distros that belong to Docker Desktop, not to the user.
const DOCKER_DISTROS: [&str; 2] = ["docker-desktop", "docker-desktop-data"];

const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WslDistro {
    pub name: String,
    /// `Running` or `Stopped`
    pub state: String,
    pub version: String,
    /// Marked with `*` in the listing
    pub is_default: bool,
}

/// `wsl.exe` writes UTF-16LE (sometimes with a BOM). Plain UTF-8 is accepted
/// too, since some builds honour `WSL_UTF8=1`.
pub fn decode_wsl_output(bytes: &[u8]) -> String {
    let looks_utf16 = bytes.len() % 2 == 0 && bytes.iter().skip(1).step_by(2).any(|b| *b == 0);
    let text = if looks_utf16 {
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    };
    text.trim_start_matches('\u{feff}').replace('\0', "")
}

fn row_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\*)?\s*(.+?)\s+(Stopped|Running)\s+(\d+)\s*$").expect("static regex")
    })
}

fn split_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s{2,}|\t+").expect("static regex"))
}

/// Parse the table printed by `wsl --list --verbose`:
///
/// ```text
///   NAME            STATE           VERSION
/// * Ubuntu-22.04    Running         2
///   docker-desktop  Stopped         2
/// ```
pub fn parse_wsl_list(text: &str) -> Vec<WslDistro> {
    let mut distros = Vec::new();

    // first non-empty line is the header
    for line in text.lines().filter(|l| !l.trim().is_empty()).skip(1) {
        let Some(d) = parse_row(line) else {
            debug!(line, "wsl row did not match");
            continue;
        };
        if DOCKER_DISTROS.contains(&d.name.as_str()) {
            debug!(name = %d.name, "skipping docker desktop distro");
            continue;
        }
        distros.push(d);
    }
    distros
}

fn parse_row(line: &str) -> Option<WslDistro> {
    if let Some(caps) = row_regex().captures(line) {
        return Some(WslDistro {
            is_default: caps.get(1).is_some(),
            name: caps[2].trim().to_string(),
            state: caps[3].to_string(),
            version: caps[4].to_string(),
        });
    }

    // Fallback: columns separated by runs of spaces or tabs
    let trimmed = line.trim();
    let is_default = trimmed.starts_with('*');
    let clean = trimmed.trim_start_matches('*').trim();
    let parts: Vec<&str> = split_regex()
        .split(clean)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() < 3 {
        return None;
    }
    let state = parts[1];
    if state != "Running" && state != "Stopped" {
        return None;
    }
    Some(WslDistro {
        name: parts[0].to_string(),
        state: state.to_string(),
        version: parts[2].to_string(),
        is_default,
    })
}

/// `KEY=value` lookup; the key matches case-insensitively.
fn os_release_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        let (k, rest) = line.trim().split_once('=')?;
        if !k.trim().eq_ignore_ascii_case(key) {
            return None;
        }
        let v = rest.trim().trim_matches(|c| c == '"' || c == '\'').trim();
        (!v.is_empty()).then_some(v)
    })
}

/// Distro family from `/etc/os-release`: first word of `PRETTY_NAME`, then
/// first word of `NAME`, then the capitalized `ID`.
pub fn parse_os_release(text: &str) -> Option<String> {
    let first_word = |v: &str| v.split_whitespace().next().map(str::to_string);

    if let Some(v) = os_release_value(text, "PRETTY_NAME").and_then(first_word) {
        return Some(v);
    }
    if let Some(v) = os_release_value(text, "NAME").and_then(first_word) {
        return Some(v);
    }
    os_release_value(text, "ID").map(|id| {
        let id = id.to_lowercase();
        let mut chars = id.chars();
        match chars.next() {
            Some(c) => c.to_uppercase().chain(chars).collect(),
            None => id,
        }
    })
}

fn probe_distro_type(name: &str) -> Option<String> {
    for shell in ["bash", "sh"] {
        let args = ["-d", name, "-e", shell, "-c", "cat /etc/os-release 2>/dev/null || echo ''"];
        match run_with_timeout("wsl", &args, PROBE_TIMEOUT) {
            Ok(out) => return parse_os_release(&String::from_utf8_lossy(&out)),
            Err(e) => debug!(distro = name, shell, error = %e, "os-release probe failed"),
        }
    }
    None
}

fn list_distros() -> Result<Vec<WslDistro>> {
    let out = run_with_timeout("wsl", &["--list", "--verbose"], PROBE_TIMEOUT)?;
    let text = decode_wsl_output(&out);
    debug!(output = %text, "wsl --list --verbose");
    if text.trim().is_empty() {
        return Err(DashboardError::command("wsl", "empty output"));
    }
    Ok(parse_wsl_list(&text))
}

/// WSL distros as hosts. Only meaningful on Windows; elsewhere returns empty.
pub fn discover_wsl_distros() -> Vec<Host> {
    if !cfg!(windows) {
        debug!("not on Windows, skipping WSL detection");
        return Vec::new();
    }

    let distros = match list_distros() {
        Ok(d) => d,
        Err(e) => {
            warn!(error = %e, "error getting WSL distros");
            return Vec::new();
        }
    };

    let hosts: Vec<Host> = distros
        .into_iter()
        .map(|d| {
            let mut h = Host::new(d.name, HostKind::Wsl);
            h.distro_type = Some(probe_distro_type(&h.name).unwrap_or_else(|| "Linux".to_string()));
            h
        })
        .collect();
    info!(count = hosts.len(), "wsl distros discovered");
    hosts
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "  NAME                   STATE           VERSION\r\n\
* Ubuntu-22.04           Running         2\r\n\
  docker-desktop         Stopped         2\r\n\
  docker-desktop-data    Stopped         2\r\n\
  Oracle Linux 9.1       Stopped         2\r\n\
  kali-linux             Installing      2\r\n";

    fn utf16le(s: &str) -> Vec<u8> {
        let mut out = vec![0xFF, 0xFE];
        for u in s.encode_utf16() {
            out.extend_from_slice(&u.to_le_bytes());
        }
        out
    }

    #[test]
    fn parses_listing_and_skips_docker_desktop() {
        let distros = parse_wsl_list(LISTING);
        let names: Vec<&str> = distros.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Ubuntu-22.04", "Oracle Linux 9.1"]);

        assert!(distros[0].is_default);
        assert_eq!(distros[0].state, "Running");
        assert_eq!(distros[0].version, "2");
        assert!(!distros[1].is_default);
        assert_eq!(distros[1].state, "Stopped");
    }

    #[test]
    fn decodes_utf16le_with_bom() {
        let decoded = decode_wsl_output(&utf16le(LISTING));
        assert!(decoded.starts_with("  NAME"));
        assert_eq!(parse_wsl_list(&decoded).len(), 2);
    }

    #[test]
    fn utf8_output_passes_through() {
        assert_eq!(decode_wsl_output(b"NAME STATE VERSION\n"), "NAME STATE VERSION\n");
    }

    #[test]
    fn tab_separated_rows_use_the_fallback() {
        let d = parse_row("*\tDebian\tRunning\t1").unwrap();
        assert_eq!(d.name, "Debian");
        assert!(d.is_default);
        assert_eq!(d.version, "1");
    }

    #[test]
    fn header_only_listing_is_empty() {
        assert!(parse_wsl_list("  NAME      STATE           VERSION\n").is_empty());
        assert!(parse_wsl_list("").is_empty());
    }

    #[test]
    fn os_release_prefers_pretty_name() {
        let text = "NAME=\"Ubuntu\"\nPRETTY_NAME=\"Ubuntu 22.04.3 LTS\"\nID=ubuntu\n";
        assert_eq!(parse_os_release(text).as_deref(), Some("Ubuntu"));
    }

    #[test]
    fn os_release_falls_back_to_name_then_id() {
        assert_eq!(parse_os_release("NAME='Fedora Linux'\nID=fedora\n").as_deref(), Some("Fedora"));
        assert_eq!(parse_os_release("ID=alpine\n").as_deref(), Some("Alpine"));
        assert_eq!(parse_os_release("VERSION=1\n"), None);
    }

    #[test]
    fn os_release_keys_ignore_case() {
        assert_eq!(parse_os_release("  pretty_name=\"Debian GNU/Linux 12\"\n").as_deref(), Some("Debian"));
        assert_eq!(parse_os_release("Name=Arch\n").as_deref(), Some("Arch"));
    }
}
