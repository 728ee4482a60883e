use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::models::Host;

/// Simple match insensible à la casse, avec support du '*' (wildcard).
pub fn wildcard_match(pat: &str, text: &str) -> bool {
    let pat = pat.to_lowercase();
    let text = text.to_lowercase();
    if pat == "*" { return true; }
    let parts: Vec<&str> = pat.split('*').collect();
    if parts.len() == 1 { return text.contains(&pat); }
    // contains-in-order
    let mut idx = 0usize;
    for part in parts.iter().filter(|p| !p.is_empty()) {
        match text[idx..].find(part) {
            Some(found) => idx += found + part.len(),
            None => return false,
        }
    }
    if !pat.starts_with('*') {
        if let Some(first) = parts.iter().find(|s| !s.is_empty()) {
            if !text.starts_with(first) { return false; }
        }
    }
    if !pat.ends_with('*') {
        if let Some(last) = parts.iter().rfind(|s| !s.is_empty()) {
            if !text.ends_with(last) { return false; }
        }
    }
    true
}

fn fuzzy(matcher: &SkimMatcherV2, pat: &str, text: &str) -> bool {
    matcher.fuzzy_match(text, pat).is_some()
}

/// Parse un filtre de type "type:ssh host:10.* name:web user:ubuntu".
/// Clés supportées : name, host, user, type. Les mots nus font un match
/// approximatif sur le nom.
pub fn filter_hosts<'a>(hosts: &'a [Host], filter: &str) -> Vec<&'a Host> {
    if filter.trim().is_empty() { return hosts.iter().collect(); }
    let matcher = SkimMatcherV2::default();
    let mut name_pats: Vec<String> = Vec::new();
    let mut bare: Vec<String> = Vec::new();
    let mut host_pats: Vec<String> = Vec::new();
    let mut user_pats: Vec<String> = Vec::new();
    let mut type_pats: Vec<String> = Vec::new();

    for tok in filter.split_whitespace() {
        if let Some(rest) = tok.strip_prefix("name:") { name_pats.push(rest.to_string()); continue; }
        if let Some(rest) = tok.strip_prefix("host:") { host_pats.push(rest.to_string()); continue; }
        if let Some(rest) = tok.strip_prefix("user:") { user_pats.push(rest.to_string()); continue; }
        if let Some(rest) = tok.strip_prefix("type:") { type_pats.push(rest.to_string()); continue; }
        bare.push(tok.to_string());
    }

    hosts.iter().filter(|h| {
        let user = h.user.as_deref().unwrap_or("");
        name_pats.iter().all(|p| wildcard_match(p, &h.name))
            && bare.iter().all(|p| if p.contains('*') { wildcard_match(p, &h.name) } else { fuzzy(&matcher, p, &h.name) })
            && host_pats.iter().all(|p| wildcard_match(p, &h.hostname))
            && user_pats.iter().all(|p| wildcard_match(p, user))
            && type_pats.iter().all(|p| h.kind.as_str().eq_ignore_ascii_case(p))
    }).collect()
}

/// Filtre rapide du TUI : nom, hostname, user ou type.
pub fn quick_match(pattern: &str, host: &Host) -> bool {
    let pattern = pattern.trim();
    if pattern.is_empty() { return true; }
    if pattern.contains('*') {
        return wildcard_match(pattern, &host.name)
            || wildcard_match(pattern, &host.hostname)
            || host.user.as_deref().map(|u| wildcard_match(pattern, u)).unwrap_or(false);
    }
    let matcher = SkimMatcherV2::default();
    fuzzy(&matcher, pattern, &host.name)
        || host.hostname.to_lowercase().contains(&pattern.to_lowercase())
        || host.kind.as_str().eq_ignore_ascii_case(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HostKind;

    fn hosts() -> Vec<Host> {
        let mut web = Host::new("web-prod", HostKind::Ssh);
        web.hostname = "10.0.0.12".into();
        web.user = Some("ubuntu".into());
        let mut db = Host::new("db-staging", HostKind::Ssh);
        db.hostname = "db.internal".into();
        vec![web, db, Host::new("Ubuntu-22.04", HostKind::Wsl)]
    }

    #[test]
    fn wildcards() {
        assert!(wildcard_match("web*", "web-prod"));
        assert!(wildcard_match("*prod", "web-prod"));
        assert!(!wildcard_match("db*", "web-prod"));
        assert!(wildcard_match("EB", "web-prod"));
    }

    #[test]
    fn scoped_filters() {
        let hs = hosts();
        let names = |v: Vec<&Host>| v.iter().map(|h| h.name.clone()).collect::<Vec<_>>();
        assert_eq!(names(filter_hosts(&hs, "host:10.*")), ["web-prod"]);
        assert_eq!(names(filter_hosts(&hs, "user:ubuntu")), ["web-prod"]);
        assert_eq!(names(filter_hosts(&hs, "type:wsl")), ["Ubuntu-22.04"]);
        assert_eq!(filter_hosts(&hs, "").len(), 3);
    }

    #[test]
    fn bare_words_are_fuzzy() {
        let hs = hosts();
        let found = filter_hosts(&hs, "dbstg");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "db-staging");
    }

    #[test]
    fn quick_match_checks_hostname_and_type() {
        let hs = hosts();
        assert!(quick_match("internal", &hs[1]));
        assert!(quick_match("wsl", &hs[2]));
        assert!(quick_match("", &hs[0]));
        assert!(!quick_match("zzz", &hs[0]));
    }
}
