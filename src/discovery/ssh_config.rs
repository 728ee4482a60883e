use std::collections::{HashMap, HashSet};
use std::fs;
use std::net::{Ipv4Addr, ToSocketAddrs};
use std::path::Path;

use ssh_config::SSHConfig;
use tracing::{debug, info, warn};

use crate::models::{Host, HostKind};

/// Parse the `Host` / `HostName` / `User` subset of an OpenSSH client config.
///
/// Every literal alias of a `Host` line is registered (wildcards and negated
/// patterns are skipped). `HostName` and `User` apply to all aliases of the
/// current block and the first value seen for an alias wins, like ssh does.
pub fn parse_ssh_config(text: &str) -> Vec<Host> {
    parse_blocks(text).0
}

/// Hosts in file order, plus the aliases that got an explicit `HostName`.
fn parse_blocks(text: &str) -> (Vec<Host>, HashSet<String>) {
    let mut with_hostname: HashSet<String> = HashSet::new();
    let mut order: Vec<String> = Vec::new();
    let mut hosts: HashMap<String, Host> = HashMap::new();
    let mut current: Vec<String> = Vec::new();

    for line in text.lines() {
        let Some((key, value)) = split_directive(line) else { continue; };

        match key.to_ascii_lowercase().as_str() {
            "host" => {
                current.clear();
                for tok in value.split(|c: char| c.is_whitespace() || c == ',') {
                    let alias = tok.trim().trim_matches('"');
                    if alias.is_empty() { continue; }
                    if alias.contains('*') || alias.contains('?') || alias.starts_with('!') { continue; }
                    if !hosts.contains_key(alias) {
                        order.push(alias.to_string());
                        hosts.insert(alias.to_string(), Host::new(alias, HostKind::Ssh));
                    }
                    current.push(alias.to_string());
                }
            }
            "match" => current.clear(),
            "hostname" => {
                for alias in &current {
                    if let Some(h) = hosts.get_mut(alias) {
                        if with_hostname.insert(alias.clone()) {
                            h.hostname = value.to_string();
                        }
                    }
                }
            }
            "user" => {
                for alias in &current {
                    if let Some(h) = hosts.get_mut(alias) {
                        if h.user.is_none() {
                            h.user = Some(value.to_string());
                        }
                    }
                }
            }
            _ => {}
        }
    }

    let hosts = order.into_iter().filter_map(|a| hosts.remove(&a)).collect();
    (hosts, with_hostname)
}

/// `Key value`, `Key=value` or `Key = value`; comments and blanks yield None.
fn split_directive(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let idx = trimmed.find(|c: char| c.is_whitespace() || c == '=')?;
    let key = &trimmed[..idx];
    let value = trimmed[idx..]
        .trim_start_matches(|c: char| c.is_whitespace() || c == '=')
        .trim()
        .trim_matches('"');
    if value.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Fill values an alias inherits from other blocks (`Host *` with a `User`,
/// for example) using a full evaluation of the config.
fn fill_inherited(text: &str, hosts: &mut [Host], with_hostname: &HashSet<String>) {
    let Ok(cfg) = SSHConfig::parse_str(text) else {
        debug!("ssh_config crate could not parse the file, keeping explicit values only");
        return;
    };
    for h in hosts.iter_mut() {
        let alias = h.name.clone();
        let settings = cfg.query(&alias);
        let get = |k: &str| settings.get(k).map(|s| s.to_string());
        if !with_hostname.contains(&alias) {
            if let Some(hn) = get("HostName").or_else(|| get("Hostname")) {
                h.hostname = hn;
            }
        }
        if h.user.is_none() {
            h.user = get("User");
        }
    }
}

pub fn is_ipv4(hostname: &str) -> bool {
    hostname.parse::<Ipv4Addr>().is_ok()
}

/// DNS lookup of a hostname; IPv4 literals are not looked up.
pub fn resolve_ip(hostname: &str) -> Option<String> {
    if is_ipv4(hostname) {
        return None;
    }
    match (hostname, 22).to_socket_addrs() {
        Ok(mut addrs) => addrs.next().map(|a| a.ip().to_string()),
        Err(e) => {
            debug!(hostname, error = %e, "could not resolve host");
            None
        }
    }
}

/// Read and parse the SSH config at `path`. A missing file means no hosts.
pub fn discover_ssh_hosts(path: &Path, resolve: bool) -> Vec<Host> {
    if !path.exists() {
        debug!(path = %path.display(), "no ssh config file");
        return Vec::new();
    }
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "cannot read ssh config");
            return Vec::new();
        }
    };

    let (mut hosts, with_hostname) = parse_blocks(&text);
    fill_inherited(&text, &mut hosts, &with_hostname);
    if resolve {
        for h in hosts.iter_mut() {
            h.ip = resolve_ip(&h.hostname);
        }
    }
    info!(count = hosts.len(), "ssh hosts discovered");
    hosts
}
