use std::time::Duration;

use tracing::{debug, info, warn};

use super::process::run_with_timeout;
use crate::models::{Host, HostKind};

const DOCKER_TIMEOUT: Duration = Duration::from_secs(5);

/// Full id, name, image, status, pipe-delimited.
pub const PS_FORMAT: &str = "{{.ID}}|{{.Names}}|{{.Image}}|{{.Status}}";

/// Parse `docker ps --no-trunc --format "{{.ID}}|{{.Names}}|{{.Image}}|{{.Status}}"`.
/// Lines with fewer than four fields are skipped.
pub fn parse_docker_ps(text: &str) -> Vec<Host> {
    let mut containers = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < 4 {
            debug!(line, "docker ps line has fewer than 4 fields");
            continue;
        }
        let mut h = Host::new(parts[1], HostKind::Docker);
        h.container_id = Some(parts[0].to_lowercase());
        h.image = Some(parts[2].to_string()).filter(|s| !s.is_empty());
        h.container_status = Some(parts[3].to_string()).filter(|s| !s.is_empty());
        containers.push(h);
    }
    containers
}

/// Running containers as hosts, listed with `program` (normally `docker`).
/// Docker missing or stopped means none.
pub fn discover_docker_containers(program: &str) -> Vec<Host> {
    let args = ["ps", "--no-trunc", "--format", PS_FORMAT];
    match run_with_timeout(program, &args, DOCKER_TIMEOUT) {
        Ok(out) => {
            let containers = parse_docker_ps(&String::from_utf8_lossy(&out));
            info!(count = containers.len(), "docker containers discovered");
            containers
        }
        Err(e) => {
            warn!(error = %e, "error getting Docker containers; is Docker installed and running?");
            Vec::new()
        }
    }
}
