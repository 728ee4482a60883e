//! Filtrage des hosts (wildcards + fuzzy).
pub mod matcher;

pub use matcher::{filter_hosts, quick_match, wildcard_match};
