use glob::glob;
use std::fs;
use std::path::PathBuf;

/// True if any process holds `port_name` open, judged from `/proc/*/fd`.
pub fn is_port_open(port_name: &str) -> bool {
    let target = fs::canonicalize(port_name).unwrap_or_else(|_| PathBuf::from(port_name));

    let paths = match glob("/proc/[0-9]*/fd/*") {
        Ok(paths) => paths,
        Err(_) => return false,
    };

    paths
        .filter_map(|p| p.ok())
        .filter_map(|path| fs::read_link(path).ok())
        .any(|link| link == target)
}
