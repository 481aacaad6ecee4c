//! Dataset ID list files.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a file of dataset IDs, one per line.
///
/// Lines are trimmed and uppercased; blank lines are ignored. The result is
/// sorted and free of duplicates.
pub fn read_id_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset ID file: {}", path.display()))?;
    Ok(parse_id_list(&content))
}

pub fn parse_id_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_uppercase)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
