// Variant list reader: one identifier per line, blanks ignored,
// duplicates collapsed onto their first occurrence.

use crate::error::{ClientError, Result};
use std::collections::HashSet;
use std::path::Path;

/// Read `path` and return its unique, trimmed, non-empty lines in order.
pub fn parse_variants(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).map_err(|source| ClientError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    let variants = parse_variant_lines(&content);
    tracing::debug!(
        "Read {} unique variants from {}",
        variants.len(),
        path.display()
    );
    Ok(variants)
}

/// Same as [`parse_variants`] over text already in memory.
pub fn parse_variant_lines(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut variants = Vec::new();
    for line in content.lines() {
        let variant = line.trim();
        if variant.is_empty() {
            continue;
        }
        if seen.insert(variant) {
            variants.push(variant.to_string());
        }
    }
    variants
}
