//! Name normalization for user-entered node names

use crate::error::TreeError;
use crate::types::NodeKind;

/// Normalize raw user text into a node name.
///
/// Leading and trailing whitespace is dropped and internal whitespace runs
/// collapse to one space. An empty result falls back to the kind's placeholder.
pub fn normalize_name(raw: &str, kind: NodeKind) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        kind.placeholder().to_string()
    } else {
        collapsed
    }
}

/// Reject names that would not stay a single archive path component.
pub fn validate_name(name: &str) -> Result<(), TreeError> {
    let reason = if name.contains('/') || name.contains('\\') {
        "path separators are not allowed"
    } else if name == "." || name == ".." {
        "reserved path component"
    } else {
        return Ok(());
    };
    Err(TreeError::InvalidName {
        name: name.to_string(),
        reason,
    })
}
