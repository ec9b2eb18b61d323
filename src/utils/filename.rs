//! Artifact file names derived from marker and category names

/// Characters dropped from generated file names
const REMOVED_CHARS: &[char] = &['(', ')', ',', ':', '/', ' '];

/// Generate the `.html` artifact file name for a marker or category name.
///
/// Spaces become underscores, `%` becomes `pct`, and `(),:/` are removed.
#[must_use]
pub fn generate_filename(name: &str) -> String {
    let mut filename: String = name
        .replace(' ', "_")
        .replace('%', "pct")
        .chars()
        .filter(|c| !REMOVED_CHARS.contains(c))
        .collect();
    filename.push_str(".html");
    filename
}
