use std::io;

use similar::TextDiff;

/// Unified diff of two page renderings, or `None` when they are identical.
pub(crate) fn build_unified_diff(original: &str, modified: &str, path: &str) -> io::Result<Option<String>> {
    if original == modified {
        return Ok(None);
    }

    let diff = TextDiff::from_lines(original, modified);
    let mut output = Vec::new();
    let header_old = format!("a/{path}");
    let header_new = format!("b/{path}");

    diff.unified_diff()
        .header(&header_old, &header_new)
        .to_writer(&mut output)?;

    String::from_utf8(output)
        .map(Some)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
