use crate::error::CodecError;

/// Write `tags` as a JSON array of strings into a fresh buffer.
///
/// Tags are ASCII identifiers and are copied without escaping.
pub fn write_tag_array<'a, I>(tags: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Vec::with_capacity(64);
    out.push(b'[');
    let mut first = true;
    for tag in tags {
        if first {
            first = false;
        } else {
            out.push(b',');
        }
        out.push(b'"');
        out.extend_from_slice(tag.as_bytes());
        out.push(b'"');
    }
    out.push(b']');
    out
}

/// Scan a trusted JSON array of strings, calling `on_tag` with the raw bytes
/// between each pair of quotes.
///
/// Stops at the first `]` found outside a string; every other byte outside a
/// string is skipped. Escape sequences are kept raw, but an escaped quote does
/// not end the string. Reaching the end
/// of input without `]` is accepted, an unterminated string is not.
pub fn scan_tags<F>(data: &[u8], mut on_tag: F) -> Result<(), CodecError>
where
    F: FnMut(&[u8]),
{
    let mut i = 0;
    while i < data.len() {
        match data[i] {
            b'"' => {
                let start = i + 1;
                let end = find_end_quote(data, start).ok_or_else(|| {
                    CodecError::MalformedInput(format!(
                        "unterminated string starting at byte {i}"
                    ))
                })?;
                on_tag(&data[start..end]);
                i = end + 1;
            }
            b']' => return Ok(()),
            _ => i += 1,
        }
    }
    Ok(())
}

/// Index of the quote closing the string that starts at `start`. A backslash
/// always consumes the byte after it.
fn find_end_quote(data: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i < data.len() {
        match data[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Strictly parse a JSON array of strings.
pub fn parse_tag_array(data: &[u8]) -> Result<Vec<String>, CodecError> {
    serde_json::from_slice(data).map_err(CodecError::malformed)
}
