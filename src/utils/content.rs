//! Checks and transforms applied to raw input before it is indexed

/// Check if content is likely binary
///
/// Examines the first 8KB for null bytes or a high ratio of control bytes
pub fn is_likely_binary(content: &[u8]) -> bool {
    let sample_size = content.len().min(8192);
    let sample = &content[..sample_size];

    // Null bytes are a very strong indicator of binary
    if memchr::memchr(0, sample).is_some() {
        return true;
    }

    let control_count = sample
        .iter()
        .filter(|&&b| b < 0x20 && b != b'\n' && b != b'\r' && b != b'\t')
        .count();

    control_count > sample_size / 8
}

/// Lowercase ASCII letters, leaving every other byte untouched
pub fn fold_case(content: &[u8]) -> Vec<u8> {
    content.iter().map(|b| b.to_ascii_lowercase()).collect()
}
