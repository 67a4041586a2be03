use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Two values in `[-1, 1]` derived from `key`. Same key, same pair, for the
/// lifetime of the process.
pub fn stable_pair(key: &str) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    let hash = hasher.finish();

    let unit = |bits: u64| ((bits & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    (unit(hash) * 2.0 - 1.0, unit(hash >> 32) * 2.0 - 1.0)
}

/// Shortens `text` to at most `max_chars` characters, marking the cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) if max_chars > 0 => format!("{}…", text[..end].trim_end()),
        Some(_) => String::new(),
        None => text.to_owned(),
    }
}
