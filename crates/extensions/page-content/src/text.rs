//! Character-offset helpers. All page offsets count `char`s, not bytes.

/// Byte index of char offset `offset`, or `None` if past the end.
fn byte_index(text: &str, offset: usize) -> Option<usize> {
    if offset == 0 {
        return Some(0);
    }
    match text.char_indices().nth(offset) {
        Some((index, _)) => Some(index),
        None if text.chars().count() == offset => Some(text.len()),
        None => None,
    }
}

/// Slice `[start, end)` in chars.
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> Option<&str> {
    if end < start {
        return None;
    }
    let from = byte_index(text, start)?;
    let to = byte_index(text, end)?;
    Some(&text[from..to])
}

/// Copy of `text` with chars `[start, end)` replaced.
pub(crate) fn splice(text: &str, start: usize, end: usize, replacement: &str) -> Option<String> {
    if end < start {
        return None;
    }
    let from = byte_index(text, start)?;
    let to = byte_index(text, end)?;
    let mut out = String::with_capacity(text.len() - (to - from) + replacement.len());
    out.push_str(&text[..from]);
    out.push_str(replacement);
    out.push_str(&text[to..]);
    Some(out)
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_slice_ascii() {
        assert_eq!(char_slice("hello world", 6, 11), Some("world"));
        assert_eq!(char_slice("hello", 0, 0), Some(""));
        assert_eq!(char_slice("hello", 5, 5), Some(""));
    }

    #[test]
    fn test_char_slice_multibyte() {
        assert_eq!(char_slice("café au lait", 0, 4), Some("café"));
        assert_eq!(char_slice("日本語テキスト", 3, 7), Some("テキスト"));
    }

    #[test]
    fn test_char_slice_out_of_bounds() {
        assert_eq!(char_slice("abc", 1, 4), None);
        assert_eq!(char_slice("abc", 2, 1), None);
    }

    #[test]
    fn test_splice() {
        assert_eq!(splice("The dog ran fastt", 12, 17, "fast.").unwrap(), "The dog ran fast.");
        assert_eq!(splice("naïve", 2, 3, "i").unwrap(), "naive");
        assert_eq!(splice("abc", 3, 3, "d").unwrap(), "abcd");
        assert!(splice("abc", 2, 9, "x").is_none());
    }
}
