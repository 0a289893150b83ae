//! Whitespace normalization and length capping for extracted text

/// Trim, collapse whitespace runs to single spaces and hard-cut to
/// `max_chars` characters. No ellipsis is added.
pub fn clean(text: &str, max_chars: usize) -> String {
    let collapsed = collapse_whitespace(text);
    match collapsed.char_indices().nth(max_chars) {
        Some((cut, _)) => collapsed[..cut].to_string(),
        None => collapsed,
    }
}

/// Like [`clean`] for values that may be absent
pub fn clean_opt(text: Option<&str>, max_chars: usize) -> String {
    text.map(|t| clean(t, max_chars)).unwrap_or_default()
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_newlines_and_runs() {
        assert_eq!(
            clean("  Sony\n\n  WH-1000XM5 \t Hörlurar  ", 200),
            "Sony WH-1000XM5 Hörlurar"
        );
    }

    #[test]
    fn test_hard_cut_counts_characters() {
        // multi-byte characters must not split
        assert_eq!(clean("åäöåäö", 4), "åäöå");
        assert_eq!(clean("abc def", 4), "abc ");
        assert_eq!(clean("short", 300), "short");
    }

    #[test]
    fn test_non_breaking_space_is_whitespace() {
        assert_eq!(clean("1\u{a0}299\u{a0}kr", 50), "1 299 kr");
    }

    #[test]
    fn test_empty_and_absent() {
        assert_eq!(clean("", 10), "");
        assert_eq!(clean(" \n\t ", 10), "");
        assert_eq!(clean_opt(None, 10), "");
        assert_eq!(clean("anything", 0), "");
    }
}
