/// Join text fragments into one string, trimming the ends and collapsing
/// every internal whitespace run (including non-breaking spaces) to one space.
pub fn normalize_text<'a, I>(parts: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = String::new();
    for part in parts {
        for word in part.split_whitespace() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(word);
        }
    }
    out
}

/// Number of requests needed to send `len` items `size` at a time.
pub fn batch_count(len: usize, size: usize) -> usize {
    if size == 0 {
        return 0;
    }
    (len + size - 1) / size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_whitespace_across_fragments() {
        let s = normalize_text(["  Song\n", "\u{a0}Title  ", "", " (Live)"]);
        assert_eq!(s, "Song Title (Live)");
    }

    #[test]
    fn normalize_empty_is_empty() {
        assert_eq!(normalize_text(["   ", "\n"]), "");
    }

    #[test]
    fn batch_count_rounds_up() {
        assert_eq!(batch_count(0, 100), 0);
        assert_eq!(batch_count(1, 100), 1);
        assert_eq!(batch_count(100, 100), 1);
        assert_eq!(batch_count(101, 100), 2);
        assert_eq!(batch_count(250, 100), 3);
    }
}
