//! Filesystem-safe filename stems for output artifacts.

/// Reduce a document title to a filesystem-safe filename stem.
///
/// Retains alphanumerics, spaces, underscores and hyphens; drops every
/// other character; trims trailing whitespace. May return an empty string —
/// substituting a timestamp-based fallback name is the caller's job.
pub fn sanitize_stem(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect();
    kept.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punctuation_is_dropped_spaces_retained() {
        assert_eq!(sanitize_stem("Q1 Review: Final!!"), "Q1 Review Final");
    }

    #[test]
    fn safe_characters_pass_through() {
        assert_eq!(sanitize_stem("standup_2024-03-01"), "standup_2024-03-01");
    }

    #[test]
    fn trailing_whitespace_is_trimmed() {
        assert_eq!(sanitize_stem("Kickoff?  "), "Kickoff");
    }

    #[test]
    fn path_separators_are_dropped() {
        assert_eq!(sanitize_stem("../etc/passwd"), "etcpasswd");
    }

    #[test]
    fn accented_letters_are_alphanumeric() {
        assert_eq!(sanitize_stem("Café Sync"), "Café Sync");
    }

    #[test]
    fn all_unsafe_title_yields_empty_stem() {
        assert_eq!(sanitize_stem("???***"), "");
        assert_eq!(sanitize_stem(""), "");
    }
}
