/// Normalizes free text into checklist-item syntax.
///
/// Multi-line input that isn't already a bullet is kept verbatim: there is
/// no single obvious item boundary for it, so the text lands in the
/// container unchanged.
pub fn normalize(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if trimmed.starts_with("- [ ]") || starts_with_checked_marker(trimmed) {
        return trimmed.to_owned();
    }

    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
    {
        return format!("- [ ] {rest}");
    }

    if trimmed.contains('\n') {
        return trimmed.to_owned();
    }

    format!("- [ ] {trimmed}")
}

fn starts_with_checked_marker(text: &str) -> bool {
    text.get(..5)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("- [x]"))
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn plain_text_becomes_an_unchecked_item() {
        assert_eq!(normalize("买牛奶"), "- [ ] 买牛奶");
        assert_eq!(normalize("  call the plumber  "), "- [ ] call the plumber");
    }

    #[test]
    fn existing_markers_are_kept() {
        assert_eq!(normalize("- [ ] a"), "- [ ] a");
        assert_eq!(normalize("- [x] done"), "- [x] done");
        assert_eq!(normalize("- [X] done"), "- [X] done");
    }

    #[test]
    fn bullets_are_upgraded_to_checklist_items() {
        assert_eq!(normalize("- buy milk"), "- [ ] buy milk");
        assert_eq!(normalize("* buy milk"), "- [ ] buy milk");
    }

    #[test]
    fn multiline_text_is_left_verbatim() {
        assert_eq!(normalize("first\nsecond"), "first\nsecond");
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in [
            "买牛奶",
            "- buy milk",
            "* buy milk",
            "- [ ] a",
            "- [X] done",
            "first\nsecond",
            "  padded  ",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }
}
