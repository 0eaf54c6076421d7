use question_bank::infrastructure::text_processing::sanitize_extracted_text;

#[test]
fn given_text_with_fi_ligature_when_sanitizing_then_decomposes_to_fi() {
    assert_eq!(sanitize_extracted_text("ﬁnding the ﬁle"), "finding the file");
}

#[test]
fn given_text_with_excessive_newlines_when_sanitizing_then_collapses_to_paragraph_breaks() {
    let input = "paragraph one\n\n\n\n\nparagraph two";

    assert_eq!(sanitize_extracted_text(input), "paragraph one\n\nparagraph two");
}

#[test]
fn given_text_with_redundant_spaces_when_sanitizing_then_collapses_to_single_space() {
    assert_eq!(sanitize_extracted_text("hello    world\t\ttest"), "hello world test");
}

#[test]
fn given_whitespace_only_text_when_sanitizing_then_returns_empty() {
    assert_eq!(sanitize_extracted_text("   \n\n  "), "");
}

#[test]
fn given_text_with_hyphenated_line_break_when_sanitizing_then_merges_word() {
    assert_eq!(
        sanitize_extracted_text("This is a process-\ning step"),
        "This is a processing step"
    );
}

#[test]
fn given_control_characters_when_sanitizing_then_they_are_dropped() {
    assert_eq!(sanitize_extracted_text("Unit\u{0}1\u{7}"), "Unit1");
}

#[test]
fn given_form_feed_between_pages_when_sanitizing_then_becomes_line_break() {
    assert_eq!(sanitize_extracted_text("page one\u{000C}page two"), "page one\npage two");
}
