use question_bank::domain::{DocumentRole, is_pdf_upload};

#[test]
fn given_pdf_mime_when_validating_then_accepted() {
    assert!(is_pdf_upload("notes.pdf", Some("application/pdf")));
    assert!(is_pdf_upload("NOTES", Some("application/pdf")));
    assert!(is_pdf_upload("old.pdf", Some("application/x-pdf")));
}

#[test]
fn given_other_declared_mime_when_validating_then_rejected_even_with_pdf_extension() {
    assert!(!is_pdf_upload("notes.pdf", Some("text/plain")));
    assert!(!is_pdf_upload("slides.docx", Some("application/msword")));
}

#[test]
fn given_missing_or_generic_mime_when_validating_then_extension_decides() {
    assert!(is_pdf_upload("book.PDF", None));
    assert!(is_pdf_upload("book.pdf", Some("application/octet-stream")));
    assert!(!is_pdf_upload("book.txt", None));
}

#[test]
fn given_roles_when_reading_form_fields_then_match_upload_contract() {
    assert_eq!(DocumentRole::Reference.form_field(), "reference_book");
    assert_eq!(DocumentRole::Syllabus.form_field(), "syllabus");
}
