use crate::domain::SyllabusModule;

const MAX_RELEVANT_PARAGRAPHS: usize = 10;
const FALLBACK_CONTEXT_CHARS: usize = 4000;
pub fn select_module_context(reference_text: &str, module: &SyllabusModule) -> String {
    let keywords: Vec<String> = module
        .topics
        .iter()
        .chain(std::iter::once(&module.title))
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    let relevant: Vec<&str> = reference_text
        .split("\n\n")
        .filter(|paragraph| {
            let lower = paragraph.to_lowercase();
            keywords.iter().any(|k| lower.contains(k.as_str()))
        })
        .take(MAX_RELEVANT_PARAGRAPHS)
        .collect();

    if relevant.is_empty() {
        truncate_chars(reference_text, FALLBACK_CONTEXT_CHARS).to_string()
    } else {
        relevant.join("\n\n")
    }
}
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
