use std::collections::HashSet;

use crate::domain::ModuleQuestions;

const MAX_SHEET_NAME_CHARS: usize = 31;
const FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Excel-safe, case-insensitively unique worksheet names, one per module.
pub fn sheet_names(modules: &[ModuleQuestions]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::new();

    modules
        .iter()
        .enumerate()
        .map(|(index, set)| {
            let base = clean(&set.module.module_id)
                .or_else(|| clean(&set.module.title))
                .unwrap_or_else(|| format!("Module {}", index + 1));

            let mut candidate = base.clone();
            let mut suffix = 2;
            while !taken.insert(candidate.to_lowercase()) {
                let tail = format!(" ({})", suffix);
                let keep = MAX_SHEET_NAME_CHARS - tail.chars().count();
                candidate = format!("{}{}", take_chars(&base, keep).trim_end(), tail);
                suffix += 1;
            }
            candidate
        })
        .collect()
}

fn clean(raw: &str) -> Option<String> {
    let replaced: String = raw
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if FORBIDDEN.contains(&c) { '-' } else { c })
        .collect();
    let trimmed = replaced.trim().trim_matches('\'').trim();
    let name = take_chars(trimmed, MAX_SHEET_NAME_CHARS).trim_end().to_string();

    if name.is_empty() || name.eq_ignore_ascii_case("history") {
        None
    } else {
        Some(name)
    }
}

fn take_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
