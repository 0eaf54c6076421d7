use serde::Deserialize;
use serde_json::Value;

use crate::domain::SyllabusModule;

const OUTLINE_KEYWORDS: [&str; 4] = ["module", "unit", "chapter", "topic"];

#[derive(Deserialize)]
struct RawModule {
    #[serde(default)]
    module_id: Value,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    topics: Vec<Value>,
}

impl RawModule {
    fn into_module(self, position: usize) -> SyllabusModule {
        let module_id = match self.module_id {
            Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
            Value::Number(n) => format!("Module {}", n),
            _ => format!("Module {}", position + 1),
        };
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| module_id.clone());
        let topics = self
            .topics
            .into_iter()
            .filter_map(|t| match t {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                _ => None,
            })
            .collect();

        SyllabusModule::new(module_id, title, self.description.unwrap_or_default(), topics)
    }
}
pub fn parse_modules(content: &str) -> Vec<SyllabusModule> {
    match parse_json_modules(content) {
        Some(modules) => modules,
        None => parse_outline_modules(content),
    }
}

fn parse_json_modules(content: &str) -> Option<Vec<SyllabusModule>> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    if end <= start {
        return None;
    }

    let raw: Vec<RawModule> = serde_json::from_str(&content[start..=end]).ok()?;
    Some(
        raw.into_iter()
            .enumerate()
            .map(|(position, module)| module.into_module(position))
            .collect(),
    )
}

fn parse_outline_modules(content: &str) -> Vec<SyllabusModule> {
    let mut modules = Vec::new();
    let mut current: Option<SyllabusModule> = None;

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let lower = line.to_lowercase();
        if OUTLINE_KEYWORDS.iter().any(|k| lower.contains(k)) && !line.starts_with('-') {
            if let Some(module) = current.take() {
                modules.push(module);
            }
            let heading = line.trim_matches(|c: char| c == '#' || c == '*').trim();
            current = Some(SyllabusModule::new(
                heading,
                heading,
                "Module content analysis",
                Vec::new(),
            ));
        } else if let Some(topic) = line.strip_prefix('-') {
            if let Some(module) = current.as_mut() {
                module.topics.push(topic.trim().to_string());
            }
        }
    }

    if let Some(module) = current {
        modules.push(module);
    }

    modules
}
