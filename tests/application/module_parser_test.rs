use question_bank::application::services::parse_modules;

#[test]
fn given_json_array_reply_when_parsing_then_returns_modules_in_order() {
    let reply = r#"Here are the modules:
[
  {"module_id": "Unit A", "title": "Sorting", "description": "Ordering data", "topics": ["quicksort", "mergesort"]},
  {"module_id": "Unit B", "title": "Graphs", "description": "Networks", "topics": ["BFS"]}
]
Hope this helps."#;

    let modules = parse_modules(reply);

    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0].module_id, "Unit A");
    assert_eq!(modules[0].title, "Sorting");
    assert_eq!(modules[0].topics, vec!["quicksort", "mergesort"]);
    assert_eq!(modules[1].module_id, "Unit B");
}

#[test]
fn given_numeric_module_id_when_parsing_then_prefixes_with_module() {
    let reply = r#"[{"module_id": 4, "title": "Trees", "topics": []}]"#;

    let modules = parse_modules(reply);

    assert_eq!(modules[0].module_id, "Module 4");
}

#[test]
fn given_missing_fields_when_parsing_then_fills_from_position() {
    let reply = r#"[{"topics": ["heaps"]}, {"title": "Tries"}]"#;

    let modules = parse_modules(reply);

    assert_eq!(modules[0].module_id, "Module 1");
    assert_eq!(modules[0].title, "Module 1");
    assert_eq!(modules[1].module_id, "Module 2");
    assert_eq!(modules[1].title, "Tries");
}

#[test]
fn given_outline_reply_when_parsing_then_headers_become_modules_and_dashes_topics() {
    let reply = "## Unit 1: Foundations\n- sets\n- logic\n\n**Unit 2: Proofs**\n- induction";

    let modules = parse_modules(reply);

    assert_eq!(modules.len(), 2);
    assert_eq!(modules[0].module_id, "Unit 1: Foundations");
    assert_eq!(modules[0].topics, vec!["sets", "logic"]);
    assert_eq!(modules[1].module_id, "Unit 2: Proofs");
    assert_eq!(modules[1].topics, vec!["induction"]);
}

#[test]
fn given_reply_without_modules_when_parsing_then_returns_empty() {
    assert!(parse_modules("I could not find anything useful.").is_empty());
}

#[test]
fn given_empty_json_array_when_parsing_then_returns_empty() {
    assert!(parse_modules("[]").is_empty());
}
