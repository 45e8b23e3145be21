use super::*;

fn live(name: &str, description: &str, color: &str, is_default: bool) -> LiveLabel {
    LiveLabel {
        name: name.to_string(),
        description: description.to_string(),
        color: color.to_string(),
        is_default,
    }
}

#[test]
fn test_label_spec_decodes_all_fields() {
    let spec: LabelSpec = serde_json::from_str(
        r#"{"name": "type: bug", "description": "Something is broken", "color": "d73a4a", "from": "bug"}"#,
    )
    .unwrap();

    assert_eq!(spec.name, "type: bug");
    assert_eq!(spec.description, "Something is broken");
    assert_eq!(spec.color, "d73a4a");
    assert_eq!(spec.from.as_deref(), Some("bug"));
}

#[test]
fn test_label_spec_description_and_from_are_optional() {
    let spec: LabelSpec = serde_json::from_str(r#"{"name": "x", "color": "fff"}"#).unwrap();

    assert_eq!(spec.description, "");
    assert_eq!(spec.from, None);
    assert_eq!(spec.rename_source(), None);
}

#[test]
fn test_label_spec_rejects_unknown_fields() {
    let result = serde_json::from_str::<LabelSpec>(r#"{"name": "x", "colour": "fff"}"#);

    assert!(result.is_err());
}

#[test]
fn test_empty_from_is_not_a_rename_source() {
    let spec = LabelSpec::new("x", "", "fff").renamed_from("");

    assert_eq!(spec.rename_source(), None);
}

#[test]
fn test_is_satisfied_by_ignores_color_case() {
    let spec = LabelSpec::new("bug", "Broken", "D73A4A");

    assert!(spec.is_satisfied_by(&live("bug", "Broken", "d73a4a", true)));
    assert!(!spec.is_satisfied_by(&live("bug", "Broken!", "d73a4a", true)));
    assert!(!spec.is_satisfied_by(&live("Bug", "Broken", "d73a4a", true)));
    assert!(!spec.is_satisfied_by(&live("bug", "Broken", "ffffff", true)));
}

#[test]
fn test_payload_carries_name_description_and_color() {
    let spec = LabelSpec::new("type: bug", "Broken", "d73a4a").renamed_from("bug");

    let payload = spec.payload();

    assert_eq!(payload.name, "type: bug");
    assert_eq!(payload.description, "Broken");
    assert_eq!(payload.color, "d73a4a");
}

#[test]
fn test_desired_set_indexes_by_name_and_from() {
    let set = DesiredSet::new(vec![
        LabelSpec::new("type: bug", "", "d73a4a").renamed_from("bug"),
        LabelSpec::new("docs", "", "0075ca"),
    ])
    .unwrap();

    assert_eq!(set.len(), 2);
    assert!(!set.is_empty());
    assert_eq!(set.by_name("docs").map(|s| s.color.as_str()), Some("0075ca"));
    assert_eq!(set.by_from("bug").map(|s| s.name.as_str()), Some("type: bug"));
    assert!(set.by_from("docs").is_none());
    assert!(set.by_name("bug").is_none());
}

#[test]
fn test_desired_set_keeps_declaration_order() {
    let set = DesiredSet::new(vec![
        LabelSpec::new("z", "", "fff"),
        LabelSpec::new("a", "", "fff"),
        LabelSpec::new("m", "", "fff"),
    ])
    .unwrap();

    let names: Vec<&str> = set.specs().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["z", "a", "m"]);
}

#[test]
fn test_desired_set_rejects_duplicate_names() {
    let result = DesiredSet::new(vec![
        LabelSpec::new("bug", "", "fff"),
        LabelSpec::new("bug", "again", "000"),
    ]);

    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::DuplicateName {
            name: "bug".to_string()
        }
    );
}

#[test]
fn test_desired_set_rejects_duplicate_from() {
    let result = DesiredSet::new(vec![
        LabelSpec::new("type: bug", "", "fff").renamed_from("bug"),
        LabelSpec::new("kind: bug", "", "000").renamed_from("bug"),
    ]);

    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::DuplicateFrom {
            from: "bug".to_string(),
            first: "type: bug".to_string(),
            second: "kind: bug".to_string(),
        }
    );
}

#[test]
fn test_desired_set_allows_repeated_empty_from() {
    let result = DesiredSet::new(vec![
        LabelSpec::new("a", "", "fff").renamed_from(""),
        LabelSpec::new("b", "", "000").renamed_from(""),
    ]);

    assert!(result.is_ok());
}

#[test]
fn test_empty_desired_set_is_valid() {
    let set = DesiredSet::new(Vec::new()).unwrap();

    assert!(set.is_empty());
    assert!(set.conflicting_sources().is_empty());
}

#[test]
fn test_conflicting_sources_reports_named_and_renaming_spec() {
    let set = DesiredSet::new(vec![
        LabelSpec::new("bug", "", "fff"),
        LabelSpec::new("type: bug", "", "000").renamed_from("bug"),
    ])
    .unwrap();

    let conflicts = set.conflicting_sources();

    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].0.name, "bug");
    assert_eq!(conflicts[0].1.name, "type: bug");
}

#[test]
fn test_self_rename_is_not_a_conflict() {
    let set = DesiredSet::new(vec![LabelSpec::new("bug", "", "fff").renamed_from("bug")]).unwrap();

    assert!(set.conflicting_sources().is_empty());
}

#[test]
fn test_from_json_reader_accepts_valid_array() {
    let input = r#"[
        {"name": "type: bug", "description": "Broken", "color": "d73a4a", "from": "bug"},
        {"name": "docs", "color": "0075ca"}
    ]"#;

    let set = DesiredSet::from_json_reader(input.as_bytes()).unwrap();

    assert_eq!(set.len(), 2);
}

#[test]
fn test_from_json_reader_rejects_unknown_field() {
    let input = r#"[{"name": "x", "color": "fff", "colour": "000"}]"#;

    let err = DesiredSet::from_json_reader(input.as_bytes()).unwrap_err();

    match err {
        ConfigurationError::InvalidInput { reason } => assert!(reason.contains("colour")),
        other => panic!("Expected InvalidInput, got {:?}", other),
    }
}

#[test]
fn test_from_json_reader_rejects_malformed_json() {
    let err = DesiredSet::from_json_reader("[{\"name\": ".as_bytes()).unwrap_err();

    assert!(matches!(err, ConfigurationError::InvalidInput { .. }));
}

#[test]
fn test_from_json_reader_rejects_non_array() {
    let err = DesiredSet::from_json_reader(r#"{"name": "x", "color": "fff"}"#.as_bytes())
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::InvalidInput { .. }));
}

#[test]
fn test_from_json_reader_reports_duplicates() {
    let input = r#"[{"name": "x", "color": "fff"}, {"name": "x", "color": "000"}]"#;

    let err = DesiredSet::from_json_reader(input.as_bytes()).unwrap_err();

    assert!(matches!(err, ConfigurationError::DuplicateName { .. }));
}

#[test]
fn test_export_labels_drops_default_flag() {
    let labels = vec![
        live("bug", "Broken", "d73a4a", true),
        live("docs", "", "0075ca", false),
    ];

    let exported = export_labels(&labels);

    assert_eq!(
        exported,
        vec![
            LabelSpec::new("bug", "Broken", "d73a4a"),
            LabelSpec::new("docs", "", "0075ca"),
        ]
    );
}

#[test]
fn test_write_labels_json_uses_four_space_indent() {
    let mut output = Vec::new();

    write_labels_json(&mut output, &[LabelSpec::new("bug", "Broken", "d73a4a")]).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert_eq!(
        text,
        "[\n    {\n        \"name\": \"bug\",\n        \"description\": \"Broken\",\n        \"color\": \"d73a4a\"\n    }\n]\n"
    );
}

#[test]
fn test_write_labels_json_empty_list() {
    let mut output = Vec::new();

    write_labels_json(&mut output, &[]).unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "[]\n");
}

#[test]
fn test_exported_output_is_valid_push_input() {
    let labels = vec![
        live("bug", "Broken", "d73a4a", true),
        live("good first issue", "", "7057ff", true),
    ];
    let mut output = Vec::new();
    write_labels_json(&mut output, &export_labels(&labels)).unwrap();

    let set = DesiredSet::from_json_reader(output.as_slice()).unwrap();

    assert_eq!(set.len(), 2);
    assert!(set.by_name("good first issue").is_some());
}
