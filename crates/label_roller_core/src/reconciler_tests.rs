use super::*;
use proptest::prelude::*;

fn live(name: &str, color: &str, is_default: bool) -> LiveLabel {
    LiveLabel {
        name: name.to_string(),
        description: String::new(),
        color: color.to_string(),
        is_default,
    }
}

fn spec(name: &str, color: &str) -> LabelSpec {
    LabelSpec::new(name, "", color)
}

fn desired(specs: Vec<LabelSpec>) -> DesiredSet {
    DesiredSet::new(specs).unwrap()
}

/// Applies operations to a live label list the way GitHub would.
fn apply(live: &[LiveLabel], operations: &[Operation]) -> Vec<LiveLabel> {
    let mut labels = live.to_vec();
    for op in operations {
        match op {
            Operation::Edit { current_name, spec } => {
                let label = labels
                    .iter_mut()
                    .find(|l| l.name == *current_name)
                    .expect("edit of a missing label");
                label.name = spec.name.clone();
                label.description = spec.description.clone();
                label.color = spec.color.clone();
            }
            Operation::Create(spec) => labels.push(LiveLabel {
                name: spec.name.clone(),
                description: spec.description.clone(),
                color: spec.color.clone(),
                is_default: false,
            }),
            Operation::Delete(name) => labels.retain(|l| l.name != *name),
        }
    }
    labels
}

#[test]
fn test_empty_live_creates_in_declaration_order() {
    let set = desired(vec![spec("A", "fff"), spec("B", "000")]);

    let plan = plan(&set, &[], false).unwrap();

    assert_eq!(
        plan.operations(),
        &[
            Operation::Create(spec("A", "fff")),
            Operation::Create(spec("B", "000")),
        ]
    );
    assert_eq!(plan.creates(), 2);
}

#[test]
fn test_rename_from_existing_label_is_single_edit() {
    let target = spec("type: bug", "d73a4a").renamed_from("bug");
    let set = desired(vec![target.clone()]);

    let plan = plan(&set, &[live("bug", "d73a4a", true)], false).unwrap();

    assert_eq!(
        plan.operations(),
        &[Operation::Edit {
            current_name: "bug".to_string(),
            spec: target,
        }]
    );
    assert_eq!(plan.creates(), 0);
}

#[test]
fn test_rename_without_live_source_creates() {
    let target = spec("type: bug", "d73a4a").renamed_from("bug");
    let set = desired(vec![target.clone()]);

    let plan = plan(&set, &[], false).unwrap();

    assert_eq!(plan.operations(), &[Operation::Create(target)]);
}

#[test]
fn test_name_and_from_conflict_is_rejected() {
    let set = desired(vec![
        spec("bug", "fff"),
        spec("type: bug", "000").renamed_from("bug"),
    ]);

    let err = plan(&set, &[live("bug", "fff", true)], false).unwrap_err();

    match err {
        LabelSyncError::Configuration(ConfigurationError::RenameConflict { named, renaming }) => {
            assert_eq!(named, "bug");
            assert_eq!(renaming, "type: bug");
        }
        other => panic!("Expected RenameConflict, got {:?}", other),
    }
}

#[test]
fn test_name_and_from_overlap_without_live_label_is_not_a_conflict() {
    let set = desired(vec![
        spec("bug", "fff"),
        spec("type: bug", "000").renamed_from("bug"),
    ]);

    let plan = plan(&set, &[], false).unwrap();

    assert_eq!(plan.creates(), 2);
}

#[test]
fn test_self_rename_is_direct_match() {
    let target = spec("bug", "000").renamed_from("bug");
    let set = desired(vec![target.clone()]);

    let plan = plan(&set, &[live("bug", "fff", true)], false).unwrap();

    assert_eq!(
        plan.operations(),
        &[Operation::Edit {
            current_name: "bug".to_string(),
            spec: target,
        }]
    );
}

#[test]
fn test_matching_label_needs_no_edit() {
    let set = desired(vec![spec("bug", "D73A4A")]);

    let plan = plan(&set, &[live("bug", "d73a4a", true)], false).unwrap();

    assert!(plan.is_empty());
    assert_eq!(plan.unchanged(), 1);
}

#[test]
fn test_changed_color_is_edited_in_place() {
    let set = desired(vec![spec("bug", "000000")]);

    let plan = plan(&set, &[live("bug", "d73a4a", false)], false).unwrap();

    assert_eq!(plan.edits(), 1);
    assert_eq!(plan.operations()[0].to_string(), "update 'bug'");
}

#[test]
fn test_unmatched_default_is_deleted() {
    let set = desired(vec![spec("docs", "fff")]);
    let labels = vec![live("wontfix", "fff", true), live("docs", "fff", false)];

    let plan = plan(&set, &labels, false).unwrap();

    assert_eq!(plan.operations(), &[Operation::Delete("wontfix".to_string())]);
}

#[test]
fn test_unmatched_non_default_is_left_alone() {
    let set = desired(vec![]);

    let plan = plan(&set, &[live("team: infra", "fff", false)], false).unwrap();

    assert!(plan.is_empty());
}

#[test]
fn test_keep_defaults_leaves_every_unmatched_label() {
    let set = desired(vec![spec("docs", "fff")]);
    let labels = vec![
        live("wontfix", "fff", true),
        live("team: infra", "fff", false),
    ];

    let plan = plan(&set, &labels, true).unwrap();

    assert_eq!(plan.operations(), &[Operation::Create(spec("docs", "fff"))]);
}

#[test]
fn test_rename_wins_over_keep_defaults() {
    let target = spec("type: bug", "d73a4a").renamed_from("bug");
    let set = desired(vec![target.clone()]);

    let plan = plan(&set, &[live("bug", "d73a4a", true)], true).unwrap();

    assert_eq!(
        plan.operations(),
        &[Operation::Edit {
            current_name: "bug".to_string(),
            spec: target,
        }]
    );
}

#[test]
fn test_existing_target_wins_over_rename_source() {
    let target = spec("type: bug", "d73a4a").renamed_from("bug");
    let set = desired(vec![target.clone()]);
    let labels = vec![live("bug", "fff", true), live("type: bug", "000", false)];

    let plan = plan(&set, &labels, false).unwrap();

    assert_eq!(
        plan.operations(),
        &[
            Operation::Delete("bug".to_string()),
            Operation::Edit {
                current_name: "type: bug".to_string(),
                spec: target,
            },
        ]
    );
}

#[test]
fn test_edits_and_deletes_precede_creates() {
    let set = desired(vec![
        spec("new", "fff"),
        spec("type: bug", "000").renamed_from("bug"),
    ]);
    let labels = vec![live("bug", "fff", true), live("question", "fff", true)];

    let plan = plan(&set, &labels, false).unwrap();

    let rendered: Vec<String> = plan.operations().iter().map(|op| op.to_string()).collect();
    assert_eq!(
        rendered,
        vec![
            "rename 'bug' to 'type: bug'",
            "delete 'question'",
            "create 'new'",
        ]
    );
}

#[test]
fn test_duplicate_live_labels_are_an_internal_error() {
    let set = desired(vec![spec("bug", "fff")]);
    let labels = vec![live("bug", "000", false), live("bug", "111", false)];

    let err = plan(&set, &labels, false).unwrap_err();

    assert!(matches!(err, LabelSyncError::Internal(_)));
}

#[test]
fn test_operation_target_name() {
    assert_eq!(Operation::Create(spec("a", "fff")).target_name(), "a");
    assert_eq!(Operation::Delete("b".to_string()).target_name(), "b");
    assert_eq!(
        Operation::Edit {
            current_name: "x".to_string(),
            spec: spec("c", "fff"),
        }
        .target_name(),
        "c"
    );
}

const NAMES: [&str; 6] = ["bug", "docs", "feature", "question", "type: bug", "wontfix"];
const COLORS: [&str; 3] = ["fff", "FFF", "000"];

fn desired_strategy() -> impl Strategy<Value = DesiredSet> {
    prop::collection::vec(
        (0..NAMES.len(), prop::option::of(0..NAMES.len()), 0..COLORS.len()),
        0..6,
    )
    .prop_map(|entries| {
        let mut names = HashSet::new();
        let mut sources = HashSet::new();
        let specs = entries
            .into_iter()
            .filter_map(|(name, from, color)| {
                if !names.insert(name) {
                    return None;
                }
                let mut label = spec(NAMES[name], COLORS[color]);
                if let Some(from) = from {
                    if sources.insert(from) {
                        label = label.renamed_from(NAMES[from]);
                    }
                }
                Some(label)
            })
            .collect();
        desired(specs)
    })
}

fn live_strategy() -> impl Strategy<Value = Vec<LiveLabel>> {
    prop::collection::vec((0..NAMES.len(), 0..COLORS.len(), any::<bool>()), 0..6).prop_map(
        |entries| {
            let mut names = HashSet::new();
            entries
                .into_iter()
                .filter(|(name, _, _)| names.insert(*name))
                .map(|(name, color, is_default)| live(NAMES[name], COLORS[color], is_default))
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn plan_never_targets_a_name_twice(
        set in desired_strategy(),
        labels in live_strategy(),
        keep_defaults in any::<bool>(),
    ) {
        let result = plan(&set, &labels, keep_defaults);
        prop_assume!(!matches!(result, Err(LabelSyncError::Configuration(_))));
        let plan = result.unwrap();

        let mut targets = HashSet::new();
        for op in plan.operations() {
            prop_assert!(targets.insert(op.target_name().to_string()), "duplicate target {}", op);
        }
    }

    #[test]
    fn plan_reaches_desired_state(
        set in desired_strategy(),
        labels in live_strategy(),
        keep_defaults in any::<bool>(),
    ) {
        let result = plan(&set, &labels, keep_defaults);
        prop_assume!(!matches!(result, Err(LabelSyncError::Configuration(_))));
        let after = apply(&labels, result.unwrap().operations());

        let names: HashSet<&str> = after.iter().map(|l| l.name.as_str()).collect();
        prop_assert_eq!(names.len(), after.len());
        for spec in set.specs() {
            let label = after.iter().find(|l| l.name == spec.name);
            prop_assert!(label.is_some_and(|l| spec.is_satisfied_by(l)));
        }
    }

    #[test]
    fn plan_is_idempotent(
        set in desired_strategy(),
        labels in live_strategy(),
        keep_defaults in any::<bool>(),
    ) {
        // A name that is both declared and renamed from becomes a conflict
        // as soon as the declared label exists.
        prop_assume!(set.conflicting_sources().is_empty());
        let result = plan(&set, &labels, keep_defaults);
        prop_assume!(result.is_ok());
        let after = apply(&labels, result.unwrap().operations());

        let second = plan(&set, &after, keep_defaults).unwrap();

        prop_assert!(second.is_empty(), "second plan: {:?}", second.operations());
    }
}
