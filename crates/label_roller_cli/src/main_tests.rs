use super::*;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("label-roller").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn test_cli_definition_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn test_parse_pull() {
    let cli = parse(&["pull", "octo/widgets"]);

    match cli.command {
        Commands::Pull(args) => assert_eq!(args.target, "octo/widgets"),
        _ => panic!("Expected pull"),
    }
}

#[test]
fn test_parse_push_flags() {
    let cli = parse(&[
        "push",
        "octo",
        "--keep-defaults",
        "--dry-run",
        "--file",
        "labels.json",
        "--config",
        "custom.toml",
    ]);

    assert_eq!(cli.config.as_deref(), Some("custom.toml"));
    match cli.command {
        Commands::Push(args) => {
            assert_eq!(args.target, "octo");
            assert!(args.keep_defaults);
            assert!(args.dry_run);
            assert_eq!(
                args.file.as_deref(),
                Some(std::path::Path::new("labels.json"))
            );
        }
        _ => panic!("Expected push"),
    }
}

#[test]
fn test_parse_rename() {
    let cli = parse(&["rename", "octo/widgets", "bug", "type: bug"]);

    match cli.command {
        Commands::Rename(args) => {
            assert_eq!(args.target, "octo/widgets");
            assert_eq!(args.old, "bug");
            assert_eq!(args.new, "type: bug");
        }
        _ => panic!("Expected rename"),
    }
}

#[test]
fn test_parse_delete_with_label_and_defaults() {
    let cli = parse(&["delete", "--defaults", "stale", "octo"]);

    match cli.command {
        Commands::Delete(args) => {
            assert!(args.defaults);
            assert_eq!(args.args, vec!["stale", "octo"]);
        }
        _ => panic!("Expected delete"),
    }
}

#[test]
fn test_parse_delete_rejects_missing_target() {
    let result = Cli::try_parse_from(["label-roller", "delete", "--defaults"]);

    assert!(result.is_err());
}

#[test]
fn test_parse_delete_rejects_extra_arguments() {
    let result = Cli::try_parse_from(["label-roller", "delete", "a", "b", "octo"]);

    assert!(result.is_err());
}
