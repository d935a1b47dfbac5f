use std::path::PathBuf;

use super::*;

#[test]
fn cli_check_default_path() {
    let cli = Cli::parse_from(["osprey-lint", "check"]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.paths, vec![PathBuf::from(".")]);
            assert_eq!(args.format, OutputFormat::Text);
            assert!(args.disable.is_empty());
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_check_with_paths_and_config() {
    let cli = Cli::parse_from(["osprey-lint", "check", "src", "lib", "-c", "lint.toml"]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.paths, vec![PathBuf::from("src"), PathBuf::from("lib")]);
            assert_eq!(args.config, Some(PathBuf::from("lint.toml")));
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_check_with_extensions() {
    let cli = Cli::parse_from(["osprey-lint", "check", "--ext", "osp,ospx"]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(
                args.ext,
                Some(vec!["osp".to_string(), "ospx".to_string()])
            );
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_check_disable_parses_rule_ids() {
    let cli = Cli::parse_from([
        "osprey-lint",
        "check",
        "--disable",
        "trailing-whitespace",
        "--disable",
        "final-newline",
    ]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(
                args.disable,
                vec![RuleId::TrailingWhitespace, RuleId::FinalNewline]
            );
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_check_rejects_unknown_rule() {
    let result = Cli::try_parse_from(["osprey-lint", "check", "--disable", "no-tabs"]);
    assert!(result.is_err());
}

#[test]
fn cli_check_format_and_line_length() {
    let cli = Cli::parse_from([
        "osprey-lint",
        "check",
        "--format",
        "sarif",
        "--max-line-length",
        "100",
    ]);
    match cli.command {
        Commands::Check(args) => {
            assert_eq!(args.format, OutputFormat::Sarif);
            assert_eq!(args.max_line_length, Some(100));
        }
        _ => panic!("Expected Check command"),
    }
}

#[test]
fn cli_global_flags() {
    let cli = Cli::parse_from(["osprey-lint", "-vv", "--no-config", "--color", "never", "rules"]);
    assert_eq!(cli.verbose, 2);
    assert!(cli.no_config);
    assert!(matches!(cli.color, ColorChoice::Never));
    assert!(matches!(cli.command, Commands::Rules));
}

#[test]
fn cli_init_defaults() {
    let cli = Cli::parse_from(["osprey-lint", "init"]);
    match cli.command {
        Commands::Init(args) => {
            assert_eq!(args.output, PathBuf::from(".osprey-lint.toml"));
            assert!(!args.force);
        }
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn cli_config_show_json() {
    let cli = Cli::parse_from(["osprey-lint", "config", "show", "--format", "json"]);
    match cli.command {
        Commands::Config(ConfigArgs {
            action: ConfigAction::Show { config, format },
        }) => {
            assert!(config.is_none());
            assert_eq!(format, ConfigFormat::Json);
        }
        _ => panic!("Expected Config Show command"),
    }
}
