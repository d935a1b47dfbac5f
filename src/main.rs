use std::fmt::Write;
use std::fs;
use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use osprey_lint::cli::{CheckArgs, Cli, ColorChoice, Commands, ConfigAction, ConfigFormat, InitArgs};
use osprey_lint::config::{
    Config, ConfigLoader, FileConfigLoader, LoadResult, RuleConfiguration,
    validate_config_semantics,
};
use osprey_lint::linter::{Linter, Report};
use osprey_lint::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, SarifFormatter, ScanProgress,
    TextFormatter,
};
use osprey_lint::rules::RuleRegistry;
use osprey_lint::scanner::{DirectoryScanner, GlobFilter};
use osprey_lint::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS, OspreyLintError};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let exit_code = match &cli.command {
        Commands::Check(args) => run_check(args, &cli),
        Commands::Rules => run_rules(),
        Commands::Init(args) => run_init(args),
        Commands::Config(args) => run_config(&args.action, &cli),
    };

    std::process::exit(exit_code);
}

/// Installs the stderr log subscriber. `RUST_LOG` takes precedence over the
/// verbosity flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("osprey_lint={level}")));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_check_impl(args: &CheckArgs, cli: &Cli) -> osprey_lint::Result<i32> {
    // 1. Load configuration
    let mut config = load_config(args.config.as_deref(), cli.no_config)?.config;

    // 2. Apply CLI argument overrides, then validate the result
    apply_cli_overrides(&mut config, args);
    validate_config_semantics(&config)?;

    let mut configuration = RuleConfiguration::from_config(&config)?;
    for id in &args.disable {
        configuration.disable(*id);
    }

    // 3. Collect files
    let filter = GlobFilter::new(config.scanner.extensions.clone(), &config.scanner.exclude)?;
    let scanner = DirectoryScanner::new(filter);
    let files = scanner.collect(&args.paths)?;

    // 4. Lint (parallel with rayon)
    let linter = Linter::new(&configuration, config.settings);
    tracing::debug!(rules = linter.rule_count(), files = files.len(), "Starting lint run");

    let progress = ScanProgress::new(files.len() as u64, cli.quiet);
    let report = linter.lint_files_with(&files, |_| progress.inc());
    progress.finish();

    // 5. Format and write output
    let output = format_output(args.format, &report, color_choice_to_mode(cli.color))?;
    write_output(args.output.as_deref(), &output)?;

    // 6. Determine exit code
    if !report.is_complete() {
        Ok(EXIT_CONFIG_ERROR)
    } else if report.has_errors() {
        Ok(EXIT_VIOLATIONS)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

fn load_config(config_path: Option<&Path>, no_config: bool) -> osprey_lint::Result<LoadResult> {
    if no_config {
        return Ok(LoadResult::defaults());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

fn apply_cli_overrides(config: &mut Config, args: &CheckArgs) {
    if let Some(ext) = &args.ext {
        config.scanner.extensions.clone_from(ext);
    }

    config.scanner.exclude.extend(args.exclude.iter().cloned());

    if let Some(max_line_length) = args.max_line_length {
        config.settings.max_line_length = max_line_length;
    }
}

fn format_output(
    format: OutputFormat,
    report: &Report,
    color_mode: ColorMode,
) -> osprey_lint::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color_mode).format(report),
        OutputFormat::Json => JsonFormatter.format(report),
        OutputFormat::Sarif => SarifFormatter::new().format(report),
    }
}

fn write_output(output_path: Option<&Path>, content: &str) -> osprey_lint::Result<()> {
    if let Some(path) = output_path {
        fs::write(path, content)?;
    } else {
        print!("{content}");
    }
    Ok(())
}

fn run_rules() -> i32 {
    let registry = RuleRegistry::builtin();
    let width = registry
        .iter()
        .map(|rule| rule.id.as_str().len())
        .max()
        .unwrap_or(0);

    for rule in registry.iter() {
        println!(
            "{:<width$}  {:<7}  {}",
            rule.id.as_str(),
            rule.default_severity().as_str(),
            rule.description
        );
    }
    EXIT_SUCCESS
}

fn run_init(args: &InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_init_impl(args: &InitArgs) -> osprey_lint::Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(OspreyLintError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

fn generate_config_template() -> String {
    let mut template = String::from(
        r#"# osprey-lint configuration file

[scanner]
# File extensions to lint (without the leading dot)
extensions = ["osp"]

# Glob patterns to skip
exclude = [
    "**/build/**",
    "**/.git/**",
]

[settings]
# Lines longer than this are reported by max-line-length (default: 120)
max_line_length = 120

# Columns a tab counts for when measuring line length (default: 4)
tab_width = 4

# Per-rule overrides. Every rule is enabled by default.
#   enabled  = false            turns the rule off
#   severity = "warning"        reports it without failing the run
"#,
    );

    for rule in RuleRegistry::builtin().iter() {
        let _ = write!(
            template,
            "\n# [rules.{}]\n# {}\n# severity = \"{}\"\n",
            rule.id,
            rule.description,
            rule.default_severity()
        );
    }
    template
}

fn run_config(action: &ConfigAction, cli: &Cli) -> i32 {
    match action {
        ConfigAction::Validate { config } => run_config_validate(config),
        ConfigAction::Show { config, format } => {
            run_config_show(config.as_deref(), *format, cli.no_config)
        }
    }
}

fn run_config_validate(config_path: &Path) -> i32 {
    match run_config_validate_impl(config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Configuration error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_config_validate_impl(config_path: &Path) -> osprey_lint::Result<()> {
    if !config_path.exists() {
        return Err(OspreyLintError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let config = FileConfigLoader::new().load_from_path(config_path)?.config;
    validate_config_semantics(&config)
}

fn run_config_show(config_path: Option<&Path>, format: ConfigFormat, no_config: bool) -> i32 {
    match run_config_show_impl(config_path, format, no_config) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

fn run_config_show_impl(
    config_path: Option<&Path>,
    format: ConfigFormat,
    no_config: bool,
) -> osprey_lint::Result<String> {
    let LoadResult { config, path } = load_config(config_path, no_config)?;

    match format {
        ConfigFormat::Json => {
            let json = serde_json::to_string_pretty(&config)?;
            Ok(format!("{json}\n"))
        }
        ConfigFormat::Text => {
            let source = path.map_or_else(
                || "# Effective configuration (defaults)\n".to_string(),
                |p| format!("# Effective configuration from {}\n", p.display()),
            );
            Ok(format!("{source}\n{}", toml::to_string_pretty(&config)?))
        }
    }
}
