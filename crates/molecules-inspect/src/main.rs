//! `molecules-inspect`: resolve widget styles from the command line.
//!
//! Loads stylesheet overrides into a registry exactly as a host application
//! would, then prints what a widget resolves to for a given theme and
//! variant selection.
//!
//! ```text
//! molecules-inspect resolve Card --stylesheets ./styles --variant variant=outlined --mode dark
//! molecules-inspect list --stylesheets ./styles
//! ```

mod color;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::Style;
use molecules::stylesheet::{walk_stylesheet_dir, StylesheetSet};
use molecules::{
    catalog, resolve_slots, AdaptiveTheme, InteractionState, Registry, RegistryConfig, Theme,
    ThemeSource, VariantSelection,
};
use tracing_subscriber::EnvFilter;

use crate::render::{render, Format};

/// Environment variable holding a tracing filter, e.g. `molecules=debug`.
const LOG_ENV: &str = "MOLECULES_LOG";

#[derive(Parser, Debug)]
#[command(name = "molecules-inspect")]
#[command(about = "Inspect component style overrides and resolved styles", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve a component's style for a theme and variant selection
    Resolve(ResolveArgs),
    /// List built-in components and loaded overrides
    List(SourceArgs),
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Directory of stylesheet files to load (repeatable)
    #[arg(short, long = "stylesheets", value_name = "DIR")]
    stylesheet_dirs: Vec<PathBuf>,

    /// Single stylesheet file to load (repeatable)
    #[arg(short, long = "file", value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Registry configuration file (YAML or JSON)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Component name, e.g. `Card_Header`
    name: String,

    #[command(flatten)]
    sources: SourceArgs,

    /// Variant selection as `axis=value`, applied in order (repeatable)
    #[arg(long = "variant", value_name = "AXIS=VALUE")]
    variants: Vec<String>,

    /// Interaction states to set on the `state` axis
    #[arg(long, value_enum, value_delimiter = ',')]
    state: Vec<StateArg>,

    /// Theme mode; `auto` follows the OS setting
    #[arg(long, value_enum, default_value_t = ModeArg::Light)]
    mode: ModeArg,

    /// Only resolve these slots (repeatable)
    #[arg(long = "slot", value_name = "SLOT")]
    slots: Vec<String>,

    #[arg(long, value_enum, default_value_t = Format::Term)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Light,
    Dark,
    Auto,
}

impl ModeArg {
    fn theme_source(self) -> ThemeSource {
        match self {
            ModeArg::Light => ThemeSource::Fixed(Theme::light()),
            ModeArg::Dark => ThemeSource::Fixed(Theme::dark()),
            ModeArg::Auto => ThemeSource::Adaptive(AdaptiveTheme::default()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StateArg {
    Hovered,
    Pressed,
    Focused,
    Disabled,
    Selected,
}

impl From<StateArg> for InteractionState {
    fn from(state: StateArg) -> Self {
        match state {
            StateArg::Hovered => InteractionState::HOVERED,
            StateArg::Pressed => InteractionState::PRESSED,
            StateArg::Focused => InteractionState::FOCUSED,
            StateArg::Disabled => InteractionState::DISABLED,
            StateArg::Selected => InteractionState::SELECTED,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let output = match cli.command {
        Command::Resolve(args) => run_resolve(&args)?,
        Command::List(args) => run_list(&args)?,
    };
    print!("{}", output);
    Ok(())
}

fn init_logging(verbose: u8) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init()
        .map_err(anyhow::Error::msg)
}

/// Builds a registry and installs every stylesheet override into it.
fn load(sources: &SourceArgs) -> Result<(Registry, StylesheetSet)> {
    let config = match &sources.config {
        Some(path) => RegistryConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RegistryConfig::default(),
    };

    let mut set = StylesheetSet::new();
    for dir in &sources.stylesheet_dirs {
        let files = walk_stylesheet_dir(dir)
            .with_context(|| format!("reading stylesheet directory {}", dir.display()))?;
        tracing::debug!(dir = %dir.display(), files = files.len(), "found stylesheets");
        set.add_from_files(files)?;
    }
    for file in &sources.files {
        set.add_file(file)?;
    }

    let mut registry = Registry::with_config(config);
    set.register_into(&mut registry)
        .context("installing stylesheet overrides")?;
    tracing::info!(overrides = set.len(), "stylesheets loaded");
    Ok((registry, set))
}

fn selection(args: &ResolveArgs, theme: &Theme) -> Result<VariantSelection> {
    let mut selection = VariantSelection::new().with_theme(theme);
    for raw in &args.variants {
        let parsed: VariantSelection = raw
            .parse()
            .with_context(|| format!("invalid --variant {:?}", raw))?;
        for (axis, value) in parsed.iter() {
            selection.set(axis, value);
        }
    }
    if !args.state.is_empty() {
        let state = args
            .state
            .iter()
            .fold(InteractionState::empty(), |acc, s| acc | InteractionState::from(*s));
        selection = selection.with_state(state);
    }
    Ok(selection)
}

fn run_resolve(args: &ResolveArgs) -> Result<String> {
    let (registry, _) = load(&args.sources)?;
    let theme = args.mode.theme_source().resolve();
    let selection = selection(args, &theme)?;

    let styles = catalog::styles_for(&registry, &args.name);
    let resolved = if args.slots.is_empty() {
        molecules::resolve(&styles, &selection, &theme)
    } else {
        resolve_slots(&styles, args.slots.iter().map(String::as_str), &selection, &theme)
    };
    tracing::debug!(name = %args.name, %selection, slots = resolved.len(), "resolved");
    render(&resolved, args.format)
}

fn run_list(sources: &SourceArgs) -> Result<String> {
    let (registry, set) = load(sources)?;

    let mut names: Vec<&str> = catalog::names().collect();
    names.extend(set.names());
    names.sort_unstable();
    names.dedup();

    let dim = Style::new().dim();
    let mut out = String::new();
    for name in names {
        let origin = match (registry.styles().contains(name), set.source_of(name)) {
            (true, Some(path)) => format!("override {}", path.display()),
            (true, None) => "override <inline>".to_string(),
            (false, _) => "built-in".to_string(),
        };
        out.push_str(&format!("{:<16} {}\n", name, dim.apply_to(origin)));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn stylesheet_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("card.yaml"),
            "Card:\n  root:\n    borderRadius: 8\n    variants:\n      state:\n        disabled: { opacity: 0.5 }\n",
        )
        .unwrap();
        dir
    }

    fn resolve_args(argv: &[&str]) -> ResolveArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Command::Resolve(args) => args,
            other => panic!("expected resolve, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_resolve_args() {
        let args = resolve_args(&[
            "molecules-inspect",
            "resolve",
            "Card",
            "--variant",
            "variant=outlined",
            "--state",
            "pressed,disabled",
            "--mode",
            "dark",
            "--format",
            "json",
        ]);
        assert_eq!(args.name, "Card");
        assert_eq!(args.state, vec![StateArg::Pressed, StateArg::Disabled]);
        assert_eq!(args.mode, ModeArg::Dark);
        assert_eq!(args.format, Format::Json);
    }

    #[test]
    fn test_selection_order_and_state() {
        let args = resolve_args(&[
            "molecules-inspect",
            "resolve",
            "Card",
            "--variant",
            "size=lg,variant=filled",
            "--state",
            "hovered,disabled",
        ]);
        let selection = selection(&args, &Theme::dark()).unwrap();
        assert_eq!(
            selection.to_string(),
            "colorScheme=dark,size=lg,variant=filled,state=disabled"
        );
    }

    #[test]
    fn test_resolve_uses_stylesheet_override() {
        let dir = stylesheet_dir();
        let dir_arg = dir.path().to_string_lossy().to_string();
        let args = resolve_args(&[
            "molecules-inspect",
            "resolve",
            "Card",
            "--stylesheets",
            &dir_arg,
            "--state",
            "disabled",
            "--format",
            "json",
        ]);

        let out = run_resolve(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["root"]["borderRadius"], serde_json::json!(8.0));
        assert_eq!(value["root"]["opacity"], serde_json::json!(0.5));
    }

    #[test]
    fn test_resolve_builtin_slot_filter() {
        let args = resolve_args(&[
            "molecules-inspect",
            "resolve",
            "Switch",
            "--slot",
            "thumb",
            "--format",
            "json",
        ]);
        let out = run_resolve(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert!(value.get("thumb").is_some());
        assert!(value.get("track").is_none());
    }

    #[test]
    fn test_list_marks_overrides() {
        let dir = stylesheet_dir();
        let sources = SourceArgs {
            stylesheet_dirs: vec![dir.path().to_path_buf()],
            ..SourceArgs::default()
        };
        let out = console::strip_ansi_codes(&run_list(&sources).unwrap()).to_string();

        let card = out.lines().find(|l| l.starts_with("Card ")).unwrap();
        assert!(card.contains("override"));
        assert!(card.contains("card.yaml"));
        let switch = out.lines().find(|l| l.starts_with("Switch")).unwrap();
        assert!(switch.contains("built-in"));
    }

    #[test]
    fn test_load_applies_config() {
        let styles = stylesheet_dir();
        let config_dir = TempDir::new().unwrap();
        let config = config_dir.path().join("registry.json");
        fs::write(&config, r#"{"policy": "reject-duplicates"}"#).unwrap();

        let sources = SourceArgs {
            stylesheet_dirs: vec![styles.path().to_path_buf()],
            config: Some(config),
            ..SourceArgs::default()
        };
        let (registry, set) = load(&sources).unwrap();
        assert_eq!(
            registry.config().policy,
            molecules::RegistrationPolicy::RejectDuplicates
        );
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_load_reports_collisions() {
        let dir = stylesheet_dir();
        let other = TempDir::new().unwrap();
        fs::write(other.path().join("cards.json"), r#"{"Card": {"root": {}}}"#).unwrap();

        let sources = SourceArgs {
            stylesheet_dirs: vec![dir.path().to_path_buf(), other.path().to_path_buf()],
            ..SourceArgs::default()
        };
        let err = load(&sources).unwrap_err();
        assert!(err.to_string().contains("collision"));
    }
}
