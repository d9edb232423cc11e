use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

mod ui;

use ui::App;
use wayfinder::config::Config;
use wayfinder::graph::StepGraph;
use wayfinder::loader::{self, GraphFile};
use wayfinder::logging;
use wayfinder::options::{CardVariant, TrailingPhase};
use wayfinder::resolver::Resolution;
use wayfinder::summary::Summary;
use wayfinder::wizard::{Transition, Wizard};

#[derive(Parser)]
#[command(name = "wayfinder")]
#[command(about = "Step-by-step selection wizard over a branching option graph")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the terminal wizard (default)
    Run(RunArgs),

    /// Check a graph file and report lint warnings
    Validate {
        /// Graph file (.toml, .yaml, .json)
        file: PathBuf,
    },

    /// Apply selections without a terminal and print the resulting options
    Resolve {
        /// Graph file (bundled graph when omitted)
        #[arg(short, long)]
        graph: Option<PathBuf>,

        /// Selection as STEP=ID, where STEP is a step id or index
        #[arg(short, long = "select", value_parser = parse_selection)]
        selections: Vec<(String, String)>,

        /// Only print this step index
        #[arg(long)]
        step: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the JSON Schema of graph files
    Schema,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Graph file (bundled graph when omitted)
    #[arg(short, long)]
    graph: Option<PathBuf>,

    /// Use the compact card layout
    #[arg(long)]
    compact: bool,

    /// Wait for Next after each pick
    #[arg(long)]
    no_auto_progress: bool,

    /// Screen shown after the last step is accepted
    #[arg(long, value_enum)]
    trailing: Option<TrailingArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TrailingArg {
    None,
    Success,
    CustomForm,
}

impl From<TrailingArg> for TrailingPhase {
    fn from(arg: TrailingArg) -> Self {
        match arg {
            TrailingArg::None => TrailingPhase::None,
            TrailingArg::Success => TrailingPhase::Success,
            TrailingArg::CustomForm => TrailingPhase::CustomForm,
        }
    }
}

fn parse_selection(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((step, id)) if !step.is_empty() && !id.is_empty() => {
            Ok((step.to_string(), id.to_string()))
        }
        _ => Err(format!("expected STEP=ID, got '{raw}'")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = matches!(cli.command, None | Some(Commands::Run(_)));

    // Initialize logging (file-based for TUI, stderr for CLI)
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Run(args)) => {
            run_tui(config, args, logging_handle.log_file_path)?;
        }
        Some(Commands::Validate { file }) => {
            cmd_validate(&file)?;
        }
        Some(Commands::Resolve {
            graph,
            selections,
            step,
            json,
        }) => {
            cmd_resolve(&config, graph, &selections, step, json)?;
        }
        Some(Commands::Schema) => {
            cmd_schema()?;
        }
        None => {
            run_tui(config, RunArgs::default(), logging_handle.log_file_path)?;
        }
    }

    Ok(())
}

/// Graph from `--graph`, then `paths.graph`, then the bundled one
fn load_graph(config: &Config, graph: Option<PathBuf>) -> Result<StepGraph> {
    let path = graph.or_else(|| config.paths.graph.as_ref().map(PathBuf::from));
    match path {
        Some(path) => loader::load_graph(&path)
            .with_context(|| format!("Failed to load graph {}", path.display())),
        None => loader::bundled_graph().context("Bundled graph is invalid"),
    }
}

fn run_tui(mut config: Config, args: RunArgs, log_file_path: Option<PathBuf>) -> Result<()> {
    if args.compact {
        config.wizard.card_variant = CardVariant::Compact;
    }
    if args.no_auto_progress {
        config.wizard.auto_progress = false;
    }
    if let Some(trailing) = args.trailing {
        config.wizard.trailing_phase = trailing.into();
    }

    let graph = load_graph(&config, args.graph)?;
    for warning in graph.lint() {
        tracing::warn!(%warning, "graph lint");
    }

    let app = App::new(graph, config);
    let result = app.run();

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    match result? {
        Some(summary) => {
            eprint!("{summary}");
            println!("{}", serde_json::to_string_pretty(&summary.to_json())?);
        }
        None => eprintln!("Wizard cancelled"),
    }
    Ok(())
}

fn cmd_validate(file: &Path) -> Result<()> {
    let graph = loader::load_graph(file)
        .with_context(|| format!("Invalid graph file {}", file.display()))?;

    let items: usize = graph.steps().iter().map(|step| step.items.len()).sum();
    println!(
        "{}: {} steps, {} items",
        file.display(),
        graph.len(),
        items
    );

    let warnings = graph.lint();
    if warnings.is_empty() {
        println!("No warnings");
    } else {
        for warning in &warnings {
            println!("warning: {warning}");
        }
    }
    Ok(())
}

fn cmd_resolve(
    config: &Config,
    graph: Option<PathBuf>,
    selections: &[(String, String)],
    only_step: Option<usize>,
    json: bool,
) -> Result<()> {
    let graph = load_graph(config, graph)?;
    let mut options = config.wizard.clone();
    // Pointer movement is irrelevant here
    options.auto_progress = false;
    let mut wizard = Wizard::new(graph, options);

    for (step, id) in selections {
        let index = match wizard.graph().position(step) {
            Some(index) => index,
            None => step
                .parse::<usize>()
                .ok()
                .filter(|index| *index < wizard.graph().len())
                .with_context(|| format!("Unknown step '{step}'"))?,
        };
        if let Transition::Blocked(reason) = wizard.select_option(index, id) {
            bail!("Cannot select {step}={id}: {reason}");
        }
    }

    let indexes: Vec<usize> = match only_step {
        Some(index) if index >= wizard.graph().len() => {
            bail!("Step {index} does not exist");
        }
        Some(index) => vec![index],
        None => (0..wizard.graph().len()).collect(),
    };

    if json {
        let steps: Vec<serde_json::Value> = indexes
            .iter()
            .map(|&index| {
                let step_id = wizard.graph().step(index).map(|step| step.id.clone());
                match wizard.step_options(index) {
                    Resolution::Available(options) => serde_json::json!({
                        "index": index,
                        "id": step_id,
                        "options": options.ids(),
                    }),
                    Resolution::Unavailable(reason) => serde_json::json!({
                        "index": index,
                        "id": step_id,
                        "options": serde_json::Value::Null,
                        "unavailable": reason.to_string(),
                    }),
                }
            })
            .collect();
        let summary = Summary::from_selections(wizard.graph(), wizard.selections());
        let output = serde_json::json!({
            "steps": steps,
            "summary": summary.to_json(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for index in indexes {
        let Some(step) = wizard.graph().step(index) else {
            continue;
        };
        let marker = wizard
            .selections()
            .get(index)
            .map(|id| format!(" [{id}]"))
            .unwrap_or_default();
        match wizard.step_options(index) {
            Resolution::Available(options) if options.is_empty() => {
                println!("{index}. {}{marker}: (nothing to show)", step.title);
            }
            Resolution::Available(options) => {
                println!(
                    "{index}. {}{marker}: {}",
                    step.title,
                    options.ids().join(", ")
                );
            }
            Resolution::Unavailable(reason) => {
                println!("{index}. {}{marker}: unavailable ({reason})", step.title);
            }
        }
    }
    Ok(())
}

fn cmd_schema() -> Result<()> {
    let schema = schemars::schema_for!(GraphFile);
    let text = serde_json::to_string_pretty(&schema).context("Failed to serialize schema")?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            parse_selection("framework=astro"),
            Ok(("framework".to_string(), "astro".to_string()))
        );
        assert!(parse_selection("framework").is_err());
        assert!(parse_selection("=astro").is_err());
        assert!(parse_selection("framework=").is_err());
    }

    #[test]
    fn test_cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "wayfinder",
            "run",
            "--compact",
            "--no-auto-progress",
            "--trailing",
            "custom-form",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Run(args)) => {
                assert!(args.compact);
                assert!(args.no_auto_progress);
                assert!(matches!(args.trailing, Some(TrailingArg::CustomForm)));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_cli_parses_repeated_selections() {
        let cli = Cli::try_parse_from([
            "wayfinder",
            "resolve",
            "--select",
            "0=blog",
            "-s",
            "framework=astro",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Resolve {
                selections, json, ..
            }) => {
                assert_eq!(selections.len(), 2);
                assert!(json);
            }
            _ => panic!("expected resolve"),
        }
    }

    #[test]
    fn test_no_subcommand_is_tui() {
        let cli = Cli::try_parse_from(["wayfinder", "--debug"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.debug);
    }

    #[test]
    fn test_load_graph_defaults_to_bundled() {
        let graph = load_graph(&Config::default(), None).unwrap();
        assert_eq!(graph.step(0).unwrap().id, "project-type");
    }

    #[test]
    fn test_trailing_arg_maps_to_phase() {
        assert_eq!(
            TrailingPhase::from(TrailingArg::Success),
            TrailingPhase::Success
        );
    }
}
