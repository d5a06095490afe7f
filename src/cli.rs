use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConsoleConfig};
use crate::demos;
use crate::interpreter::{
    normalize, Execution, OutputKind, OutputSink, RunStatus, ScriptedInput, Val,
};

#[derive(Parser)]
#[command(name = "codeflow")]
#[command(about = "CodeFlow - run programs written in the CodeFlow teaching language", long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default search)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a program
    Run {
        /// Program file
        file: PathBuf,

        /// Answer input requests in order before prompting
        #[arg(short = 'i', long = "input")]
        inputs: Vec<String>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,

        /// Write a snapshot instead of prompting when input runs out
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Resume a saved execution with the value it is waiting for
    Resume {
        /// Snapshot written by `run --save`
        snapshot: PathBuf,

        /// Value for the pending input
        value: String,

        /// Further input values, answered in order before prompting
        #[arg(short = 'i', long = "input")]
        inputs: Vec<String>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,

        /// Write a snapshot instead of prompting when input runs out
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Print the normalized line sequence of a program
    Lines {
        /// Program file
        file: PathBuf,
    },

    /// List the bundled demos, or run one
    Demo {
        /// Demo to run (omit to list)
        name: Option<String>,

        /// Answer input requests in order before prompting
        #[arg(short = 'i', long = "input")]
        inputs: Vec<String>,

        /// Print events as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration
    Config,
}

/// Run the CLI by parsing process arguments
pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    run_cli_with_args(cli).await
}

/// Internal function that handles CLI commands
async fn run_cli_with_args(cli: Cli) -> Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration before executing any command so config errors
    // are shown immediately
    let config = Config::builder().config_path(cli.config).build()?;
    init_tracing(&config);

    match cli.command {
        Commands::Run {
            file,
            inputs,
            json,
            save,
        } => {
            let source = read_program(&file)?;
            let execution = Execution::new(&source);
            let console = Console::new(&config, json);
            console.banner();
            run_to_end(execution, console, inputs, save).await?;
        }

        Commands::Resume {
            snapshot,
            value,
            inputs,
            json,
            save,
        } => {
            let text = std::fs::read_to_string(&snapshot)
                .with_context(|| format!("Failed to read snapshot {}", snapshot.display()))?;
            let mut execution = Execution::from_snapshot(&text)
                .with_context(|| format!("Failed to load snapshot {}", snapshot.display()))?;
            execution
                .provide_input(&value)
                .with_context(|| format!("Cannot resume {}", snapshot.display()))?;
            let console = Console::new(&config, json);
            run_to_end(execution, console, inputs, save).await?;
        }

        Commands::Lines { file } => {
            let source = read_program(&file)?;
            for (i, line) in normalize(&source).iter().enumerate() {
                println!("{:>4}  {}", i, line);
            }
        }

        Commands::Demo { name, inputs, json } => match name {
            None => {
                println!("Bundled demos:\n");
                for demo in demos::DEMOS {
                    println!("  {:<12} {}", demo.key, demo.name);
                }
            }
            Some(name) => {
                let demo = demos::find(&name).ok_or_else(|| {
                    anyhow!(
                        "Unknown demo '{}'. Run `codeflow demo` to list them",
                        name
                    )
                })?;
                let console = Console::new(&config, json);
                console.banner();
                run_to_end(Execution::new(demo.source), console, inputs, None).await?;
            }
        },

        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_program(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read program {}", path.display()))
}

/// Drive an execution, prompting on stdin (or saving a snapshot) whenever it parks
async fn run_to_end(
    mut execution: Execution,
    mut console: Console,
    inputs: Vec<String>,
    save: Option<PathBuf>,
) -> Result<()> {
    let mut scripted = ScriptedInput::new(inputs);
    let mut stdin: Option<Lines<BufReader<Stdin>>> = None;

    loop {
        match execution.drive(&mut console, &mut scripted) {
            RunStatus::AwaitingInput(name) => {
                if let Some(path) = &save {
                    std::fs::write(path, execution.to_snapshot()?)
                        .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
                    eprintln!(
                        "Waiting for input '{}'; snapshot written to {}",
                        name,
                        path.display()
                    );
                    return Ok(());
                }

                console.prompt(&name)?;
                let lines =
                    stdin.get_or_insert_with(|| BufReader::new(tokio::io::stdin()).lines());
                let Some(line) = lines.next_line().await? else {
                    bail!("Input closed while waiting for '{}'", name);
                };
                let value = line.trim();
                console.echo(value);
                execution.provide_input(value)?;
            }
            RunStatus::Finished => return Ok(()),
            RunStatus::Failed(_) => {
                // The error event has already been printed
                std::process::exit(2);
            }
            RunStatus::Running => bail!("Execution stopped without reaching a terminal state"),
        }
    }
}

/* ===================== Console ===================== */

/// Console presentation of program events
struct Console {
    settings: ConsoleConfig,
    json: bool,
}

impl Console {
    fn new(config: &Config, json: bool) -> Self {
        Self {
            settings: config.console.clone(),
            json,
        }
    }

    fn banner(&self) {
        if self.settings.banner && !self.json {
            println!("▶ Starting program...");
        }
    }

    fn prompt(&self, name: &str) -> Result<()> {
        if self.json {
            return Ok(());
        }
        print!("{}", self.settings.prompt_for(name));
        std::io::stdout().flush()?;
        Ok(())
    }

    fn echo(&self, value: &str) {
        if self.settings.echo_input && !self.json {
            println!("> {}", value);
        }
    }
}

impl OutputSink for Console {
    fn emit(&mut self, value: &Val, kind: OutputKind) {
        if self.json {
            let event = serde_json::json!({ "kind": kind, "value": value.to_string() });
            println!("{}", event);
            return;
        }

        match kind {
            OutputKind::Output => println!("{}", value),
            OutputKind::System => {
                if self.settings.banner {
                    println!("\n✓ {}", value);
                }
            }
            OutputKind::Error => eprintln!("\nRUNTIME ERROR: {}", value),
        }
    }
}
