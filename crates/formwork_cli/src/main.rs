//! Formwork CLI
//!
//! Check values against a form definition and replay scripted interactions.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use formwork::prelude::*;
use formwork::FormConfig;

mod script;

use script::Step;

#[derive(Parser)]
#[command(name = "formwork")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Formwork form definition tools", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate values against a form definition
    Check {
        /// Form definition (TOML)
        definition: PathBuf,

        /// Field value as name=value (repeatable)
        #[arg(short, long = "set", value_name = "NAME=VALUE")]
        values: Vec<String>,
    },

    /// Replay an interaction script against a form definition
    Replay {
        /// Form definition (TOML)
        definition: PathBuf,

        /// Script with one `input`, `blur` or `submit` step per line
        script: PathBuf,

        /// Print the final form state as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Check { definition, values } => cmd_check(&definition, &values),
        Commands::Replay {
            definition,
            script,
            json,
        } => cmd_replay(&definition, &script, json),
    }
}

fn load_form(definition: &Path) -> Result<Form> {
    let config = FormConfig::load(definition)
        .with_context(|| format!("Failed to load {}", definition.display()))?;
    info!(
        "Loaded {} with {} field(s)",
        definition.display(),
        config.fields.len()
    );
    Ok(config.build_form())
}

fn cmd_check(definition: &Path, assignments: &[String]) -> Result<()> {
    let mut form = load_form(definition)?;

    for assignment in assignments {
        let (name, value) = assignment
            .split_once('=')
            .with_context(|| format!("Expected NAME=VALUE, got '{}'", assignment))?;
        form.on_input(&InputEvent::new(name, value))?;
    }

    let snapshot = form.values().get();
    let valid = form.validate_all(&snapshot)?;
    let errors = form.errors().get();

    for (name, value) in &snapshot {
        match errors.get(name).cloned().flatten() {
            Some(message) => println!("✗ {} = {:?}: {}", name, value, message),
            None => println!("✓ {} = {:?}", name, value),
        }
    }

    if !valid {
        let failed = errors.values().filter(|e| e.is_some()).count();
        anyhow::bail!("{} field(s) failed validation", failed);
    }

    info!("All fields valid");
    Ok(())
}

fn cmd_replay(definition: &Path, script_path: &Path, json: bool) -> Result<()> {
    let mut form = load_form(definition)?;

    let source = fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read {}", script_path.display()))?;
    let steps = script::parse_script(&source)
        .with_context(|| format!("Failed to parse {}", script_path.display()))?;

    // Print only the entries that changed since the previous notification
    let previous: Mutex<Option<FieldMap<Option<String>>>> = Mutex::new(None);
    let handle = form.errors().subscribe(move |errors: &FieldMap<Option<String>>| {
        let mut previous = previous.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(before) = previous.as_ref() {
            for (name, error) in errors {
                if before.get(name) != Some(error) {
                    match error {
                        Some(message) => println!("  error[{}] = {}", name, message),
                        None => println!("  error[{}] cleared", name),
                    }
                }
            }
        }
        *previous = Some(errors.clone());
    });

    for step in steps {
        match step {
            Step::Input { field, value } => {
                println!("input {} {:?}", field, value);
                form.on_input(&InputEvent::new(field, value))?;
            }
            Step::Blur { field, value } => {
                println!("blur {} {:?}", field, value);
                if !form.on_blur(&InputEvent::new(field.as_str(), value))? {
                    debug!("blur on '{}' ignored, field was never typed into", field);
                }
            }
            Step::Submit => {
                let mut request = SubmitRequest::new();
                let outcome = form.on_submit(&mut request)?;
                println!("submit -> {:?}", outcome);
            }
        }
    }

    form.errors().unsubscribe(handle);

    if json {
        let state = serde_json::json!({
            "values": form.values().get(),
            "errors": form.errors().get(),
            "dirty": form.dirty_fields(),
        });
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    Ok(())
}
