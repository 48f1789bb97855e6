use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use inline_annotation_config::Config;
use inline_annotation_engine::{
    decode, generate, parse,
    session::{AnnotationRequest, Context},
    to_json_string, wire_document,
};
use serde_json::Value;
use std::{
    io::{self, Read},
    path::{Path, PathBuf},
};

#[derive(Debug, Parser)]
#[command(name = "inline-annotation", version, about)]
struct Cli {
    /// Config file to use instead of ~/.config/inline-annotation/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert inline annotated text into wire JSON
    Parse {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Render wire JSON or inline text as canonical inline text
    Generate {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
    /// Print the chat completion request for annotating the input
    Prompt {
        /// Instruction for the annotator, e.g. "Tag people"
        #[arg(long, short)]
        prompt: String,
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Parse { file } => {
            let input = read_input(file.as_deref())?;
            let doc = parse(&input);
            log::debug!("parsed {} span(s)", doc.spans.len());
            let json = to_json_string(&doc, config.pretty_json)
                .context("Failed to serialize document")?;
            println!("{json}");
        }
        Command::Generate { file } => {
            let input = read_input(file.as_deref())?;
            let doc = decode(&input);
            let text = generate(&doc).context("Failed to generate inline text")?;
            println!("{text}");
        }
        Command::Prompt { prompt, file } => {
            let input = read_input(file.as_deref())?;
            let request = AnnotationRequest::prepare_with(context_for(input), prompt);
            let completion = request
                .completion_request()
                .context("Failed to render annotation context")?;
            let body = completion.to_chat_json(&config.model);
            let json = if config.pretty_json {
                serde_json::to_string_pretty(&body)?
            } else {
                serde_json::to_string(&body)?
            };
            println!("{json}");
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    match loaded {
        Some(config) => Ok(config),
        None => {
            if let Some(path) = path {
                log::warn!("Config file {} not found, using defaults", path.display());
            }
            Ok(Config::default())
        }
    }
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

// Wire JSON input is annotated as a document; anything else verbatim.
fn context_for(input: String) -> Context {
    match serde_json::from_str::<Value>(&input)
        .ok()
        .as_ref()
        .and_then(wire_document)
    {
        Some(doc) => Context::Structured(doc),
        None => Context::Raw(input),
    }
}
