mod cli;

use crate::cli::{Args, Command};
use anyhow::{Context, Result};
use fenced_tools::config::{load_config, load_tool_catalog};
use fenced_tools::logging::setup_logging;
use fenced_tools::{
    prepare_tools, DisplayFragment, FragmentSink, JsonToolProtocol, StreamError, StreamingChunk,
    ToolChoice, ToolResult,
};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Writes each fragment as one JSON line to stdout
struct JsonLinesSink;

impl FragmentSink for JsonLinesSink {
    fn display_fragment(&self, fragment: &DisplayFragment) -> Result<(), StreamError> {
        let line = serde_json::to_string(fragment)?;
        writeln!(io::stdout().lock(), "{line}")?;
        Ok(())
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn run_prompt(
    protocol: &JsonToolProtocol,
    tools: &Path,
    system: Option<PathBuf>,
    tool_choice: ToolChoice,
) -> Result<()> {
    let catalog = load_tool_catalog(tools)
        .with_context(|| format!("Failed to load tool catalog {}", tools.display()))?;
    let existing = system.as_deref().map(|p| read_input(Some(p))).transpose()?;

    let prepared = prepare_tools(&catalog, Some(&tool_choice));
    for warning in &prepared.warnings {
        warn!("{}", serde_json::to_string(warning)?);
    }

    println!(
        "{}",
        protocol.build_system_prompt(existing.as_deref(), &prepared.tools)
    );
    Ok(())
}

fn run_parse(protocol: &JsonToolProtocol, input: Option<PathBuf>, request_id: u64) -> Result<()> {
    let text = read_input(input.as_deref())?;
    let parsed = protocol.parse_function_calls(&text, request_id);
    debug!("Parsed {} tool calls", parsed.tool_calls.len());
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

fn run_stream(
    protocol: &JsonToolProtocol,
    input: Option<PathBuf>,
    chunk_size: usize,
    request_id: u64,
) -> Result<()> {
    let text = read_input(input.as_deref())?;
    let mut processor = protocol.stream_processor(Arc::new(JsonLinesSink), request_id);

    let chars: Vec<char> = text.chars().collect();
    for chunk in chars.chunks(chunk_size) {
        processor.process(&StreamingChunk::Text(chunk.iter().collect()))?;
    }
    processor.process(&StreamingChunk::StreamingComplete)?;
    Ok(())
}

fn run_results(protocol: &JsonToolProtocol, input: &Path) -> Result<()> {
    let content = read_input(Some(input))?;
    let results: Vec<ToolResult> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tool results in {}", input.display()))?;
    println!("{}", protocol.format_tool_results(&results));
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    let protocol = config.protocol()?;

    match args.command {
        Command::Prompt {
            tools,
            system,
            tool_choice,
        } => run_prompt(&protocol, &tools, system, tool_choice.into()),
        Command::Parse { input, request_id } => run_parse(&protocol, input, request_id),
        Command::Stream {
            input,
            chunk_size,
            request_id,
        } => run_stream(&protocol, input, chunk_size as usize, request_id),
        Command::Results { input } => run_results(&protocol, &input),
    }
}
