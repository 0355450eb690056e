use clap::{Parser, Subcommand, ValueEnum};
use fenced_tools::ToolChoice;
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolChoiceArg {
    Auto,
    None,
    Required,
}

impl From<ToolChoiceArg> for ToolChoice {
    fn from(arg: ToolChoiceArg) -> Self {
        match arg {
            ToolChoiceArg::Auto => ToolChoice::Auto,
            ToolChoiceArg::None => ToolChoice::None,
            ToolChoiceArg::Required => ToolChoice::Required,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the system prompt for a tool catalog
    Prompt {
        /// JSON file with the tool catalog
        #[arg(long)]
        tools: PathBuf,

        /// File with the existing system prompt
        #[arg(long)]
        system: Option<PathBuf>,

        /// How the model should choose tools
        #[arg(long, value_enum, default_value = "auto")]
        tool_choice: ToolChoiceArg,
    },

    /// Parse a complete model response (stdin if no file is given)
    Parse {
        input: Option<PathBuf>,

        /// Request id used to number tool calls
        #[arg(long, default_value_t = 1)]
        request_id: u64,
    },

    /// Feed a model response through the streaming processor in chunks
    Stream {
        input: Option<PathBuf>,

        /// Characters per chunk
        #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
        chunk_size: u64,

        /// Request id used to number tool calls
        #[arg(long, default_value_t = 1)]
        request_id: u64,
    },

    /// Format a JSON array of tool results as result fences
    Results {
        #[arg(long)]
        input: PathBuf,
    },
}

/// Define the application arguments
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn parse() -> Self {
        <Args as Parser>::parse()
    }
}
