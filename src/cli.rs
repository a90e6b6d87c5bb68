//! CLI argument parsing with clap.

use clap::{Args, Parser, Subcommand};

use crate::form::InputMode;

/// AI icon generator - web service and CLI over the Gemini image models.
#[derive(Parser, Debug)]
#[command(name = "icon-genie", version, about)]
pub struct Cli {
    /// What to run.
    #[command(subcommand)]
    pub command: Command,

    /// Config file path override.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP service and browser UI.
    Serve(ServeArgs),
    /// Generate or edit one icon and save it.
    Generate(GenerateArgs),
}

/// Options for `serve`.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file).
    #[arg(short, long)]
    pub listen: Option<String>,
}

/// Options for `generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Text prompt describing the icon.
    #[arg(conflicts_with = "prompt_file")]
    pub prompt: Option<String>,

    /// Path to a file containing the prompt text.
    #[arg(short = 'p', long, conflicts_with = "prompt")]
    pub prompt_file: Option<String>,

    /// Input mode: describe in text, or edit a reference image.
    #[arg(short, long, value_enum, default_value_t = InputMode::Text)]
    pub mode: InputMode,

    /// Reference image (required in edit mode, a style hint in text mode).
    #[arg(short, long)]
    pub reference: Option<String>,

    /// Logo image to combine with the reference (edit mode only).
    #[arg(short, long)]
    pub logo: Option<String>,

    /// Custom colors, comma-separated.
    #[arg(short, long, default_value = "")]
    pub colors: String,

    /// Output file path (auto-generated if not specified).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format: png, jpeg, webp.
    #[arg(short, long, default_value = "png")]
    pub format: String,

    /// Generate endpoint of a running server (overrides the config file).
    #[arg(long, conflicts_with = "direct")]
    pub server: Option<String>,

    /// Call the model in-process instead of going through a server.
    #[arg(long)]
    pub direct: bool,
}

impl GenerateArgs {
    /// Resolve the prompt from either the positional argument or the file flag.
    ///
    /// # Errors
    ///
    /// Returns an error if neither prompt nor prompt-file is provided,
    /// or if the file cannot be read.
    pub fn resolve_prompt(&self) -> Result<String, std::io::Error> {
        if let Some(ref text) = self.prompt {
            Ok(text.clone())
        } else if let Some(ref path) = self.prompt_file {
            std::fs::read_to_string(path)
        } else {
            Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Provide a prompt string or use -p/--prompt-file",
            ))
        }
    }
}
