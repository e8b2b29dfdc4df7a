mod clipboard;
mod cmd;
mod logging;

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "obs2prompt",
    version,
    about = "Collect an Obsidian note and the notes it links to into one document"
)]
pub struct Cli {
    /// Starting note, as written in a link (e.g. "MyNote" or "$ Zettelkasten.md")
    pub start_file: String,

    /// Maximum depth of links to follow (0 = only the start file)
    #[arg(long)]
    pub depth: Option<usize>,

    /// Path to the Obsidian vault
    #[arg(long, env = "OBSIDIAN_VAULT_PATH")]
    pub vault_path: Option<PathBuf>,

    /// Output file path [default: <vault>/temp/aggregate_<name>.txt]
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Copy the result to the clipboard
    #[arg(long)]
    pub clipboard: bool,

    /// Config file [default: ~/.config/obs2prompt/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Config profile to use
    #[arg(long)]
    pub profile: Option<String>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Count tokens with code2prompt instead of estimating from words
    #[arg(long)]
    pub exact_tokens: bool,
}

fn main() -> color_eyre::Result<()> {
    let cli = Cli::parse();

    if cli.debug && std::env::var_os("RUST_BACKTRACE").is_none() {
        std::env::set_var("RUST_BACKTRACE", "1");
    }
    color_eyre::install()?;

    cmd::aggregate::run(&cli)
}
