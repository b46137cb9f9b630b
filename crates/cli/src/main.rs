mod cmd;
mod logging;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mdr", version, about = "Restructure markdown notes from the terminal")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Heading depth from which index prefixes are written (7 = never)
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(1..=7))]
    index_from: Option<u8>,

    /// Ordered list numbering: "Increase from 1" or "Disabled"
    #[arg(long, global = true)]
    list_method: Option<String>,

    /// Raise console logging to debug
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Renumber heading prefixes and ordered lists
    Format(TargetArgs),

    /// Flatten the section under a heading into a nested list
    HeadingToList(PeerArgs),

    /// Lift the list at a line into headings
    ListToHeading(LineArgs),

    /// Move a heading to another depth, cascading to its subsections
    HeadingDepth(DepthArgs),

    /// Copy heading sections into their own notes
    Export(ExportArgs),

    /// Show which heading and list position a line belongs to
    State(StateArgs),

    /// Validate configuration and print resolved settings
    Doctor,
}

#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Markdown file to rewrite
    pub file: PathBuf,

    /// Print the result instead of writing the file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct LineArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// 1-based source line
    #[arg(long)]
    pub line: usize,
}

#[derive(Debug, Args)]
pub struct PeerArgs {
    #[command(flatten)]
    pub at: LineArgs,

    /// Also apply to the sibling headings of the same depth
    #[arg(long)]
    pub peers: bool,
}

#[derive(Debug, Args)]
pub struct DepthArgs {
    #[command(flatten)]
    pub at: PeerArgs,

    /// New heading depth
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    pub depth: u8,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Markdown file to read sections from
    pub file: PathBuf,

    /// 1-based line of the heading to export
    #[arg(long)]
    pub line: usize,

    /// Export every sibling section into a folder named after the file
    #[arg(long)]
    pub peers: bool,
}

#[derive(Debug, Args)]
pub struct StateArgs {
    pub file: PathBuf,

    #[arg(long)]
    pub line: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

fn main() {
    let cli = Cli::parse();

    let overrides = cmd::Overrides {
        index_from: cli.index_from,
        list_method: cli.list_method.clone(),
        verbose: cli.verbose,
    };
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Format(args) => cmd::transform::run(config, &overrides, cmd::transform::Transform::Format, &args),
        Commands::HeadingToList(args) => cmd::transform::run(
            config,
            &overrides,
            cmd::transform::Transform::HeadingToList { line: args.at.line, peers: args.peers },
            &args.at.target,
        ),
        Commands::ListToHeading(args) => cmd::transform::run(
            config,
            &overrides,
            cmd::transform::Transform::ListToHeading { line: args.line },
            &args.target,
        ),
        Commands::HeadingDepth(args) => cmd::transform::run(
            config,
            &overrides,
            cmd::transform::Transform::HeadingDepth {
                line: args.at.at.line,
                depth: args.depth,
                peers: args.at.peers,
            },
            &args.at.at.target,
        ),
        Commands::Export(args) => cmd::export::run(config, &overrides, &args),
        Commands::State(args) => cmd::state::run(config, &overrides, &args),
        Commands::Doctor => cmd::doctor::run(config, &overrides),
    }
}
