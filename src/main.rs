//! CLI entry point for dirtree

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use dirtree::{
    BuildError, OutputConfig, OutputFormat, Preset, TreeBuilder, TreeConfig, create_formatter,
    resolve_root,
};
use regex::Regex;

/// Determine whether to use color output.
fn should_use_color(no_color: bool, to_file: bool) -> bool {
    if no_color || to_file {
        return false;
    }
    // Respect NO_COLOR environment variable (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    // Respect TERM=dumb, even over FORCE_COLOR
    if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
        return false;
    }
    // Respect FORCE_COLOR environment variable
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    io::stdout().is_terminal()
}

#[derive(Parser, Debug)]
#[command(name = "dirtree")]
#[command(about = "Display a directory tree as text, JSON or markdown")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    preset: Option<PresetCommand>,

    #[command(flatten)]
    args: TreeArgs,
}

#[derive(Subcommand, Debug)]
enum PresetCommand {
    /// Quick tree view: depth 3, skips build output and VCS metadata
    Quick(TreeArgs),
    /// Development view: depth 4, also skips coverage, caches, temp dirs and logs
    Dev(TreeArgs),
}

#[derive(clap::Args, Debug)]
struct TreeArgs {
    /// Target directory path
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Maximum depth of the tree (-1 for unlimited)
    #[arg(
        short = 'd',
        long = "max-depth",
        value_name = "N",
        allow_negative_numbers = true
    )]
    max_depth: Option<i64>,

    /// Output format: text, json or markdown
    #[arg(short = 'f', long = "format", value_name = "TYPE")]
    format: Option<String>,

    /// Exclude patterns (* and ? wildcards), matched against names and full paths
    #[arg(short = 'e', long = "exclude", value_name = "PATTERNS", num_args = 1..)]
    exclude: Vec<String>,

    /// Only show files with these extensions
    #[arg(long = "include-types", value_name = "EXTS", num_args = 1.., value_delimiter = ',')]
    include_types: Vec<String>,

    /// Hide files with these extensions (ignored when --include-types is set)
    #[arg(long = "exclude-types", value_name = "EXTS", num_args = 1.., value_delimiter = ',')]
    exclude_types: Vec<String>,

    /// Hide entries whose name matches this regular expression
    #[arg(long = "ignore-pattern", value_name = "REGEX")]
    ignore_pattern: Option<String>,

    /// Show file sizes
    #[arg(short = 's', long = "show-size")]
    show_size: bool,

    /// Show modification dates
    #[arg(long = "show-date")]
    show_date: bool,

    /// Show hidden files and directories
    #[arg(short = 'a', long = "show-hidden")]
    show_hidden: bool,

    /// Show only directories
    #[arg(short = 'D', long = "dirs-only")]
    dirs_only: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Write to a file instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,
}

fn run(preset: Option<Preset>, args: TreeArgs) -> Result<(), BuildError> {
    let root = resolve_root(&args.path)?;
    let format: OutputFormat = args.format.as_deref().unwrap_or("text").parse()?;
    let ignore_pattern = args.ignore_pattern.as_deref().map(Regex::new).transpose()?;

    let mut config = TreeConfig {
        root,
        max_depth: None,
        exclude: args.exclude,
        include_types: args.include_types,
        exclude_types: args.exclude_types,
        ignore_pattern,
        show_hidden: args.show_hidden,
        show_size: args.show_size,
        show_date: args.show_date,
        dirs_only: args.dirs_only,
        colorize: should_use_color(args.no_color, args.output.is_some()),
    };
    if let Some(preset) = preset {
        config = config.with_preset(preset);
    }
    if let Some(depth) = args.max_depth {
        // Negative means unlimited
        config.max_depth = usize::try_from(depth).ok();
    }

    log::info!("Building directory tree...");
    let builder = TreeBuilder::new(config);
    let (tree, stats) = builder.build()?;

    let formatter = create_formatter(format, OutputConfig::from(builder.config()));
    let rendered = formatter.format(&tree, &stats)?;

    match args.output {
        Some(path) => {
            fs::write(&path, &rendered).map_err(|source| BuildError::Output {
                path: path.clone(),
                source,
            })?;
            eprintln!("Tree structure saved to: {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", rendered)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            let _ = e.print();
            process::exit(1);
        }
        e.exit()
    });

    let (preset, args) = match cli.preset {
        Some(PresetCommand::Quick(args)) => (Some(Preset::Quick), args),
        Some(PresetCommand::Dev(args)) => (Some(Preset::Dev), args),
        None => (None, cli.args),
    };

    if let Err(e) = run(preset, args) {
        eprintln!("dirtree: error: {}", e);
        process::exit(1);
    }
}
