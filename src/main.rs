use clap::{Parser as ClapParser, Subcommand};
use odata_expand::cli::{self, CheckOptions, CliError};
use odata_expand::output::RenderOptions;
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "odata-expand")]
#[command(about = "Inspect OData $expand trees described as JSON")]
#[command(version)]
struct Cli {
    /// Increase log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a tree and report its size
    Check {
        /// JSON tree (reads from stdin if not provided)
        tree: Option<String>,

        /// Merge terms that expand the same navigation path
        #[arg(long)]
        normalize: bool,
    },

    /// Print the tree as $expand query text
    Render {
        /// JSON tree (reads from stdin if not provided)
        tree: Option<String>,

        /// Merge terms that expand the same navigation path
        #[arg(long)]
        normalize: bool,

        /// Write `asc` on ascending orderby items
        #[arg(long)]
        explicit_asc: bool,
    },

    /// Print the tree as structural JSON
    Dump {
        /// JSON tree (reads from stdin if not provided)
        tree: Option<String>,

        /// Merge terms that expand the same navigation path
        #[arg(long)]
        normalize: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Check { tree, normalize } => read_input(tree).and_then(|tree| {
            let summary = cli::execute_check(&CheckOptions {
                tree,
                normalize,
                ..CheckOptions::default()
            })?;
            println!(
                "Expand tree is valid ({} term(s), depth {})",
                summary.terms, summary.depth
            );
            Ok(())
        }),
        Commands::Render {
            tree,
            normalize,
            explicit_asc,
        } => read_input(tree).and_then(|tree| {
            let text = cli::execute_render(&CheckOptions {
                tree,
                normalize,
                render: RenderOptions {
                    explicit_ascending: explicit_asc,
                },
            })?;
            println!("{}", text);
            Ok(())
        }),
        Commands::Dump {
            tree,
            normalize,
            pretty,
        } => read_input(tree).and_then(|tree| run_dump(tree, normalize, pretty)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn read_input(tree: Option<String>) -> Result<String, CliError> {
    match tree {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}

fn run_dump(tree: String, normalize: bool, pretty: bool) -> Result<(), CliError> {
    let output = cli::execute_dump(&CheckOptions {
        tree,
        normalize,
        ..CheckOptions::default()
    })?;
    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }?;
    println!("{}", json);
    Ok(())
}
