//! Figure Blueprint CLI
//!
//! Usage:
//!   figure-blueprint [OPTIONS] <COMMAND>
//!
//! Commands:
//!   render   Render the active blueprint (`-V name=value`, `--macro` to draw)
//!   show     Print the active blueprint's LaTeX dependency
//!   export   Write the active blueprint to a file
//!   check    Lint a blueprint file
//!   list     List built-in transforms and macros

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use figure_blueprint::blueprint::lint;
use figure_blueprint::registry::{transform, MacroRegistry};
use figure_blueprint::{
    Blueprint, BufferField, Config, Inkscape, SessionError, Variables, IMPORT_FAILED,
};

#[derive(Parser)]
#[command(name = "figure-blueprint")]
#[command(about = "Generate LaTeX figure fragments from reusable blueprints")]
struct Cli {
    /// Configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Blueprint file to use instead of the built-in figure blueprint
    #[arg(short, long, global = true)]
    blueprint: Option<PathBuf>,

    /// Log debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the blueprint's fragment to stdout
    Render {
        /// Variable value as NAME=VALUE (repeatable)
        #[arg(short = 'V', long = "var", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// Also run the blueprint's macro (e.g. open the drawing tool)
        #[arg(short, long = "macro")]
        run_macro: bool,
    },

    /// Print the blueprint's LaTeX dependency
    Show,

    /// Write the blueprint document to a file
    Export {
        /// Output file
        path: PathBuf,
    },

    /// Check a blueprint file for defects
    Check {
        /// Blueprint file
        file: PathBuf,
    },

    /// List built-in transforms and macros
    List,
}

fn parse_var(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))
}

fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let config = match Config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            process::exit(1);
        }
    };

    // Linting works on a file of its own, independent of the session
    if let Command::Check { file } = &cli.command {
        process::exit(check(file));
    }
    if let Command::List = &cli.command {
        list();
        return;
    }

    let mut session = figure_blueprint::Session::new(BufferField::default());
    match cli.blueprint.as_ref().or(config.blueprint.path.as_ref()) {
        Some(path) => {
            if session.import(path) == IMPORT_FAILED {
                eprintln!("Error importing blueprint '{}'", path.display());
                process::exit(1);
            }
        }
        None => session.load_default(),
    }

    let result = match cli.command {
        Command::Render { vars, run_macro } => {
            let variables: Variables = vars.into_iter().collect();
            session.fragment(&variables).and_then(|fragment| {
                print!("{}", fragment);
                if run_macro {
                    let macros = MacroRegistry::new(Inkscape::new(config.drawing.clone()));
                    session.run_macro(&variables, &macros)?;
                }
                Ok(())
            })
        }
        Command::Show => {
            session.show();
            println!("{}", session.dependency_field().content);
            Ok(())
        }
        Command::Export { path } => session.export(&path),
        Command::Check { .. } | Command::List => Ok(()),
    };

    if let Err(e) = result {
        match (&e, session.current()) {
            (SessionError::Render(render), Some(blueprint)) => {
                eprint!("{}", render.format(blueprint.snippet(), "snippet"));
            }
            _ => eprintln!("Error: {}", e),
        }
        process::exit(1);
    }
}

fn check(file: &std::path::Path) -> i32 {
    let blueprint = match Blueprint::read(file) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let warnings = lint::check(&blueprint);
    if warnings.is_empty() {
        println!("{}: ok", file.display());
    }
    for warning in &warnings {
        println!("{}: {}", file.display(), warning);
    }
    0
}

fn list() {
    println!("TRANSFORMS (factor selector \"$name\")");
    for name in transform::names() {
        println!("    {}", name);
    }
    println!();
    println!("MACROS (macro selector \"$name\")");
    for name in MacroRegistry::names() {
        println!("    {}", name);
    }
}
