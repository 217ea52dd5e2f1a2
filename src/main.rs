mod cli_util;
mod commands;

use std::env;
use std::io::{self, Write};
use std::path::Path;

use clap::{Parser, Subcommand};

use commands::check::CheckArgs;
use commands::run::RunArgs;

fn print_top_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run   [OPTIONS] "<code>"        # Run a program given as arguments (concatenated)
  {0} run   [OPTIONS] --file <PATH>   # Run a program loaded from a file
  {0} check "<code>" | --file <PATH>  # Validate brackets without running

Run "{0} <subcommand> --help" for more info.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bfvm", disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Run(RunArgs),
    Check(CheckArgs),
}

fn main() {
    let program = env::args()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| String::from("bfvm"));

    let cli = Cli::parse();

    let code = match cli.command {
        Some(Command::Run(args)) => commands::run::run(&program, args),
        Some(Command::Check(args)) => commands::check::run(&program, args),
        None => print_top_usage_and_exit(
            &program,
            if cli.help { commands::EXIT_OK } else { commands::EXIT_USAGE },
        ),
    };

    std::process::exit(code);
}
