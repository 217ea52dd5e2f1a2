use std::io::{self, Write};

use bfvm::parse;
use clap::Args;

use super::{load_source, SourceArgs, EXIT_LOAD, EXIT_OK, EXIT_UNBALANCED, EXIT_USAGE};
use crate::cli_util::{print_parse_error, print_source_error, print_warning};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

/// Validate without running. The summary goes to stdout, problems to stderr.
pub fn run(program: &str, args: CheckArgs) -> i32 {
    if args.help {
        usage_and_exit(program, EXIT_OK);
    }

    let source = match load_source(args.source) {
        Ok(source) => source,
        Err(err) if err.is_usage() => {
            print_source_error(program, &err);
            usage_and_exit(program, EXIT_USAGE);
        }
        Err(err) => {
            print_source_error(program, &err);
            return EXIT_LOAD;
        }
    };

    let parsed = match parse(&source.bytes) {
        Ok(parsed) => parsed,
        Err(err) => {
            print_parse_error(program, &source.name, &err);
            return EXIT_UNBALANCED;
        }
    };

    let orphans = parsed.jumps().orphan_count();
    if orphans > 0 {
        print_warning(
            program,
            &format!(
                "\"{}\" has {orphans} mis-nested brackets; a jump taken from one ends the program",
                source.name
            ),
        );
    }

    println!(
        "{}: ok ({} instructions, {} loops)",
        source.name,
        parsed.len(),
        parsed.loop_count()
    );
    let _ = io::stdout().flush();
    EXIT_OK
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} check "<code>"
  {0} check --file <PATH>

Options:
  --file, -f <PATH>  Read source from PATH instead of positional "<code>"
  --help, -h         Show this help

Description:
  Parses the source and checks that '[' and ']' counts match, without
  running it. Prints the instruction and loop counts on success and warns
  about mis-nested brackets.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
