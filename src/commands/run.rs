use std::io::{self, Write};

use bfvm::{parse, EofPolicy, Input, Machine, Overrides, Settings};
use clap::Args;

use super::{load_source, SourceArgs, EXIT_IO, EXIT_LOAD, EXIT_OK, EXIT_UNBALANCED, EXIT_USAGE};
use crate::cli_util::{describe_stats, note, print_engine_error, print_parse_error, print_source_error};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// What `,` does at end of input: zero, unchanged or halt (fallback BFVM_EOF; default zero)
    #[arg(long = "eof", value_name = "POLICY")]
    pub eof: Option<EofPolicy>,

    /// Print parse and run summaries to stderr (fallback BFVM_VERBOSE)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, EXIT_OK);
    }

    let settings = Settings::resolve(Overrides {
        eof: args.eof,
        verbose: args.verbose,
    });

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

    note(
        settings.verbose,
        program,
        &format!(
            "{}: {} instructions, {} loops, eof policy {}",
            source.name,
            parsed.len(),
            parsed.loop_count(),
            settings.eof
        ),
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut machine = Machine::new(&parsed, Input::new(stdin.lock()), stdout.lock())
        .with_eof_policy(settings.eof);

    let exit_code = match machine.run() {
        Ok(stats) => {
            note(settings.verbose, program, &describe_stats(&stats));
            EXIT_OK
        }
        Err(err) => {
            print_engine_error(program, &err);
            EXIT_IO
        }
    };

    let _ = io::stdout().flush();
    exit_code
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [--eof POLICY] [--verbose|-v] "<code>"
  {0} run [--eof POLICY] [--verbose|-v] --file <PATH>

Options:
  --file,    -f <PATH>  Read source from PATH instead of positional "<code>"
  --eof <POLICY>        What `,` does at end of input:
                          zero       store 0 in the current cell (default)
                          unchanged  leave the current cell as it is
                          halt       stop the program
  --verbose, -v         Print parse and run summaries to stderr
  --help,    -h         Show this help

Notes:
- Every character other than ><+-.,[] is a comment and is ignored.
- Options go before the code; code may start with '-' (e.g. "-[.-]").
- Only bracket counts are validated; mis-nested brackets such as "][" are
  accepted and their jumps end the program.
- The tape grows without limit and loops may run forever.

Environment:
  BFVM_EOF       Default for --eof
  BFVM_VERBOSE   Set to 1 to enable --verbose
  BFVM_CONFIG    Config file path (default: $XDG_CONFIG_HOME/bfvm.toml)

Exit status:
  0 success, 1 source not loadable, 2 usage error, 3 unbalanced brackets, 4 I/O failure

Examples:
- Run a program from a file:
    {0} run --file ./hello.bf
- Copy stdin to stdout:
    {0} run ",[.,]" < input.txt
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
