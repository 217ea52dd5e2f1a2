use std::io::{self, IsTerminal, Write};

use bfvm::{EngineError, ParseError, RunStats};
use nu_ansi_term::{Color, Style};

/// Paint `text` only when stderr is a terminal, so piped diagnostics stay plain.
fn paint(style: Style, text: &str) -> String {
    if io::stderr().is_terminal() {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

fn report(program: &str, label: &str, style: Style, msg: &str) {
    eprintln!("{program}: {}: {msg}", paint(style, label));
    let _ = io::stderr().flush();
}

/// Unbalanced brackets, e.g. `bfvm: Parse error: "loop.bf" has unbalanced brackets (2 '[' against 1 ']')`.
pub fn print_parse_error(program: &str, source_name: &str, err: &ParseError) {
    let msg = match err {
        ParseError::Unbalanced { open, close } => format!(
            "\"{source_name}\" has unbalanced brackets ({open} '[' against {close} ']')"
        ),
    };
    report(program, "Parse error", Color::Red.bold(), &msg);
}

pub fn print_engine_error(program: &str, err: &EngineError) {
    report(program, "Runtime error", Color::Red.bold(), &err.to_string());
}

pub fn print_source_error(program: &str, err: &dyn std::error::Error) {
    report(program, "error", Color::Red.bold(), &err.to_string());
}

pub fn print_warning(program: &str, msg: &str) {
    report(program, "warning", Color::Yellow.bold(), msg);
}

/// Verbose-only progress line on stderr.
pub fn note(verbose: bool, program: &str, msg: &str) {
    if verbose {
        report(program, "note", Color::Cyan.normal(), msg);
    }
}

pub fn describe_stats(stats: &RunStats) -> String {
    format!(
        "halted after {} steps; read {} bytes, wrote {} bytes; tape grew to {} cells",
        stats.steps, stats.bytes_read, stats.bytes_written, stats.tape_len
    )
}
