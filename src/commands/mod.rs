pub mod check;
pub mod run;

use std::fs;
use std::io;
use std::path::PathBuf;

use clap::Args;

pub const EXIT_OK: i32 = 0;
pub const EXIT_LOAD: i32 = 1;
pub const EXIT_USAGE: i32 = 2;
pub const EXIT_UNBALANCED: i32 = 3;
pub const EXIT_IO: i32 = 4;

/// Where the program source comes from: positional code or `--file`.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Read source from PATH instead of positional "<code>"
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Concatenated source parts; may start with `-`, as in "-[.-]"
    #[arg(value_name = "code", allow_hyphen_values = true)]
    pub code: Vec<String>,
}

/// Options that clap hands over as code once a hyphen-led code part has started.
const OPTION_NAMES: &[&str] = &["-f", "--file", "-v", "--verbose", "-h", "--help", "--eof"];

fn misplaced_option(part: &str) -> Option<&str> {
    let name = part.split_once('=').map_or(part, |(name, _)| name);
    OPTION_NAMES.iter().copied().find(|option| *option == name)
}

/// Loaded source bytes plus a name for diagnostics.
#[derive(Debug)]
pub struct Source {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no source given")]
    Missing,

    #[error("cannot use positional code together with --file")]
    Conflicting,

    #[error("option '{option}' found after the code; place options before the code")]
    MisplacedOption { option: String },

    #[error("\"{path}\" does not exist")]
    NotFound { path: String },

    #[error("failed to read \"{path}\": {source}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            SourceError::Missing | SourceError::Conflicting | SourceError::MisplacedOption { .. }
        )
    }
}

/// Read the source as raw bytes; the tokenizer drops whatever is not an instruction.
pub fn load_source(args: SourceArgs) -> Result<Source, SourceError> {
    let SourceArgs { file, code } = args;

    if let Some(option) = code.iter().find_map(|part| misplaced_option(part)) {
        return Err(SourceError::MisplacedOption { option: option.to_string() });
    }

    match (file, code.is_empty()) {
        (None, true) => Err(SourceError::Missing),
        (Some(_), false) => Err(SourceError::Conflicting),
        (Some(path), true) => {
            let name = path.display().to_string();
            match fs::read(&path) {
                Ok(bytes) => Ok(Source { name, bytes }),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    Err(SourceError::NotFound { path: name })
                }
                Err(source) => Err(SourceError::Unreadable { path: name, source }),
            }
        }
        (None, false) => Ok(Source {
            name: "<args>".to_string(),
            bytes: code.join("").into_bytes(),
        }),
    }
}
