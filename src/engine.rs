//! Fetch-decode-execute loop.
//!
//! A [`Machine`] borrows a parsed [`Program`] and owns everything that
//! changes during a run: the tape, the instruction pointer, the input buffer
//! and the output sink.
//!
//! Behaviors:
//! - `.` writes one byte and flushes the sink before the next instruction.
//! - `,` blocks until the input buffer yields a byte. At end of input the
//!   configured [`EofPolicy`] applies.
//! - A jump overwrites the instruction pointer with the partner bracket's
//!   index, and the usual advance by one still follows.
//! - Tape growth and wraparound absorb every boundary case, so the only
//!   failures are host I/O errors.
//!
//! ```
//! use bfvm::{parse, Input, Machine};
//!
//! let program = parse(b",[.,]").unwrap();
//! let mut out = Vec::new();
//! Machine::new(&program, Input::new(&b"echo"[..]), &mut out)
//!     .run()
//!     .unwrap();
//! assert_eq!(out, b"echo");
//! ```

use std::fmt;
use std::io::{self, Read, Write};
use std::str::FromStr;

use crate::input::Input;
use crate::parser::{Program, Token};
use crate::tape::Tape;

/// Failures of the host's I/O channels during a run.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to read input at instruction {ip}: {source}")]
    Input {
        ip: usize,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output at instruction {ip}: {source}")]
    Output {
        ip: usize,
        #[source]
        source: io::Error,
    },
}

impl EngineError {
    /// Index of the instruction that was executing.
    pub fn ip(&self) -> usize {
        match self {
            EngineError::Input { ip, .. } | EngineError::Output { ip, .. } => *ip,
        }
    }
}

/// What `,` does once input is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EofPolicy {
    /// Store 0 in the current cell.
    #[default]
    Zero,
    /// Leave the current cell untouched.
    Unchanged,
    /// End the run.
    Halt,
}

impl fmt::Display for EofPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EofPolicy::Zero => "zero",
            EofPolicy::Unchanged => "unchanged",
            EofPolicy::Halt => "halt",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown EOF policy '{0}' (expected zero, unchanged or halt)")]
pub struct UnknownEofPolicy(pub String);

impl FromStr for EofPolicy {
    type Err = UnknownEofPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" => Ok(EofPolicy::Zero),
            "unchanged" => Ok(EofPolicy::Unchanged),
            "halt" => Ok(EofPolicy::Halt),
            _ => Err(UnknownEofPolicy(s.to_string())),
        }
    }
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Instructions executed.
    pub steps: u64,
    pub bytes_read: usize,
    pub bytes_written: usize,
    /// Tape length when the run ended.
    pub tape_len: usize,
}

/// Execution state for a single run of a program.
pub struct Machine<'p, R, W> {
    program: &'p Program,
    tape: Tape,
    ip: usize,
    input: Input<R>,
    output: W,
    eof: EofPolicy,
    steps: u64,
    bytes_written: usize,
}

impl<'p, R: Read, W: Write> Machine<'p, R, W> {
    pub fn new(program: &'p Program, input: Input<R>, output: W) -> Self {
        Self {
            program,
            tape: Tape::new(),
            ip: 0,
            input,
            output,
            eof: EofPolicy::default(),
            steps: 0,
            bytes_written: 0,
        }
    }

    pub fn with_eof_policy(mut self, eof: EofPolicy) -> Self {
        self.eof = eof;
        self
    }

    pub fn is_halted(&self) -> bool {
        self.ip >= self.program.len()
    }

    /// Index of the next instruction; equals the program length once halted.
    pub fn instruction_pointer(&self) -> usize {
        self.ip
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn stats(&self) -> RunStats {
        RunStats {
            steps: self.steps,
            bytes_read: self.input.bytes_read(),
            bytes_written: self.bytes_written,
            tape_len: self.tape.len(),
        }
    }

    /// Give back the output sink, e.g. to inspect a `Vec<u8>` after the run.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Execute one instruction. Does nothing once the machine has halted.
    pub fn step(&mut self) -> Result<(), EngineError> {
        let Some(&token) = self.program.tokens().get(self.ip) else {
            return Ok(());
        };

        match token {
            Token::Right => self.tape.move_right(),
            Token::Left => self.tape.move_left(),
            Token::Increment => self.tape.increment(),
            Token::Decrement => self.tape.decrement(),
            Token::Output => {
                let byte = [self.tape.get()];
                self.output
                    .write_all(&byte)
                    .and_then(|()| self.output.flush())
                    .map_err(|source| EngineError::Output { ip: self.ip, source })?;
                self.bytes_written += 1;
            }
            Token::Input => {
                let next = self
                    .input
                    .next_byte()
                    .map_err(|source| EngineError::Input { ip: self.ip, source })?;
                match (next, self.eof) {
                    (Some(byte), _) => self.tape.set(byte),
                    (None, EofPolicy::Zero) => self.tape.set(0),
                    (None, EofPolicy::Unchanged) => {}
                    (None, EofPolicy::Halt) => {
                        self.steps += 1;
                        self.ip = self.program.len();
                        return Ok(());
                    }
                }
            }
            Token::LoopStart => {
                if self.tape.get() == 0 {
                    self.jump();
                }
            }
            Token::LoopEnd => {
                if self.tape.get() != 0 {
                    self.jump();
                }
            }
        }

        // An orphan's jump targets the program length; stop there rather than past it.
        self.steps += 1;
        self.ip = (self.ip + 1).min(self.program.len());
        Ok(())
    }

    /// Run until the instruction pointer leaves the program.
    pub fn run(&mut self) -> Result<RunStats, EngineError> {
        while !self.is_halted() {
            self.step()?;
        }
        Ok(self.stats())
    }

    fn jump(&mut self) {
        if let Some(target) = self.program.jumps().partner(self.ip) {
            self.ip = target;
        }
    }
}

/// Run `program` to completion against `input` and `output`.
pub fn execute<R: Read, W: Write>(
    program: &Program,
    input: R,
    output: W,
    eof: EofPolicy,
) -> Result<RunStats, EngineError> {
    Machine::new(program, Input::new(input), output)
        .with_eof_policy(eof)
        .run()
}
