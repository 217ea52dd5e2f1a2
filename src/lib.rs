//! A small virtual machine for the 8-instruction Brainfuck tape language.
//!
//! Source text goes through [`parse`], which keeps only `><+-.,[]`, checks
//! that `[` and `]` counts match, and builds a jump table. The resulting
//! [`Program`] is run by a [`Machine`] over an unbounded tape.
//!
//! Features and behaviors:
//! - The tape starts as a single zero cell and grows in either direction
//!   whenever the data pointer steps past an end.
//! - Cells are bytes; `+` and `-` wrap modulo 256.
//! - `.` writes one byte to the output sink and flushes it.
//! - `,` blocks until a byte is available; at end of input the
//!   [`EofPolicy`] decides (store 0 by default).
//! - Programs may loop forever or grow the tape without limit.
//!
//! Quick start:
//!
//! ```
//! use bfvm::{execute, parse, EofPolicy};
//!
//! // Classic "Hello World!"
//! let code = "++++++++++[>+++++++>++++++++++>+++>+<<<<-]>++.>+.+++++++..+++.>++.<<+++++++++++++++.>.+++.------.--------.>+.>.";
//! let program = parse(code.as_bytes()).expect("brackets should balance");
//!
//! let mut out = Vec::new();
//! execute(&program, std::io::empty(), &mut out, EofPolicy::Zero).expect("program should run");
//! assert_eq!(out, b"Hello World!\n");
//! ```

pub mod config;
pub mod engine;
pub mod input;
pub mod parser;
pub mod tape;

pub use config::{Overrides, Settings};
pub use engine::{execute, EngineError, EofPolicy, Machine, RunStats};
pub use input::Input;
pub use parser::{parse, JumpTable, ParseError, Program, Token};
pub use tape::Tape;
