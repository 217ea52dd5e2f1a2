//! Tokenizer, bracket validator and jump-table builder.
//!
//! Parsing runs three independent passes over the source:
//! - tokenization keeps only the eight instruction symbols `><+-.,[]` and
//!   silently drops everything else (whitespace, prose, comments);
//! - the balance check compares the number of `[` against the number of `]`;
//! - the jump table pairs brackets with a left-to-right stack scan.
//!
//! The balance check only counts. A source such as `][` passes it, and the
//! stack scan then leaves both brackets unpaired. Such *orphan* brackets are
//! kept in the table pointing at the halt target (the program length), so a
//! jump taken from an orphan ends the run instead of looping.

use std::fmt;
use std::str::FromStr;

/// One of the eight instructions of the language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    /// `>`
    Right,
    /// `<`
    Left,
    /// `+`
    Increment,
    /// `-`
    Decrement,
    /// `.`
    Output,
    /// `,`
    Input,
    /// `[`
    LoopStart,
    /// `]`
    LoopEnd,
}

impl Token {
    /// Decode a source byte. Returns `None` for anything outside `><+-.,[]`.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'>' => Some(Token::Right),
            b'<' => Some(Token::Left),
            b'+' => Some(Token::Increment),
            b'-' => Some(Token::Decrement),
            b'.' => Some(Token::Output),
            b',' => Some(Token::Input),
            b'[' => Some(Token::LoopStart),
            b']' => Some(Token::LoopEnd),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Token::Right => '>',
            Token::Left => '<',
            Token::Increment => '+',
            Token::Decrement => '-',
            Token::Output => '.',
            Token::Input => ',',
            Token::LoopStart => '[',
            Token::LoopEnd => ']',
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Structural errors found before execution starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The number of `[` differs from the number of `]`.
    #[error("unbalanced brackets: {open} '[' against {close} ']'")]
    Unbalanced { open: usize, close: usize },
}

/// Bracket tallies produced by [`check_balance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BracketCounts {
    pub open: usize,
    pub close: usize,
}

/// Bidirectional bracket pairing, indexed by instruction position.
///
/// `targets[i]` is `None` for non-bracket instructions. For a paired bracket
/// it holds the index of its partner; for an orphan it holds the halt target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpTable {
    targets: Vec<Option<usize>>,
    halt: usize,
}

impl JumpTable {
    /// Jump target for the bracket at `index`, or `None` if `index` is not a bracket.
    pub fn partner(&self, index: usize) -> Option<usize> {
        self.targets.get(index).copied().flatten()
    }

    /// True when the bracket at `index` was left unpaired by the stack scan.
    pub fn is_orphan(&self, index: usize) -> bool {
        self.partner(index) == Some(self.halt)
    }

    pub fn orphan_count(&self) -> usize {
        self.targets.iter().filter(|t| **t == Some(self.halt)).count()
    }

    /// The index one past the last instruction; orphan brackets jump here.
    pub fn halt_target(&self) -> usize {
        self.halt
    }
}

/// A validated, immutable instruction sequence with its jump table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    tokens: Vec<Token>,
    jumps: JumpTable,
}

impl Program {
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn jumps(&self) -> &JumpTable {
        &self.jumps
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of loops, counted by their opening brackets.
    pub fn loop_count(&self) -> usize {
        self.tokens.iter().filter(|t| **t == Token::LoopStart).count()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s.as_bytes())
    }
}

/// Keep only instruction bytes, in source order.
pub fn tokenize(source: &[u8]) -> Vec<Token> {
    source.iter().copied().filter_map(Token::from_byte).collect()
}

/// Count-only bracket validation. Does not look at nesting order.
pub fn check_balance(tokens: &[Token]) -> Result<BracketCounts, ParseError> {
    let mut counts = BracketCounts::default();
    for token in tokens {
        match token {
            Token::LoopStart => counts.open += 1,
            Token::LoopEnd => counts.close += 1,
            _ => {}
        }
    }

    if counts.open != counts.close {
        return Err(ParseError::Unbalanced {
            open: counts.open,
            close: counts.close,
        });
    }
    Ok(counts)
}

/// Pair brackets with a stack of pending `[` indices.
///
/// A `]` met with an empty stack, and any `[` still pending at the end, map to
/// the halt target.
pub fn build_jump_table(tokens: &[Token]) -> JumpTable {
    let halt = tokens.len();
    let mut targets: Vec<Option<usize>> = vec![None; tokens.len()];
    let mut stack: Vec<usize> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::LoopStart => stack.push(i),
            Token::LoopEnd => {
                let Some(open_index) = stack.pop() else {
                    targets[i] = Some(halt);
                    continue;
                };
                targets[open_index] = Some(i);
                targets[i] = Some(open_index);
            }
            _ => {}
        }
    }

    for open_index in stack {
        targets[open_index] = Some(halt);
    }

    JumpTable { targets, halt }
}

/// Tokenize, validate bracket balance and build the jump table.
pub fn parse(source: &[u8]) -> Result<Program, ParseError> {
    let tokens = tokenize(source);
    check_balance(&tokens)?;
    let jumps = build_jump_table(&tokens);
    Ok(Program { tokens, jumps })
}
