//! The game manager's line protocol.
//!
//! After the agent announces its name, the manager sends one configuration
//! line of five comma-separated integers:
//!
//! `color,depth_limit,algorithm,caching,ordering`
//!
//! Then, until the game ends, it alternates a status line (`SCORE d l` or
//! `FINAL d l`) with a board line, a nested sequence of rows such as
//! `((0, 0, 0, 0), (0, 2, 1, 0), (0, 1, 2, 0), (0, 0, 0, 0))`. The agent
//! answers every board with `column row`, or `PASS` if it has no move.

use std::fmt;

use thiserror::Error;

use crate::{
    board::{Board, BoardError, Color, Move},
    engine::DepthLimit,
};

pub const PASS: &str = "PASS";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("expected 5 comma-separated integers in config line, got {0:?}")]
    ConfigArity(String),
    #[error("config field {field} is not an integer: {value:?}")]
    NotAnInteger { field: &'static str, value: String },
    #[error("config field {field} must be {expected}, got {value}")]
    OutOfRange { field: &'static str, expected: &'static str, value: i64 },
    #[error("malformed status line {0:?}")]
    Status(String),
    #[error("malformed board at byte {position}: {reason}")]
    BoardSyntax { position: usize, reason: &'static str },
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
    #[error("input ended before the game was over")]
    UnexpectedEof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Minimax,
    AlphaBeta,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Minimax => write!(f, "MINIMAX"),
            Algorithm::AlphaBeta => write!(f, "ALPHA-BETA"),
        }
    }
}

/// The agent's settings for one game, as sent by the manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentConfig {
    pub color: Color,
    pub depth_limit: DepthLimit,
    pub algorithm: Algorithm,
    pub caching: bool,
    pub ordering: bool,
}

impl AgentConfig {
    pub fn parse(line: &str) -> Result<AgentConfig, ProtocolError> {
        let fields: Vec<&str> = line.trim().split(',').map(str::trim).collect();
        let [color, depth, algorithm, caching, ordering] = fields.as_slice() else {
            return Err(ProtocolError::ConfigArity(line.to_string()));
        };

        let color = integer("color", color)?;
        let color = Color::from_code(color).ok_or(ProtocolError::OutOfRange {
            field: "color",
            expected: "1 (dark) or 2 (light)",
            value: color,
        })?;

        let depth_limit = DepthLimit::from_int(integer("depth limit", depth)?);

        let algorithm = match integer("algorithm", algorithm)? {
            1 => Algorithm::Minimax,
            0 => Algorithm::AlphaBeta,
            value => {
                return Err(ProtocolError::OutOfRange {
                    field: "algorithm",
                    expected: "1 (minimax) or 0 (alpha-beta)",
                    value,
                })
            }
        };

        Ok(AgentConfig {
            color,
            depth_limit,
            algorithm,
            caching: flag("caching", caching)?,
            ordering: flag("ordering", ordering)?,
        })
    }
}

fn integer(field: &'static str, value: &str) -> Result<i64, ProtocolError> {
    value
        .parse()
        .map_err(|_| ProtocolError::NotAnInteger { field, value: value.to_string() })
}

fn flag(field: &'static str, value: &str) -> Result<bool, ProtocolError> {
    match integer(field, value)? {
        0 => Ok(false),
        1 => Ok(true),
        value => Err(ProtocolError::OutOfRange { field, expected: "0 or 1", value }),
    }
}

/// A status line: the running score, or the final one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Score { dark: u32, light: u32 },
    Final { dark: u32, light: u32 },
}

pub fn parse_status(line: &str) -> Result<Status, ProtocolError> {
    let err = || ProtocolError::Status(line.to_string());
    let mut words = line.split_whitespace();
    let (Some(kind), Some(dark), Some(light), None) =
        (words.next(), words.next(), words.next(), words.next())
    else {
        return Err(err());
    };
    let dark = dark.parse().map_err(|_| err())?;
    let light = light.parse().map_err(|_| err())?;
    match kind {
        "SCORE" => Ok(Status::Score { dark, light }),
        "FINAL" => Ok(Status::Final { dark, light }),
        _ => Err(err()),
    }
}

/// Parses a board sent as a sequence of rows. Rows and the outer sequence
/// may use either `(...)` or `[...]`, and trailing commas are allowed.
pub fn parse_board(line: &str) -> Result<Board, ProtocolError> {
    let mut parser = BoardParser { bytes: line.as_bytes(), position: 0 };
    let rows = parser.rows()?;
    parser.skip_whitespace();
    if parser.position != parser.bytes.len() {
        return Err(parser.error("trailing input after board"));
    }
    Ok(Board::new(&rows)?)
}

struct BoardParser<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl BoardParser<'_> {
    fn error(&self, reason: &'static str) -> ProtocolError {
        ProtocolError::BoardSyntax { position: self.position, reason }
    }

    fn skip_whitespace(&mut self) {
        while self.bytes.get(self.position).map_or(false, u8::is_ascii_whitespace) {
            self.position += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_whitespace();
        self.bytes.get(self.position).copied()
    }

    fn open(&mut self) -> Result<u8, ProtocolError> {
        match self.peek() {
            Some(b'(') => {
                self.position += 1;
                Ok(b')')
            }
            Some(b'[') => {
                self.position += 1;
                Ok(b']')
            }
            Some(_) => Err(self.error("expected '(' or '['")),
            None => Err(self.error("unexpected end of board")),
        }
    }

    /// Parses comma-separated items up to `close`, which is consumed.
    fn sequence<T>(
        &mut self, close: u8, mut item: impl FnMut(&mut Self) -> Result<T, ProtocolError>,
    ) -> Result<Vec<T>, ProtocolError> {
        let mut items = Vec::new();
        loop {
            if self.peek() == Some(close) {
                self.position += 1;
                return Ok(items);
            }
            items.push(item(self)?);
            match self.peek() {
                Some(b',') => self.position += 1,
                Some(c) if c == close => {}
                Some(_) => return Err(self.error("expected ',' or closing bracket")),
                None => return Err(self.error("unexpected end of board")),
            }
        }
    }

    fn rows(&mut self) -> Result<Vec<Vec<i64>>, ProtocolError> {
        let close = self.open()?;
        self.sequence(close, |p| {
            let close = p.open()?;
            p.sequence(close, Self::cell)
        })
    }

    fn cell(&mut self) -> Result<i64, ProtocolError> {
        self.skip_whitespace();
        let start = self.position;
        while self.bytes.get(self.position).map_or(false, u8::is_ascii_digit) {
            self.position += 1;
        }
        if start == self.position {
            return Err(self.error("expected a cell code"));
        }
        std::str::from_utf8(&self.bytes[start..self.position])
            .ok()
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| self.error("cell code out of range"))
    }
}

/// The response line for a chosen move.
pub fn format_move(mv: Option<Move>) -> String {
    match mv {
        Some(mv) => format!("{} {}", mv.column, mv.row),
        None => PASS.to_string(),
    }
}
