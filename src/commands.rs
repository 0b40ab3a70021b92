//! Scripted input
//!
//! Turns text commands into button presses. A digit is entered by pressing
//! the layer-0 button that shows it, so the adapter never needs to know where
//! the cursor will land next; it reads the cursor before every press.
//!
//! | Command | Effect |
//! |---------|--------|
//! | `press 3 1 4` / `press 314` | Enter the digits in order at the cursor |
//! | `fill 0123456789 9876543210` | Each answer fills one layer, by column |
//! | `reset` | Press the reset button |
//!
//! A command is parsed in full before anything is pressed, and execution
//! stops at the first strike.

use std::str::FromStr;

use thiserror::Error;

use crate::consts::COLUMNS_COUNT;
use crate::sim::{Digit, PressOutcome, Puzzle, RandomSource};

/// Usage text for hosts
pub const HELP: &str = "commands: press <digits> | fill <10 digits> [<10 digits> ...] | reset";

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Digits to enter one after another
    Press(Vec<Digit>),
    /// Per-layer answers, indexed by column
    Fill(Vec<[Digit; COLUMNS_COUNT]>),
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    UnknownVerb(String),
    #[error("'{verb}' needs at least one argument")]
    MissingArguments { verb: &'static str },
    #[error("'{verb}' takes no arguments")]
    UnexpectedArguments { verb: &'static str },
    #[error("'{0}' is not a list of digits")]
    InvalidDigits(String),
    #[error("answer '{0}' must be exactly 10 digits")]
    InvalidAnswer(String),
    #[error("{requested} layers requested but only {remaining} remain")]
    TooManyLayers { requested: usize, remaining: usize },
    #[error("the puzzle is not accepting input")]
    NotAccepting,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('!').unwrap_or(s);
        let mut tokens = s.split_whitespace();
        let verb = tokens.next().ok_or(CommandError::Empty)?.to_lowercase();
        let args: Vec<&str> = tokens.collect();

        match verb.as_str() {
            "press" | "p" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArguments { verb: "press" });
                }
                let mut digits = Vec::new();
                for arg in &args {
                    digits.extend(parse_digits(arg)?);
                }
                Ok(Command::Press(digits))
            }
            "fill" | "f" => {
                if args.is_empty() {
                    return Err(CommandError::MissingArguments { verb: "fill" });
                }
                let answers = args
                    .iter()
                    .map(|arg| parse_answer(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Command::Fill(answers))
            }
            "reset" | "r" => {
                if !args.is_empty() {
                    return Err(CommandError::UnexpectedArguments { verb: "reset" });
                }
                Ok(Command::Reset)
            }
            _ => Err(CommandError::UnknownVerb(verb)),
        }
    }
}

fn parse_digits(token: &str) -> Result<Vec<Digit>, CommandError> {
    token
        .chars()
        .map(|c| Digit::from_char(c).ok_or_else(|| CommandError::InvalidDigits(token.to_string())))
        .collect()
}

fn parse_answer(token: &str) -> Result<[Digit; COLUMNS_COUNT], CommandError> {
    let digits = parse_digits(token).map_err(|_| CommandError::InvalidAnswer(token.to_string()))?;
    digits
        .try_into()
        .map_err(|_| CommandError::InvalidAnswer(token.to_string()))
}

impl Command {
    /// Parse a command line
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        line.parse()
    }

    /// Drive the puzzle. Returns one outcome per synthesized press; stops at
    /// the first strike. A denied reset is not an error.
    pub fn run<R: RandomSource>(
        &self,
        puzzle: &mut Puzzle<R>,
    ) -> Result<Vec<PressOutcome>, CommandError> {
        match self {
            Command::Reset => {
                if let Err(denied) = puzzle.reset() {
                    log::debug!("[MWISort #{}] Reset ignored: {}", puzzle.module_id(), denied);
                }
                Ok(Vec::new())
            }
            Command::Press(digits) => {
                if !puzzle.is_filling() {
                    return Err(CommandError::NotAccepting);
                }
                let mut outcomes = Vec::with_capacity(digits.len());
                for &digit in digits {
                    let outcome = puzzle.enter_digit(digit);
                    outcomes.push(outcome);
                    if outcome.is_strike() || !puzzle.is_filling() {
                        break;
                    }
                }
                Ok(outcomes)
            }
            Command::Fill(answers) => {
                let remaining = puzzle.remaining_layers();
                if answers.len() > remaining {
                    return Err(CommandError::TooManyLayers {
                        requested: answers.len(),
                        remaining,
                    });
                }
                if !puzzle.is_filling() {
                    return Err(CommandError::NotAccepting);
                }
                let mut outcomes = Vec::new();
                for answer in answers {
                    let Some(layer) = puzzle.cursor().map(|c| c.layer) else {
                        break;
                    };
                    while let Some(cursor) = puzzle.cursor().filter(|c| c.layer == layer) {
                        let outcome = puzzle.enter_digit(answer[cursor.column]);
                        outcomes.push(outcome);
                        if outcome.is_strike() {
                            return Ok(outcomes);
                        }
                    }
                }
                Ok(outcomes)
            }
        }
    }
}
