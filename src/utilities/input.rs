/// ----- INPUT READER -----
/// Prompts for a value until the user enters one that converts and passes
/// its legality check. Blank input falls back to the default when one is set.

use std::convert::Infallible;
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::num::{NonZeroUsize, ParseIntError};

use super::debug;

pub const DEFAULT_INT_ERROR: &str = "Not a legal integer";
pub const DEFAULT_BOOL_ERROR: &str = "Not a legal Boolean";

/// Inputs read as `true`; anything else is `false`.
pub const TRUE_LITERALS: [&str; 4] = ["True", "true", "T", "t"];

/// Why a single answer was rejected. All of these are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("No default value, cannot be blank")]
    BlankWithoutDefault,
    #[error("Could not process/convert input")]
    ConversionFailure,
    #[error("{0}")]
    PredicateViolation(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("could not read input: {0}")]
    Io(#[from] io::Error),
    #[error("input ended before a legal value was entered")]
    EndOfInput,
    #[error("no legal value after {attempts} attempts: {last}")]
    AttemptsExhausted { attempts: usize, last: InputError },
}

pub fn parse_int(text: &str) -> Result<i64, ParseIntError> {
    text.trim().parse()
}

pub fn parse_bool(text: &str) -> Result<bool, Infallible> {
    Ok(TRUE_LITERALS.contains(&text))
}

/// Checks one answer. `convert` is not called for blank input.
pub fn check_value<T, E>(
    raw: &str,
    convert: impl Fn(&str) -> Result<T, E>,
    default: Option<&T>,
    is_legal: impl Fn(&T) -> bool,
    error_message: &str,
) -> Result<T, InputError>
where
    T: Clone,
{
    validate_value(raw, convert, default, |value| legality(&is_legal, value, error_message))
}

/// Like [`check_value`], but `validate` chooses the rejection message.
pub fn validate_value<T, E>(
    raw: &str,
    convert: impl Fn(&str) -> Result<T, E>,
    default: Option<&T>,
    validate: impl Fn(&T) -> Result<(), String>,
) -> Result<T, InputError>
where
    T: Clone,
{
    let value = match (raw.is_empty(), default) {
        (true, Some(default)) => default.clone(),
        (true, None) => return Err(InputError::BlankWithoutDefault),
        (false, _) => convert(raw).map_err(|_| InputError::ConversionFailure)?,
    };

    validate(&value).map_err(InputError::PredicateViolation)?;
    Ok(value)
}

fn legality<T>(is_legal: impl Fn(&T) -> bool, value: &T, error_message: &str) -> Result<(), String> {
    if is_legal(value) {
        Ok(())
    } else {
        Err(error_message.to_owned())
    }
}

fn prompt_text(prompt: &str, default: Option<&str>) -> String {
    match default {
        Some(default) => format!("{prompt} (default: \"{default}\"): "),
        None => format!("{prompt}: "),
    }
}

/// Boolean defaults are shown capitalised, "True" / "False".
fn bool_text(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

pub struct ValueReader<R, W> {
    input: R,
    output: W,
    max_attempts: Option<NonZeroUsize>,
}

impl<R: BufRead, W: Write> ValueReader<R, W> {
    pub fn new(input: R, output: W) -> Self {
        ValueReader {
            input,
            output,
            max_attempts: None,
        }
    }

    /// Gives up with [`ReadError::AttemptsExhausted`] after `max_attempts`
    /// rejected answers instead of asking forever.
    pub fn with_max_attempts(mut self, max_attempts: NonZeroUsize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read_line(&mut self) -> Result<String, ReadError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ReadError::EndOfInput);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }

    fn ask<T, E>(
        &mut self,
        full_prompt: &str,
        convert: impl Fn(&str) -> Result<T, E>,
        default: Option<T>,
        validate: impl Fn(&T) -> Result<(), String>,
    ) -> Result<T, ReadError>
    where
        T: Clone + Display,
    {
        let mut attempts = 0;

        loop {
            write!(self.output, "{full_prompt}")?;
            self.output.flush()?;
            let raw = self.read_line()?;
            attempts += 1;

            match validate_value(&raw, &convert, default.as_ref(), &validate) {
                Ok(value) => {
                    tracing::debug!(full_prompt, attempts, %value, "accepted input");
                    return Ok(value);
                }
                Err(err) => {
                    tracing::debug!(full_prompt, attempts, %err, "rejected input");
                    debug::print_invalid_input(&mut self.output, &err)?;
                    if self.max_attempts.is_some_and(|max| attempts >= max.get()) {
                        return Err(ReadError::AttemptsExhausted { attempts, last: err });
                    }
                }
            }
        }
    }

    pub fn read_value<T, E>(
        &mut self,
        prompt: &str,
        convert: impl Fn(&str) -> Result<T, E>,
        default: Option<T>,
        is_legal: impl Fn(&T) -> bool,
        error_message: &str,
    ) -> Result<T, ReadError>
    where
        T: Clone + Display,
    {
        self.read_validated(prompt, convert, default, |value| {
            legality(&is_legal, value, error_message)
        })
    }

    /// Like [`ValueReader::read_value`], but `validate` returns the message
    /// shown for each kind of illegal value.
    pub fn read_validated<T, E>(
        &mut self,
        prompt: &str,
        convert: impl Fn(&str) -> Result<T, E>,
        default: Option<T>,
        validate: impl Fn(&T) -> Result<(), String>,
    ) -> Result<T, ReadError>
    where
        T: Clone + Display,
    {
        let default_text = default.as_ref().map(ToString::to_string);
        let full_prompt = prompt_text(prompt, default_text.as_deref());
        self.ask(&full_prompt, convert, default, validate)
    }

    pub fn read_int(
        &mut self,
        prompt: &str,
        default: Option<i64>,
        is_legal: impl Fn(&i64) -> bool,
        error_message: &str,
    ) -> Result<i64, ReadError> {
        self.read_value(prompt, parse_int, default, is_legal, error_message)
    }

    pub fn read_bool(
        &mut self,
        prompt: &str,
        default: Option<bool>,
        is_legal: impl Fn(&bool) -> bool,
        error_message: &str,
    ) -> Result<bool, ReadError> {
        let full_prompt = prompt_text(prompt, default.map(bool_text));
        self.ask(&full_prompt, parse_bool, default, |value| {
            legality(&is_legal, value, error_message)
        })
    }
}
