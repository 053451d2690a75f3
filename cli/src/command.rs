use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;
use std::str::FromStr;

use sweeper_core::{Coord, Coord2};
use thiserror::Error;

/// Options offered at the main prompt.
pub const MAIN_OPTIONS: [&str; 4] = ["Q", "H", "R x,y", "M x,y"];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the whole field and stop.
    Quit,
    Help,
    Reveal(Coord2),
    /// Toggle the mine mark on a cell.
    Mark(Coord2),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("No command given")]
    Empty,
    #[error("Unknown command '{0}'")]
    UnknownCommand(char),
    #[error("Coordinates must have two integers separated by a comma")]
    MalformedCoordinates,
    #[error("Coordinates are too large, the board is not that big")]
    CoordinateTooLarge,
}

impl FromStr for Command {
    type Err = CommandError;

    /// Only the first character selects the command. For `R` and `M` anything
    /// that is not a digit or a comma is dropped before reading `x,y`.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let first = line.chars().next().ok_or(CommandError::Empty)?;

        match first.to_ascii_lowercase() {
            'q' => Ok(Self::Quit),
            'h' => Ok(Self::Help),
            'r' => parse_coordinates(line).map(Self::Reveal),
            'm' => parse_coordinates(line).map(Self::Mark),
            _ => Err(CommandError::UnknownCommand(first)),
        }
    }
}

pub fn parse_coordinates(entry: &str) -> Result<Coord2, CommandError> {
    let kept: String = entry
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();

    let mut parts = kept.split(',');
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::MalformedCoordinates);
    };

    Ok((parse_axis(x)?, parse_axis(y)?))
}

fn parse_axis(digits: &str) -> Result<Coord, CommandError> {
    digits.parse().map_err(|err: std::num::ParseIntError| match err.kind() {
        IntErrorKind::PosOverflow => CommandError::CoordinateTooLarge,
        _ => CommandError::MalformedCoordinates,
    })
}

/// Renders `["y", "n"]` as `[Y / N]`, capitalising longer options.
fn option_list(options: &[&str]) -> String {
    let labels: Vec<String> = options
        .iter()
        .map(|option| {
            let mut chars = option.chars();
            match chars.next() {
                Some(first) if option.len() < 2 => first.to_uppercase().collect(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    format!("[{}]", labels.join(" / "))
}

/// Asks `prompt` until an answer starts with the first letter of one of
/// `options` (ignoring case) and returns that answer as typed. `None` once the
/// input is exhausted.
pub fn menu<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
    options: &[&str],
) -> io::Result<Option<String>> {
    let accepted: Vec<char> = options
        .iter()
        .filter_map(|option| option.chars().next())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let prompt = format!("{}  {} ", prompt.trim(), option_list(options));

    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(None);
        }
        let answer = answer.trim_end_matches(['\r', '\n']);

        match answer.chars().next() {
            Some(first) if accepted.contains(&first.to_ascii_lowercase()) => {
                return Ok(Some(answer.to_string()));
            }
            _ => log::trace!("rejected menu answer {:?}", answer),
        }
    }
}
