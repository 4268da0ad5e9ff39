//! Program text loader.

use pest::{error::InputLocation, Parser};
use thiserror::Error;


#[derive(pest_derive::Parser)]
#[grammar = "parser/program.pest"]
struct ProgramParser;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("malformed program at byte {position}: {reason}")]
    MalformedProgram { position: usize, reason: String },
}

impl From<pest::error::Error<Rule>> for Error {
    fn from(err: pest::error::Error<Rule>) -> Self {
        let position = match err.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        Error::MalformedProgram {
            position,
            reason: err.variant.message().into_owned(),
        }
    }
}

/// Parses comma-separated program text into memory words.
pub fn parse_program(text: &str) -> Result<Vec<i64>, Error> {
    let program = ProgramParser::parse(Rule::program, text)?
        .next()
        .expect("program rule always yields one pair");

    program
        .into_inner()
        .filter(|pair| pair.as_rule() == Rule::word)
        .map(|word| {
            let token = word.as_str();
            token.parse::<i64>().map_err(|_| Error::MalformedProgram {
                position: word.as_span().start(),
                reason: format!("`{token}` does not fit in a 64-bit word"),
            })
        })
        .collect()
}
