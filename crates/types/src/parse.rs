//! Shared `nom` building blocks for the textual forms of the value types.
//!
//! The drawing and style crates reuse [`decimal`] so that every number in a
//! path, gradient or unit string is read the same way.

use crate::error::TypeError;
use nom::branch::alt;
use nom::character::complete::{char, digit0, digit1, multispace0, one_of};
use nom::combinator::{map_res, opt, recognize};
use nom::error::Error;
use nom::sequence::delimited;
use nom::{IResult, Parser};

/// Parses a signed decimal number without an exponent (`-12`, `+3.5`, `.25`, `7.`).
///
/// A second `.` ends the number, so `0.5.5` reads as `0.5` followed by `.5`.
pub fn decimal(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize((
            opt(one_of("+-")),
            alt((
                recognize((digit1, opt((char('.'), digit0)))),
                recognize((char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<f64>(),
    )
    .parse(input)
}

/// Wraps a parser so it skips surrounding whitespace.
pub fn ws<'a, O, P>(inner: P) -> impl Parser<&'a str, Output = O, Error = Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

/// Runs a parser over the whole (trimmed) input, mapping any failure or
/// leftover text to a [`TypeError::Format`].
pub fn run_parser<'a, T, P>(
    mut parser: P,
    input: &'a str,
    type_name: &'static str,
    expected: &'static str,
) -> Result<T, TypeError>
where
    P: Parser<&'a str, Output = T, Error = Error<&'a str>>,
{
    match parser.parse(input.trim()) {
        Ok(("", value)) => Ok(value),
        _ => Err(TypeError::format(type_name, input, expected)),
    }
}
