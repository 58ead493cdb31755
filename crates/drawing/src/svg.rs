//! SVG path data (`d` attribute) reader.
//!
//! Commands are applied to a [`GraphicsPath`] as they are read. Numbers may be
//! separated by whitespace, commas, or nothing at all when a sign or a second
//! decimal point makes the boundary unambiguous (`10-5`, `0.5.5`). A command
//! letter may be followed by several argument groups; extra groups after a
//! moveto are treated as linetos.

use crate::error::DrawingError;
use crate::path::GraphicsPath;
use folio_types::parse::decimal;
use folio_types::{Point, Unit};
use nom::character::complete::{i32 as nom_i32, one_of};
use nom::combinator::opt;
use nom::sequence::preceded;
use nom::{IResult, Parser};
use serde::{Deserialize, Serialize};

/// Controls how malformed path data is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathParseOptions {
    /// Stop at the first error. When off, a malformed command is logged and
    /// skipped, and reading resumes at the next command letter.
    pub strict: bool,
}

impl Default for PathParseOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

impl PathParseOptions {
    pub fn lenient() -> Self {
        Self { strict: false }
    }
}

const COMMANDS: &str = "MmLlHhVvCcSsQqTtAaZz";

/// A decimal with an optional exponent, e.g. `1.5e-3`.
fn number(input: &str) -> IResult<&str, f64> {
    (decimal, opt(preceded(one_of("eE"), nom_i32)))
        .map(|(mantissa, exponent)| match exponent {
            Some(e) => mantissa * 10f64.powi(e),
            None => mantissa,
        })
        .parse(input)
}

struct PathDataReader<'a> {
    data: &'a str,
    position: usize,
}

impl<'a> PathDataReader<'a> {
    fn new(data: &'a str) -> Self {
        Self { data, position: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.data[self.position..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, c: char) {
        self.position += c.len_utf8();
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == ',' {
                self.bump(c);
            } else {
                break;
            }
        }
    }

    fn skip_to_next_command(&mut self) {
        while let Some(c) = self.peek() {
            if COMMANDS.contains(c) {
                break;
            }
            self.bump(c);
        }
    }

    /// Whether another argument group follows before the next command.
    fn has_number(&mut self) -> bool {
        self.skip_separators();
        matches!(self.peek(), Some(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
    }

    fn number(&mut self) -> Result<f64, DrawingError> {
        self.skip_separators();
        let input = self.rest();
        if input.is_empty() {
            return Err(DrawingError::path_data(self.position, "Expected a number, found end of data"));
        }
        match number(input) {
            Ok((remaining, value)) => {
                self.position += input.len() - remaining.len();
                Ok(value)
            }
            Err(_) => Err(DrawingError::path_data(
                self.position,
                format!("Expected a number, found '{}'", input.chars().next().unwrap_or(' ')),
            )),
        }
    }

    fn unit(&mut self) -> Result<Unit, DrawingError> {
        Ok(Unit::pt(self.number()?))
    }

    fn point(&mut self) -> Result<Point, DrawingError> {
        let x = self.number()?;
        let y = self.number()?;
        Ok(Point::pt(x, y))
    }

    /// Arc flags are a single `0` or `1` and need no separator after them.
    fn flag(&mut self) -> Result<bool, DrawingError> {
        self.skip_separators();
        match self.peek() {
            Some('0') => {
                self.bump('0');
                Ok(false)
            }
            Some('1') => {
                self.bump('1');
                Ok(true)
            }
            Some(c) => Err(DrawingError::path_data(
                self.position,
                format!("Expected an arc flag (0 or 1), found '{c}'"),
            )),
            None => Err(DrawingError::path_data(self.position, "Expected an arc flag, found end of data")),
        }
    }

    /// Reads the argument groups of one command and applies them.
    fn command(&mut self, path: &mut GraphicsPath, letter: char, at: usize) -> Result<(), DrawingError> {
        let relative = letter.is_ascii_lowercase();
        match letter.to_ascii_uppercase() {
            'Z' => {
                path.close_path(false);
            }
            'M' => {
                let p = self.point()?;
                if relative {
                    path.move_by(p)?;
                } else {
                    path.move_to(p);
                }
                while self.has_number() {
                    let p = self.point()?;
                    if relative {
                        path.line_for(p)?;
                    } else {
                        path.line_to(p);
                    }
                }
            }
            'L' => loop {
                let p = self.point()?;
                if relative {
                    path.line_for(p)?;
                } else {
                    path.line_to(p);
                }
                if !self.has_number() {
                    break;
                }
            },
            'H' => loop {
                let x = self.unit()?;
                if relative {
                    path.horizontal_line_for(x)?;
                } else {
                    path.horizontal_line_to(x);
                }
                if !self.has_number() {
                    break;
                }
            },
            'V' => loop {
                let y = self.unit()?;
                if relative {
                    path.vertical_line_for(y)?;
                } else {
                    path.vertical_line_to(y);
                }
                if !self.has_number() {
                    break;
                }
            },
            'C' => loop {
                let start_handle = self.point()?;
                let end_handle = self.point()?;
                let end = self.point()?;
                if relative {
                    path.cubic_curve_for(end, start_handle, end_handle)?;
                } else {
                    path.cubic_curve_to(end, start_handle, end_handle);
                }
                if !self.has_number() {
                    break;
                }
            },
            'S' => loop {
                let end_handle = self.point()?;
                let end = self.point()?;
                if relative {
                    path.smooth_cubic_curve_for(end, end_handle)?;
                } else {
                    path.smooth_cubic_curve_to(end, end_handle)?;
                }
                if !self.has_number() {
                    break;
                }
            },
            'Q' => loop {
                let control = self.point()?;
                let end = self.point()?;
                if relative {
                    path.quadratic_curve_for(end, control)?;
                } else {
                    path.quadratic_curve_to(end, control);
                }
                if !self.has_number() {
                    break;
                }
            },
            'T' => loop {
                let end = self.point()?;
                if relative {
                    path.smooth_quadratic_curve_for(end)?;
                } else {
                    path.smooth_quadratic_curve_to(end)?;
                }
                if !self.has_number() {
                    break;
                }
            },
            'A' => loop {
                let radius_x = self.unit()?;
                let radius_y = self.unit()?;
                let rotation = self.number()?;
                let large_arc = self.flag()?;
                let sweep = self.flag()?;
                let end = self.point()?;
                if relative {
                    path.arc_for(radius_x, radius_y, rotation, large_arc, sweep, end)?;
                } else {
                    path.arc_to(radius_x, radius_y, rotation, large_arc, sweep, end);
                }
                if !self.has_number() {
                    break;
                }
            },
            _ => {
                return Err(DrawingError::path_data(at, format!("Unknown path command '{letter}'")));
            }
        }
        Ok(())
    }
}

/// Parses SVG path data into a new path, failing on the first error.
pub fn parse_path_data(data: &str) -> Result<GraphicsPath, DrawingError> {
    parse_path_data_with(data, PathParseOptions::default())
}

pub fn parse_path_data_with(data: &str, options: PathParseOptions) -> Result<GraphicsPath, DrawingError> {
    let mut path = GraphicsPath::new();
    append_path_data(&mut path, data, options)?;
    Ok(path)
}

/// Appends the commands in `data` to an existing path.
pub fn append_path_data(path: &mut GraphicsPath, data: &str, options: PathParseOptions) -> Result<(), DrawingError> {
    let mut reader = PathDataReader::new(data);
    loop {
        reader.skip_separators();
        let Some(letter) = reader.peek() else {
            break;
        };
        let at = reader.position;
        let result = if letter.is_ascii_alphabetic() {
            reader.bump(letter);
            reader.command(path, letter, at)
        } else {
            reader.bump(letter);
            Err(DrawingError::path_data(at, format!("Expected a path command, found '{letter}'")))
        };
        if let Err(err) = result {
            if options.strict {
                return Err(err);
            }
            log::warn!("Skipping malformed path data: {err}");
            reader.skip_to_next_command();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathOperation;

    fn ops(path: &GraphicsPath) -> Vec<PathOperation> {
        path.operations().cloned().collect()
    }

    #[test]
    fn test_compact_path_data() {
        let path = parse_path_data("M-84.1487,-15.8513h168.2974 V10.053 H-2Z").unwrap();
        let ops = ops(&path);
        assert_eq!(ops.len(), 5);
        assert_eq!(ops[0], PathOperation::MoveTo(Point::pt(-84.1487, -15.8513)));
        assert_eq!(ops[2], PathOperation::LineTo(Point::pt(84.1487, 10.053)));
        assert_eq!(ops[4], PathOperation::Close);
        assert_eq!(path.cursor(), Point::pt(-2.0, 10.053));
    }

    #[test]
    fn test_implicit_repeats() {
        let path = parse_path_data("M0 0 10 0 10 10 L20 20 30 30").unwrap();
        let ops = ops(&path);
        assert_eq!(ops.len(), 5);
        assert_eq!(ops[1], PathOperation::LineTo(Point::pt(10.0, 0.0)));
        assert_eq!(ops[4], PathOperation::LineTo(Point::pt(30.0, 30.0)));
    }

    #[test]
    fn test_relative_moveto_repeats_are_relative_lines() {
        let path = parse_path_data("m10 10 5 5").unwrap();
        assert_eq!(ops(&path)[1], PathOperation::LineTo(Point::pt(15.0, 15.0)));
    }

    #[test]
    fn test_numbers_without_separators() {
        let path = parse_path_data("M10-5L.5.5l1e1,0").unwrap();
        let ops = ops(&path);
        assert_eq!(ops[0], PathOperation::MoveTo(Point::pt(10.0, -5.0)));
        assert_eq!(ops[1], PathOperation::LineTo(Point::pt(0.5, 0.5)));
        assert_eq!(ops[2], PathOperation::LineTo(Point::pt(10.5, 0.5)));
    }

    #[test]
    fn test_arc_flags_without_separators() {
        let path = parse_path_data("M0 0A5 5 0 0110 0").unwrap();
        assert_eq!(
            ops(&path)[1],
            PathOperation::Arc {
                radius_x: Unit::pt(5.0),
                radius_y: Unit::pt(5.0),
                x_axis_rotation: 0.0,
                large_arc: false,
                sweep_positive: true,
                end: Point::pt(10.0, 0.0),
            }
        );
    }

    #[test]
    fn test_smooth_curves() {
        let path = parse_path_data("M0 0 C0 5 8 5 10 0 S18 -5 20 0 Q25 5 30 0 T40 0").unwrap();
        let ops = ops(&path);
        assert_eq!(ops.len(), 5);
        assert!(matches!(
            ops[2],
            PathOperation::CubicBezier { start_handle: Some(h), .. } if h == Point::pt(12.0, -5.0)
        ));
        assert!(matches!(
            ops[4],
            PathOperation::QuadraticBezier { control, .. } if control == Point::pt(35.0, -5.0)
        ));
    }

    #[test]
    fn test_errors_report_offset() {
        match parse_path_data("M0 0 L10") {
            Err(DrawingError::PathData { position, .. }) => assert_eq!(position, 8),
            other => panic!("unexpected result {other:?}"),
        }
        match parse_path_data("M0 0 X10 10") {
            Err(DrawingError::PathData { position, message }) => {
                assert_eq!(position, 5);
                assert!(message.contains('X'));
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(parse_path_data("M0 0 A5 5 0 2 1 10 0").is_err());
        assert!(parse_path_data("10 10").is_err());
    }

    #[test]
    fn test_lenient_mode_skips_bad_commands() {
        let path = parse_path_data_with("M0 0 X1 2 L10 10 Lfoo L20 20", PathParseOptions::lenient()).unwrap();
        let ops = ops(&path);
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[2], PathOperation::LineTo(Point::pt(20.0, 20.0)));
    }

    #[test]
    fn test_empty_data() {
        assert!(parse_path_data("").unwrap().is_empty());
        assert!(parse_path_data("  ,  ").unwrap().is_empty());
    }
}
