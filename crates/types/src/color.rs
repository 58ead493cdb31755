use crate::error::TypeError;
use crate::parse::{decimal, run_parser, ws};
use nom::bytes::complete::{tag_no_case, take_while_m_n};
use nom::character::complete::{char, digit1};
use nom::combinator::{map_opt, map_res, opt};
use nom::multi::separated_list1;
use nom::sequence::{delimited, preceded};
use nom::{IResult, Parser};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    None,
    Gray,
    Rgb,
    Cmyk,
}

/// A device color, tagged with the colorspace it was specified in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Color {
    #[default]
    Transparent,
    Gray(u8),
    Rgb { r: u8, g: u8, b: u8 },
    Cmyk { c: u8, m: u8, y: u8, k: u8 },
}

const NAMED_COLORS: [(&str, Color); 25] = [
    ("aqua", Color::rgb(0x00, 0xFF, 0xFF)),
    ("black", Color::rgb(0x00, 0x00, 0x00)),
    ("blue", Color::rgb(0x00, 0x00, 0xFF)),
    ("fuchsia", Color::rgb(0xFF, 0x00, 0xFF)),
    ("gray", Color::rgb(0x80, 0x80, 0x80)),
    ("green", Color::rgb(0x00, 0x80, 0x00)),
    ("lime", Color::rgb(0x00, 0xFF, 0x00)),
    ("maroon", Color::rgb(0x80, 0x00, 0x00)),
    ("navy", Color::rgb(0x00, 0x00, 0x80)),
    ("olive", Color::rgb(0x80, 0x80, 0x00)),
    ("purple", Color::rgb(0x80, 0x00, 0x80)),
    ("red", Color::rgb(0xFF, 0x00, 0x00)),
    ("silver", Color::rgb(0xC0, 0xC0, 0xC0)),
    ("teal", Color::rgb(0x00, 0x80, 0x80)),
    ("white", Color::rgb(0xFF, 0xFF, 0xFF)),
    ("yellow", Color::rgb(0xFF, 0xFF, 0x00)),
    ("lightblue", Color::rgb(0xAD, 0xD8, 0xE6)),
    ("lightgreen", Color::rgb(0x90, 0xEE, 0x90)),
    ("lightyellow", Color::rgb(0xFF, 0xFF, 0xE0)),
    ("lightcoral", Color::rgb(0xF0, 0x80, 0x80)),
    ("lightcyan", Color::rgb(0xE0, 0xFF, 0xFF)),
    ("lightgray", Color::rgb(0xD3, 0xD3, 0xD3)),
    ("lightsalmon", Color::rgb(0xFF, 0xA0, 0x7A)),
    ("lightskyblue", Color::rgb(0x87, 0xCE, 0xFA)),
    ("lightsteelblue", Color::rgb(0xB0, 0xC4, 0xDE)),
];

fn clamp_byte(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Color::Gray(value)
    }

    pub const fn cmyk(c: u8, m: u8, y: u8, k: u8) -> Self {
        Color::Cmyk { c, m, y, k }
    }

    pub fn space(&self) -> ColorSpace {
        match self {
            Color::Transparent => ColorSpace::None,
            Color::Gray(_) => ColorSpace::Gray,
            Color::Rgb { .. } => ColorSpace::Rgb,
            Color::Cmyk { .. } => ColorSpace::Cmyk,
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Color::Transparent)
    }

    /// Looks up one of the standard color names (case-insensitive).
    pub fn from_name(name: &str) -> Option<Color> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
            .map(|(_, c)| *c)
    }

    pub fn to_rgb(&self) -> Color {
        match *self {
            Color::Gray(v) => Color::rgb(v, v, v),
            Color::Cmyk { c, m, y, k } => {
                let k = 255.0 - f64::from(k);
                Color::rgb(
                    clamp_byte((255.0 - f64::from(c)) * k / 255.0),
                    clamp_byte((255.0 - f64::from(m)) * k / 255.0),
                    clamp_byte((255.0 - f64::from(y)) * k / 255.0),
                )
            }
            other => other,
        }
    }

    pub fn to_gray(&self) -> Color {
        match self.to_rgb() {
            Color::Rgb { r, g, b } => Color::Gray(clamp_byte(
                f64::from(r) * 0.3 + f64::from(g) * 0.59 + f64::from(b) * 0.11,
            )),
            other => other,
        }
    }

    pub fn to_cmyk(&self) -> Color {
        match self.to_rgb() {
            Color::Rgb { r, g, b } => {
                let max = r.max(g).max(b);
                let k = 255 - max;
                if max == 0 {
                    return Color::cmyk(0, 0, 0, 255);
                }
                let scale = |v: u8| clamp_byte(f64::from(max - v) * 255.0 / f64::from(max));
                Color::cmyk(scale(r), scale(g), scale(b), k)
            }
            other => other,
        }
    }

    /// The components as PDF color operands in the 0..=1 range.
    pub fn components(&self) -> Vec<f32> {
        let f = |v: u8| f32::from(v) / 255.0;
        match *self {
            Color::Transparent => Vec::new(),
            Color::Gray(v) => vec![f(v)],
            Color::Rgb { r, g, b } => vec![f(r), f(g), f(b)],
            Color::Cmyk { c, m, y, k } => vec![f(c), f(m), f(y), f(k)],
        }
    }

    pub fn parse(input: &str) -> Result<Color, TypeError> {
        input.parse()
    }

    /// Parses a color that may carry an opacity, as in `rgba(255,0,0,0.5)`.
    /// Other color forms parse with no opacity.
    pub fn parse_rgba(input: &str) -> Result<(Color, Option<f64>), TypeError> {
        let trimmed = input.trim();
        if trimmed.get(..5).is_some_and(|p| p.eq_ignore_ascii_case("rgba(")) {
            let (r, g, b, a) = run_parser(
                rgba_function,
                trimmed,
                "color",
                "rgba(r,g,b[,opacity]) with opacity between 0 and 1",
            )?;
            return Ok((Color::rgb(r, g, b), a));
        }
        Ok((trimmed.parse()?, None))
    }
}

// --- Parsing ---

/// `#G`, `#GG`, `#RGB` or `#RRGGBB`.
fn hex_color(input: &str) -> IResult<&str, Color> {
    map_opt(
        preceded(char('#'), take_while_m_n(1, 6, |c: char| c.is_ascii_hexdigit())),
        |digits: &str| {
            let channel = |s: &str| {
                if s.len() == 1 {
                    u8::from_str_radix(&s.repeat(2), 16).ok()
                } else {
                    u8::from_str_radix(s, 16).ok()
                }
            };
            match digits.len() {
                1 | 2 => channel(digits).map(Color::Gray),
                3 | 6 => {
                    let n = digits.len() / 3;
                    Some(Color::rgb(
                        channel(&digits[..n])?,
                        channel(&digits[n..2 * n])?,
                        channel(&digits[2 * n..])?,
                    ))
                }
                _ => None,
            }
        },
    )
    .parse(input)
}

fn byte(input: &str) -> IResult<&str, u8> {
    map_res(ws(digit1), |s: &str| s.parse::<u8>()).parse(input)
}

fn byte_list(input: &str) -> IResult<&str, Vec<u8>> {
    delimited(char('('), separated_list1(char(','), byte), char(')')).parse(input)
}

/// `g(n)`, `rgb(r,g,b)` or `cmyk(c,m,y,k)`.
fn color_function(input: &str) -> IResult<&str, Color> {
    let (rest, name) = nom::character::complete::alpha1(input)?;
    let (rest, values) = byte_list(rest)?;
    let color = match (name.to_ascii_lowercase().as_str(), values.as_slice()) {
        ("g", [v]) => Color::Gray(*v),
        ("rgb", [r, g, b]) => Color::rgb(*r, *g, *b),
        ("cmyk", [c, m, y, k]) => Color::cmyk(*c, *m, *y, *k),
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Verify,
            )));
        }
    };
    Ok((rest, color))
}

fn rgba_function(input: &str) -> IResult<&str, (u8, u8, u8, Option<f64>)> {
    let (rest, (r, _, g, _, b, alpha)) = delimited(
        tag_no_case("rgba("),
        (
            byte,
            char(','),
            byte,
            char(','),
            byte,
            opt(preceded(char(','), ws(decimal))),
        ),
        char(')'),
    )
    .parse(input)?;
    if alpha.is_some_and(|a| !(0.0..=1.0).contains(&a)) {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((rest, (r, g, b, alpha)))
}

impl FromStr for Color {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("transparent") || trimmed.eq_ignore_ascii_case("none") {
            return Ok(Color::Transparent);
        }
        if let Some(named) = Color::from_name(trimmed) {
            return Ok(named);
        }
        let expected = "#G, #GG, #RGB, #RRGGBB, g(n), rgb(r,g,b), cmyk(c,m,y,k) or a color name";
        if trimmed.starts_with('#') {
            run_parser(hex_color, trimmed, "color", expected)
        } else {
            run_parser(color_function, trimmed, "color", expected)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Transparent => write!(f, "transparent"),
            Color::Gray(v) => write!(f, "g({})", v),
            Color::Rgb { r, g, b } => write!(f, "rgb({},{},{})", r, g, b),
            Color::Cmyk { c, m, y, k } => write!(f, "cmyk({},{},{},{})", c, m, y, k),
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum ColorDef {
            Str(String),
            Rgb { r: u8, g: u8, b: u8 },
            Cmyk { c: u8, m: u8, y: u8, k: u8 },
        }

        match ColorDef::deserialize(deserializer)? {
            ColorDef::Str(s) => s.parse().map_err(de::Error::custom),
            ColorDef::Rgb { r, g, b } => Ok(Color::rgb(r, g, b)),
            ColorDef::Cmyk { c, m, y, k } => Ok(Color::cmyk(c, m, y, k)),
        }
    }
}
