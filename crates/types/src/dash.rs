use crate::error::TypeError;
use crate::parse::{run_parser, ws};
use nom::Parser;
use nom::branch::alt;
use nom::character::complete::{char, i32 as nom_i32, space0, space1};
use nom::combinator::{map, map_opt};
use nom::multi::{separated_list0, separated_list1};
use nom::sequence::delimited;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt;
use std::str::FromStr;

/// A stroke dash pattern: alternating on/off lengths plus a starting phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Dash {
    pub pattern: Vec<i32>,
    pub phase: i32,
}

impl Dash {
    pub fn new(pattern: Vec<i32>, phase: i32) -> Self {
        Self { pattern, phase }
    }

    /// No dashing.
    pub fn solid() -> Self {
        Self::default()
    }

    pub fn is_solid(&self) -> bool {
        self.pattern.is_empty()
    }
}

impl fmt::Display for Dash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.pattern.iter().map(i32::to_string).collect();
        write!(f, "[{}] {}", parts.join(" "), self.phase)
    }
}

impl FromStr for Dash {
    type Err = TypeError;

    /// Accepts `[2 4] 0` or a comma list `2,4,6`, where the phase becomes
    /// the sum of the list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bracketed = map(
            (
                delimited(
                    ws(char('[')),
                    separated_list0(space1, nom_i32),
                    ws(char(']')),
                ),
                nom_i32,
            ),
            |(pattern, phase)| Dash::new(pattern, phase),
        );
        let listed = map_opt(
            separated_list1(delimited(space0, char(','), space0), nom_i32),
            |pattern: Vec<i32>| {
                let phase = pattern.iter().try_fold(0i32, |acc, v| acc.checked_add(*v))?;
                Some(Dash::new(pattern, phase))
            },
        );
        run_parser(
            alt((bracketed, listed)),
            s,
            "dash",
            "[n n ...] phase or n,n,...",
        )
    }
}

impl Serialize for Dash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DashDef {
            Str(String),
            Map {
                pattern: Vec<i32>,
                #[serde(default)]
                phase: i32,
            },
        }

        match DashDef::deserialize(deserializer)? {
            DashDef::Str(s) => s.parse().map_err(de::Error::custom),
            DashDef::Map { pattern, phase } => Ok(Dash::new(pattern, phase)),
        }
    }
}
