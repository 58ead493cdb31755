use crate::unit::UnitKind;
use thiserror::Error;

/// Errors raised by the value types in this crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeError {
    #[error("Cannot {operation} incompatible units: {left:?} and {right:?}")]
    IncompatibleUnits {
        operation: &'static str,
        left: UnitKind,
        right: UnitKind,
    },

    #[error("Cannot {operation} a relative unit ({kind:?}) without resolving it first")]
    RelativeUnit {
        operation: &'static str,
        kind: UnitKind,
    },

    #[error("The {type_name} value '{value}' is not in the expected format: {expected}")]
    Format {
        type_name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl TypeError {
    pub(crate) fn format(type_name: &'static str, value: &str, expected: &'static str) -> Self {
        TypeError::Format {
            type_name,
            value: value.to_string(),
            expected,
        }
    }
}
