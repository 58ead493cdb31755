pub mod gradient;
pub mod parsers;

pub use gradient::{
    GradientColorStop, GradientDescriptor, MAX_REPEATED_STOPS, MIN_REPEAT_PERIOD, RadialShape,
    RadialSize, expand_repeating, normalize_stops,
};
pub use parsers::{StyleParseError, parse_color_stop, parse_gradient};
