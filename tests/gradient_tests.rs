mod common;

use common::{TestResult, assert_close, init_logging};
use folio::drawing::DrawingError;
use folio::style::GradientColorStop;
use folio::types::Color;
use folio::{GradientDescriptor, GradientFunction};

const RED: Color = Color::rgb(255, 0, 0);
const GREEN: Color = Color::rgb(0, 128, 0);

#[test]
fn test_two_stops_compile_to_single_interpolation() -> TestResult {
    init_logging();
    let descriptor = GradientDescriptor::parse("linear-gradient(to right, red, green)")?;
    let function = GradientFunction::from_descriptor(&descriptor)?;

    match function {
        GradientFunction::Two {
            color_zero,
            color_one,
            domain_start,
            domain_end,
            exponent,
        } => {
            assert_eq!(color_zero.color, RED);
            assert_eq!(color_one.color, GREEN);
            assert_eq!((domain_start, domain_end), (0.0, 1.0));
            assert_close(exponent, 1.0);
        }
        other => panic!("expected a two-stop function, got {other:?}"),
    }
    Ok(())
}

#[test]
fn test_offset_first_stop_adds_leading_segment() -> TestResult {
    init_logging();
    let descriptor = GradientDescriptor::parse("linear-gradient(red 50%, green 100%)")?;
    let function = GradientFunction::try_from(&descriptor)?;

    match &function {
        GradientFunction::Three {
            children,
            boundaries,
            encodes,
            domain_start,
            domain_end,
        } => {
            assert_eq!(children.len(), 2);
            assert_eq!(boundaries.len(), 1);
            assert_close(boundaries[0], 0.5);
            assert_eq!(encodes, &vec![(0.0, 1.0); 2]);
            assert_eq!((*domain_start, *domain_end), (0.0, 1.0));
        }
        other => panic!("expected a stitching function, got {other:?}"),
    }
    assert_eq!(function.segment_count(), 2);
    Ok(())
}

#[test]
fn test_repeating_gradient_tiles_to_full_range() -> TestResult {
    init_logging();
    let descriptor = GradientDescriptor::parse("repeating-linear-gradient(45deg, red 0%, green 25%)")?;
    assert!(descriptor.is_repeating());

    let function = GradientFunction::from_descriptor(&descriptor)?;
    assert!(function.segment_count() >= 4);
    assert_eq!(function.domain(), (0.0, 1.0));
    Ok(())
}

#[test]
fn test_single_stop_cannot_be_compiled() {
    init_logging();
    let result = GradientFunction::compile(&[GradientColorStop::at(RED, 0.0)]);
    assert!(matches!(result, Err(DrawingError::Gradient(_))));
    assert!(GradientDescriptor::try_parse("radial-gradient(").is_none());
}

#[test]
fn test_function_json_names_its_kind() -> TestResult {
    init_logging();
    let function = GradientFunction::compile(&[
        GradientColorStop::at(RED, 0.0),
        GradientColorStop::at(GREEN, 100.0).with_opacity(0.5),
    ])?;
    let json = serde_json::to_value(&function)?;
    assert_eq!(json["type"], "two");
    assert_eq!(json["domainEnd"], 1.0);
    Ok(())
}
