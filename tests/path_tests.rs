mod common;

use common::{TestResult, assert_close, init_logging, operations};
use folio::drawing::{DrawingError, SubpathState, append_path_data};
use folio::{GraphicsPath, PathOperation, PathParseOptions, Point, Unit};

#[test]
fn test_svg_outline_becomes_closed_polygon() -> TestResult {
    init_logging();
    let path = GraphicsPath::parse("M-84.1487,-15.8513h168.2974 V10.053 H-2Z")?;

    assert_eq!(
        operations(&path),
        vec![
            PathOperation::MoveTo(Point::pt(-84.1487, -15.8513)),
            PathOperation::LineTo(Point::pt(84.1487, -15.8513)),
            PathOperation::LineTo(Point::pt(84.1487, 10.053)),
            PathOperation::LineTo(Point::pt(-2.0, 10.053)),
            PathOperation::Close,
        ]
    );
    assert_eq!(path.subpaths().len(), 1);
    assert!(path.subpaths()[0].is_closed());

    let bounds = path.bounds()?;
    assert_close(bounds.x.to_points()?, -84.1487);
    assert_close(bounds.y.to_points()?, -15.8513);
    assert_close(bounds.width.to_points()?, 168.2974);
    assert_close(bounds.height.to_points()?, 25.9043);
    Ok(())
}

#[test]
fn test_builder_matches_parsed_data() -> TestResult {
    init_logging();
    let mut built = GraphicsPath::new();
    built.move_to(Point::pt(10.0, 10.0));
    built.line_for(Point::pt(20.0, 0.0))?;
    built.vertical_line_for(Unit::pt(20.0))?;
    built.horizontal_line_to(Unit::pt(10.0));
    built.close_path(false);
    assert!(built.has_current_subpath());

    let parsed = GraphicsPath::parse("M10 10 l20 0 v20 H10 z")?;
    assert_eq!(operations(&built), operations(&parsed));
    assert_eq!(built.cursor(), parsed.cursor());
    Ok(())
}

#[test]
fn test_ending_a_subpath_starts_a_new_one() -> TestResult {
    init_logging();
    let mut path = GraphicsPath::new();
    path.move_to(Point::pt(0.0, 0.0)).line_to(Point::pt(5.0, 5.0)).close_path(true);
    assert_eq!(path.state(), SubpathState::NoCurrentSubpath);

    path.line_to(Point::pt(9.0, 9.0));
    assert_eq!(path.state(), SubpathState::HasCurrentSubpath);
    assert_eq!(path.subpaths().len(), 2);
    assert_eq!(path.subpaths()[1].operations, vec![PathOperation::LineTo(Point::pt(9.0, 9.0))]);
    Ok(())
}

#[test]
fn test_relative_moves_reject_unresolved_units() {
    init_logging();
    let mut path = GraphicsPath::new();
    path.move_to(Point::pt(1.0, 1.0));
    assert!(path.line_for(Point::new(Unit::percent(10.0), Unit::pt(0.0))).is_err());
    assert_eq!(path.operation_count(), 1);
    assert_eq!(path.cursor(), Point::pt(1.0, 1.0));
}

#[test]
fn test_cubic_path_replaces_curves_and_arcs() -> TestResult {
    init_logging();
    let path = GraphicsPath::parse("M0 0 Q10 10 20 0 A10 10 0 0 1 40 0 L50 0")?;
    let cubic = path.to_cubic_path()?;
    let ops = operations(&cubic);

    assert_eq!(ops.len(), 5);
    match &ops[1] {
        PathOperation::CubicBezier {
            end,
            start_handle: Some(start),
            end_handle: Some(finish),
        } => {
            assert_eq!(*end, Point::pt(20.0, 0.0));
            assert_close(start.x.to_points()?, 20.0 / 3.0);
            assert_close(start.y.to_points()?, 20.0 / 3.0);
            assert_close(finish.x.to_points()?, 40.0 / 3.0);
            assert_close(finish.y.to_points()?, 20.0 / 3.0);
        }
        other => panic!("expected a cubic, got {other:?}"),
    }
    assert!(matches!(ops[2], PathOperation::CubicBezier { .. }));
    assert_eq!(ops[3].end_point(), Some(Point::pt(40.0, 0.0)));
    assert_eq!(ops[4], PathOperation::LineTo(Point::pt(50.0, 0.0)));
    Ok(())
}

#[test]
fn test_append_continues_from_cursor() -> TestResult {
    init_logging();
    let mut path = GraphicsPath::parse("M5 5 L10 10")?;
    append_path_data(&mut path, "l5 0", PathParseOptions::default())?;
    assert_eq!(path.cursor(), Point::pt(15.0, 10.0));
    assert_eq!(path.operation_count(), 3);
    Ok(())
}

#[test]
fn test_parse_errors_carry_position() {
    init_logging();
    match GraphicsPath::parse("M0 0 L5 5 Q1") {
        Err(DrawingError::PathData { position, .. }) => assert!(position >= 10, "position {position}"),
        other => panic!("unexpected result {other:?}"),
    }

    let lenient = folio::drawing::parse_path_data_with("M0 0 Q1 L5 5", PathParseOptions::lenient());
    assert!(lenient.is_ok());
}

#[test]
fn test_operations_serialize_as_tagged_json() -> TestResult {
    init_logging();
    let path = GraphicsPath::parse("M0 0 L1 2")?;
    let json = serde_json::to_string(&operations(&path))?;
    assert!(json.contains(r#""op":"lineTo""#), "{json}");

    let back: Vec<PathOperation> = serde_json::from_str(&json)?;
    assert_eq!(back, operations(&path));
    Ok(())
}
