use crate::curves::{ArcParameters, arc_to_cubics, quadratic_to_cubic};
use crate::error::DrawingError;
use folio_types::{Point, Rect, TypeError, Unit};
use serde::{Deserialize, Serialize};

/// How the interior of a self-intersecting path is determined when filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FillMode {
    #[default]
    Winding,
    EvenOdd,
}

/// A single drawing instruction inside a subpath.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum PathOperation {
    MoveTo(Point),
    LineTo(Point),
    /// A missing handle coincides with the adjacent anchor point.
    #[serde(rename_all = "camelCase")]
    CubicBezier {
        end: Point,
        start_handle: Option<Point>,
        end_handle: Option<Point>,
    },
    QuadraticBezier { control: Point, end: Point },
    /// `x_axis_rotation` is in degrees.
    #[serde(rename_all = "camelCase")]
    Arc {
        radius_x: Unit,
        radius_y: Unit,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep_positive: bool,
        end: Point,
    },
    Close,
}

impl PathOperation {
    /// The point the cursor ends up on, if the operation moves it.
    pub fn end_point(&self) -> Option<Point> {
        match self {
            PathOperation::MoveTo(p) | PathOperation::LineTo(p) => Some(*p),
            PathOperation::CubicBezier { end, .. }
            | PathOperation::QuadraticBezier { end, .. }
            | PathOperation::Arc { end, .. } => Some(*end),
            PathOperation::Close => None,
        }
    }

    /// Anchor and control points. Arcs contribute only their endpoint.
    pub fn points(&self) -> Vec<Point> {
        match self {
            PathOperation::MoveTo(p) | PathOperation::LineTo(p) => vec![*p],
            PathOperation::CubicBezier {
                end,
                start_handle,
                end_handle,
            } => start_handle
                .iter()
                .chain(end_handle.iter())
                .copied()
                .chain(std::iter::once(*end))
                .collect(),
            PathOperation::QuadraticBezier { control, end } => vec![*control, *end],
            PathOperation::Arc { end, .. } => vec![*end],
            PathOperation::Close => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Subpath {
    pub operations: Vec<PathOperation>,
}

impl Subpath {
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.operations.last(), Some(PathOperation::Close))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubpathState {
    NoCurrentSubpath,
    HasCurrentSubpath,
}

/// The control point of the previous curve, kept for smooth continuations.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LastHandle {
    Cubic(Point),
    Quadratic(Point),
}

/// Mirrors `handle` through `center`.
fn reflect(center: &Point, handle: &Point) -> Result<Point, TypeError> {
    center.try_add(&center.try_sub(handle)?)
}

/// A vector path made of subpaths, built with absolute and cursor-relative
/// drawing calls.
///
/// Absolute calls cannot fail. Relative calls add a delta to the cursor and
/// fail with a [`TypeError`] when the units cannot be combined.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsPath {
    subpaths: Vec<Subpath>,
    state: SubpathState,
    cursor: Point,
    last_handle: Option<LastHandle>,
    fill_mode: FillMode,
}

impl Default for GraphicsPath {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsPath {
    /// An empty path with one open subpath and the cursor at the origin.
    pub fn new() -> Self {
        Self {
            subpaths: vec![Subpath::default()],
            state: SubpathState::HasCurrentSubpath,
            cursor: Point::ZERO,
            last_handle: None,
            fill_mode: FillMode::default(),
        }
    }

    /// Builds a path from SVG path data.
    pub fn parse(data: &str) -> Result<Self, DrawingError> {
        crate::svg::parse_path_data(data)
    }

    pub fn subpaths(&self) -> &[Subpath] {
        &self.subpaths
    }

    pub fn state(&self) -> SubpathState {
        self.state
    }

    pub fn has_current_subpath(&self) -> bool {
        self.state == SubpathState::HasCurrentSubpath
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn set_fill_mode(&mut self, mode: FillMode) -> &mut Self {
        self.fill_mode = mode;
        self
    }

    pub fn operations(&self) -> impl Iterator<Item = &PathOperation> {
        self.subpaths.iter().flat_map(|s| s.operations.iter())
    }

    pub fn operation_count(&self) -> usize {
        self.subpaths.iter().map(Subpath::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.operation_count() == 0
    }

    /// Starts a fresh, empty subpath and makes it current.
    pub fn begin_path(&mut self) -> &mut Self {
        self.subpaths.push(Subpath::default());
        self.state = SubpathState::HasCurrentSubpath;
        self
    }

    /// Ends the current subpath without closing it.
    pub fn end_path(&mut self) -> &mut Self {
        self.state = SubpathState::NoCurrentSubpath;
        self
    }

    /// Closes the current subpath with a segment back to its start. The
    /// cursor stays where it was. Without a current subpath this does nothing.
    pub fn close_path(&mut self, end_subpath: bool) -> &mut Self {
        if !self.has_current_subpath() {
            log::debug!("Ignoring close without an open subpath");
            return self;
        }
        self.push(PathOperation::Close);
        self.last_handle = None;
        if end_subpath {
            self.end_path();
        }
        self
    }

    fn push(&mut self, operation: PathOperation) {
        if !self.has_current_subpath() {
            log::debug!("Drawing without an open subpath; starting a new one");
            self.begin_path();
        }
        match self.subpaths.last_mut() {
            Some(current) => current.operations.push(operation),
            None => self.subpaths.push(Subpath {
                operations: vec![operation],
            }),
        }
    }

    fn relative(&self, delta: &Point) -> Result<Point, TypeError> {
        self.cursor.try_add(delta)
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.push(PathOperation::MoveTo(point));
        self.cursor = point;
        self.last_handle = None;
        self
    }

    pub fn move_by(&mut self, delta: Point) -> Result<&mut Self, TypeError> {
        let point = self.relative(&delta)?;
        Ok(self.move_to(point))
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.push(PathOperation::LineTo(point));
        self.cursor = point;
        self.last_handle = None;
        self
    }

    pub fn line_for(&mut self, delta: Point) -> Result<&mut Self, TypeError> {
        let point = self.relative(&delta)?;
        Ok(self.line_to(point))
    }

    pub fn horizontal_line_to(&mut self, x: Unit) -> &mut Self {
        self.line_to(Point::new(x, self.cursor.y))
    }

    pub fn horizontal_line_for(&mut self, dx: Unit) -> Result<&mut Self, TypeError> {
        let x = self.cursor.x.try_add(&dx)?;
        Ok(self.horizontal_line_to(x))
    }

    pub fn vertical_line_to(&mut self, y: Unit) -> &mut Self {
        self.line_to(Point::new(self.cursor.x, y))
    }

    pub fn vertical_line_for(&mut self, dy: Unit) -> Result<&mut Self, TypeError> {
        let y = self.cursor.y.try_add(&dy)?;
        Ok(self.vertical_line_to(y))
    }

    fn push_cubic(&mut self, end: Point, start_handle: Option<Point>, end_handle: Option<Point>) -> &mut Self {
        self.push(PathOperation::CubicBezier {
            end,
            start_handle,
            end_handle,
        });
        self.cursor = end;
        self.last_handle = Some(LastHandle::Cubic(end_handle.unwrap_or(end)));
        self
    }

    pub fn cubic_curve_to(&mut self, end: Point, start_handle: Point, end_handle: Point) -> &mut Self {
        self.push_cubic(end, Some(start_handle), Some(end_handle))
    }

    /// A cubic whose end handle sits on the end point.
    pub fn cubic_curve_to_with_handle_start(&mut self, end: Point, start_handle: Point) -> &mut Self {
        self.push_cubic(end, Some(start_handle), None)
    }

    /// A cubic whose start handle sits on the current point.
    pub fn cubic_curve_to_with_handle_end(&mut self, end: Point, end_handle: Point) -> &mut Self {
        self.push_cubic(end, None, Some(end_handle))
    }

    pub fn cubic_curve_for(
        &mut self,
        end: Point,
        start_handle: Point,
        end_handle: Point,
    ) -> Result<&mut Self, TypeError> {
        let end = self.relative(&end)?;
        let start_handle = self.relative(&start_handle)?;
        let end_handle = self.relative(&end_handle)?;
        Ok(self.cubic_curve_to(end, start_handle, end_handle))
    }

    pub fn cubic_curve_for_with_handle_start(
        &mut self,
        end: Point,
        start_handle: Point,
    ) -> Result<&mut Self, TypeError> {
        let end = self.relative(&end)?;
        let start_handle = self.relative(&start_handle)?;
        Ok(self.cubic_curve_to_with_handle_start(end, start_handle))
    }

    pub fn cubic_curve_for_with_handle_end(&mut self, end: Point, end_handle: Point) -> Result<&mut Self, TypeError> {
        let end = self.relative(&end)?;
        let end_handle = self.relative(&end_handle)?;
        Ok(self.cubic_curve_to_with_handle_end(end, end_handle))
    }

    /// A cubic whose start handle mirrors the previous cubic's end handle.
    /// Without a preceding cubic the start handle is left out.
    pub fn smooth_cubic_curve_to(&mut self, end: Point, end_handle: Point) -> Result<&mut Self, TypeError> {
        let start_handle = match self.last_handle {
            Some(LastHandle::Cubic(handle)) => Some(reflect(&self.cursor, &handle)?),
            _ => None,
        };
        Ok(self.push_cubic(end, start_handle, Some(end_handle)))
    }

    pub fn smooth_cubic_curve_for(&mut self, end: Point, end_handle: Point) -> Result<&mut Self, TypeError> {
        let end = self.relative(&end)?;
        let end_handle = self.relative(&end_handle)?;
        self.smooth_cubic_curve_to(end, end_handle)
    }

    pub fn quadratic_curve_to(&mut self, end: Point, control: Point) -> &mut Self {
        self.push(PathOperation::QuadraticBezier { control, end });
        self.cursor = end;
        self.last_handle = Some(LastHandle::Quadratic(control));
        self
    }

    pub fn quadratic_curve_for(&mut self, end: Point, control: Point) -> Result<&mut Self, TypeError> {
        let end = self.relative(&end)?;
        let control = self.relative(&control)?;
        Ok(self.quadratic_curve_to(end, control))
    }

    /// A quadratic whose control point mirrors the previous quadratic's
    /// control point, or sits on the current point when there is none.
    pub fn smooth_quadratic_curve_to(&mut self, end: Point) -> Result<&mut Self, TypeError> {
        let control = match self.last_handle {
            Some(LastHandle::Quadratic(handle)) => reflect(&self.cursor, &handle)?,
            _ => self.cursor,
        };
        Ok(self.quadratic_curve_to(end, control))
    }

    pub fn smooth_quadratic_curve_for(&mut self, end: Point) -> Result<&mut Self, TypeError> {
        let end = self.relative(&end)?;
        self.smooth_quadratic_curve_to(end)
    }

    pub fn arc_to(
        &mut self,
        radius_x: Unit,
        radius_y: Unit,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep_positive: bool,
        end: Point,
    ) -> &mut Self {
        self.push(PathOperation::Arc {
            radius_x,
            radius_y,
            x_axis_rotation,
            large_arc,
            sweep_positive,
            end,
        });
        self.cursor = end;
        self.last_handle = None;
        self
    }

    pub fn arc_for(
        &mut self,
        radius_x: Unit,
        radius_y: Unit,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep_positive: bool,
        end: Point,
    ) -> Result<&mut Self, TypeError> {
        let end = self.relative(&end)?;
        Ok(self.arc_to(radius_x, radius_y, x_axis_rotation, large_arc, sweep_positive, end))
    }

    /// Every anchor and control point, in drawing order.
    pub fn all_points(&self) -> Vec<Point> {
        self.operations().flat_map(PathOperation::points).collect()
    }

    /// The rectangle enclosing all anchor and control points.
    pub fn bounds(&self) -> Result<Rect, TypeError> {
        Rect::bounds(&self.all_points())
    }

    /// A copy of this path in points where quadratic curves and arcs are
    /// replaced by cubic Beziers.
    pub fn to_cubic_path(&self) -> Result<GraphicsPath, TypeError> {
        let mut subpaths = Vec::with_capacity(self.subpaths.len());
        let mut cursor = (0.0, 0.0);
        for subpath in &self.subpaths {
            let mut start = cursor;
            let mut operations = Vec::with_capacity(subpath.len());
            for op in &subpath.operations {
                match op {
                    PathOperation::MoveTo(p) => {
                        cursor = p.to_points()?;
                        start = cursor;
                        operations.push(op.clone());
                    }
                    PathOperation::LineTo(p) | PathOperation::CubicBezier { end: p, .. } => {
                        cursor = p.to_points()?;
                        operations.push(op.clone());
                    }
                    PathOperation::QuadraticBezier { control, end } => {
                        let end = end.to_points()?;
                        let segment = quadratic_to_cubic(cursor, control.to_points()?, end);
                        operations.push(cubic_from(segment.start_handle, segment.end_handle, segment.end));
                        cursor = end;
                    }
                    PathOperation::Arc {
                        radius_x,
                        radius_y,
                        x_axis_rotation,
                        large_arc,
                        sweep_positive,
                        end,
                    } => {
                        let arc = ArcParameters {
                            radius_x: radius_x.to_points()?,
                            radius_y: radius_y.to_points()?,
                            x_axis_rotation: *x_axis_rotation,
                            large_arc: *large_arc,
                            sweep_positive: *sweep_positive,
                        };
                        let end = end.to_points()?;
                        for segment in arc_to_cubics(cursor, &arc, end) {
                            operations.push(cubic_from(segment.start_handle, segment.end_handle, segment.end));
                        }
                        cursor = end;
                    }
                    PathOperation::Close => {
                        operations.push(PathOperation::Close);
                        cursor = start;
                    }
                }
            }
            subpaths.push(Subpath { operations });
        }
        Ok(GraphicsPath {
            subpaths,
            state: self.state,
            cursor: self.cursor,
            last_handle: None,
            fill_mode: self.fill_mode,
        })
    }
}

fn cubic_from(start_handle: (f64, f64), end_handle: (f64, f64), end: (f64, f64)) -> PathOperation {
    PathOperation::CubicBezier {
        end: Point::pt(end.0, end.1),
        start_handle: Some(Point::pt(start_handle.0, start_handle.1)),
        end_handle: Some(Point::pt(end_handle.0, end_handle.1)),
    }
}
