use anyhow::Result;

/// A position on the drawing surface. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Axis,
    /// Horizontal line at a y tick.
    Grid,
    /// Vertical line through a bar.
    Guide,
}

/// Horizontal alignment of text relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// The three primitives a chart is made of.
pub trait Surface {
    fn line(&mut self, from: Point, to: Point, role: LineRole) -> Result<()>;

    /// A filled bar with its top-left corner at `at`.
    fn rect(&mut self, at: Point, width: f64, height: f64) -> Result<()>;

    fn text(&mut self, at: Point, text: &str, anchor: Anchor) -> Result<()>;
}

/// A recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line {
        from: Point,
        to: Point,
        role: LineRole,
    },
    Rect {
        at: Point,
        width: f64,
        height: f64,
    },
    Text {
        at: Point,
        text: String,
        anchor: Anchor,
    },
}

/// A surface that remembers what was drawn on it, in order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ShapeLog {
    shapes: Vec<Shape>,
}

impl ShapeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn lines(&self, role: LineRole) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.shapes.iter().filter_map(move |s| match s {
            Shape::Line { from, to, role: r } if *r == role => Some((*from, *to)),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = (Point, f64, f64)> + '_ {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Rect { at, width, height } => Some((*at, *width, *height)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for ShapeLog {
    fn line(&mut self, from: Point, to: Point, role: LineRole) -> Result<()> {
        self.shapes.push(Shape::Line { from, to, role });
        Ok(())
    }

    fn rect(&mut self, at: Point, width: f64, height: f64) -> Result<()> {
        self.shapes.push(Shape::Rect { at, width, height });
        Ok(())
    }

    fn text(&mut self, at: Point, text: &str, anchor: Anchor) -> Result<()> {
        self.shapes.push(Shape::Text {
            at,
            text: text.to_string(),
            anchor,
        });
        Ok(())
    }
}
