//! Drawing primitives for dashboard charts.
//!
//! A [`Scene`] is an ordered list of draw commands in logical pixels,
//! produced by the chart routines and consumed by whatever raster backend
//! hosts the dashboard. Keeping the scene as plain data keeps the charts
//! toolkit-agnostic and makes every repaint reproducible: drawing the same
//! scene twice yields the same pixels.

/// RGBA color, components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
}

/// A point in logical pixels. Origin is the top-left corner, y grows down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Point { x, y }
    }
}

/// Horizontal text anchoring relative to the text position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// Outline drawn around a filled shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
}

/// A single draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Axis-aligned filled rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    /// Filled pie slice anchored at `center`.
    ///
    /// Angles are in radians; 0 points right and positive sweeps run
    /// clockwise (y grows down).
    PieSlice {
        center: Point,
        radius: f32,
        start_angle: f32,
        sweep: f32,
        fill: Color,
        stroke: Option<Stroke>,
    },
    /// Text anchored at `position` per `align`
    Text {
        content: String,
        position: Point,
        size: f32,
        color: Color,
        align: Align,
        bold: bool,
    },
}

/// An ordered list of draw commands for one full-surface repaint.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    width: f32,
    height: f32,
    primitives: Vec<Primitive>,
}

impl Scene {
    pub fn new(width: f32, height: f32) -> Self {
        Scene {
            width,
            height,
            primitives: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.primitives.push(Primitive::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    pub fn fill_slice(
        &mut self,
        center: Point,
        radius: f32,
        start_angle: f32,
        sweep: f32,
        fill: Color,
        stroke: Option<Stroke>,
    ) {
        self.primitives.push(Primitive::PieSlice {
            center,
            radius,
            start_angle,
            sweep,
            fill,
            stroke,
        });
    }

    pub fn fill_text(
        &mut self,
        content: impl Into<String>,
        position: Point,
        size: f32,
        color: Color,
        align: Align,
    ) {
        self.primitives.push(Primitive::Text {
            content: content.into(),
            position,
            size,
            color,
            align,
            bold: false,
        });
    }

    pub fn fill_text_bold(
        &mut self,
        content: impl Into<String>,
        position: Point,
        size: f32,
        color: Color,
        align: Align,
    ) {
        self.primitives.push(Primitive::Text {
            content: content.into(),
            position,
            size,
            color,
            align,
            bold: true,
        });
    }
}
