use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Point, Size};

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Hands out ids that are unique within one editor session.
///
/// The seed keeps ids from two sessions (for example a reloaded page editing a
/// saved diagram) from colliding in practice; uniqueness is only guaranteed
/// within a single generator.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    seed: u64,
    next: u64,
}

impl IdGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed, next: 1 }
    }

    pub fn next_line(&mut self) -> ElementId {
        self.make("line")
    }

    pub fn next_figure(&mut self) -> ElementId {
        self.make("figure")
    }

    fn make(&mut self, kind: &str) -> ElementId {
        let counter = self.next;
        self.next += 1;
        ElementId(format!("{kind}-{:x}-{counter}", self.seed))
    }
}

fn default_color() -> String {
    "black".to_string()
}

fn default_line_width() -> f64 {
    3.0
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Line {
    #[serde(default)]
    pub id: ElementId,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(rename = "lineWidth", default = "default_line_width")]
    pub line_width: f64,
    // Placeholders kept so every record has the same outer shape.
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub points: Vec<Point>,
}

impl Line {
    pub fn new(id: ElementId, color: impl Into<String>, line_width: f64, start: Point) -> Self {
        Self {
            id,
            color: color.into(),
            line_width,
            x: 0.0,
            y: 0.0,
            points: vec![start],
        }
    }

    /// Single-point lines are valid but have nothing to stroke.
    pub fn is_visible(&self) -> bool {
        self.points.len() >= 2
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Figure {
    #[serde(default)]
    pub id: ElementId,
    #[serde(rename = "imageId")]
    pub image_id: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl Figure {
    pub fn new(id: ElementId, image_id: impl Into<String>, origin: Point, size: Size) -> Self {
        Self {
            id,
            image_id: image_id.into(),
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
            rotation: 0.0,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Axis-aligned containment; rotation is ignored.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum DrawingElement {
    #[serde(rename = "line")]
    Line(Line),
    #[serde(rename = "figure")]
    Figure(Figure),
}

impl DrawingElement {
    pub fn id(&self) -> &ElementId {
        match self {
            DrawingElement::Line(line) => &line.id,
            DrawingElement::Figure(figure) => &figure.id,
        }
    }

    pub(crate) fn id_mut(&mut self) -> &mut ElementId {
        match self {
            DrawingElement::Line(line) => &mut line.id,
            DrawingElement::Figure(figure) => &mut figure.id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DrawingElement::Line(_) => "line",
            DrawingElement::Figure(_) => "figure",
        }
    }

    pub fn as_figure(&self) -> Option<&Figure> {
        match self {
            DrawingElement::Figure(figure) => Some(figure),
            DrawingElement::Line(_) => None,
        }
    }

    pub fn as_line(&self) -> Option<&Line> {
        match self {
            DrawingElement::Line(line) => Some(line),
            DrawingElement::Figure(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_never_repeats() {
        let mut ids = IdGenerator::new(0xbeef);
        let line = ids.next_line();
        let figure = ids.next_figure();
        let other = ids.next_line();
        assert_ne!(line, other);
        assert!(line.as_str().starts_with("line-beef-"));
        assert!(figure.as_str().starts_with("figure-beef-"));
    }

    #[test]
    fn figure_contains_is_inclusive_on_edges() {
        let figure = Figure::new(
            ElementId::from("f"),
            "sprayer",
            Point::new(10.0, 10.0),
            Size::new(20.0, 20.0),
        );
        assert!(figure.contains(Point::new(10.0, 10.0)));
        assert!(figure.contains(Point::new(30.0, 30.0)));
        assert!(!figure.contains(Point::new(30.1, 15.0)));
        assert_eq!(figure.center(), Point::new(20.0, 20.0));
    }

    #[test]
    fn single_point_line_is_not_visible() {
        let line = Line::new(ElementId::from("l"), "red", 3.0, Point::new(1.0, 1.0));
        assert!(!line.is_visible());
    }
}
