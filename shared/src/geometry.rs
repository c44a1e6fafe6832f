use std::f64::consts::PI;

use crate::diagram::Diagram;
use crate::element::DrawingElement;
use crate::{Point, Size};

pub fn angle_between(center: Point, point: Point) -> f64 {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    dy.atan2(dx)
}

/// Brings an angle difference into (-π, π].
pub fn wrap_angle(mut delta: f64) -> f64 {
    while delta > PI {
        delta -= 2.0 * PI;
    }
    while delta <= -PI {
        delta += 2.0 * PI;
    }
    delta
}

/// Index of the topmost figure whose unrotated box contains `point`.
pub fn locate_figure(elements: &[DrawingElement], point: Point) -> Option<usize> {
    elements
        .iter()
        .enumerate()
        .rev()
        .find_map(|(index, element)| match element {
            DrawingElement::Figure(figure) if figure.contains(point) => Some(index),
            _ => None,
        })
}

/// Removes what the eraser touches at `point`, scanning from the top.
///
/// A figure is hit when the point lies inside its box grown by `radius` on
/// every side; the first figure hit ends the scan. A line is hit when one of
/// its segment endpoints is within `radius + line_width / 2`; the whole line
/// goes and the scan carries on below it. Single-point lines have no segment
/// and are never hit.
pub fn erase_at(diagram: &mut Diagram, point: Point, radius: f64) -> bool {
    let elements = diagram.elements_mut();
    let mut erased = false;
    let mut index = elements.len();
    while index > 0 {
        index -= 1;
        match &elements[index] {
            DrawingElement::Figure(figure) => {
                let center = figure.center();
                let dx = (point.x - center.x).abs();
                let dy = (point.y - center.y).abs();
                if dx < figure.width / 2.0 + radius && dy < figure.height / 2.0 + radius {
                    let removed = elements.remove(index);
                    log::debug!("Eraser removed figure {}", removed.id());
                    return true;
                }
            }
            DrawingElement::Line(line) => {
                let reach = radius + line.line_width / 2.0;
                let hit = line.points.windows(2).any(|segment| {
                    let nearest = point.distance(segment[0]).min(point.distance(segment[1]));
                    nearest <= reach
                });
                if hit {
                    let removed = elements.remove(index);
                    log::debug!("Eraser removed line {}", removed.id());
                    erased = true;
                }
            }
        }
    }
    erased
}

/// Per-axis factors that take geometry from `old` to `target`, or `None` when
/// nothing should be rescaled (first layout, or no change).
pub fn scale_factors(old: Size, target: Size) -> Option<(f64, f64)> {
    if old.is_empty() || old == target {
        return None;
    }
    Some((target.width / old.width, target.height / old.height))
}

/// Scales every element independently per axis. Figures keep no aspect
/// ratio lock, so unequal factors stretch them.
pub fn rescale(diagram: &mut Diagram, scale_x: f64, scale_y: f64) {
    for element in diagram.elements_mut() {
        match element {
            DrawingElement::Figure(figure) => {
                figure.x *= scale_x;
                figure.y *= scale_y;
                figure.width *= scale_x;
                figure.height *= scale_y;
            }
            DrawingElement::Line(line) => {
                for point in &mut line.points {
                    point.x *= scale_x;
                    point.y *= scale_y;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::element::{ElementId, Figure, Line};

    fn figure(id: &str, x: f64, y: f64, size: f64) -> DrawingElement {
        DrawingElement::Figure(Figure::new(
            ElementId::from(id),
            "sprayer",
            Point::new(x, y),
            Size::new(size, size),
        ))
    }

    fn line(id: &str, points: &[(f64, f64)]) -> DrawingElement {
        let mut line = Line::new(ElementId::from(id), "black", 2.0, Point::new(points[0].0, points[0].1));
        line.points = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
        DrawingElement::Line(line)
    }

    #[test]
    fn wrap_angle_stays_in_half_open_range() {
        assert_relative_eq!(wrap_angle(3.0 * PI / 2.0), -PI / 2.0);
        assert_relative_eq!(wrap_angle(-3.0 * PI / 2.0), PI / 2.0);
        assert_relative_eq!(wrap_angle(-PI), PI);
        assert_relative_eq!(wrap_angle(PI), PI);
        assert_relative_eq!(wrap_angle(0.25), 0.25);
    }

    #[test]
    fn locate_prefers_topmost_and_skips_lines() {
        let elements = vec![
            figure("low", 0.0, 0.0, 50.0),
            figure("high", 20.0, 20.0, 50.0),
            line("over", &[(0.0, 0.0), (100.0, 100.0)]),
        ];
        assert_eq!(locate_figure(&elements, Point::new(30.0, 30.0)), Some(1));
        assert_eq!(locate_figure(&elements, Point::new(5.0, 5.0)), Some(0));
        assert_eq!(locate_figure(&elements, Point::new(90.0, 90.0)), None);
    }

    #[test]
    fn eraser_reaches_past_figure_edge() {
        let mut diagram = Diagram::from(vec![figure("f", 100.0, 100.0, 80.0)]);
        // 19 px left of the box still counts with a 20 px eraser.
        assert!(erase_at(&mut diagram, Point::new(81.0, 140.0), 20.0));
        assert!(diagram.is_empty());

        let mut diagram = Diagram::from(vec![figure("f", 100.0, 100.0, 80.0)]);
        assert!(!erase_at(&mut diagram, Point::new(80.0, 140.0), 20.0));
        assert_eq!(diagram.len(), 1);
    }

    #[test]
    fn eraser_uses_segment_endpoints_only() {
        // The middle of a long segment is far from both endpoints.
        let mut diagram = Diagram::from(vec![line("l", &[(0.0, 0.0), (200.0, 0.0)])]);
        assert!(!erase_at(&mut diagram, Point::new(100.0, 0.0), 20.0));
        // 21 <= 20 + 2 / 2
        assert!(erase_at(&mut diagram, Point::new(221.0, 0.0), 20.0));
        assert!(diagram.is_empty());
    }

    #[test]
    fn eraser_removes_every_line_hit_but_stops_at_a_figure() {
        let mut diagram = Diagram::from(vec![
            line("a", &[(0.0, 0.0), (5.0, 5.0)]),
            line("b", &[(1.0, 1.0), (6.0, 6.0)]),
        ]);
        assert!(erase_at(&mut diagram, Point::new(2.0, 2.0), 20.0));
        assert!(diagram.is_empty());

        let mut diagram = Diagram::from(vec![
            line("under", &[(0.0, 0.0), (5.0, 5.0)]),
            figure("top", 0.0, 0.0, 10.0),
        ]);
        assert!(erase_at(&mut diagram, Point::new(2.0, 2.0), 20.0));
        assert_eq!(diagram.len(), 1);
        assert_eq!(diagram.elements()[0].id().as_str(), "under");
    }

    #[test]
    fn single_point_lines_survive_the_eraser() {
        let mut diagram = Diagram::from(vec![line("dot", &[(5.0, 5.0)])]);
        assert!(!erase_at(&mut diagram, Point::new(5.0, 5.0), 20.0));
        assert_eq!(diagram.len(), 1);
    }

    #[test]
    fn scale_factors_skip_first_layout_and_no_change() {
        let target = Size::new(900.0, 500.0);
        assert_eq!(scale_factors(Size::new(0.0, 0.0), target), None);
        assert_eq!(scale_factors(target, target), None);
        assert_eq!(scale_factors(Size::new(450.0, 250.0), target), Some((2.0, 2.0)));
    }
}
