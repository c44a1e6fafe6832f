use crate::diagram::Diagram;
use crate::element::{DrawingElement, IdGenerator, Line};
use crate::geometry::{angle_between, erase_at, locate_figure, wrap_angle};
use crate::Point;

/// Tool picked explicitly with the toolbar; survives between gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tool {
    Draw,
    Erase,
}

/// What the editor is doing right now, as shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Drawing,
    Moving,
    Rotating,
    Erasing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Press,
    Move,
    Release,
    Cancel,
}

/// One sample from any input device, in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub point: Point,
    pub phase: PointerPhase,
    /// Wall-clock milliseconds.
    pub timestamp: f64,
}

impl PointerInput {
    pub fn new(phase: PointerPhase, point: Point, timestamp: f64) -> Self {
        Self {
            point,
            phase,
            timestamp,
        }
    }
}

/// A running gesture. Targets are diagram indices: the element the press
/// actually hit, even when a loaded diagram repeats ids. Nothing inserts or
/// removes below a target while a gesture runs, and a load resets it.
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    Idle,
    Drawing {
        line: usize,
    },
    Moving {
        figure: usize,
        offset: Point,
    },
    Rotating {
        figure: usize,
        reference_angle: f64,
        reference_rotation: f64,
    },
    Erasing,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Pen {
    pub color: String,
    pub width: f64,
}

#[derive(Clone, Debug)]
pub struct GestureSession {
    tool: Tool,
    gesture: Gesture,
    last_figure_press: Option<f64>,
    double_press_ms: f64,
    eraser_radius: f64,
}

impl GestureSession {
    pub fn new(double_press_ms: f64, eraser_radius: f64) -> Self {
        Self {
            tool: Tool::Draw,
            gesture: Gesture::Idle,
            last_figure_press: None,
            double_press_ms,
            eraser_radius,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn mode(&self) -> Mode {
        match self.gesture {
            Gesture::Moving { .. } => Mode::Moving,
            Gesture::Rotating { .. } => Mode::Rotating,
            Gesture::Erasing => Mode::Erasing,
            Gesture::Drawing { .. } | Gesture::Idle => match self.tool {
                Tool::Erase => Mode::Erasing,
                Tool::Draw => Mode::Drawing,
            },
        }
    }

    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Switches tool from outside a gesture and drops any selection.
    pub fn force_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.gesture = Gesture::Idle;
    }

    /// Ends whatever gesture is running; the chosen tool is kept.
    pub fn reset(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Feeds one input sample. Returns `true` when the diagram changed and
    /// the canvas needs a redraw.
    pub fn handle(
        &mut self,
        diagram: &mut Diagram,
        ids: &mut IdGenerator,
        pen: &Pen,
        input: PointerInput,
    ) -> bool {
        match input.phase {
            PointerPhase::Release | PointerPhase::Cancel => {
                self.reset();
                false
            }
            PointerPhase::Press => match input.point.normalize() {
                Some(point) => self.press(diagram, ids, pen, point, input.timestamp),
                None => false,
            },
            PointerPhase::Move => match input.point.normalize() {
                Some(point) => self.drag(diagram, point),
                None => false,
            },
        }
    }

    fn press(
        &mut self,
        diagram: &mut Diagram,
        ids: &mut IdGenerator,
        pen: &Pen,
        point: Point,
        timestamp: f64,
    ) -> bool {
        if self.tool == Tool::Erase {
            self.gesture = Gesture::Erasing;
            return erase_at(diagram, point, self.eraser_radius);
        }

        if let Some(index) = locate_figure(diagram.elements(), point) {
            let Some(figure) = diagram.figure_at(index) else {
                return false;
            };
            let double_press = self
                .last_figure_press
                .is_some_and(|last| timestamp - last < self.double_press_ms);
            self.last_figure_press = Some(timestamp);
            self.gesture = if double_press {
                log::debug!("Rotating figure {} at {index}", figure.id);
                Gesture::Rotating {
                    figure: index,
                    reference_angle: angle_between(figure.center(), point),
                    reference_rotation: figure.rotation,
                }
            } else {
                log::debug!("Moving figure {} at {index}", figure.id);
                Gesture::Moving {
                    figure: index,
                    offset: Point::new(point.x - figure.x, point.y - figure.y),
                }
            };
            return false;
        }

        diagram.push(DrawingElement::Line(Line::new(
            ids.next_line(),
            pen.color.clone(),
            pen.width,
            point,
        )));
        self.gesture = Gesture::Drawing {
            line: diagram.len() - 1,
        };
        true
    }

    fn drag(&mut self, diagram: &mut Diagram, point: Point) -> bool {
        match &self.gesture {
            Gesture::Idle => false,
            Gesture::Erasing => erase_at(diagram, point, self.eraser_radius),
            Gesture::Drawing { line } => match diagram.line_at_mut(*line) {
                Some(line) => {
                    line.points.push(point);
                    true
                }
                None => false,
            },
            Gesture::Moving { figure, offset } => match diagram.figure_at_mut(*figure) {
                Some(figure) => {
                    figure.x = point.x - offset.x;
                    figure.y = point.y - offset.y;
                    true
                }
                None => false,
            },
            Gesture::Rotating {
                figure,
                reference_angle,
                reference_rotation,
            } => match diagram.figure_at_mut(*figure) {
                Some(figure) => {
                    let current = angle_between(figure.center(), point);
                    figure.rotation = reference_rotation + wrap_angle(current - reference_angle);
                    true
                }
                None => false,
            },
        }
    }
}
