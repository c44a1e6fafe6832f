use crate::element::{DrawingElement, Figure, Line};

/// Ordered drawing elements; index order is z-order, the last element is on top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagram {
    elements: Vec<DrawingElement>,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[DrawingElement] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut Vec<DrawingElement> {
        &mut self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn push(&mut self, element: DrawingElement) {
        self.elements.push(element);
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Swaps in a whole new element list at once.
    pub fn replace(&mut self, elements: Vec<DrawingElement>) {
        self.elements = elements;
    }

    pub fn remove(&mut self, index: usize) -> Option<DrawingElement> {
        if index < self.elements.len() {
            Some(self.elements.remove(index))
        } else {
            None
        }
    }

    pub fn line_at_mut(&mut self, index: usize) -> Option<&mut Line> {
        match self.elements.get_mut(index) {
            Some(DrawingElement::Line(line)) => Some(line),
            _ => None,
        }
    }

    pub fn figure_at(&self, index: usize) -> Option<&Figure> {
        self.elements.get(index).and_then(DrawingElement::as_figure)
    }

    pub fn figure_at_mut(&mut self, index: usize) -> Option<&mut Figure> {
        match self.elements.get_mut(index) {
            Some(DrawingElement::Figure(figure)) => Some(figure),
            _ => None,
        }
    }
}

impl From<Vec<DrawingElement>> for Diagram {
    fn from(elements: Vec<DrawingElement>) -> Self {
        Self { elements }
    }
}
