use crate::assets::{AssetGate, AssetHandle};
use crate::diagram::Diagram;
use crate::element::{DrawingElement, Figure, Line};
use crate::{Point, Size};

/// The drawing calls the renderer needs from a 2D canvas.
pub trait Surface {
    type Image: AssetHandle;

    fn clear(&mut self, size: Size);
    /// Strokes one connected path with round joins and caps.
    fn stroke_path(&mut self, points: &[Point], color: &str, width: f64);
    fn save(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
    fn draw_image(&mut self, image: &Self::Image, x: f64, y: f64, width: f64, height: f64);
    fn restore(&mut self);
}

/// Repaints the whole canvas from the diagram, bottom to top.
pub fn render<S: Surface>(
    diagram: &Diagram,
    assets: &AssetGate<S::Image>,
    surface: &mut S,
    size: Size,
) {
    surface.clear(size);
    for element in diagram.elements() {
        match element {
            DrawingElement::Line(line) => draw_line(surface, line),
            DrawingElement::Figure(figure) => draw_figure(surface, assets, figure),
        }
    }
}

fn draw_line<S: Surface>(surface: &mut S, line: &Line) {
    if !line.is_visible() {
        return;
    }
    surface.stroke_path(&line.points, &line.color, line.line_width);
}

fn draw_figure<S: Surface>(surface: &mut S, assets: &AssetGate<S::Image>, figure: &Figure) {
    let Some(image) = assets.get(&figure.image_id) else {
        log::warn!(
            "Skipping figure {}: image {} is not loaded",
            figure.id,
            figure.image_id
        );
        return;
    };
    let center = figure.center();
    surface.save();
    surface.translate(center.x, center.y);
    surface.rotate(figure.rotation);
    surface.draw_image(
        image,
        -figure.width / 2.0,
        -figure.height / 2.0,
        figure.width,
        figure.height,
    );
    surface.restore();
}
