use web_sys::CanvasRenderingContext2d;

use sitesketch_shared::{render, Point, Size, Surface};

use crate::state::{PaletteImage, State};

/// The canvas 2D context as a render target.
pub struct CanvasSurface<'a>(pub &'a CanvasRenderingContext2d);

impl Surface for CanvasSurface<'_> {
    type Image = PaletteImage;

    fn clear(&mut self, size: Size) {
        self.0.clear_rect(0.0, 0.0, size.width, size.height);
    }

    fn stroke_path(&mut self, points: &[Point], color: &str, width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let ctx = self.0;
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(width);
        ctx.set_line_cap("round");
        ctx.set_line_join("round");
        ctx.begin_path();
        ctx.move_to(first.x, first.y);
        for point in rest {
            ctx.line_to(point.x, point.y);
        }
        ctx.stroke();
    }

    fn save(&mut self) {
        self.0.save();
    }

    fn translate(&mut self, x: f64, y: f64) {
        let _ = self.0.translate(x, y);
    }

    fn rotate(&mut self, angle: f64) {
        let _ = self.0.rotate(angle);
    }

    fn draw_image(&mut self, image: &PaletteImage, x: f64, y: f64, width: f64, height: f64) {
        if let Err(err) = self
            .0
            .draw_image_with_html_image_element_and_dw_and_dh(&image.0, x, y, width, height)
        {
            log::warn!("drawImage failed: {err:?}");
        }
    }

    fn restore(&mut self) {
        self.0.restore();
    }
}

pub fn redraw(state: &State) {
    let size = Size::new(state.canvas.width() as f64, state.canvas.height() as f64);
    let mut surface = CanvasSurface(&state.ctx);
    render(state.sketch.diagram(), &state.assets, &mut surface, size);
}
