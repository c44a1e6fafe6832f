use sitesketch_shared::{
    render, AssetGate, AssetHandle, DropError, EditorConfig, Point, PointerInput, PointerPhase,
    Size, Sketch, Surface,
};

#[derive(Clone, Debug)]
struct FakeImage {
    name: &'static str,
    complete: bool,
}

impl AssetHandle for FakeImage {
    fn is_loaded(&self) -> bool {
        self.complete
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Clear(f64, f64),
    Stroke(Vec<(f64, f64)>, String, f64),
    Save,
    Translate(f64, f64),
    Rotate(f64),
    Image(&'static str, f64, f64, f64, f64),
    Restore,
}

#[derive(Default)]
struct RecordingSurface {
    ops: Vec<Op>,
}

impl Surface for RecordingSurface {
    type Image = FakeImage;

    fn clear(&mut self, size: Size) {
        self.ops.push(Op::Clear(size.width, size.height));
    }

    fn stroke_path(&mut self, points: &[Point], color: &str, width: f64) {
        let points = points.iter().map(|p| (p.x, p.y)).collect();
        self.ops.push(Op::Stroke(points, color.to_string(), width));
    }

    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.ops.push(Op::Translate(x, y));
    }

    fn rotate(&mut self, angle: f64) {
        self.ops.push(Op::Rotate(angle));
    }

    fn draw_image(&mut self, image: &FakeImage, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::Image(image.name, x, y, width, height));
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }
}

fn loaded_gate() -> AssetGate<FakeImage> {
    let mut gate = AssetGate::new(["bocina", "estrella"]);
    gate.loaded(
        "bocina",
        FakeImage {
            name: "bocina",
            complete: true,
        },
    );
    gate.loaded(
        "estrella",
        FakeImage {
            name: "estrella",
            complete: true,
        },
    );
    gate
}

fn input(sketch: &mut Sketch, phase: PointerPhase, x: f64, y: f64) {
    sketch.handle_input(PointerInput::new(phase, Point::new(x, y), 0.0));
}

fn paint(sketch: &Sketch, gate: &AssetGate<FakeImage>) -> Vec<Op> {
    let mut surface = RecordingSurface::default();
    render(sketch.diagram(), gate, &mut surface, sketch.config().canvas_size());
    surface.ops
}

#[test]
fn draws_in_stacking_order_with_figure_transform() {
    let gate = loaded_gate();
    let mut sketch = Sketch::new(EditorConfig::default(), 1);
    input(&mut sketch, PointerPhase::Press, 0.0, 0.0);
    input(&mut sketch, PointerPhase::Move, 10.0, 10.0);
    input(&mut sketch, PointerPhase::Release, 10.0, 10.0);
    let placed = sketch.drop_figure(&gate, "bocina", Point::new(100.0, 200.0), Size::new(900.0, 500.0));
    assert!(placed.is_ok());

    let ops = paint(&sketch, &gate);
    assert_eq!(
        ops,
        vec![
            Op::Clear(900.0, 500.0),
            Op::Stroke(vec![(0.0, 0.0), (10.0, 10.0)], "black".to_string(), 3.0),
            Op::Save,
            Op::Translate(100.0, 200.0),
            Op::Rotate(0.0),
            Op::Image("bocina", -40.0, -40.0, 80.0, 80.0),
            Op::Restore,
        ]
    );
}

#[test]
fn rendering_twice_paints_the_same_frame() {
    let gate = loaded_gate();
    let mut sketch = Sketch::new(EditorConfig::default(), 1);
    sketch.insert_figure("estrella", Point::new(5.0, 5.0), Size::new(40.0, 20.0));
    input(&mut sketch, PointerPhase::Press, 300.0, 300.0);
    input(&mut sketch, PointerPhase::Move, 320.0, 310.0);
    assert_eq!(paint(&sketch, &gate), paint(&sketch, &gate));
}

#[test]
fn skips_unloaded_figures_and_dots() {
    let mut gate = loaded_gate();
    gate.loaded(
        "sprayer",
        FakeImage {
            name: "sprayer",
            complete: false,
        },
    );
    let mut sketch = Sketch::new(EditorConfig::default(), 1);
    sketch.insert_figure("sprayer", Point::new(0.0, 0.0), Size::new(80.0, 80.0));
    sketch.insert_figure("unknown", Point::new(0.0, 0.0), Size::new(80.0, 80.0));
    // A press without any movement leaves a one-point line behind.
    input(&mut sketch, PointerPhase::Press, 400.0, 400.0);
    input(&mut sketch, PointerPhase::Release, 400.0, 400.0);
    assert_eq!(sketch.elements().len(), 3);

    assert_eq!(paint(&sketch, &gate), vec![Op::Clear(900.0, 500.0)]);
}

#[test]
fn drops_need_a_loaded_image_inside_the_canvas() {
    let mut gate = AssetGate::new(["bocina", "sprayer"]);
    gate.loaded(
        "bocina",
        FakeImage {
            name: "bocina",
            complete: true,
        },
    );
    let bounds = Size::new(900.0, 500.0);
    let mut sketch = Sketch::new(EditorConfig::default(), 1);

    assert_eq!(
        sketch.drop_figure(&gate, "sprayer", Point::new(100.0, 100.0), bounds),
        Err(DropError::AssetNotLoaded("sprayer".to_string()))
    );
    assert_eq!(
        sketch.drop_figure(&gate, "bocina", Point::new(0.0, 100.0), bounds),
        Err(DropError::OutsideCanvas)
    );
    assert_eq!(
        sketch.drop_figure(&gate, "bocina", Point::new(950.0, 100.0), bounds),
        Err(DropError::OutsideCanvas)
    );
    assert!(sketch.elements().is_empty());

    let id = sketch
        .drop_figure(&gate, "bocina", Point::new(20.0, 480.0), bounds)
        .expect("inside");
    let figure = sketch.elements()[0].as_figure().expect("figure");
    assert_eq!(figure.id, id);
    assert_eq!((figure.x, figure.y), (-20.0, 440.0));
}

#[test]
fn rotated_figure_turns_around_its_center() {
    let gate = loaded_gate();
    let mut sketch = Sketch::new(EditorConfig::default(), 1);
    let payload = r#"[{"type":"figure","id":"f1","imageId":"estrella","x":10,"y":20,"width":60,"height":40,"rotation":1.5}]"#;
    sketch.load(payload).expect("valid payload");
    let ops = paint(&sketch, &gate);
    assert_eq!(
        &ops[1..],
        &[
            Op::Save,
            Op::Translate(40.0, 40.0),
            Op::Rotate(1.5),
            Op::Image("estrella", -30.0, -20.0, 60.0, 40.0),
            Op::Restore,
        ]
    );
}
