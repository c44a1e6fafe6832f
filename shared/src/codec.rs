use thiserror::Error;

use crate::diagram::Diagram;
use crate::element::DrawingElement;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("diagram payload is not a valid element list: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("line record {index} has no points")]
    EmptyLine { index: usize },
    #[error("figure record {index} has a non-positive or non-finite size")]
    InvalidFigureSize { index: usize },
    #[error("failed to encode diagram: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Encodes the diagram as a JSON array of tagged records, in z-order.
pub fn encode_diagram(diagram: &Diagram) -> Result<String, DiagramError> {
    serde_json::to_string(diagram.elements()).map_err(DiagramError::Encode)
}

/// Parses and validates a saved diagram. Either every record is accepted or
/// the whole payload is rejected.
pub fn decode_diagram(payload: &str) -> Result<Vec<DrawingElement>, DiagramError> {
    let elements: Vec<DrawingElement> =
        serde_json::from_str(payload).map_err(DiagramError::Parse)?;
    for (index, element) in elements.iter().enumerate() {
        match element {
            DrawingElement::Line(line) => {
                if line.points.is_empty() {
                    return Err(DiagramError::EmptyLine { index });
                }
            }
            DrawingElement::Figure(figure) => {
                let valid = figure.width.is_finite()
                    && figure.height.is_finite()
                    && figure.width > 0.0
                    && figure.height > 0.0;
                if !valid {
                    return Err(DiagramError::InvalidFigureSize { index });
                }
            }
        }
    }
    Ok(elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_records_written_by_the_web_form() {
        let payload = r#"[
            {"type":"line","id":"line-1","color":"red","lineWidth":3,"x":0,"y":0,
             "points":[{"x":1,"y":2},{"x":3,"y":4}]},
            {"type":"figure","id":"figure-2","imageId":"bocina","x":10,"y":20,
             "width":80,"height":80,"rotation":0.5}
        ]"#;
        let elements = decode_diagram(payload).expect("valid payload");
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].kind(), "line");
        let figure = elements[1].as_figure().expect("figure");
        assert_eq!(figure.image_id, "bocina");
        assert_eq!(figure.rotation, 0.5);
    }

    #[test]
    fn line_defaults_fill_missing_attributes() {
        let elements = decode_diagram(r#"[{"type":"line","points":[{"x":1,"y":1}]}]"#)
            .expect("points are enough for a line");
        let line = elements[0].as_line().expect("line");
        assert_eq!(line.color, "black");
        assert_eq!(line.line_width, 3.0);
        assert!(line.id.is_empty());
    }

    #[test]
    fn rejects_figure_without_numeric_rotation() {
        let payload = r#"[{"type":"figure","id":"f","imageId":"sprayer",
            "x":1,"y":1,"width":5,"height":5}]"#;
        assert!(matches!(decode_diagram(payload), Err(DiagramError::Parse(_))));
        let payload = r#"[{"type":"figure","id":"f","imageId":"sprayer",
            "x":1,"y":1,"width":5,"height":5,"rotation":"0"}]"#;
        assert!(matches!(decode_diagram(payload), Err(DiagramError::Parse(_))));
    }

    #[test]
    fn rejects_unknown_records_and_non_arrays() {
        assert!(decode_diagram(r#"[{"type":"text","value":"hi"}]"#).is_err());
        assert!(decode_diagram(r#"{"type":"line","points":[]}"#).is_err());
        assert!(decode_diagram("not json").is_err());
        assert!(decode_diagram(r#"[{"type":"line"}]"#).is_err());
    }

    #[test]
    fn rejects_empty_lines_and_degenerate_figures() {
        assert!(matches!(
            decode_diagram(r#"[{"type":"line","points":[]}]"#),
            Err(DiagramError::EmptyLine { index: 0 })
        ));
        let payload = r#"[{"type":"line","points":[{"x":0,"y":0}]},
            {"type":"figure","imageId":"a","x":0,"y":0,"width":0,"height":4,"rotation":0}]"#;
        assert!(matches!(
            decode_diagram(payload),
            Err(DiagramError::InvalidFigureSize { index: 1 })
        ));
    }

    #[test]
    fn empty_diagram_encodes_as_empty_array() {
        assert_eq!(encode_diagram(&Diagram::new()).expect("encode"), "[]");
    }
}
