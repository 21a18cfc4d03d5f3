use dxf::entities::EntityType;
use dxf::enums::{DrawingUnits, Units};
use dxf::Drawing;
use std::io::Cursor;
use svg2dxf_converter::{ConversionError, MetadataError, SamplingError, SvgToDxfConverter};

const REFERENCE_SVG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="21.6mm" height="37.8mm" viewBox="-40 -30 12 21">
  <path id="edge" d="M -40 -30 L -16 -30"/>
</svg>"#;

fn reload(svg: &str) -> (Drawing, svg2dxf_converter::FileReport) {
    let (builder, report) = SvgToDxfConverter::default()
        .convert_str("test.svg", svg)
        .unwrap();
    let mut buf = Vec::new();
    builder.write_to(&mut buf).unwrap();
    (Drawing::load(&mut Cursor::new(buf)).unwrap(), report)
}

fn vertex_counts(drawing: &Drawing) -> Vec<usize> {
    drawing
        .entities()
        .filter_map(|e| match &e.specific {
            EntityType::LwPolyline(p) => Some(p.vertices.len()),
            _ => None,
        })
        .collect()
}

#[test]
fn test_reference_document() {
    let (drawing, report) = reload(REFERENCE_SVG);

    assert_eq!(report.metadata.width_mm, 21.6);
    assert_eq!(report.metadata.height_mm, 37.8);
    assert!((report.metadata.scale_factor - 1.8).abs() < 1e-12);

    let curve = &report.curves[0];
    assert!((curve.physical_length_mm - 43.2).abs() < 1e-9);
    assert_eq!(curve.raw_points, 433);
    // 0.1mm spacing never collapses at 0.01mm tolerance.
    assert_eq!(curve.points, 433);

    assert_eq!(drawing.header.default_drawing_units, Units::Millimeters);
    assert_eq!(drawing.header.drawing_units, DrawingUnits::Metric);
    assert_eq!(vertex_counts(&drawing), vec![433]);

    let polyline = drawing
        .entities()
        .find_map(|e| match &e.specific {
            EntityType::LwPolyline(p) => Some(p.clone()),
            _ => None,
        })
        .unwrap();
    let first = &polyline.vertices[0];
    let last = &polyline.vertices[432];
    assert!((first.x + 72.0).abs() < 1e-9 && (first.y + 54.0).abs() < 1e-9);
    assert!((last.x + 28.8).abs() < 1e-9 && (last.y + 54.0).abs() < 1e-9);
    assert!(!polyline.is_closed());
}

#[test]
fn test_missing_metadata_uses_defaults() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><path d="M-40 -30 L-16 -30"/></svg>"#;
    let (_, report) = reload(svg);
    assert!((report.metadata.scale_factor - 1.8).abs() < 1e-12);
    assert_eq!(report.curves[0].raw_points, 433);
}

#[test]
fn test_document_without_curves_yields_empty_drawing() {
    let svg = r#"<svg width="10mm" height="10mm" viewBox="0 0 10 10"><g/></svg>"#;
    let (drawing, report) = reload(svg);
    assert!(report.curves.is_empty());
    assert_eq!(drawing.entities().count(), 0);
}

#[test]
fn test_multiple_subpaths_become_separate_polylines() {
    let svg = r#"<svg width="10mm" height="10mm" viewBox="0 0 10 10">
        <path d="M0 0 L1 0 M5 5 L5 6"/>
        <polygon points="0,0 2,0 2,2"/>
    </svg>"#;
    let (drawing, report) = reload(svg);
    assert_eq!(report.curves.len(), 3);
    assert_eq!(report.emitted_polylines(), 3);
    assert_eq!(vertex_counts(&drawing), vec![11, 11, 69]);
}

#[test]
fn test_curved_path_is_sampled() {
    let svg = r#"<svg width="20mm" height="20mm" viewBox="0 0 20 20">
        <circle cx="10" cy="10" r="5"/>
    </svg>"#;
    let (drawing, report) = reload(svg);
    let expected = 2.0 * std::f64::consts::PI * 5.0;
    assert!((report.curves[0].physical_length_mm - expected).abs() < 1e-5);
    assert_eq!(report.curves[0].raw_points, 315);
    assert_eq!(vertex_counts(&drawing).len(), 1);
}

#[test]
fn test_invalid_view_box_is_reported() {
    let svg = r#"<svg width="10mm" height="10mm" viewBox="0 0 0 10"><path d="M0 0 L1 1"/></svg>"#;
    let err = SvgToDxfConverter::default()
        .convert_str("zero.svg", svg)
        .unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Metadata(MetadataError::InvalidViewBox { .. })
    ));
}

#[test]
fn test_malformed_xml_is_reported() {
    let err = SvgToDxfConverter::default()
        .convert_str("broken.svg", "<svg><path d=\"M0 0\"></svg>")
        .unwrap_err();
    assert!(matches!(err, ConversionError::Import(_)));
}

#[test]
fn test_overflowing_length_is_reported() {
    let svg = r#"<svg width="10mm" height="10mm" viewBox="0 0 10 10">
        <path d="M0 0 L1 0"/>
        <path d="M0 0 L1e308 0 L-1e308 0"/>
    </svg>"#;
    let err = SvgToDxfConverter::default()
        .convert_str("huge.svg", svg)
        .unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Sampling {
            index: 1,
            source: SamplingError::NonFiniteLength(_)
        }
    ));
}

#[test]
fn test_path_longer_than_sample_limit_is_reported() {
    let svg = r#"<svg width="10mm" height="10mm" viewBox="0 0 10 10">
        <path d="M0 0 L2000000 0"/>
    </svg>"#;
    let err = SvgToDxfConverter::default()
        .convert_str("long.svg", svg)
        .unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Sampling {
            index: 0,
            source: SamplingError::TooManySamples { .. }
        }
    ));
}
