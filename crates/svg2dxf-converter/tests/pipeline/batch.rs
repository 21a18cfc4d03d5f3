use std::fs;
use std::path::Path;
use svg2dxf_converter::{BatchConverter, ConversionError};
use svg2dxf_core::FailurePolicy;
use tempfile::TempDir;

const GOOD_SVG: &str = r#"<svg width="10mm" height="10mm" viewBox="0 0 10 10"><path d="M0 0 L10 0"/></svg>"#;
const BAD_METADATA_SVG: &str = r#"<svg width="1in" viewBox="0 0 10 10"><path d="M0 0 L10 0"/></svg>"#;

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn test_converts_every_svg_in_name_order() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("dxfs");

    write(input.path(), "b.svg", GOOD_SVG);
    write(input.path(), "a.SVG", GOOD_SVG);
    write(input.path(), "notes.txt", "not an svg");

    let summary = BatchConverter::new(input.path(), &out_dir).run().unwrap();

    assert!(summary.is_success());
    let names: Vec<&str> = summary.converted.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["a.SVG", "b.svg"]);
    assert!(out_dir.join("a.dxf").is_file());
    assert!(out_dir.join("b.dxf").is_file());
    assert!(!out_dir.join("notes.dxf").exists());
}

#[test]
fn test_output_directory_created_for_empty_input() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("nested").join("dxfs");

    let summary = BatchConverter::new(input.path(), &out_dir).run().unwrap();
    assert!(summary.converted.is_empty());
    assert!(out_dir.is_dir());

    // A second run over an existing output directory is fine.
    BatchConverter::new(input.path(), &out_dir).run().unwrap();
}

#[test]
fn test_abort_policy_stops_at_first_failure() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write(input.path(), "a.svg", GOOD_SVG);
    write(input.path(), "b.svg", BAD_METADATA_SVG);
    write(input.path(), "c.svg", GOOD_SVG);

    let err = BatchConverter::new(input.path(), output.path())
        .with_policy(FailurePolicy::Abort)
        .run()
        .unwrap_err();

    assert!(matches!(err, ConversionError::Metadata(_)));
    assert!(output.path().join("a.dxf").is_file());
    assert!(!output.path().join("b.dxf").exists());
    assert!(!output.path().join("c.dxf").exists());
}

#[test]
fn test_continue_policy_collects_failures() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write(input.path(), "a.svg", GOOD_SVG);
    write(input.path(), "b.svg", "<svg>");
    write(input.path(), "c.svg", GOOD_SVG);

    let summary = BatchConverter::new(input.path(), output.path())
        .with_policy(FailurePolicy::Continue)
        .run()
        .unwrap();

    assert!(!summary.is_success());
    assert_eq!(summary.converted.len(), 2);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].path.file_name().unwrap(), "b.svg");
    assert!(matches!(summary.failed[0].error, ConversionError::Import(_)));
    assert!(output.path().join("c.dxf").is_file());
}

#[test]
fn test_continue_policy_skips_unsampleable_file() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write(input.path(), "a.svg", GOOD_SVG);
    write(
        input.path(),
        "b.svg",
        r#"<svg width="10mm" height="10mm" viewBox="0 0 10 10"><path d="M0 0 L1e308 0 L-1e308 0"/></svg>"#,
    );

    let summary = BatchConverter::new(input.path(), output.path())
        .with_policy(FailurePolicy::Continue)
        .run()
        .unwrap();

    assert_eq!(summary.converted.len(), 1);
    assert_eq!(summary.failed.len(), 1);
    assert!(matches!(
        summary.failed[0].error,
        ConversionError::Sampling { .. }
    ));
    assert!(!output.path().join("b.dxf").exists());
}

#[test]
fn test_missing_input_directory() {
    let output = TempDir::new().unwrap();
    let missing = output.path().join("does-not-exist");

    let err = BatchConverter::new(&missing, output.path().join("out"))
        .run()
        .unwrap_err();
    assert!(matches!(err, ConversionError::Directory { ref path, .. } if path == &missing));
}
