use std::fs;
use std::path::PathBuf;
use svg2dxf::{batch_converter, parse_args, resolve_config, Command, FailurePolicy};
use tempfile::TempDir;

const SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="21.6mm" height="37.8mm" viewBox="-40 -30 12 21">
  <path d="M -40 -30 L -16 -30"/>
</svg>"#;

fn convert_command(args: &[String]) -> svg2dxf::CliArgs {
    match parse_args(args.iter().map(Into::into).collect()).unwrap() {
        Command::Convert(cli) => cli,
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_config_file_drives_batch() {
    let root = TempDir::new().unwrap();
    let input = root.path().join("svgs");
    let output = root.path().join("dxfs");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("edge.svg"), SVG).unwrap();

    let config_path = root.path().join("svg2dxf.toml");
    fs::write(
        &config_path,
        format!(
            "[conversion]\npoints_per_mm = 1.0\n\n[batch]\ninput_dir = {:?}\noutput_dir = {:?}\n",
            input.display().to_string(),
            output.display().to_string()
        ),
    )
    .unwrap();

    let cli = convert_command(&["--config".to_string(), config_path.display().to_string()]);
    let config = resolve_config(&cli).unwrap();
    assert_eq!(config.batch.input_dir, input);

    let summary = batch_converter(&config).run().unwrap();
    assert!(summary.is_success());
    assert_eq!(summary.converted.len(), 1);
    // 43.2mm at one sample per millimeter.
    assert_eq!(summary.converted[0].curves[0].raw_points, 44);
    assert!(output.join("edge.dxf").is_file());
}

#[test]
fn test_cli_overrides_config_file() {
    let root = TempDir::new().unwrap();
    let input = root.path().join("in");
    let output = root.path().join("out");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("good.svg"), SVG).unwrap();
    fs::write(input.join("broken.svg"), "<svg").unwrap();

    let config_path = root.path().join("svg2dxf.json");
    fs::write(&config_path, r#"{ "batch": { "input_dir": "/nowhere" } }"#).unwrap();

    let cli = convert_command(&[
        "-c".to_string(),
        config_path.display().to_string(),
        "-i".to_string(),
        input.display().to_string(),
        "-o".to_string(),
        output.display().to_string(),
        "--keep-going".to_string(),
    ]);
    let config = resolve_config(&cli).unwrap();
    assert_eq!(config.batch.input_dir, PathBuf::from(&input));
    assert_eq!(config.batch.failure_policy, FailurePolicy::Continue);

    let summary = batch_converter(&config).run().unwrap();
    assert_eq!(summary.converted.len(), 1);
    assert_eq!(summary.failed.len(), 1);
    assert!(output.join("good.dxf").is_file());
    assert!(!output.join("broken.dxf").exists());
}
