use std::process::ExitCode;
use svg2dxf::{batch_converter, init_logging, parse_args, resolve_config, Command};
use tracing::{error, info};

fn main() -> anyhow::Result<ExitCode> {
    let cli = match parse_args(std::env::args_os().skip(1).collect())? {
        Command::Help => {
            print!("{}", svg2dxf::HELP);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Version => {
            println!("svg2dxf {} (built {})", svg2dxf::VERSION, svg2dxf::BUILD_DATE);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Convert(cli) => cli,
    };

    init_logging()?;

    let config = resolve_config(&cli)?;
    let summary = batch_converter(&config).run()?;

    if summary.is_success() {
        info!("Converted {} file(s)", summary.converted.len());
        Ok(ExitCode::SUCCESS)
    } else {
        error!(
            "Converted {} file(s), {} failed",
            summary.converted.len(),
            summary.failed.len()
        );
        Ok(ExitCode::FAILURE)
    }
}
