use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use site_power_toolbox::app::{self, AppError};
use site_power_toolbox::cli::Cli;
use site_power_toolbox::{config, logging, ui_cli};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 메뉴 또는 1회 계산을 실행한다.
fn main() -> ExitCode {
    logging::init("warn");
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(AppError::Validation(_)) => ExitCode::from(2),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE));
    let mut cfg = config::load_from(&config_path)?;
    let mut tr = ui_cli::translator_for(&cfg, &cli.lang);

    let interactive = cli.interactive || (!cli.has_inputs() && std::io::stdin().is_terminal());
    if interactive {
        return app::run(&mut cfg, &mut tr, &config_path);
    }

    let input = cli.apply_to(cfg.default_inputs);
    let format = cli.format.unwrap_or(cfg.report_format);
    match app::evaluate_once(&input, !cli.no_validate, format, cli.output.as_deref(), &tr) {
        Err(AppError::Validation(err)) => {
            ui_cli::print_violations(&err, &tr);
            Err(AppError::Validation(err))
        }
        other => other.map(|_| ()),
    }
}
