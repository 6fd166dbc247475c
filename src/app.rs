use std::io;
use std::path::Path;

use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::report::{self, ReportFormat};
use crate::sizing::{self, ComparisonRow, SizingInput};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일/터미널 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 보고서 출력 오류
    Report(report::ReportError),
    /// 입력값 검증 실패
    Validation(sizing::ValidationError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Report(e) => write!(f, "보고서 오류: {e}"),
            AppError::Validation(e) => write!(f, "입력값 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<report::ReportError> for AppError {
    fn from(value: report::ReportError) -> Self {
        AppError::Report(value)
    }
}

impl From<sizing::ValidationError> for AppError {
    fn from(value: sizing::ValidationError) -> Self {
        AppError::Validation(value)
    }
}

/// CLI 메뉴 루프를 실행한다. 종료 시 설정을 `config_path`에 저장한다.
pub fn run(config: &mut Config, tr: &mut Translator, config_path: &Path) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Evaluate => ui_cli::handle_evaluate(tr, config)?,
            MenuChoice::Defaults => ui_cli::handle_defaults(tr, config)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(tr, config)? {
                    *tr = ui_cli::translator_for(config, "auto");
                }
                config.save_to(config_path)?;
            }
            MenuChoice::Exit => {
                config.save_to(config_path)?;
                println!("{}", tr.t(keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

/// 한 번 계산해서 결과를 출력한다.
///
/// `validate`가 true면 폼 규칙으로 먼저 검사하고, 위반이 있으면 계산하지 않는다.
/// `output`이 있으면 확장자에 맞춰 파일로 저장하고, 없으면 `format`으로 stdout에 쓴다.
pub fn evaluate_once(
    input: &SizingInput,
    validate: bool,
    format: ReportFormat,
    output: Option<&Path>,
    tr: &Translator,
) -> Result<[ComparisonRow; 6], AppError> {
    if validate {
        sizing::validate(input)?;
    }
    let rows = sizing::evaluate(input);
    match output {
        Some(path) => report::export(path, input, &rows, tr)?,
        None if format == ReportFormat::Table => ui_cli::print_results(&rows, tr),
        None => report::write_report(format, input, &rows, tr, io::stdout().lock())?,
    }
    Ok(rows)
}
