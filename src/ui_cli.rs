use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{self, keys, Translator};
use crate::report;
use crate::sizing::{self, ComparisonRow, InputField, SizingInput, ViolationKind};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Evaluate,
    Defaults,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_EVALUATE));
    println!("{}", tr.t(keys::MAIN_MENU_DEFAULTS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Evaluate),
            "2" => return Ok(MenuChoice::Defaults),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 용량 검토 메뉴를 처리한다. 항목별로 입력받아 결과 표를 출력한다.
pub fn handle_evaluate(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::EVALUATE_HEADING));
    println!("{}", tr.t(keys::HELP_EVALUATE));
    println!("{}", tr.t(keys::EVALUATE_HINT));
    let mut input = cfg.default_inputs;
    for field in InputField::ALL {
        let value = read_field(tr, field, field.get(&cfg.default_inputs))?;
        field.set(&mut input, value);
    }
    let rows = sizing::evaluate(&input);
    println!("{}", tr.t(keys::RESULT_HEADING));
    print_results(&rows, tr);
    Ok(())
}

/// 설정 파일에 저장된 기본 입력값을 보여준다.
pub fn handle_defaults(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::DEFAULTS_HEADING));
    print_inputs(&cfg.default_inputs, tr);
    Ok(())
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 true를 돌려준다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!("{}", tr.t(keys::SETTINGS_LANGUAGE_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let lang = match sel.trim() {
        "" => return Ok(false),
        "1" => "auto",
        "2" => "en-us",
        "3" => "ko-kr",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = lang.to_string();
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(true)
}

/// 결과 표와 요약 줄을 출력한다.
pub fn print_results(rows: &[ComparisonRow], tr: &Translator) {
    print!("{}", report::render_table(rows, tr));
    let failing = sizing::failing(rows).count();
    if failing == 0 {
        println!("{}", tr.t(keys::SUMMARY_ALL_OK));
    } else {
        println!("{} {failing}", tr.t(keys::SUMMARY_FAILING));
    }
}

/// 입력값 목록을 출력한다.
pub fn print_inputs(input: &SizingInput, tr: &Translator) {
    for field in InputField::ALL {
        println!("  {:<28} {}", tr.field(field), field.get(input));
    }
}

/// 검증 실패 내역을 출력한다.
pub fn print_violations(err: &sizing::ValidationError, tr: &Translator) {
    eprintln!("{}", tr.t(keys::VALIDATION_FAILED));
    for v in &err.violations {
        eprintln!("  - {}: {}", tr.field(v.field), v.message());
    }
}

/// 항목 하나를 입력받는다. 빈 입력은 기본값, 범위를 벗어나면 다시 묻는다.
fn read_field(tr: &Translator, field: InputField, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(&format!("{} [{default}]: ", tr.field(field)))?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match sizing::parse_field(field, &s) {
            Ok(v) => return Ok(v),
            Err(v) if v.kind == ViolationKind::NotANumber => {
                println!("{}", tr.t(keys::ERROR_INVALID_NUMBER))
            }
            Err(v) => println!("{}: {}", tr.t(keys::ERROR_PREFIX), v.message()),
        }
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    let n = io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    if n == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed",
        )));
    }
    Ok(buf)
}

/// 현재 설정 기준으로 번역기를 다시 만든다.
pub fn translator_for(cfg: &Config, cli_lang: &str) -> Translator {
    let lang = i18n::resolve_language(cli_lang, Some(cfg.language.as_str()));
    Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref())
}
