use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::sizing::InputField;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_EVALUATE: &str = "main_menu.evaluate";
    pub const MAIN_MENU_DEFAULTS: &str = "main_menu.defaults";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const EVALUATE_HEADING: &str = "evaluate.heading";
    pub const EVALUATE_HINT: &str = "evaluate.hint";
    pub const RESULT_HEADING: &str = "evaluate.result_heading";
    pub const SUMMARY_ALL_OK: &str = "evaluate.summary_all_ok";
    pub const SUMMARY_FAILING: &str = "evaluate.summary_failing";

    pub const FIELD_SIDE_LOAD_AMP: &str = "field.side_load_amp";
    pub const FIELD_DESIRED_BB_HRS: &str = "field.desired_bb_hrs";
    pub const FIELD_NUM_BATTERIES: &str = "field.num_batteries";
    pub const FIELD_CHARGING_FACTOR: &str = "field.battery_charging_factor";
    pub const FIELD_BATTERY_CAPACITY: &str = "field.battery_capacity_ah";
    pub const FIELD_RECTIFIER_MODULE: &str = "field.rectifier_module_kw";
    pub const FIELD_CP_CAPACITY: &str = "field.cp_capacity_kw";

    pub const REPORT_COL_PARAMETER: &str = "report.col_parameter";
    pub const REPORT_COL_DESIGN: &str = "report.col_design";
    pub const REPORT_COL_ACTUAL: &str = "report.col_actual";
    pub const REPORT_COL_OK: &str = "report.col_ok";
    pub const REPORT_COL_DIFFERENCE: &str = "report.col_difference";

    pub const DEFAULTS_HEADING: &str = "defaults.heading";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_LANGUAGE_OPTIONS: &str = "settings.language_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const VALIDATION_FAILED: &str = "error.validation_failed";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const HELP_EVALUATE: &str = "help.evaluate";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 내장 문자열만 쓰는 번역기를 생성한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 빌드 시 포함된 언어팩을 쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 표 순으로 찾고, 한국어 표에 없으면 영어로 폴백한다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        match self.lang {
            Language::Ko => ko(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }

    /// 입력 항목의 표시 이름.
    pub fn field(&self, field: InputField) -> &str {
        self.t(field_key(field))
    }
}

/// 입력 항목에 대응하는 번역 키.
pub fn field_key(field: InputField) -> &'static str {
    use keys::*;
    match field {
        InputField::SideLoadAmp => FIELD_SIDE_LOAD_AMP,
        InputField::DesiredBbHrs => FIELD_DESIRED_BB_HRS,
        InputField::NumBatteries => FIELD_NUM_BATTERIES,
        InputField::BatteryChargingFactor => FIELD_CHARGING_FACTOR,
        InputField::BatteryCapacity => FIELD_BATTERY_CAPACITY,
        InputField::RectifierModule => FIELD_RECTIFIER_MODULE,
        InputField::CpCapacity => FIELD_CP_CAPACITY,
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().and_then(|loc| normalize_locale_string(&loc)) {
        return Some(lang);
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 테이블은 점(.)으로 이어 붙인 플랫 키가 된다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) 전체 코드 (예: en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) 기본 코드 (예: en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

/// 언어팩 TOML 문자열을 플랫 맵으로 변환한다. 문자열이 하나도 없으면 None.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" | "en-uk" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Site Power Toolbox ===",
        MAIN_MENU_EVALUATE => "1) 사이트 용량 검토",
        MAIN_MENU_DEFAULTS => "2) 기본 입력값 보기",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        EVALUATE_HEADING => "\n-- 사이트 용량 검토 --",
        EVALUATE_HINT => "엔터만 누르면 [ ] 안의 기본값을 사용합니다.",
        RESULT_HEADING => "\n-- 검토 결과 --",
        SUMMARY_ALL_OK => "모든 항목이 설계값 이상입니다.",
        SUMMARY_FAILING => "설계값 미달 항목 수:",
        FIELD_SIDE_LOAD_AMP => "부하 전류 [A]",
        FIELD_DESIRED_BB_HRS => "목표 백업 시간 [h]",
        FIELD_NUM_BATTERIES => "배터리 수량",
        FIELD_CHARGING_FACTOR => "배터리 충전 계수 (0~1)",
        FIELD_BATTERY_CAPACITY => "배터리 용량 [Ah]",
        FIELD_RECTIFIER_MODULE => "정류기 모듈 [kW]",
        FIELD_CP_CAPACITY => "CP 용량 [kW]",
        REPORT_COL_PARAMETER => "항목",
        REPORT_COL_DESIGN => "설계",
        REPORT_COL_ACTUAL => "실제",
        REPORT_COL_OK => "판정",
        REPORT_COL_DIFFERENCE => "차이",
        DEFAULTS_HEADING => "\n-- 기본 입력값 --",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_LANGUAGE_OPTIONS => "1) 자동(시스템)  2) English  3) 한국어",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어가 변경되었습니다:",
        VALIDATION_FAILED => "입력값 확인 필요:",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        HELP_EVALUATE => "도움말: 부하 전류와 목표 백업 시간으로 설계값을 구하고 실제 설치값과 비교합니다.",
        _ => return None,
    })
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Site Power Toolbox ===",
        MAIN_MENU_EVALUATE => "1) Evaluate site sizing",
        MAIN_MENU_DEFAULTS => "2) Show default inputs",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        EVALUATE_HEADING => "\n-- Site Sizing Check --",
        EVALUATE_HINT => "Press Enter to keep the default shown in [ ].",
        RESULT_HEADING => "\n-- Battery Calculation Results --",
        SUMMARY_ALL_OK => "Every rated value meets its design value.",
        SUMMARY_FAILING => "Rows below design:",
        FIELD_SIDE_LOAD_AMP => "Side Load Ampere",
        FIELD_DESIRED_BB_HRS => "Desired BB Hours",
        FIELD_NUM_BATTERIES => "Number of Batteries",
        FIELD_CHARGING_FACTOR => "Battery Charging Factor",
        FIELD_BATTERY_CAPACITY => "Battery Capacity (AH)",
        FIELD_RECTIFIER_MODULE => "Rectifier Module (KW)",
        FIELD_CP_CAPACITY => "CP Capacity (KW)",
        REPORT_COL_PARAMETER => "Parameter",
        REPORT_COL_DESIGN => "Design",
        REPORT_COL_ACTUAL => "Actual",
        REPORT_COL_OK => "OK/Not Okay",
        REPORT_COL_DIFFERENCE => "Difference",
        DEFAULTS_HEADING => "\n-- Default Inputs --",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_LANGUAGE_OPTIONS => "1) Auto (system)  2) English  3) 한국어",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        VALIDATION_FAILED => "Input check failed:",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        HELP_EVALUATE => "Help: design values come from load current and backup hours, then get compared with the installed ratings.",
        _ => "[missing translation]",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_maps_regional_codes() {
        assert_eq!(normalize_lang("EN-GB").as_deref(), Some("en-us"));
        assert_eq!(normalize_lang("ko").as_deref(), Some("ko-kr"));
        assert_eq!(normalize_lang("auto"), None);
        assert_eq!(normalize_locale_string("ko_KR.UTF-8").as_deref(), Some("ko-kr"));
    }

    #[test]
    fn cli_flag_beats_config() {
        assert_eq!(resolve_language("ko", Some("en-us")), "ko-kr");
        assert_eq!(resolve_language("auto", Some("en")), "en-us");
    }

    #[test]
    fn missing_korean_key_falls_back_to_english() {
        let tr = Translator::new("ko");
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
        assert_eq!(tr.t(keys::REPORT_COL_DESIGN), "설계");
    }
}
