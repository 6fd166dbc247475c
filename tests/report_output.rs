use site_power_toolbox::i18n::Translator;
use site_power_toolbox::report::{self, ReportError, ReportFormat};
use site_power_toolbox::sizing::{self, SizingInput};

#[test]
fn table_has_header_rule_and_six_rows() {
    let input = SizingInput::default();
    let rows = sizing::evaluate(&input);
    let table = report::render_table(&rows, &Translator::new("en"));
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines[0].contains("Parameter") && lines[0].contains("OK/Not Okay"));
    assert!(lines[1].starts_with("|-"));
    assert!(lines[2].contains("Battery Capacity (AH)") && lines[2].contains("450.00"));
    assert!(lines[7].starts_with("| CP "));
}

#[test]
fn korean_table_keeps_parameter_labels() {
    let rows = sizing::evaluate(&SizingInput::default());
    let table = report::render_table(&rows, &Translator::new("ko"));
    assert!(table.contains("설계"));
    assert!(table.contains("Rectifier Module (KW)"));
}

#[test]
fn csv_has_header_and_six_records() {
    let rows = sizing::evaluate(&SizingInput::default());
    let mut buf = Vec::new();
    report::write_csv(&rows, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "parameter,design,actual,ok,difference");
    assert_eq!(lines[2], "Rectifier Module (KW),8.63,1.00,Not Okay,7.63");
    assert_eq!(lines[5], "Battery Charging Factor,0.25,0.25,OK,0.00");
}

#[test]
fn toml_report_parses_back() {
    let input = SizingInput::default();
    let rows = sizing::evaluate(&input);
    let text = report::to_toml(&input, &rows).unwrap();
    let value: toml::Value = toml::from_str(&text).unwrap();
    let parsed_rows = value["rows"].as_array().unwrap();
    assert_eq!(parsed_rows.len(), 6);
    assert_eq!(parsed_rows[0]["parameter"].as_str(), Some("Battery Capacity (AH)"));
    assert_eq!(parsed_rows[4]["ok"].as_str(), Some("OK"));
    assert_eq!(value["input"]["side_load_amp"].as_float(), Some(60.0));
}

#[test]
fn export_picks_format_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let input = SizingInput::default();
    let rows = sizing::evaluate(&input);
    let tr = Translator::new("en");

    let csv_path = dir.path().join("site.csv");
    report::export(&csv_path, &input, &rows, &tr).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("parameter,design"));

    let toml_path = dir.path().join("site.TOML");
    report::export(&toml_path, &input, &rows, &tr).unwrap();
    let toml_text = std::fs::read_to_string(&toml_path).unwrap();
    assert!(toml_text.contains("[[rows]]"));
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let input = SizingInput::default();
    let rows = sizing::evaluate(&input);
    let err = report::export(&dir.path().join("site.xlsx"), &input, &rows, &Translator::new("en"))
        .unwrap_err();
    assert!(matches!(err, ReportError::UnsupportedExtension(ref e) if e == "xlsx"));
    assert!(!dir.path().join("site.xlsx").exists());
}

#[test]
fn write_report_dispatches_on_format() {
    let input = SizingInput::default();
    let rows = sizing::evaluate(&input);
    let tr = Translator::new("en");
    let mut buf = Vec::new();
    report::write_report(ReportFormat::Csv, &input, &rows, &tr, &mut buf).unwrap();
    assert!(String::from_utf8(buf).unwrap().starts_with("parameter,"));
}
