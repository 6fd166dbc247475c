use site_power_toolbox::config::{self, Config};
use site_power_toolbox::report::ReportFormat;

#[test]
fn missing_file_writes_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let cfg = config::load_from(&path).unwrap();
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
}

#[test]
fn save_then_load_preserves_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    cfg.language = "ko-kr".into();
    cfg.language_pack_dir = Some("packs".into());
    cfg.report_format = ReportFormat::Csv;
    cfg.default_inputs.side_load_amp = 42.0;
    cfg.default_inputs.cp_capacity_kw = 7.5;
    cfg.save_to(&path).unwrap();

    let loaded = config::load_from(&path).unwrap();
    assert_eq!(loaded, cfg);
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "language = \"en-us\"\nreport_format = \"toml\"\n\n[default_inputs]\nside_load_amp = 25.0\n",
    )
    .unwrap();
    let cfg = config::load_from(&path).unwrap();
    assert_eq!(cfg.language, "en-us");
    assert_eq!(cfg.report_format, ReportFormat::Toml);
    assert_eq!(cfg.default_inputs.side_load_amp, 25.0);
    assert_eq!(cfg.default_inputs.desired_bb_hrs, 6.0);
    assert_eq!(cfg.window_alpha, 1.0);
}

#[test]
fn malformed_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "language = [").unwrap();
    assert!(matches!(
        config::load_from(&path),
        Err(config::ConfigError::Serde(_))
    ));
}
