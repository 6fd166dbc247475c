#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::path::{Path, PathBuf};
use std::{fs, sync::Arc};
use site_power_toolbox::{
    config, i18n, logging, report,
    sizing::{self, ComparisonRow, FieldViolation, InputField, SizingInput, Verdict},
};

/// GUI 실행 인자.
#[derive(Debug, Parser)]
#[command(name = "site_power_toolbox", version)]
struct GuiArgs {
    /// 언어 (auto/en-us/ko-kr)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long)]
    config: Option<PathBuf>,
}

const PASS_COLOR: egui::Color32 = egui::Color32::from_rgb(22, 163, 74);
const FAIL_COLOR: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

fn main() -> Result<(), eframe::Error> {
    logging::init("info");
    let args = GuiArgs::parse();
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE));

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([960.0, 720.0])
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(Arc::new(icon));
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let mut app_cfg = config::load_from(&config_path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "failed to load config, using defaults");
        config::Config::default()
    });
    if args.lang != "auto" {
        app_cfg.language = i18n::resolve_language(&args.lang, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Site Power Toolbox",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!("{e}");
            }
            cc.egui_ctx.set_pixels_per_point(app_cfg.ui_scale);
            Box::new(GuiApp::new(app_cfg.clone(), config_path.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

/// 한글 표시용 시스템 폰트를 기본 폰트 뒤에 폴백으로 등록한다.
/// 찾지 못하면 Err를 돌려주지만 기본 폰트로 계속 동작한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![
        PathBuf::from("assets/fonts/NotoSansKR-Regular.ttf"),
        PathBuf::from("/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc"),
        PathBuf::from("/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc"),
        PathBuf::from("/System/Library/Fonts/AppleSDGothicNeo.ttc"),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.insert(0, fonts.join("malgun.ttf"));
        candidates.push(fonts.join("gulim.ttc"));
    }
    let path = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "Korean font not found; Hangul labels may not render.".to_string())?;
    let bytes =
        fs::read(path).map_err(|e| format!("Failed to read font ({}): {e}", path.display()))?;

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("cjk_fallback".to_string(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push("cjk_fallback".to_string());
    }
    ctx.set_fonts(fonts);
    Ok(())
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn verdict_text(verdict: Verdict) -> egui::RichText {
    let text = egui::RichText::new(verdict.as_str());
    match verdict {
        Verdict::Pass => text.color(PASS_COLOR).strong(),
        Verdict::Fail => text.color(FAIL_COLOR).strong(),
        Verdict::NotApplicable => text,
    }
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: i18n::Translator,
    lang_input: String,
    window_alpha: f32,
    ui_scale: f32,
    show_settings_modal: bool,
    show_formula_modal: bool,
    settings_status: Option<String>,
    // 입력 폼 (InputField::ALL 순서)
    field_text: [String; 7],
    field_errors: [Option<FieldViolation>; 7],
    // 결과
    last_input: Option<SizingInput>,
    rows: Option<[ComparisonRow; 6]>,
    export_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, config_path: PathBuf) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let defaults = config.default_inputs;
        Self {
            lang_input: config.language.clone(),
            window_alpha: config.window_alpha,
            ui_scale: config.ui_scale,
            config,
            config_path,
            tr,
            show_settings_modal: false,
            show_formula_modal: false,
            settings_status: None,
            field_text: InputField::ALL.map(|f| f.get(&defaults).to_string()),
            field_errors: [None; 7],
            last_input: None,
            rows: None,
            export_status: None,
        }
    }

    /// 입력 문자열을 검증하고 통과하면 계산한다. 위반이 있으면 이전 결과를 지운다.
    fn calculate(&mut self) {
        let mut input = self.config.default_inputs;
        let mut valid = true;
        for (i, field) in InputField::ALL.iter().enumerate() {
            match sizing::parse_field(*field, &self.field_text[i]) {
                Ok(v) => {
                    field.set(&mut input, v);
                    self.field_errors[i] = None;
                }
                Err(v) => {
                    self.field_errors[i] = Some(v);
                    valid = false;
                }
            }
        }
        if valid {
            self.rows = Some(sizing::evaluate(&input));
            self.last_input = Some(input);
        } else {
            self.rows = None;
            self.last_input = None;
        }
        self.export_status = None;
    }

    fn reset_to_defaults(&mut self) {
        let defaults = self.config.default_inputs;
        self.field_text = InputField::ALL.map(|f| f.get(&defaults).to_string());
        self.field_errors = [None; 7];
        self.rows = None;
        self.last_input = None;
    }

    fn export(&mut self) {
        let (Some(input), Some(rows)) = (self.last_input.as_ref(), self.rows.as_ref()) else {
            return;
        };
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .add_filter("TOML", &["toml"])
            .set_file_name("site_sizing.csv")
            .save_file()
        else {
            return;
        };
        self.export_status = Some(match report::export(&path, input, rows, &self.tr) {
            Ok(()) => format!("{} {}", self.txt("gui.export.saved", "Saved:"), path.display()),
            Err(e) => format!("{} {e}", self.tr.t(i18n::keys::ERROR_PREFIX)),
        });
    }

    fn txt(&self, key: &str, default: &str) -> String {
        self.tr.lookup(key).unwrap_or_else(|| default.to_string())
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.heading(txt("gui.form.heading", "🔋 Site Passive Measurement"));
        ui.small(txt(
            "gui.form.hint",
            "Enter the site load and installed ratings, then press Calculate.",
        ));
        ui.add_space(6.0);

        egui::Grid::new("sizing_form")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                for (i, field) in InputField::ALL.iter().enumerate() {
                    let tip = match field.bounds() {
                        (Some(min), Some(max)) => format!("{min} ~ {max}"),
                        (Some(min), None) => format!("≥ {min}"),
                        _ => String::new(),
                    };
                    label_with_tip(ui, tr.field(*field), &tip);
                    ui.vertical(|ui| {
                        let edit = egui::TextEdit::singleline(&mut self.field_text[i])
                            .desired_width(160.0);
                        if ui.add(edit).lost_focus()
                            && ui.input(|inp| inp.key_pressed(egui::Key::Enter))
                        {
                            self.calculate();
                        }
                        if let Some(v) = &self.field_errors[i] {
                            ui.colored_label(FAIL_COLOR, egui::RichText::new(v.message()).small());
                        }
                    });
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button(txt("gui.form.calculate", "Calculate")).clicked() {
                self.calculate();
            }
            if ui.button(txt("gui.form.reset", "Reset to defaults")).clicked() {
                self.reset_to_defaults();
            }
        });
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let Some(rows) = &self.rows else {
            return;
        };
        let tr = self.tr.clone();
        ui.add_space(12.0);
        ui.separator();
        ui.heading(tr.t(i18n::keys::RESULT_HEADING).trim());
        egui::Grid::new("sizing_results")
            .num_columns(5)
            .striped(true)
            .spacing([16.0, 6.0])
            .show(ui, |ui| {
                for key in [
                    i18n::keys::REPORT_COL_PARAMETER,
                    i18n::keys::REPORT_COL_DESIGN,
                    i18n::keys::REPORT_COL_ACTUAL,
                    i18n::keys::REPORT_COL_OK,
                    i18n::keys::REPORT_COL_DIFFERENCE,
                ] {
                    ui.strong(tr.t(key));
                }
                ui.end_row();
                for row in rows {
                    ui.label(row.parameter.label());
                    ui.label(row.design.as_str());
                    ui.label(row.actual.as_str());
                    ui.label(verdict_text(row.ok));
                    ui.label(row.difference.as_str());
                    ui.end_row();
                }
            });

        let failing = sizing::failing(rows).count();
        if failing == 0 {
            ui.colored_label(PASS_COLOR, tr.t(i18n::keys::SUMMARY_ALL_OK));
        } else {
            ui.colored_label(
                FAIL_COLOR,
                format!("{} {failing}", tr.t(i18n::keys::SUMMARY_FAILING)),
            );
        }
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .button(self.txt("gui.export.button", "Export (CSV/TOML)…"))
                .clicked()
            {
                self.export();
            }
            if let Some(msg) = &self.export_status {
                ui.label(msg.as_str());
            }
        });
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let mut open = self.show_settings_modal;
        egui::Window::new(txt("gui.settings.title", "Settings"))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                ui.label(txt("gui.settings.lang", "Language"));
                egui::ComboBox::from_id_source("lang_choice")
                    .selected_text(self.lang_input.as_str())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.lang_input,
                            "auto".into(),
                            txt("gui.settings.lang_auto", "System"),
                        );
                        ui.selectable_value(&mut self.lang_input, "en-us".into(), "English (US)");
                        ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                    });
                ui.separator();
                ui.label(txt("gui.settings.ui_scale", "UI scale"));
                let scale_slider =
                    egui::Slider::new(&mut self.ui_scale, 0.8..=1.6).suffix(" x");
                if ui.add(scale_slider).changed() {
                    ctx.set_pixels_per_point(self.ui_scale);
                }
                ui.label(txt("gui.settings.alpha", "Window transparency"));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0).text("alpha"));
                ui.separator();
                if ui
                    .button(txt("gui.settings.save_defaults", "Use current inputs as defaults"))
                    .clicked()
                {
                    if let Some(input) = self.last_input {
                        self.config.default_inputs = input;
                    }
                }
                if ui.button(txt("gui.settings.save", "Save settings")).clicked() {
                    self.config.language = self.lang_input.clone();
                    self.config.window_alpha = self.window_alpha;
                    self.config.ui_scale = self.ui_scale;
                    let resolved = i18n::resolve_language("auto", Some(self.config.language.as_str()));
                    self.tr = i18n::Translator::new_with_pack(
                        &resolved,
                        self.config.language_pack_dir.as_deref(),
                    );
                    self.settings_status = Some(match self.config.save_to(&self.config_path) {
                        Ok(()) => txt("gui.settings.saved", "Saved."),
                        Err(e) => format!("Save error: {e}"),
                    });
                }
                if let Some(msg) = &self.settings_status {
                    ui.label(msg.as_str());
                }
            });
        self.show_settings_modal = open;
    }

    fn ui_formula(&mut self, ctx: &egui::Context) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        let design = self.last_input.as_ref().map(sizing::design_values);
        egui::Window::new(txt("gui.formula.title", "Formula reference"))
            .collapsible(true)
            .resizable(true)
            .open(&mut self.show_formula_modal)
            .show(ctx, |ui| {
                ui.label(txt(
                    "gui.formula.battery",
                    "Design battery [Ah] = load A × desired BB h / 0.8",
                ));
                ui.label(txt(
                    "gui.formula.rectifier",
                    "Design rectifier [kW] = (design Ah × 0.25 + load A) × 50 / 1000",
                ));
                ui.label(txt("gui.formula.cp", "Design CP [kW] = design rectifier + 1"));
                ui.label(txt(
                    "gui.formula.bb",
                    "Actual BB [h] = battery Ah × 0.8 / load A",
                ));
                ui.label(txt(
                    "gui.formula.rule",
                    "OK when actual ≥ design; '-' when design is 0. Difference = design − actual.",
                ));
                if let Some(d) = design {
                    ui.separator();
                    ui.monospace(format!(
                        "battery = {} Ah\nrectifier = {} kW\ncp = {} kW\nactual bb = {} h",
                        sizing::to_fixed(d.battery_capacity_ah, 4),
                        sizing::to_fixed(d.rectifier_kw, 4),
                        sizing::to_fixed(d.cp_kw, 4),
                        sizing::to_fixed(d.actual_bb_hrs, 4),
                    ));
                }
            });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.txt("gui.nav.app_title", "Site Power Toolbox"));
                ui.separator();
                if ui
                    .button(self.txt("gui.formula.button", "Formula reference"))
                    .clicked()
                {
                    self.show_formula_modal = true;
                }
                if ui.button(self.txt("gui.settings.title", "Settings")).clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            self.ui_settings(ctx);
        }
        if self.show_formula_modal {
            self.ui_formula(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    self.ui_form(ui);
                    self.ui_results(ui);
                });
        });
    }
}
