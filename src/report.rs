//! 결과 행을 텍스트 표, CSV, TOML 형식으로 출력한다.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::i18n::{keys, Translator};
use crate::sizing::{ComparisonRow, SizingInput};

/// 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Table,
    Csv,
    Toml,
}

/// 보고서 작성 중 발생 가능한 오류.
#[derive(Debug)]
pub enum ReportError {
    /// 파일 입출력 오류
    Io(io::Error),
    /// CSV 기록 오류
    Csv(csv::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
    /// 확장자로 형식을 알 수 없음
    UnsupportedExtension(String),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ReportError::Csv(e) => write!(f, "CSV 기록 오류: {e}"),
            ReportError::Serialize(e) => write!(f, "보고서 직렬화 오류: {e}"),
            ReportError::UnsupportedExtension(ext) => {
                write!(f, "지원하지 않는 확장자: {ext} (csv/toml 사용)")
            }
        }
    }
}

impl std::error::Error for ReportError {}

impl From<io::Error> for ReportError {
    fn from(value: io::Error) -> Self {
        ReportError::Io(value)
    }
}

impl From<csv::Error> for ReportError {
    fn from(value: csv::Error) -> Self {
        ReportError::Csv(value)
    }
}

impl From<toml::ser::Error> for ReportError {
    fn from(value: toml::ser::Error) -> Self {
        ReportError::Serialize(value)
    }
}

/// 입력과 결과를 함께 직렬화하기 위한 컨테이너.
#[derive(Debug, Serialize)]
pub struct SizingReport<'a> {
    pub input: &'a SizingInput,
    pub rows: &'a [ComparisonRow],
}

const CSV_HEADER: [&str; 5] = ["parameter", "design", "actual", "ok", "difference"];

/// 고정폭 텍스트 표를 만든다. 머리글만 번역하고 항목명은 그대로 둔다.
pub fn render_table(rows: &[ComparisonRow], tr: &Translator) -> String {
    let header = [
        tr.t(keys::REPORT_COL_PARAMETER),
        tr.t(keys::REPORT_COL_DESIGN),
        tr.t(keys::REPORT_COL_ACTUAL),
        tr.t(keys::REPORT_COL_OK),
        tr.t(keys::REPORT_COL_DIFFERENCE),
    ];
    let cells: Vec<[&str; 5]> = rows
        .iter()
        .map(|r| {
            [
                r.parameter.label(),
                r.design.as_str(),
                r.actual.as_str(),
                r.ok.as_str(),
                r.difference.as_str(),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.chars().count());
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(c.chars().count());
        }
    }

    let line = |cols: &[&str; 5]| -> String {
        let parts: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .enumerate()
            .map(|(i, (c, &w))| {
                // 항목명/판정은 왼쪽, 수치는 오른쪽 정렬
                if i == 0 || i == 3 {
                    format!("{c:<w$}")
                } else {
                    format!("{c:>w$}")
                }
            })
            .collect();
        format!("| {} |", parts.join(" | "))
    };
    let rule = {
        let parts: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        format!("|-{}-|", parts.join("-|-"))
    };

    let mut out = String::new();
    out.push_str(&line(&header));
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');
    for row in &cells {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

/// 결과 행을 CSV로 기록한다.
pub fn write_csv(rows: &[ComparisonRow], writer: impl Write) -> Result<(), ReportError> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for r in rows {
        wtr.write_record([
            r.parameter.label(),
            r.design.as_str(),
            r.actual.as_str(),
            r.ok.as_str(),
            r.difference.as_str(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// 입력과 결과를 TOML 문서로 직렬화한다.
pub fn to_toml(input: &SizingInput, rows: &[ComparisonRow]) -> Result<String, ReportError> {
    let report = SizingReport { input, rows };
    Ok(toml::to_string_pretty(&report)?)
}

/// 지정 형식으로 writer에 기록한다.
pub fn write_report(
    format: ReportFormat,
    input: &SizingInput,
    rows: &[ComparisonRow],
    tr: &Translator,
    mut writer: impl Write,
) -> Result<(), ReportError> {
    match format {
        ReportFormat::Table => {
            writer.write_all(render_table(rows, tr).as_bytes())?;
            writer.flush()?;
        }
        ReportFormat::Csv => write_csv(rows, writer)?,
        ReportFormat::Toml => {
            writer.write_all(to_toml(input, rows)?.as_bytes())?;
            writer.flush()?;
        }
    }
    Ok(())
}

/// 파일 확장자로 형식을 고른다.
pub fn format_for_path(path: &Path) -> Result<ReportFormat, ReportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_lowercase();
    match ext.as_str() {
        "csv" => Ok(ReportFormat::Csv),
        "toml" => Ok(ReportFormat::Toml),
        "txt" => Ok(ReportFormat::Table),
        _ => Err(ReportError::UnsupportedExtension(ext)),
    }
}

/// 확장자(csv/toml/txt)에 맞춰 파일로 내보낸다.
pub fn export(
    path: &Path,
    input: &SizingInput,
    rows: &[ComparisonRow],
    tr: &Translator,
) -> Result<(), ReportError> {
    let format = format_for_path(path)?;
    let file = File::create(path)?;
    write_report(format, input, rows, tr, io::BufWriter::new(file))?;
    tracing::info!(path = %path.display(), ?format, "exported sizing report");
    Ok(())
}
