use clap::Parser;
use std::path::PathBuf;

use crate::report::ReportFormat;
use crate::sizing::SizingInput;

/// 터미널용 명령행 인자. 입력 플래그를 생략하면 설정 파일의 기본 입력값을 쓴다.
#[derive(Debug, Parser)]
#[command(
    name = "site_power_toolbox_cli",
    version,
    about = "Battery / rectifier / CP sizing check for telecom sites"
)]
pub struct Cli {
    /// 부하 전류 [A]
    #[arg(long, allow_negative_numbers = true)]
    pub side_load_amp: Option<f64>,
    /// 목표 배터리 백업 시간 [h]
    #[arg(long, allow_negative_numbers = true)]
    pub desired_bb_hrs: Option<f64>,
    /// 배터리 수량
    #[arg(long, allow_negative_numbers = true)]
    pub num_batteries: Option<f64>,
    /// 배터리 충전 계수 (0~1)
    #[arg(long, allow_negative_numbers = true)]
    pub charging_factor: Option<f64>,
    /// 실제 배터리 용량 [Ah]
    #[arg(long, allow_negative_numbers = true)]
    pub battery_capacity: Option<f64>,
    /// 실제 정류기 모듈 용량 [kW]
    #[arg(long, allow_negative_numbers = true)]
    pub rectifier_kw: Option<f64>,
    /// 실제 CP 용량 [kW]
    #[arg(long, allow_negative_numbers = true)]
    pub cp_kw: Option<f64>,

    /// 출력 형식 (기본값은 설정 파일의 report_format)
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,
    /// 결과를 파일로 저장 (확장자 csv/toml/txt)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// 언어 (auto/en-us/ko-kr)
    #[arg(long, short = 'L', default_value = "auto")]
    pub lang: String,
    /// 설정 파일 경로
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// 메뉴 방식으로 실행
    #[arg(long, short)]
    pub interactive: bool,
    /// 입력 범위 검증을 건너뛰고 그대로 계산
    #[arg(long)]
    pub no_validate: bool,
}

impl Cli {
    /// 입력값 플래그가 하나라도 있는지.
    pub fn has_inputs(&self) -> bool {
        [
            self.side_load_amp,
            self.desired_bb_hrs,
            self.num_batteries,
            self.charging_factor,
            self.battery_capacity,
            self.rectifier_kw,
            self.cp_kw,
        ]
        .iter()
        .any(Option::is_some)
    }

    /// 지정된 플래그만 덮어쓴 입력을 만든다.
    pub fn apply_to(&self, base: SizingInput) -> SizingInput {
        SizingInput {
            side_load_amp: self.side_load_amp.unwrap_or(base.side_load_amp),
            desired_bb_hrs: self.desired_bb_hrs.unwrap_or(base.desired_bb_hrs),
            num_batteries: self.num_batteries.unwrap_or(base.num_batteries),
            battery_charging_factor: self
                .charging_factor
                .unwrap_or(base.battery_charging_factor),
            battery_capacity_ah: self.battery_capacity.unwrap_or(base.battery_capacity_ah),
            rectifier_module_kw: self.rectifier_kw.unwrap_or(base.rectifier_module_kw),
            cp_capacity_kw: self.cp_kw.unwrap_or(base.cp_capacity_kw),
        }
    }
}
