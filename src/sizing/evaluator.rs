use serde::{Deserialize, Serialize, Serializer};

use super::format::to_fixed_2;

/// 배터리 가용 방전 비율. 설계 용량과 실제 백업 시간 산정에 공통으로 쓴다.
pub const USABLE_DISCHARGE_RATIO: f64 = 0.8;
/// 설계 충전 계수(용량 대비 충전 전류 비율).
pub const DESIGN_CHARGING_FACTOR: f64 = 0.25;
/// 정류기 kW 환산에 쓰는 DC 버스 전압 [V].
pub const DC_BUS_VOLTAGE: f64 = 50.0;
/// 정류기 설계값에 더하는 CP 여유분 [kW].
pub const CP_MARGIN_KW: f64 = 1.0;

/// 사이트 용량 검토 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingInput {
    /// 사이트 부하 전류 [A]
    pub side_load_amp: f64,
    /// 목표 배터리 백업 시간 [h]
    pub desired_bb_hrs: f64,
    /// 배터리 수량. 현재 산식에는 쓰이지 않지만 입력 계약에 포함된다.
    pub num_batteries: f64,
    /// 실제 충전 계수(0~1)
    pub battery_charging_factor: f64,
    /// 실제 배터리 용량 [Ah]
    pub battery_capacity_ah: f64,
    /// 실제 정류기 모듈 용량 [kW]
    pub rectifier_module_kw: f64,
    /// 실제 CP 용량 [kW]
    pub cp_capacity_kw: f64,
}

impl Default for SizingInput {
    fn default() -> Self {
        Self {
            side_load_amp: 60.0,
            desired_bb_hrs: 6.0,
            num_batteries: 1.0,
            battery_charging_factor: 0.25,
            battery_capacity_ah: 100.0,
            rectifier_module_kw: 1.0,
            cp_capacity_kw: 1.0,
        }
    }
}

/// 반올림 전 설계값과 파생 실제값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignValues {
    /// 설계 배터리 용량 [Ah]
    pub battery_capacity_ah: f64,
    /// 설계 정류기 용량 [kW]
    pub rectifier_kw: f64,
    /// 설계 CP 용량 [kW]
    pub cp_kw: f64,
    /// 설계 충전 계수
    pub charging_factor: f64,
    /// 실제 배터리로 가능한 백업 시간 [h]
    pub actual_bb_hrs: f64,
}

/// 설계값을 산출한다. 입력 검증은 하지 않으며 0으로 나누면 무한대/NaN이 그대로 나온다.
pub fn design_values(input: &SizingInput) -> DesignValues {
    let battery_capacity_ah =
        input.side_load_amp * input.desired_bb_hrs / USABLE_DISCHARGE_RATIO;
    let rectifier_kw = ((battery_capacity_ah * DESIGN_CHARGING_FACTOR + input.side_load_amp)
        * DC_BUS_VOLTAGE)
        / 1000.0;
    DesignValues {
        battery_capacity_ah,
        rectifier_kw,
        cp_kw: rectifier_kw + CP_MARGIN_KW,
        charging_factor: DESIGN_CHARGING_FACTOR,
        actual_bb_hrs: (input.battery_capacity_ah * USABLE_DISCHARGE_RATIO)
            / input.side_load_amp,
    }
}

/// 비교 항목. 결과 행의 순서를 고정한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    BatteryCapacity,
    RectifierModule,
    CpCapacity,
    BatteryBackupHours,
    BatteryChargingFactor,
    /// CP 용량 행과 같은 값을 한 번 더 표시한다.
    Cp,
}

impl Parameter {
    pub const ALL: [Parameter; 6] = [
        Parameter::BatteryCapacity,
        Parameter::RectifierModule,
        Parameter::CpCapacity,
        Parameter::BatteryBackupHours,
        Parameter::BatteryChargingFactor,
        Parameter::Cp,
    ];

    /// 결과 표에 그대로 노출되는 항목명. 번역하지 않는다.
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::BatteryCapacity => "Battery Capacity (AH)",
            Parameter::RectifierModule => "Rectifier Module (KW)",
            Parameter::CpCapacity => "CP Capacity (KW)",
            Parameter::BatteryBackupHours => "Battery BB (Hrs)",
            Parameter::BatteryChargingFactor => "Battery Charging Factor",
            Parameter::Cp => "CP",
        }
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 설계값 대비 실제값 판정.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// 실제값이 설계값 이상
    Pass,
    /// 실제값이 설계값 미만
    Fail,
    /// 설계값이 0이거나 비교 불가(NaN)
    NotApplicable,
}

impl Verdict {
    /// 설계값과 실제값을 비교한다. 허용 오차 없이 `actual - design >= 0` 이면 통과.
    pub fn judge(design: f64, actual: f64) -> Self {
        if design == 0.0 {
            return Verdict::NotApplicable;
        }
        let diff = actual - design;
        if diff < 0.0 {
            Verdict::Fail
        } else if diff >= 0.0 {
            Verdict::Pass
        } else {
            Verdict::NotApplicable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "OK",
            Verdict::Fail => "Not Okay",
            Verdict::NotApplicable => "-",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 결과 표의 한 행. 수치는 모두 소수점 2자리 문자열이다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub parameter: Parameter,
    pub design: String,
    pub actual: String,
    pub ok: Verdict,
    /// 설계값 - 실제값. 양수면 실제값이 부족하다.
    pub difference: String,
}

impl ComparisonRow {
    fn new(parameter: Parameter, design: f64, actual: f64) -> Self {
        Self {
            parameter,
            design: to_fixed_2(design),
            actual: to_fixed_2(actual),
            ok: Verdict::judge(design, actual),
            difference: to_fixed_2(design - actual),
        }
    }
}

/// 입력으로 6개 비교 행을 순서대로 만든다.
pub fn evaluate(input: &SizingInput) -> [ComparisonRow; 6] {
    let d = design_values(input);
    tracing::debug!(
        design_battery_ah = d.battery_capacity_ah,
        design_rectifier_kw = d.rectifier_kw,
        design_cp_kw = d.cp_kw,
        actual_bb_hrs = d.actual_bb_hrs,
        "evaluated site sizing"
    );
    Parameter::ALL.map(|parameter| {
        let (design, actual) = match parameter {
            Parameter::BatteryCapacity => (d.battery_capacity_ah, input.battery_capacity_ah),
            Parameter::RectifierModule => (d.rectifier_kw, input.rectifier_module_kw),
            Parameter::CpCapacity | Parameter::Cp => (d.cp_kw, input.cp_capacity_kw),
            Parameter::BatteryBackupHours => (input.desired_bb_hrs, d.actual_bb_hrs),
            Parameter::BatteryChargingFactor => {
                (d.charging_factor, input.battery_charging_factor)
            }
        };
        ComparisonRow::new(parameter, design, actual)
    })
}

/// 판정 가능한 모든 행이 통과인지 확인한다. "-" 행은 무시한다.
pub fn all_ok(rows: &[ComparisonRow]) -> bool {
    rows.iter().all(|r| r.ok != Verdict::Fail)
}

/// 부족 판정된 행만 돌려준다.
pub fn failing(rows: &[ComparisonRow]) -> impl Iterator<Item = &ComparisonRow> {
    rows.iter().filter(|r| r.ok == Verdict::Fail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judge_boundaries() {
        assert_eq!(Verdict::judge(0.0, 5.0), Verdict::NotApplicable);
        assert_eq!(Verdict::judge(2.0, 2.0), Verdict::Pass);
        assert_eq!(Verdict::judge(2.0, 1.99), Verdict::Fail);
        assert_eq!(Verdict::judge(2.0, 100.0), Verdict::Pass);
        assert_eq!(Verdict::judge(2.0, f64::NAN), Verdict::NotApplicable);
    }

    #[test]
    fn design_values_for_default_site() {
        let d = design_values(&SizingInput::default());
        assert!((d.battery_capacity_ah - 450.0).abs() < 1e-9);
        assert!((d.rectifier_kw - 8.625).abs() < 1e-9);
        assert!((d.cp_kw - 9.625).abs() < 1e-9);
        assert!((d.actual_bb_hrs - 80.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn verdict_strings() {
        assert_eq!(Verdict::Pass.to_string(), "OK");
        assert_eq!(Verdict::Fail.to_string(), "Not Okay");
        assert_eq!(Verdict::NotApplicable.to_string(), "-");
    }
}
