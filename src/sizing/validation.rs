//! 입력 폼 수준의 검증. 계산기 자체는 어떤 값도 거부하지 않으므로
//! 프론트엔드가 계산 전에 이 규칙을 적용한다.

use super::evaluator::SizingInput;

/// 입력 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    SideLoadAmp,
    DesiredBbHrs,
    NumBatteries,
    BatteryChargingFactor,
    BatteryCapacity,
    RectifierModule,
    CpCapacity,
}

impl InputField {
    pub const ALL: [InputField; 7] = [
        InputField::SideLoadAmp,
        InputField::DesiredBbHrs,
        InputField::NumBatteries,
        InputField::BatteryChargingFactor,
        InputField::BatteryCapacity,
        InputField::RectifierModule,
        InputField::CpCapacity,
    ];

    /// 설정 파일/CLI에서 쓰는 키.
    pub fn key(&self) -> &'static str {
        match self {
            InputField::SideLoadAmp => "side_load_amp",
            InputField::DesiredBbHrs => "desired_bb_hrs",
            InputField::NumBatteries => "num_batteries",
            InputField::BatteryChargingFactor => "battery_charging_factor",
            InputField::BatteryCapacity => "battery_capacity_ah",
            InputField::RectifierModule => "rectifier_module_kw",
            InputField::CpCapacity => "cp_capacity_kw",
        }
    }

    /// 입력 폼 라벨.
    pub fn label(&self) -> &'static str {
        match self {
            InputField::SideLoadAmp => "Side Load Ampere",
            InputField::DesiredBbHrs => "Desired BB Hours",
            InputField::NumBatteries => "Number of Batteries",
            InputField::BatteryChargingFactor => "Battery Charging Factor",
            InputField::BatteryCapacity => "Battery Capacity (AH)",
            InputField::RectifierModule => "Rectifier Module (KW)",
            InputField::CpCapacity => "CP Capacity (KW)",
        }
    }

    /// 빈 입력을 허용하지 않는 항목인지. 백업 시간만 선택 입력이다.
    pub fn is_required(&self) -> bool {
        !matches!(self, InputField::DesiredBbHrs)
    }

    /// (최소, 최대) 허용 범위.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            InputField::SideLoadAmp
            | InputField::NumBatteries
            | InputField::BatteryCapacity => (Some(1.0), None),
            InputField::DesiredBbHrs => (None, None),
            InputField::BatteryChargingFactor => (Some(0.0), Some(1.0)),
            InputField::RectifierModule | InputField::CpCapacity => (Some(0.0), None),
        }
    }

    pub fn get(&self, input: &SizingInput) -> f64 {
        match self {
            InputField::SideLoadAmp => input.side_load_amp,
            InputField::DesiredBbHrs => input.desired_bb_hrs,
            InputField::NumBatteries => input.num_batteries,
            InputField::BatteryChargingFactor => input.battery_charging_factor,
            InputField::BatteryCapacity => input.battery_capacity_ah,
            InputField::RectifierModule => input.rectifier_module_kw,
            InputField::CpCapacity => input.cp_capacity_kw,
        }
    }

    pub fn set(&self, input: &mut SizingInput, value: f64) {
        let slot = match self {
            InputField::SideLoadAmp => &mut input.side_load_amp,
            InputField::DesiredBbHrs => &mut input.desired_bb_hrs,
            InputField::NumBatteries => &mut input.num_batteries,
            InputField::BatteryChargingFactor => &mut input.battery_charging_factor,
            InputField::BatteryCapacity => &mut input.battery_capacity_ah,
            InputField::RectifierModule => &mut input.rectifier_module_kw,
            InputField::CpCapacity => &mut input.cp_capacity_kw,
        };
        *slot = value;
    }
}

/// 위반 종류.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViolationKind {
    Required,
    NotANumber,
    BelowMinimum { min: f64 },
    AboveMaximum { max: f64 },
}

/// 항목 하나의 검증 실패.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldViolation {
    pub field: InputField,
    pub kind: ViolationKind,
}

impl FieldViolation {
    /// 폼에 표시하는 안내 문구.
    pub fn message(&self) -> &'static str {
        match (self.kind, self.field) {
            (ViolationKind::Required, _) => "This field is required",
            (ViolationKind::NotANumber, _) => "Must be a number",
            (ViolationKind::BelowMinimum { .. }, InputField::NumBatteries) => {
                "At least 1 battery required"
            }
            (
                ViolationKind::BelowMinimum { .. },
                InputField::SideLoadAmp | InputField::BatteryCapacity,
            ) => "Must be greater than 0",
            (ViolationKind::BelowMinimum { .. }, _) => "Must be ≥ 0",
            (ViolationKind::AboveMaximum { .. }, _) => "Must be ≤ 1",
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message())
    }
}

/// 입력 검증 오류. 발견된 위반을 항목 순서대로 모두 담는다.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    /// 특정 항목의 위반을 찾는다.
    pub fn for_field(&self, field: InputField) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msgs: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "{}", msgs.join("; "))
    }
}

impl std::error::Error for ValidationError {}

fn check_value(field: InputField, value: f64) -> Option<FieldViolation> {
    if value.is_nan() {
        return Some(FieldViolation {
            field,
            kind: ViolationKind::NotANumber,
        });
    }
    let (min, max) = field.bounds();
    let kind = match (min, max) {
        (Some(min), _) if value < min => ViolationKind::BelowMinimum { min },
        (_, Some(max)) if value > max => ViolationKind::AboveMaximum { max },
        _ => return None,
    };
    Some(FieldViolation { field, kind })
}

/// 입력 전체를 검증한다.
pub fn validate(input: &SizingInput) -> Result<(), ValidationError> {
    let violations: Vec<FieldViolation> = InputField::ALL
        .iter()
        .filter_map(|f| check_value(*f, f.get(input)))
        .collect();
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { violations })
    }
}

/// 입력 문자열 하나를 숫자로 변환하고 범위를 검사한다.
pub fn parse_field(field: InputField, raw: &str) -> Result<f64, FieldViolation> {
    let s = raw.trim();
    if s.is_empty() {
        if field.is_required() {
            return Err(FieldViolation {
                field,
                kind: ViolationKind::Required,
            });
        }
        return Ok(0.0);
    }
    let value = s.parse::<f64>().map_err(|_| FieldViolation {
        field,
        kind: ViolationKind::NotANumber,
    })?;
    match check_value(field, value) {
        Some(v) => Err(v),
        None => Ok(value),
    }
}
