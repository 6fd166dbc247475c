//! 통신 사이트 전원(배터리/정류기/CP) 용량 검토 모듈 모음.
//! 입력값으로 설계값을 산출하고 실제 설치값과 비교해 항목별 적합 여부를 판정한다.

pub mod evaluator;
pub mod format;
pub mod validation;

pub use evaluator::*;
pub use format::{to_fixed, to_fixed_2};
pub use validation::{
    parse_field, validate, FieldViolation, InputField, ValidationError, ViolationKind,
};
