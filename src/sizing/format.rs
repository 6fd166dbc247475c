//! 결과 표에 쓰이는 고정 소수점 문자열 변환.

/// 소수점 이하 2자리 문자열로 변환한다.
pub fn to_fixed_2(value: f64) -> String {
    to_fixed(value, 2)
}

/// 소수점 이하 `digits` 자리 문자열로 변환한다.
///
/// - 정확히 중간값(예: 8.625)인 경우 0에서 먼 쪽으로 올린다.
/// - 이진 표현상 중간값보다 작은 값(예: 1.005)은 내림 결과가 된다.
/// - NaN/무한대는 `"NaN"`, `"Infinity"`, `"-Infinity"`로 표기한다.
/// - 음의 0은 `"0.00"`으로 표기한다.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", digits, 0.0);
    }
    let abs = value.abs();
    let body = if is_exact_tie(abs, digits) {
        round_half_away(abs, digits)
    } else {
        format!("{:.*}", digits, abs)
    };
    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// abs * 10^digits 의 소수부가 정확히 0.5인지 판정한다.
/// 이진수로 표현 가능한 중간값은 abs * 2^(digits+1) 이 홀수 정수일 때뿐이다.
fn is_exact_tie(abs: f64, digits: usize) -> bool {
    let scaled = abs * 2f64.powi(digits as i32 + 1);
    scaled.is_finite() && scaled.fract() == 0.0 && scaled % 2.0 == 1.0
}

fn round_half_away(abs: f64, digits: usize) -> String {
    let scaled = (abs * 10f64.powi(digits as i32)).round();
    let mut s = format!("{scaled:.0}");
    if digits == 0 {
        return s;
    }
    if s.len() <= digits {
        s = format!("{}{s}", "0".repeat(digits + 1 - s.len()));
    }
    let point = s.len() - digits;
    s.insert(point, '.');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(to_fixed_2(8.625), "8.63");
        assert_eq!(to_fixed_2(9.625), "9.63");
        assert_eq!(to_fixed_2(-8.625), "-8.63");
        assert_eq!(to_fixed_2(0.125), "0.13");
        assert_eq!(to_fixed(2.5, 0), "3");
    }

    #[test]
    fn below_tie_rounds_down() {
        // 1.005의 실제 이진값은 1.00499999...
        assert_eq!(to_fixed_2(1.005), "1.00");
        assert_eq!(to_fixed_2(4.666_666), "4.67");
        assert_eq!(to_fixed_2(1.333_333), "1.33");
    }

    #[test]
    fn special_values() {
        assert_eq!(to_fixed_2(f64::NAN), "NaN");
        assert_eq!(to_fixed_2(f64::INFINITY), "Infinity");
        assert_eq!(to_fixed_2(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(to_fixed_2(-0.0), "0.00");
        assert_eq!(to_fixed_2(-0.001), "-0.00");
    }

    #[test]
    fn small_tie_gets_leading_zero() {
        assert_eq!(to_fixed(0.375, 2), "0.38");
        assert_eq!(to_fixed(0.0625, 3), "0.063");
    }
}
