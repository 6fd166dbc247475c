//! 용량 검토 결과 표 회귀 테스트.
use site_power_toolbox::sizing::{self, Parameter, SizingInput, Verdict};

fn site(
    side_load_amp: f64,
    desired_bb_hrs: f64,
    battery_capacity_ah: f64,
    rectifier_module_kw: f64,
    cp_capacity_kw: f64,
) -> SizingInput {
    SizingInput {
        side_load_amp,
        desired_bb_hrs,
        num_batteries: 1.0,
        battery_charging_factor: 0.25,
        battery_capacity_ah,
        rectifier_module_kw,
        cp_capacity_kw,
    }
}

#[test]
fn default_site_matches_reference_table() {
    let rows = sizing::evaluate(&SizingInput::default());

    let expected = [
        ("Battery Capacity (AH)", "450.00", "100.00", "Not Okay", "350.00"),
        ("Rectifier Module (KW)", "8.63", "1.00", "Not Okay", "7.63"),
        ("CP Capacity (KW)", "9.63", "1.00", "Not Okay", "8.63"),
        ("Battery BB (Hrs)", "6.00", "1.33", "Not Okay", "4.67"),
        ("Battery Charging Factor", "0.25", "0.25", "OK", "0.00"),
        ("CP", "9.63", "1.00", "Not Okay", "8.63"),
    ];
    for (row, (label, design, actual, ok, diff)) in rows.iter().zip(expected) {
        assert_eq!(row.parameter.label(), label);
        assert_eq!(row.design, design, "{label}");
        assert_eq!(row.actual, actual, "{label}");
        assert_eq!(row.ok.as_str(), ok, "{label}");
        assert_eq!(row.difference, diff, "{label}");
    }
}

#[test]
fn rows_keep_fixed_order() {
    let rows = sizing::evaluate(&site(12.0, 4.0, 200.0, 3.0, 5.0));
    let order: Vec<Parameter> = rows.iter().map(|r| r.parameter).collect();
    assert_eq!(order, Parameter::ALL.to_vec());
}

#[test]
fn cp_rows_are_identical() {
    for input in [
        SizingInput::default(),
        site(12.0, 4.0, 200.0, 3.0, 5.0),
        site(120.0, 8.0, 1200.0, 30.0, 2.5),
    ] {
        let rows = sizing::evaluate(&input);
        assert_eq!(rows[2].design, rows[5].design);
        assert_eq!(rows[2].actual, rows[5].actual);
        assert_eq!(rows[2].ok, rows[5].ok);
        assert_eq!(rows[2].difference, rows[5].difference);
    }
}

#[test]
fn equal_actual_and_design_passes() {
    // 10A × 4h / 0.8 = 50Ah, 정류기 = (12.5 + 10) × 50 / 1000 = 1.125kW
    let rows = sizing::evaluate(&site(10.0, 4.0, 50.0, 1.125, 2.125));
    assert_eq!(rows[0].ok, Verdict::Pass);
    assert_eq!(rows[0].difference, "0.00");
    assert_eq!(rows[1].ok, Verdict::Pass);
    assert_eq!(rows[2].ok, Verdict::Pass);
    // 50Ah × 0.8 / 10A = 4h
    assert_eq!(rows[3].ok, Verdict::Pass);
    assert!(sizing::all_ok(&rows));
    assert_eq!(sizing::failing(&rows).count(), 0);
}

#[test]
fn surplus_is_still_ok_without_upper_band() {
    let rows = sizing::evaluate(&site(10.0, 4.0, 5000.0, 100.0, 100.0));
    assert!(rows.iter().all(|r| r.ok == Verdict::Pass));
    assert!(rows[0].difference.starts_with('-'));
}

#[test]
fn zero_design_is_not_applicable() {
    // 백업 시간이 0이면 설계 배터리 용량과 BB 설계값이 0
    let rows = sizing::evaluate(&site(10.0, 0.0, 100.0, 1.0, 2.0));
    assert_eq!(rows[0].design, "0.00");
    assert_eq!(rows[0].ok, Verdict::NotApplicable);
    assert_eq!(rows[3].ok, Verdict::NotApplicable);
    // "-" 행은 요약에서 실패로 치지 않는다
    assert_eq!(rows[1].ok, Verdict::Pass);
}

#[test]
fn difference_is_design_minus_actual() {
    let input = site(37.0, 3.5, 180.0, 2.2, 3.1);
    let d = sizing::design_values(&input);
    let rows = sizing::evaluate(&input);
    assert_eq!(
        rows[0].difference,
        sizing::to_fixed_2(d.battery_capacity_ah - 180.0)
    );
    assert_eq!(rows[1].difference, sizing::to_fixed_2(d.rectifier_kw - 2.2));
    assert_eq!(rows[3].difference, sizing::to_fixed_2(3.5 - d.actual_bb_hrs));
}

#[test]
fn zero_load_propagates_non_finite_values() {
    let rows = sizing::evaluate(&site(0.0, 6.0, 100.0, 1.0, 1.0));
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[0].ok, Verdict::NotApplicable);
    assert_eq!(rows[3].actual, "Infinity");
    assert_eq!(rows[3].difference, "-Infinity");
    assert_eq!(rows[3].ok, Verdict::Pass);
}

#[test]
fn nan_input_yields_dash() {
    let mut input = SizingInput::default();
    input.rectifier_module_kw = f64::NAN;
    let rows = sizing::evaluate(&input);
    assert_eq!(rows[1].actual, "NaN");
    assert_eq!(rows[1].difference, "NaN");
    assert_eq!(rows[1].ok, Verdict::NotApplicable);
}

#[test]
fn number_of_batteries_does_not_change_results() {
    let a = SizingInput::default();
    let b = SizingInput {
        num_batteries: 8.0,
        ..a
    };
    assert_eq!(sizing::evaluate(&a), sizing::evaluate(&b));
}
