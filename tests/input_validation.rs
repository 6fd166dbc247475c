use site_power_toolbox::sizing::{
    parse_field, validate, InputField, SizingInput, ViolationKind,
};

#[test]
fn default_inputs_pass() {
    assert!(validate(&SizingInput::default()).is_ok());
}

#[test]
fn each_form_rule_is_enforced() {
    let cases = [
        (InputField::SideLoadAmp, 0.0, "Must be greater than 0"),
        (InputField::NumBatteries, 0.0, "At least 1 battery required"),
        (InputField::BatteryChargingFactor, -0.1, "Must be ≥ 0"),
        (InputField::BatteryChargingFactor, 1.2, "Must be ≤ 1"),
        (InputField::BatteryCapacity, 0.5, "Must be greater than 0"),
        (InputField::RectifierModule, -1.0, "Must be ≥ 0"),
        (InputField::CpCapacity, -3.0, "Must be ≥ 0"),
    ];
    for (field, value, message) in cases {
        let mut input = SizingInput::default();
        field.set(&mut input, value);
        let err = validate(&input).unwrap_err();
        assert_eq!(err.violations.len(), 1, "{}", field.key());
        let v = err.for_field(field).unwrap();
        assert_eq!(v.message(), message);
    }
}

#[test]
fn backup_hours_has_no_range() {
    let mut input = SizingInput::default();
    input.desired_bb_hrs = -4.0;
    assert!(validate(&input).is_ok());
    input.desired_bb_hrs = f64::NAN;
    let err = validate(&input).unwrap_err();
    assert_eq!(err.violations[0].kind, ViolationKind::NotANumber);
}

#[test]
fn all_violations_reported_in_field_order() {
    let input = SizingInput {
        side_load_amp: 0.0,
        desired_bb_hrs: 6.0,
        num_batteries: 0.0,
        battery_charging_factor: 2.0,
        battery_capacity_ah: 100.0,
        rectifier_module_kw: -1.0,
        cp_capacity_kw: 1.0,
    };
    let err = validate(&input).unwrap_err();
    let fields: Vec<InputField> = err.violations.iter().map(|v| v.field).collect();
    assert_eq!(
        fields,
        vec![
            InputField::SideLoadAmp,
            InputField::NumBatteries,
            InputField::BatteryChargingFactor,
            InputField::RectifierModule,
        ]
    );
    let text = err.to_string();
    assert!(text.contains("Side Load Ampere: Must be greater than 0"), "{text}");
}

#[test]
fn parse_field_handles_blank_and_garbage() {
    assert_eq!(
        parse_field(InputField::SideLoadAmp, "  ").unwrap_err().kind,
        ViolationKind::Required
    );
    assert_eq!(parse_field(InputField::DesiredBbHrs, "").unwrap(), 0.0);
    assert_eq!(
        parse_field(InputField::CpCapacity, "12kW").unwrap_err().kind,
        ViolationKind::NotANumber
    );
    assert_eq!(parse_field(InputField::CpCapacity, " 12.5 ").unwrap(), 12.5);
    assert_eq!(
        parse_field(InputField::BatteryChargingFactor, "1.01")
            .unwrap_err()
            .kind,
        ViolationKind::AboveMaximum { max: 1.0 }
    );
}
