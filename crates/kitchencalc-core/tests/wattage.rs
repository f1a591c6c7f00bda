use kitchencalc_core::converter::Converter;
use kitchencalc_core::rounding::RoundingPolicy;
use kitchencalc_core::wattage::{scale_by_wattage, WattageConverter, WattageQuery, COMMON_WATTAGES};
use kitchencalc_core::CalcError;

#[test]
fn two_minutes_at_1100_watts_becomes_about_three_minutes_at_700() {
    let adjusted = WattageConverter::default()
        .convert(&WattageQuery {
            time_seconds: 120.0,
            from_watts: 1100.0,
            to_watts: 700.0,
        })
        .unwrap();

    assert!((adjusted.minutes - 3.14).abs() < 0.01);
    assert!((adjusted.time.value - 120.0 * 1100.0 / 700.0).abs() < 1e-9);
    // 188.57 s is above the 120 s threshold, so it snaps to 15 s steps.
    assert_eq!(adjusted.time.display_value, 195.0);
    assert_eq!(adjusted.clock(), "3:15");
}

#[test]
fn short_times_snap_to_five_seconds() {
    let adjusted = WattageConverter::default()
        .convert(&WattageQuery {
            time_seconds: 100.0,
            from_watts: 1000.0,
            to_watts: 1100.0,
        })
        .unwrap();
    assert_eq!(adjusted.time.display_value, 90.0);
    assert_eq!(adjusted.clock(), "1:30");
}

#[test]
fn equal_wattages_leave_time_unchanged() {
    for watts in COMMON_WATTAGES {
        for seconds in [0.0, 30.0, 95.0, 240.0] {
            let scaled = scale_by_wattage(seconds, f64::from(watts), f64::from(watts)).unwrap();
            assert!((scaled - seconds).abs() < 1e-9);
        }
    }
}

#[test]
fn rounding_policy_is_configurable() {
    let policy = RoundingPolicy {
        wattage_coarse_step_seconds: 30.0,
        ..RoundingPolicy::default()
    };
    let adjusted = WattageConverter::new(policy)
        .convert(&WattageQuery {
            time_seconds: 120.0,
            from_watts: 1100.0,
            to_watts: 700.0,
        })
        .unwrap();
    assert_eq!(adjusted.time.display_value, 180.0);
}

#[test]
fn non_positive_wattage_is_rejected() {
    let err = scale_by_wattage(60.0, 0.0, 700.0).unwrap_err();
    assert!(matches!(err, CalcError::Validation { field: "from_watts", .. }));

    let err = scale_by_wattage(60.0, 1000.0, -700.0).unwrap_err();
    assert!(matches!(err, CalcError::Validation { field: "to_watts", .. }));

    let err = scale_by_wattage(-1.0, 1000.0, 700.0).unwrap_err();
    assert!(matches!(err, CalcError::Validation { field: "time_seconds", .. }));

    assert!(scale_by_wattage(60.0, f64::NAN, 700.0).is_err());
}
