use kitchencalc_core::converter::Converter;
use kitchencalc_core::pan::{
    scale_factor, slice_estimate, CakeServingsConverter, PanScaleConverter, PanScaleQuery,
    PanShape, ServingSource, ServingStyle, SliceSizes,
};
use kitchencalc_core::CalcError;

const TEN_INCH_ROUND: PanShape = PanShape::Round { diameter: 10.0 };

#[test]
fn ten_inch_round_serves_28_at_a_party() {
    let servings = CakeServingsConverter::default().convert(&TEN_INCH_ROUND).unwrap();
    assert!((servings.area.value - 78.539_816).abs() < 1e-5);
    assert_eq!(servings.area.display_value, 78.5);
    assert_eq!(servings.party, 28);
    assert_eq!(servings.wedding, 38);
    assert_eq!(servings.source, ServingSource::Chart);
}

#[test]
fn slice_estimate_floors_area_over_slice_size() {
    assert_eq!(slice_estimate(&TEN_INCH_ROUND, ServingStyle::Party).unwrap(), 19);
    assert_eq!(slice_estimate(&TEN_INCH_ROUND, ServingStyle::Wedding).unwrap(), 39);
    assert_eq!(slice_estimate(&PanShape::Square { side: 8.0 }, ServingStyle::Party).unwrap(), 16);

    let generous = SliceSizes {
        party_sq_in: 8.0,
        ..SliceSizes::default()
    };
    let servings = CakeServingsConverter::new(generous)
        .convert(&PanShape::Square { side: 8.0 })
        .unwrap();
    assert_eq!(servings.party_slice_estimate, 8);
    assert_eq!(servings.wedding_slice_estimate, 32);
}

#[test]
fn rectangle_orientation_does_not_matter() {
    let servings = CakeServingsConverter::default()
        .convert(&PanShape::Rectangle {
            width: 13.0,
            length: 9.0,
        })
        .unwrap();
    assert_eq!(servings.party, 24);
    assert_eq!(servings.wedding, 36);
    assert_eq!(servings.pan.label(), "9x13");
}

#[test]
fn off_chart_pans_scale_from_the_nearest_chart_pan() {
    // 11" round is 1.21x the area of the 10" chart pan.
    let servings = CakeServingsConverter::default()
        .convert(&PanShape::Round { diameter: 11.0 })
        .unwrap();
    assert_eq!(servings.party, 33);
    assert_eq!(servings.wedding, 45);
    match servings.source {
        ServingSource::AreaScaled { reference, area_ratio } => {
            assert_eq!(reference, "10in round");
            assert!((area_ratio - 1.21).abs() < 1e-9);
        }
        ServingSource::Chart => panic!("11in round is not on the chart"),
    }
}

#[test]
fn pan_scale_factor_is_the_area_ratio() {
    let factor = scale_factor(&PanShape::Square { side: 8.0 }, &"9x13".parse().unwrap()).unwrap();
    assert!((factor - 117.0 / 64.0).abs() < 1e-9);

    let scaled = PanScaleConverter
        .convert(&PanScaleQuery {
            from: PanShape::Square { side: 8.0 },
            to: PanShape::Rectangle {
                width: 9.0,
                length: 13.0,
            },
            from_depth: None,
            to_depth: None,
        })
        .unwrap();
    assert_eq!(scaled.factor.display_value, 1.83);
    assert!(!scaled.depth_adjusted);
}

#[test]
fn depth_ratio_multiplies_the_factor() {
    let pan = PanShape::Round { diameter: 8.0 };
    let scaled = PanScaleConverter
        .convert(&PanScaleQuery {
            from: pan,
            to: pan,
            from_depth: Some(2.0),
            to_depth: Some(3.0),
        })
        .unwrap();
    assert!((scaled.factor.value - 1.5).abs() < 1e-9);
    assert!(scaled.depth_adjusted);

    let err = PanScaleConverter
        .convert(&PanScaleQuery {
            from: pan,
            to: pan,
            from_depth: Some(2.0),
            to_depth: None,
        })
        .unwrap_err();
    assert!(matches!(err, CalcError::Validation { field: "depth", .. }));
}

#[test]
fn pan_sizes_parse_from_text() {
    assert_eq!("9x13".parse::<PanShape>().unwrap(), PanShape::Rectangle { width: 9.0, length: 13.0 });
    assert_eq!("13 x 9 in".parse::<PanShape>().unwrap(), PanShape::Rectangle { width: 9.0, length: 13.0 });
    assert_eq!("10in round".parse::<PanShape>().unwrap(), TEN_INCH_ROUND);
    assert_eq!("10\" round".parse::<PanShape>().unwrap(), TEN_INCH_ROUND);
    assert_eq!("8 square".parse::<PanShape>().unwrap(), PanShape::Square { side: 8.0 });
    assert_eq!("8x8".parse::<PanShape>().unwrap(), PanShape::Square { side: 8.0 });
    assert!("twelve".parse::<PanShape>().is_err());
    assert!("0 round".parse::<PanShape>().is_err());
}

#[test]
fn degenerate_pans_are_rejected() {
    let err = CakeServingsConverter::default()
        .convert(&PanShape::Round { diameter: 0.0 })
        .unwrap_err();
    assert!(matches!(err, CalcError::Validation { field: "diameter", .. }));
    assert!(scale_factor(&PanShape::Square { side: -2.0 }, &TEN_INCH_ROUND).is_err());
}
