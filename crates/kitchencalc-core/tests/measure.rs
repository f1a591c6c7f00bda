use kitchencalc_core::converter::Converter;
use kitchencalc_core::measure::{find_density, ingredient_names, MeasureConverter, MeasureQuery, MeasureUnit};
use kitchencalc_core::{CalcError, Unit};

fn measure(amount: f64, from: MeasureUnit, to: MeasureUnit, ingredient: Option<&str>) -> kitchencalc_core::Result<kitchencalc_core::measure::Measurement> {
    MeasureConverter.convert(&MeasureQuery {
        amount,
        from,
        to,
        ingredient: ingredient.map(str::to_string),
    })
}

#[test]
fn volume_conversions_need_no_ingredient() {
    let tbsp = measure(1.0, MeasureUnit::Cup, MeasureUnit::Tablespoon, None).unwrap();
    assert!((tbsp.result.value - 16.0).abs() < 1e-9);
    assert_eq!(tbsp.result.unit, Unit::Tablespoons);
    assert!(tbsp.ingredient.is_none());

    let spoon = measure(3.0, MeasureUnit::Teaspoon, MeasureUnit::Tablespoon, None).unwrap();
    assert!((spoon.result.value - 1.0).abs() < 1e-9);

    let ml = measure(1.0, MeasureUnit::Cup, MeasureUnit::Milliliter, None).unwrap();
    assert_eq!(ml.result.display_value, 237.0);
}

#[test]
fn weight_conversions_need_no_ingredient() {
    let pound = measure(16.0, MeasureUnit::Ounce, MeasureUnit::Pound, None).unwrap();
    assert!((pound.result.value - 1.0).abs() < 1e-9);
}

#[test]
fn cups_to_grams_use_ingredient_density() {
    let flour = measure(1.0, MeasureUnit::Cup, MeasureUnit::Gram, Some("flour")).unwrap();
    assert!((flour.result.value - 125.0).abs() < 1e-9);
    assert_eq!(flour.ingredient, Some("all_purpose_flour"));
    assert_eq!(flour.grams_per_cup, Some(125.0));

    let sugar = measure(200.0, MeasureUnit::Gram, MeasureUnit::Cup, Some("Granulated Sugar")).unwrap();
    assert!((sugar.result.value - 1.0).abs() < 1e-9);

    let butter = measure(2.0, MeasureUnit::Tablespoon, MeasureUnit::Gram, Some("butter")).unwrap();
    assert_eq!(butter.result.display_value, 28.0);
}

#[test]
fn ingredient_names_are_normalised() {
    assert_eq!(find_density("  All-Purpose Flour ").unwrap().0, "all_purpose_flour");
    assert_eq!(find_density("chocolate chip").unwrap().0, "chocolate_chips");
    assert_eq!(find_density("Oat").unwrap().0, "rolled_oats");
    assert_eq!(find_density("butters").unwrap().0, "butter");
    assert_eq!(find_density("icing sugar").unwrap().0, "powdered_sugar");
}

#[test]
fn unknown_ingredient_lists_nearest_names() {
    let err = find_density("flor").unwrap_err();
    match err {
        CalcError::NotFound { table, suggestions, .. } => {
            assert_eq!(table, "ingredient_density");
            assert!(suggestions.iter().any(|name| name == "flour"));
            assert!(suggestions.len() <= 5);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn crossing_volume_and_weight_requires_an_ingredient() {
    let err = measure(1.0, MeasureUnit::Cup, MeasureUnit::Gram, None).unwrap_err();
    assert!(matches!(err, CalcError::Validation { field: "ingredient", .. }));

    let err = measure(-1.0, MeasureUnit::Cup, MeasureUnit::Tablespoon, None).unwrap_err();
    assert!(matches!(err, CalcError::Validation { field: "amount", .. }));
}

#[test]
fn units_parse_from_common_spellings() {
    assert_eq!("Tbsp".parse::<MeasureUnit>().unwrap(), MeasureUnit::Tablespoon);
    assert_eq!("fl oz".parse::<MeasureUnit>().unwrap(), MeasureUnit::FluidOunce);
    assert_eq!("grams".parse::<MeasureUnit>().unwrap(), MeasureUnit::Gram);
    assert!("pinch".parse::<MeasureUnit>().is_err());
    assert!(ingredient_names().contains(&"butter"));
}
