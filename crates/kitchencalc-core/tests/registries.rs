use std::collections::HashSet;

use kitchencalc_core::all_converter_descriptors;
use kitchencalc_core::converter::{find_converter_descriptor, ConverterFamily};

#[test]
fn registries_are_populated() {
    let codes: HashSet<&str> = all_converter_descriptors().iter().map(|d| d.code).collect();
    assert_eq!(codes.len(), all_converter_descriptors().len(), "converter codes must be unique");

    for code in [
        "air_fryer",
        "convection",
        "microwave",
        "wattage",
        "temperature",
        "measure",
        "pan_scale",
        "cake_servings",
        "meat",
        "doneness",
        "air_fryer_food",
        "cake_pan",
    ] {
        assert!(codes.contains(code), "expected {code} converter to be registered");
    }

    assert_eq!(
        find_converter_descriptor("wattage").map(|d| d.family),
        Some(ConverterFamily::Wattage)
    );
    assert!(find_converter_descriptor("sous_vide").is_none());
}
