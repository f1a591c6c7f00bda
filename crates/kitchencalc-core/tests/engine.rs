use kitchencalc_core::config::EngineConfig;
use kitchencalc_core::converter::find_converter_descriptor;
use kitchencalc_core::lookup::doneness::Doneness;
use kitchencalc_core::lookup::meat::Protein;
use kitchencalc_core::measure::{MeasureQuery, MeasureUnit};
use kitchencalc_core::pan::PanShape;
use kitchencalc_core::temperature::{TemperatureQuery, TemperatureScale};
use kitchencalc_core::wattage::WattageQuery;
use kitchencalc_core::{CalculationRequest, CalculationResponse, Engine};
use serde_json::json;

fn request(value: serde_json::Value) -> CalculationRequest {
    serde_json::from_value(value).expect("request should deserialize")
}

#[test]
fn json_requests_dispatch_to_the_right_converter() {
    let engine = Engine::default();
    let response = engine
        .evaluate(&request(json!({
            "kind": "air_fryer",
            "temperature": { "value": 400.0 },
            "time_minutes": 25.0
        })))
        .unwrap();

    match response {
        CalculationResponse::AirFryer(setting) => {
            assert_eq!(setting.temperature.unwrap().display_value, 375.0);
            assert_eq!(setting.time.display_value, 20.0);
        }
        other => panic!("unexpected response {other:?}"),
    }
}

#[test]
fn responses_serialize_with_kind_and_result() {
    let engine = Engine::default();
    let response = engine
        .evaluate(&request(json!({
            "kind": "cake_servings",
            "pan": { "shape": "round", "diameter": 10.0 }
        })))
        .unwrap();

    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["kind"], "cake_servings");
    assert_eq!(body["result"]["party"], 28);
    assert_eq!(body["result"]["source"]["method"], "chart");
}

#[test]
fn lookup_requests_accept_snake_case_keys() {
    let engine = Engine::default();
    let response = engine
        .evaluate(&request(json!({
            "kind": "meat",
            "protein": "beef",
            "cut": "rib roast",
            "weight_lb": 4.0
        })))
        .unwrap();
    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["result"]["bracket"]["lower"], 4.0);
    assert_eq!(body["result"]["bone_in_defaulted"], true);
}

#[test]
fn configured_rules_flow_into_the_engine() {
    let config = EngineConfig::from_toml_str("[rules.air_fryer]\ntime_ratio = 0.75\n").unwrap();
    let engine = Engine::new(config).unwrap();
    let response = engine
        .evaluate(&request(json!({
            "kind": "air_fryer",
            "temperature": { "value": 350.0, "unit": "fahrenheit" },
            "time_minutes": 25.0
        })))
        .unwrap();
    let CalculationResponse::AirFryer(setting) = response else {
        panic!("expected an air fryer response");
    };
    assert!((setting.time.value - 18.75).abs() < 1e-9);
    assert_eq!(setting.time.display_value, 19.0);
}

#[test]
fn invalid_configuration_is_refused() {
    let mut config = EngineConfig::default();
    config.rounding.time_step_minutes = 0.0;
    assert!(Engine::new(config).is_err());
}

#[test]
fn errors_pass_through_unchanged() {
    let err = Engine::default()
        .evaluate(&CalculationRequest::Wattage(WattageQuery {
            time_seconds: 60.0,
            from_watts: 1000.0,
            to_watts: 0.0,
        }))
        .unwrap_err();
    assert_eq!(err.kind(), "validation");
}

#[test]
fn every_request_kind_has_a_registered_converter() {
    let pan = PanShape::Round { diameter: 8.0 };
    let requests = [
        request(json!({ "kind": "convection", "temperature": { "value": 350.0 }, "time_minutes": 40.0 })),
        request(json!({ "kind": "microwave", "time_minutes": 40.0 })),
        CalculationRequest::Wattage(WattageQuery {
            time_seconds: 90.0,
            from_watts: 1000.0,
            to_watts: 800.0,
        }),
        CalculationRequest::Temperature(TemperatureQuery {
            value: 180.0,
            from: TemperatureScale::Celsius,
            to: TemperatureScale::GasMark,
            display: Default::default(),
        }),
        CalculationRequest::Measure(MeasureQuery {
            amount: 1.0,
            from: MeasureUnit::Cup,
            to: MeasureUnit::Gram,
            ingredient: Some("milk".to_string()),
        }),
        request(json!({
            "kind": "pan_scale",
            "from": { "shape": "round", "diameter": 9.0 },
            "to": { "shape": "rectangle", "width": 9.0, "length": 13.0 }
        })),
        CalculationRequest::CakeServings { pan },
        request(json!({ "kind": "doneness", "protein": "lamb", "doneness": "medium_rare" })),
        request(json!({ "kind": "air_fryer_food", "food": "bacon" })),
        CalculationRequest::CakePan { pan },
    ];

    let engine = Engine::default();
    for request in &requests {
        assert!(
            find_converter_descriptor(request.kind()).is_some(),
            "no descriptor for {}",
            request.kind()
        );
        engine.evaluate(request).unwrap();
    }

    assert_eq!(Protein::Lamb.to_string(), "lamb");
    assert_eq!(Doneness::MediumRare.as_str(), "medium_rare");
}
