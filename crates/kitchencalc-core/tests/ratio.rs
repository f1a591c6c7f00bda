use kitchencalc_core::converter::Converter;
use kitchencalc_core::quantity::{Temperature, TemperatureUnit};
use kitchencalc_core::ratio::{ConversionRule, Direction, RatioConverter, RatioQuery};
use kitchencalc_core::temperature::TemperatureDisplay;
use kitchencalc_core::CalcError;

fn query(fahrenheit: f64, minutes: f64, direction: Direction) -> RatioQuery {
    RatioQuery {
        temperature: Some(Temperature::fahrenheit(fahrenheit).unwrap()),
        time_minutes: minutes,
        direction,
        display: TemperatureDisplay::Whole,
    }
}

#[test]
fn air_fryer_forward_converts_400_for_25_minutes() {
    let converted = RatioConverter::air_fryer()
        .convert(&query(400.0, 25.0, Direction::Forward))
        .unwrap();

    let temperature = converted.temperature.expect("air fryer converts temperature");
    assert!((temperature.value - 375.0).abs() < 1e-9);
    assert_eq!(temperature.display_value, 375.0);
    assert!((converted.time.value - 20.0).abs() < 1e-9);
    assert_eq!(converted.time.display_value, 20.0);
}

#[test]
fn reverse_undoes_forward() {
    let converter = RatioConverter::air_fryer();
    for (fahrenheit, minutes) in [(400.0, 25.0), (350.0, 45.0), (425.0, 13.0), (300.0, 0.0)] {
        let forward = converter
            .convert(&query(fahrenheit, minutes, Direction::Forward))
            .unwrap();
        let back = converter
            .convert(&query(
                forward.temperature.unwrap().value,
                forward.time.value,
                Direction::Reverse,
            ))
            .unwrap();
        assert!((back.temperature.unwrap().value - fahrenheit).abs() < 1e-9);
        assert!((back.time.value - minutes).abs() < 1e-9);
    }
}

#[test]
fn convection_uses_its_own_ratio() {
    let converted = RatioConverter::convection()
        .convert(&query(350.0, 60.0, Direction::Forward))
        .unwrap();
    assert_eq!(converted.temperature.unwrap().display_value, 325.0);
    assert!((converted.time.value - 51.0).abs() < 1e-9);
}

#[test]
fn microwave_ignores_temperature() {
    let converted = RatioConverter::microwave()
        .convert(&RatioQuery {
            temperature: None,
            time_minutes: 20.0,
            direction: Direction::Forward,
            display: TemperatureDisplay::Whole,
        })
        .unwrap();
    assert!(converted.temperature.is_none());
    assert_eq!(converted.time.display_value, 5.0);
    assert_eq!(*RatioConverter::microwave().rule(), ConversionRule::MICROWAVE);
}

#[test]
fn celsius_inputs_use_a_celsius_offset() {
    let converted = RatioConverter::air_fryer()
        .convert(&RatioQuery {
            temperature: Some(Temperature::celsius(200.0).unwrap()),
            time_minutes: 30.0,
            direction: Direction::Forward,
            display: TemperatureDisplay::Practical,
        })
        .unwrap();
    let temperature = converted.temperature.unwrap();
    assert!((temperature.value - (200.0 - 25.0 * 5.0 / 9.0)).abs() < 1e-9);
    assert_eq!(temperature.display_value, 185.0);
    assert_eq!(temperature.unit, TemperatureUnit::Celsius.as_unit());
}

#[test]
fn practical_display_snaps_to_five_degrees() {
    let mut practical = query(387.0, 10.0, Direction::Forward);
    practical.display = TemperatureDisplay::Practical;
    let converted = RatioConverter::air_fryer().convert(&practical).unwrap();
    let temperature = converted.temperature.unwrap();
    assert_eq!(temperature.value, 362.0);
    assert_eq!(temperature.display_value, 360.0);
    assert!(temperature.rounding_applied);
}

#[test]
fn display_time_rounds_half_up() {
    let converter = RatioConverter::air_fryer();
    let up = converter.convert(&query(350.0, 37.0, Direction::Forward)).unwrap();
    assert_eq!(up.time.display_value, 30.0);
    let down = converter.convert(&query(350.0, 33.0, Direction::Forward)).unwrap();
    assert_eq!(down.time.display_value, 26.0);
    let half = converter.convert(&query(350.0, 3.125, Direction::Forward)).unwrap();
    assert_eq!(half.time.display_value, 3.0);
}

#[test]
fn offset_rules_require_a_temperature() {
    let err = RatioConverter::air_fryer()
        .convert(&RatioQuery {
            temperature: None,
            time_minutes: 10.0,
            direction: Direction::Forward,
            display: TemperatureDisplay::Whole,
        })
        .unwrap_err();
    assert!(matches!(err, CalcError::Validation { field: "temperature", .. }));
}

#[test]
fn negative_time_and_impossible_temperatures_are_rejected() {
    let err = RatioConverter::air_fryer()
        .convert(&query(350.0, -1.0, Direction::Forward))
        .unwrap_err();
    assert!(matches!(err, CalcError::Validation { field: "time_minutes", .. }));

    let frozen = RatioQuery {
        temperature: Some(Temperature {
            value: -500.0,
            unit: TemperatureUnit::Fahrenheit,
        }),
        time_minutes: 10.0,
        direction: Direction::Forward,
        display: TemperatureDisplay::Whole,
    };
    let err = RatioConverter::air_fryer().convert(&frozen).unwrap_err();
    assert!(matches!(err, CalcError::Validation { field: "temperature", .. }));

    assert!(Temperature::celsius(-300.0).is_err());
}
