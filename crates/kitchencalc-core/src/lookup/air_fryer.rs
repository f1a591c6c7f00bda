//! Air fryer settings for common foods, keyed by food and form (fresh or
//! frozen). Each food names the form used when the caller does not say.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::converter::Converter;
use crate::error::{CalcError, Result};
use crate::lookup::{normalize_key, suggest, LookupEntry, LookupTable};
use crate::quantity::{CalculationResult, TemperatureUnit, TimeRange};
use crate::temperature::table_temperature;

pub const TABLE_NAME: &str = "air_fryer_food";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodForm {
    Fresh,
    Frozen,
}

impl fmt::Display for FoodForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoodForm::Fresh => f.write_str("fresh"),
            FoodForm::Frozen => f.write_str("frozen"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FoodKey {
    pub food: String,
    pub form: FoodForm,
}

impl fmt::Display for FoodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.food, self.form)
    }
}

// (food, form, default form for the food, °F, min minutes, max minutes, flip/shake note)
type FoodRow = (&'static str, FoodForm, bool, f64, f64, f64, Option<&'static str>);

const FOODS: &[FoodRow] = &[
    ("french_fries", FoodForm::Frozen, true, 400.0, 15.0, 20.0, Some("shake halfway")),
    ("french_fries", FoodForm::Fresh, false, 380.0, 18.0, 25.0, Some("soak and dry first; shake twice")),
    ("chicken_wings", FoodForm::Fresh, true, 380.0, 22.0, 26.0, Some("flip halfway")),
    ("chicken_wings", FoodForm::Frozen, false, 400.0, 25.0, 30.0, Some("flip halfway")),
    ("chicken_breast", FoodForm::Fresh, true, 375.0, 18.0, 22.0, Some("flip halfway")),
    ("chicken_thighs", FoodForm::Fresh, true, 380.0, 22.0, 25.0, None),
    ("chicken_nuggets", FoodForm::Frozen, true, 400.0, 10.0, 12.0, Some("shake halfway")),
    ("salmon", FoodForm::Fresh, true, 400.0, 8.0, 12.0, None),
    ("salmon", FoodForm::Frozen, false, 390.0, 12.0, 15.0, None),
    ("shrimp", FoodForm::Fresh, true, 400.0, 6.0, 8.0, None),
    ("shrimp", FoodForm::Frozen, false, 400.0, 9.0, 12.0, Some("shake halfway")),
    ("fish_sticks", FoodForm::Frozen, true, 400.0, 8.0, 10.0, Some("flip halfway")),
    ("mozzarella_sticks", FoodForm::Frozen, true, 390.0, 6.0, 8.0, None),
    ("pork_chops", FoodForm::Fresh, true, 400.0, 12.0, 15.0, Some("flip halfway")),
    ("bacon", FoodForm::Fresh, true, 350.0, 8.0, 12.0, None),
    ("potato_wedges", FoodForm::Fresh, true, 400.0, 18.0, 22.0, Some("shake halfway")),
    ("brussels_sprouts", FoodForm::Fresh, true, 375.0, 15.0, 18.0, Some("shake halfway")),
    ("broccoli", FoodForm::Fresh, true, 375.0, 8.0, 10.0, None),
];

#[derive(Debug)]
pub struct AirFryerFoodTable {
    entries: LookupTable<FoodKey, LookupEntry<FoodKey>>,
    default_form: HashMap<String, FoodForm>,
}

impl AirFryerFoodTable {
    fn build(rows: &[FoodRow]) -> Result<Self> {
        let mut entries = Vec::with_capacity(rows.len());
        let mut default_form = HashMap::new();

        for &(food, form, is_default, temperature_f, min, max, notes) in rows {
            let key = FoodKey {
                food: food.to_string(),
                form,
            };
            if is_default && default_form.insert(food.to_string(), form).is_some() {
                return Err(CalcError::Config(format!(
                    "{TABLE_NAME}: {food} has more than one default form"
                )));
            }
            entries.push(LookupEntry {
                key,
                temperature_f,
                time: TimeRange::new(min, max)?,
                target_internal_f: None,
                notes,
            });
        }

        if let Some(entry) = entries
            .iter()
            .find(|entry| !default_form.contains_key(&entry.key.food))
        {
            return Err(CalcError::Config(format!(
                "{TABLE_NAME}: {} has no default form",
                entry.key.food
            )));
        }

        Ok(Self {
            entries: LookupTable::new(TABLE_NAME, entries, |entry| entry.key.clone())?,
            default_form,
        })
    }

    pub fn entries(&self) -> &[LookupEntry<FoodKey>] {
        self.entries.rows()
    }

    pub fn foods(&self) -> Vec<String> {
        let mut foods: Vec<String> = self.default_form.keys().cloned().collect();
        foods.sort();
        foods
    }

    pub fn resolve(&self, food: &str, form: Option<FoodForm>) -> Result<(&LookupEntry<FoodKey>, bool)> {
        let food = normalize_key(food);
        let (form, defaulted) = match form {
            Some(form) => (form, false),
            None => match self.default_form.get(&food) {
                Some(&form) => (form, true),
                None => {
                    return Err(CalcError::not_found(
                        TABLE_NAME,
                        food.clone(),
                        suggest(&food, self.foods()),
                    ))
                }
            },
        };
        Ok((self.entries.get(&FoodKey { food, form })?, defaulted))
    }
}

static AIR_FRYER_FOODS: Lazy<AirFryerFoodTable> = Lazy::new(|| {
    AirFryerFoodTable::build(FOODS).expect("built-in air fryer table should be consistent")
});

pub fn air_fryer_food_table() -> &'static AirFryerFoodTable {
    &AIR_FRYER_FOODS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirFryerFoodQuery {
    pub food: String,
    #[serde(default)]
    pub form: Option<FoodForm>,
    #[serde(default)]
    pub unit: TemperatureUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirFryerFoodSetting {
    pub key: FoodKey,
    pub form_defaulted: bool,
    pub temperature: CalculationResult,
    pub time_minutes: TimeRange,
    pub notes: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AirFryerFoodConverter;

impl Converter for AirFryerFoodConverter {
    type Input = AirFryerFoodQuery;
    type Output = AirFryerFoodSetting;

    fn code(&self) -> &'static str {
        "air_fryer_food"
    }

    fn convert(&self, query: &AirFryerFoodQuery) -> Result<AirFryerFoodSetting> {
        let (entry, form_defaulted) = air_fryer_food_table().resolve(&query.food, query.form)?;
        Ok(AirFryerFoodSetting {
            key: entry.key.clone(),
            form_defaulted,
            temperature: table_temperature(entry.temperature_f, query.unit),
            time_minutes: entry.time,
            notes: entry.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_default_forms_are_rejected() {
        let rows: &[FoodRow] = &[
            ("tots", FoodForm::Fresh, true, 400.0, 10.0, 12.0, None),
            ("tots", FoodForm::Frozen, true, 400.0, 12.0, 15.0, None),
        ];
        let result = AirFryerFoodTable::build(rows);
        assert!(matches!(result, Err(CalcError::Config(ref message)) if message.contains("more than one")));
    }

    #[test]
    fn missing_default_form_is_rejected() {
        let rows: &[FoodRow] = &[
            ("tots", FoodForm::Fresh, false, 400.0, 10.0, 12.0, None),
            ("tots", FoodForm::Frozen, false, 400.0, 12.0, 15.0, None),
        ];
        let result = AirFryerFoodTable::build(rows);
        assert!(matches!(result, Err(CalcError::Config(ref message)) if message.contains("no default")));
    }

    #[test]
    fn repeated_food_and_form_is_rejected() {
        let rows: &[FoodRow] = &[
            ("tots", FoodForm::Frozen, true, 400.0, 12.0, 15.0, None),
            ("tots", FoodForm::Frozen, false, 380.0, 14.0, 16.0, None),
        ];
        assert!(matches!(AirFryerFoodTable::build(rows), Err(CalcError::Config(_))));
    }

    #[test]
    fn single_default_form_resolves() {
        let rows: &[FoodRow] = &[
            ("tots", FoodForm::Fresh, false, 400.0, 10.0, 12.0, None),
            ("tots", FoodForm::Frozen, true, 400.0, 12.0, 15.0, None),
        ];
        let table = AirFryerFoodTable::build(rows).unwrap();
        let (entry, defaulted) = table.resolve("Tots", None).unwrap();
        assert_eq!(entry.key.form, FoodForm::Frozen);
        assert!(defaulted);
    }
}
