// crates/kitchencalc/src/commands/tables.rs

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use kitchencalc_core::lookup::air_fryer::air_fryer_food_table;
use kitchencalc_core::lookup::cake_pan::cake_pan_table;
use kitchencalc_core::lookup::doneness::doneness_table;
use kitchencalc_core::lookup::meat::{meat_table, TimeBasis};
use kitchencalc_core::lookup::TableName;
use kitchencalc_core::all_converter_descriptors;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn optional(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn meat() -> Table {
    let mut table = new_table(vec![
        "Protein", "Cut", "Bone", "Weight (lb)", "Oven °F", "Minutes", "Target °F", "Rest",
    ]);
    for profile in meat_table().profiles() {
        let mut bone = if profile.key.bone_in { "bone-in" } else { "boneless" }.to_string();
        if profile.default_style {
            bone.push_str(" (default)");
        }
        let basis = match profile.basis {
            TimeBasis::PerPound => "per lb",
            TimeBasis::PerBracket => "total",
        };
        for row in &profile.rows {
            table.add_row(vec![
                profile.key.protein.to_string(),
                profile.key.cut.clone(),
                bone.clone(),
                row.key.weight_lb.to_string(),
                row.temperature_f.to_string(),
                format!("{} {basis}", row.time),
                optional(row.target_internal_f),
                format!("{} min", profile.rest_minutes),
            ]);
        }
    }
    table
}

fn doneness() -> Table {
    let mut table = new_table(vec!["Protein", "Doneness", "Pull °F", "Final °F", "Safe minimum"]);
    for entry in doneness_table().rows() {
        table.add_row(vec![
            entry.key.protein.to_string(),
            entry.key.doneness.to_string(),
            entry.pull_f.to_string(),
            entry.final_f.to_string(),
            if entry.food_safety_minimum { "yes" } else { "no" }.to_string(),
        ]);
    }
    table
}

fn air_fryer() -> Table {
    let mut table = new_table(vec!["Food", "Form", "°F", "Minutes", "Notes"]);
    for entry in air_fryer_food_table().entries() {
        table.add_row(vec![
            entry.key.food.clone(),
            entry.key.form.to_string(),
            entry.temperature_f.to_string(),
            entry.time.to_string(),
            optional(entry.notes),
        ]);
    }
    table
}

fn cake_pans() -> Table {
    let mut table = new_table(vec![
        "Pan", "Party", "Wedding", "Batter (cups)", "Bake °F", "Minutes",
    ]);
    for entry in cake_pan_table().rows() {
        table.add_row(vec![
            entry.pan.label(),
            entry.party_servings.to_string(),
            entry.wedding_servings.to_string(),
            entry.batter_cups.to_string(),
            entry.bake.temperature_f.to_string(),
            entry.bake.time.to_string(),
        ]);
    }
    table
}

fn to_json(name: TableName) -> serde_json::Result<String> {
    match name {
        TableName::Meat => serde_json::to_string_pretty(meat_table().profiles()),
        TableName::Doneness => serde_json::to_string_pretty(doneness_table().rows()),
        TableName::AirFryer => serde_json::to_string_pretty(air_fryer_food_table().entries()),
        TableName::CakePans => serde_json::to_string_pretty(cake_pan_table().rows()),
    }
}

pub fn print_tables(name: Option<TableName>, as_json: bool) -> Result<()> {
    let names = name.map_or_else(|| TableName::ALL.to_vec(), |name| vec![name]);
    for name in names {
        if as_json {
            println!("{}", to_json(name)?);
            continue;
        }
        let table = match name {
            TableName::Meat => meat(),
            TableName::Doneness => doneness(),
            TableName::AirFryer => air_fryer(),
            TableName::CakePans => cake_pans(),
        };
        println!("{name}\n{table}\n");
    }
    Ok(())
}

pub fn print_converters(as_json: bool) -> Result<()> {
    let descriptors = all_converter_descriptors();
    if as_json {
        println!("{}", serde_json::to_string_pretty(descriptors)?);
        return Ok(());
    }
    let mut table = new_table(vec!["Code", "Family", "Description"]);
    for descriptor in descriptors {
        table.add_row(vec![
            descriptor.code.to_string(),
            format!("{:?}", descriptor.family),
            descriptor.description.to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}
