// crates/kitchencalc/src/main.rs

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use kitchencalc_core::lookup::TableName;
use kitchencalc_core::{CalculationRequest, Engine, EngineConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
use commands::calculate::{
    self, AirFryerFoodArgs, CakeArgs, DonenessArgs, GasMarkArgs, MeasureArgs, MeatArgs,
    PanScaleArgs, RatioArgs, TempArgs, WattageArgs,
};
use commands::tables;

/// Kitchen conversions, cooking times and reference charts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Engine configuration file (falls back to $KITCHENCALC_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an oven recipe for an air fryer
    AirFryer(RatioArgs),
    /// Convert between conventional and convection ovens
    Convection(RatioArgs),
    /// Convert an oven time for the microwave
    Microwave(RatioArgs),
    /// Rescale a microwave time between wattages
    Wattage(WattageArgs),
    /// Convert between Fahrenheit, Celsius and gas mark
    Temp(TempArgs),
    /// Show the gas mark for an oven temperature
    GasMark(GasMarkArgs),
    /// Convert cups, spoons, millilitres, grams and ounces
    Measure(MeasureArgs),
    /// Roasting time and temperature for a cut of meat
    Meat(MeatArgs),
    /// Pull and final internal temperatures for a doneness level
    Doneness(DonenessArgs),
    /// Air fryer settings for a common food
    AirFryerFood(AirFryerFoodArgs),
    /// Servings and bake settings for a cake pan
    Cake(CakeArgs),
    /// Recipe multiplier for moving between pan sizes
    PanScale(PanScaleArgs),
    /// Print the reference tables
    Tables(TablesArgs),
    /// List the available converters
    Converters,
    /// Run the HTTP API
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
struct TablesArgs {
    /// One of meat, doneness, air-fryer, cake-pans (all when omitted)
    name: Option<TableName>,
}

#[derive(Args, Debug)]
struct ServeArgs {
    /// Listen address (falls back to $KITCHENCALC_BIND, then 0.0.0.0:3000)
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = EngineConfig::resolve(cli.config.as_deref())
        .context("failed to load engine configuration")?;
    let engine = Engine::new(config).context("invalid engine configuration")?;

    let request = match cli.command {
        Command::AirFryer(args) => CalculationRequest::AirFryer(args.query()),
        Command::Convection(args) => CalculationRequest::Convection(args.query()),
        Command::Microwave(args) => CalculationRequest::Microwave(args.query()),
        Command::Wattage(args) => CalculationRequest::Wattage(args.query()),
        Command::Temp(args) => CalculationRequest::Temperature(args.query()),
        Command::GasMark(args) => CalculationRequest::Temperature(args.query()),
        Command::Measure(args) => CalculationRequest::Measure(args.query()),
        Command::Meat(args) => CalculationRequest::Meat(args.query()),
        Command::Doneness(args) => CalculationRequest::Doneness(args.query()),
        Command::AirFryerFood(args) => CalculationRequest::AirFryerFood(args.query()),
        Command::PanScale(args) => CalculationRequest::PanScale(args.query()),
        Command::Cake(args) => return calculate::cake(&engine, &args, cli.json),
        Command::Tables(args) => return tables::print_tables(args.name, cli.json),
        Command::Converters => return tables::print_converters(cli.json),
        Command::Serve(args) => {
            let addr = kitchencalc_api::bind_address(args.bind)?;
            info!(%addr, "starting HTTP API");
            return kitchencalc_api::serve(addr, engine).await;
        }
    };

    calculate::run(&engine, &request, cli.json)
}
