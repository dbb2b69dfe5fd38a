use std::io::stderr;

use clap::{Parser, crate_version};
use heat_pump_calculator::{
    cli::{Args, CalculateArgs, Command, Format},
    core::calculator::Calculator,
    narrative::{Narrative, NarrativeRequest, Snapshot},
    prelude::*,
    reference::Reference,
    report::Report,
    tables::build_products_table,
};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(stderr).init();
    info!(version = crate_version!(), "starting…");

    match Args::parse().command {
        Command::Calculate(args) => calculate(&args),
        Command::Products(args) => {
            println!("{}", build_products_table(&args.load()?, None));
            Ok(())
        }
        Command::Reference => {
            print!("{}", toml::to_string_pretty(&Reference::default())?);
            Ok(())
        }
    }
}

fn calculate(args: &CalculateArgs) -> Result {
    let reference = args.reference.load()?;
    let catalog = args.catalog.load()?;
    let profile = args.profile(&reference)?;
    let narrator = args.narrative.api()?;

    let results = Calculator::try_new(&reference)?.calculate(&profile)?;
    let recommendation = catalog.select(results.heat_pump_power);
    if let Some(product) = recommendation {
        info!(id = %product.id, power = ?product.power, "recommended");
    }

    let narrative = match narrator {
        Some(narrator) => {
            let snapshot = Snapshot::new(&profile, &results);
            let request = NarrativeRequest::builder()
                .snapshot(&snapshot)
                .catalog(&catalog)
                .maybe_recommendation(recommendation)
                .language(args.narrative.language)
                .build();
            Narrative::request(&narrator, &request)
        }
        None => Narrative::Disabled,
    };

    let report = Report { profile: &profile, results: &results, recommendation, narrative };
    match args.format {
        Format::Table => println!("{}", report.to_terminal(&reference, &catalog)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
