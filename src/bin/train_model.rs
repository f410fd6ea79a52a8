use clap::Parser;
use silverline::application::ml::trainer::{PriceColumn, Trainer, TrainerConfig, load_training_set};
use silverline::infrastructure::persistence::ModelStore;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fit the silver price model from LBMA history", long_about = None)]
struct Args {
    /// Path to the LBMA CSV export (columns: Date, USD, GBP, EURO)
    #[arg(long, default_value = "LBMA-SILVER.csv")]
    input: PathBuf,

    /// Path to output model file
    #[arg(long, default_value = "LBMA-SILVER-model.json")]
    output: PathBuf,

    /// Price column to fit. The server labels prices as USD/Oz, so only `usd` matches it.
    #[arg(long, value_enum, default_value_t = PriceColumn::Usd)]
    target: PriceColumn,

    /// Fraction of rows held out for evaluation
    #[arg(long, default_value_t = 0.3)]
    test_size: f64,

    /// Seed for the hold-out shuffle
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Disable train/test split (train on 100% of data). Use after validation.
    #[arg(long)]
    no_split: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .init();

    println!("Loading training data from {:?} (target: {:?})", args.input, args.target);
    let set = load_training_set(&args.input, args.target)?;
    if set.is_empty() {
        return Err(format!("No labeled rows found in {:?}", args.input).into());
    }
    println!("Loaded {} labeled rows", set.len());

    let config = TrainerConfig {
        test_size: if args.no_split { 0.0 } else { args.test_size },
        seed: args.seed,
    };
    let (model, report) = Trainer::new(config).run(&set)?;

    println!(
        "Trained on {} rows, evaluated on {} rows",
        report.train_rows, report.test_rows
    );
    if let Some(mape) = report.mape {
        println!("MAPE : {:.2}", mape);
    }

    println!("Saving model to {:?}", args.output);
    ModelStore::new(&args.output).save(&model)?;

    println!("Done. Model saved successfully.");
    Ok(())
}
