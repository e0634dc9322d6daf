//! Predict gender for a small in-memory table
//! Run with: cargo run --example basic_usage -- [MODEL_PATH]

use latam_genderize::model::BurnGenderModel;
use latam_genderize::predict::PredictionSummary;
use latam_genderize::{LatamGenderize, Table};
use std::path::PathBuf;

type Backend = burn::backend::NdArray<f32>;

fn main() -> latam_genderize::Result<()> {
    let table = Table::new()
        .with_column(
            "name",
            [
                "Juan Carlos",
                "María José",
                "Carlos Alberto",
                "Ana Sofía",
                "Luis Fernando",
                "Carmen Elena",
                "Roberto Carlos",
                "Isabella María",
            ],
        )?
        .with_column("age", [25, 30, 35, 28, 42, 29, 38, 26])?
        .with_column(
            "city",
            [
                "Bogotá",
                "Medellín",
                "Cali",
                "Barranquilla",
                "Cartagena",
                "Bucaramanga",
                "Pereira",
                "Manizales",
            ],
        )?;

    // Packaged default model unless a path is given
    let model_path = std::env::args().nth(1).map(PathBuf::from);
    let device = Default::default();
    let genderizer =
        LatamGenderize::<BurnGenderModel<Backend>>::load(model_path.as_deref(), &device)?;

    let (result, predictions) = genderizer.genderize_detailed(&table, None)?;

    let names = result.column("name").map(|c| c.texts()).unwrap_or_default();
    for (name, pred) in names.iter().zip(&predictions) {
        println!("{:<16} {}  {:.2}", name, pred.gender, pred.confidence);
    }

    println!("\n{}", PredictionSummary::from_predictions(&predictions));

    let high: Vec<&String> = names
        .iter()
        .zip(&predictions)
        .filter(|(_, p)| p.confidence >= 0.8)
        .map(|(n, _)| n)
        .collect();
    println!("\nHigh confidence names: {:?}", high);

    Ok(())
}
