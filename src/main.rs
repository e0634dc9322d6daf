//! Latam Genderize CLI
//!
//! Predicts the gender of names in a CSV file using a character-level classifier.

use clap::{Parser, Subcommand};
use latam_genderize::{Config, Result};

#[derive(Parser)]
#[command(name = "genderize")]
#[command(about = "Gender prediction for Latin-American names", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict gender for every row of a CSV file
    Predict {
        /// Input CSV file with a header row
        #[arg(short, long)]
        input: String,
        /// Write the decorated table here instead of stdout
        #[arg(short, long)]
        output: Option<String>,
        /// Column holding the names (auto-detected when omitted)
        #[arg(long)]
        column: Option<String>,
        /// Model path without extension (overrides config)
        #[arg(long)]
        model: Option<String>,
        /// Output format
        #[arg(long, default_value = "table")]
        format: OutputFormat,
    },
    /// Show how a name is normalized and encoded
    Encode {
        /// Name to encode
        name: String,
    },
    /// Model management commands
    Model {
        #[command(subcommand)]
        action: ModelCommands,
    },
    /// Write a default config file
    Init,
}

#[derive(Subcommand)]
enum ModelCommands {
    /// Show model architecture
    Info {
        /// Model path without extension (overrides config)
        #[arg(long)]
        model: Option<String>,
    },
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(format!("Unknown format: {}. Use table, json, or csv.", s)),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load or create config
    let config = if std::path::Path::new(&cli.config).exists() {
        match Config::load(&cli.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        Config::default()
    };

    let result = match cli.command {
        Commands::Predict {
            input,
            output,
            column,
            model,
            format,
        } => commands::predict(&config, &input, output, column, model, format),
        Commands::Encode { name } => commands::encode(&config, &name),
        Commands::Model { action } => match action {
            ModelCommands::Info { model } => commands::model_info(&config, model),
        },
        Commands::Init => commands::init(&cli.config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

mod commands {
    use super::*;
    use latam_genderize::data::csv::{read_csv, write_csv, write_csv_file};
    use latam_genderize::features::Encoder;
    use latam_genderize::model::BurnGenderModel;
    use latam_genderize::predict::PredictionSummary;
    use latam_genderize::{GenderizeError, LatamGenderize, Table};

    #[cfg(not(feature = "wgpu"))]
    type MyBackend = burn::backend::NdArray<f32>;
    #[cfg(feature = "wgpu")]
    type MyBackend = burn::backend::Wgpu<f32, i32>;

    pub fn init(config_path: &str) -> Result<()> {
        let config = Config::default();
        config.save(config_path)?;
        println!("Created default config at {}", config_path);

        println!("\nNext steps:");
        println!("  1. Edit {} to point [model] path at your model", config_path);
        println!("  2. Run 'genderize predict --input names.csv'");
        Ok(())
    }

    pub fn predict(
        config: &Config,
        input: &str,
        output: Option<String>,
        column: Option<String>,
        model: Option<String>,
        format: OutputFormat,
    ) -> Result<()> {
        let mut config = config.clone();
        if model.is_some() {
            config.model.path = model;
        }

        let device = Default::default();
        let genderizer = LatamGenderize::<BurnGenderModel<MyBackend>>::from_config(&config, &device)?;

        let table = read_csv(input)?;
        log::info!(
            "Read {} rows x {} columns from {}",
            table.num_rows(),
            table.num_columns(),
            input
        );

        let (result, predictions) = genderizer.genderize_detailed(&table, column.as_deref())?;

        match output {
            Some(path) => {
                write_csv_file(&result, &path)?;
                println!("Wrote {} rows to {}", result.num_rows(), path);
            }
            None => match format {
                OutputFormat::Table => print!("{}", format_table(&result)),
                OutputFormat::Json => {
                    let json = serde_json::to_string_pretty(&table_to_json(&result))
                        .map_err(|e| GenderizeError::Parse(e.to_string()))?;
                    println!("{}", json);
                }
                OutputFormat::Csv => write_csv(&result, std::io::stdout().lock())?,
            },
        }

        eprintln!("\n{}", PredictionSummary::from_predictions(&predictions));
        Ok(())
    }

    pub fn encode(config: &Config, name: &str) -> Result<()> {
        let encoder = Encoder::from_config(&config.encoder)?;
        let codes = encoder.encode(name);

        println!("Input:      {:?}", name);
        println!("Normalized: {:?}", encoder.normalize(name));
        println!("Length:     {}", codes.len());
        println!("Decoded:    {:?}", encoder.decode(&codes));
        let unknown = encoder.unknown_chars(name);
        if !unknown.is_empty() {
            println!("Unknown:    {:?} (encoded as 0)", unknown);
        }
        let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        println!("Codes:      [{}]", codes.join(", "));
        Ok(())
    }

    pub fn model_info(config: &Config, model: Option<String>) -> Result<()> {
        let mut config = config.clone();
        if model.is_some() {
            config.model.path = model;
        }
        let path = config.model.resolved_path();
        let device = Default::default();
        let handle = BurnGenderModel::<MyBackend>::load(&path, &device)?;
        let arch = handle.config();

        println!("Model Information");
        println!("───────────────────────────────");
        println!("  Path:         {}", path.display());
        println!("  Vocab size:   {}", arch.vocab_size);
        println!("  Input length: {}", arch.max_len);
        println!("  Embedding:    {}", arch.embed_dim);
        println!("  LSTM hidden:  {} (bidirectional)", arch.hidden_size);

        if arch.max_len != config.encoder.max_len {
            println!(
                "\n  Warning: encoder.max_len is {} but the model expects {}",
                config.encoder.max_len, arch.max_len
            );
        }
        Ok(())
    }

    fn table_to_json(table: &Table) -> Vec<serde_json::Map<String, serde_json::Value>> {
        (0..table.num_rows())
            .filter_map(|i| table.row(i))
            .map(|row| {
                table
                    .column_names()
                    .into_iter()
                    .zip(row)
                    .map(|(name, cell)| {
                        (name, serde_json::to_value(cell).unwrap_or(serde_json::Value::Null))
                    })
                    .collect()
            })
            .collect()
    }

    fn format_table(table: &Table) -> String {
        let names = table.column_names();
        let mut widths: Vec<usize> = names.iter().map(|n| n.chars().count()).collect();
        let rows: Vec<Vec<String>> = (0..table.num_rows())
            .filter_map(|i| table.row(i))
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let render = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:<width$}", c, width = w))
                .collect::<Vec<_>>()
                .join("  ")
        };

        let mut out = String::new();
        out.push_str(render(names.as_slice()).trim_end());
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
        out.push_str(&rule.join("  "));
        out.push('\n');
        for row in &rows {
            out.push_str(render(row.as_slice()).trim_end());
            out.push('\n');
        }
        out
    }
}
