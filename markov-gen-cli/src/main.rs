use std::path::PathBuf;

use clap::Parser;
use markov_gen_core::model::{LanguageModel, Seed, DEFAULT_SEED};

/// Learns a character Markov model from a corpus and prints generated text.
#[derive(Parser, Debug)]
#[command(name = "markov-gen", version)]
struct Cli {
    /// Number of characters in a window (>= 1)
    window_length: usize,

    /// Text to start from; its last `window_length` characters seed generation
    initial_text: String,

    /// Maximum number of characters to generate
    text_length: usize,

    /// "random" for a different text on every run, anything else for a reproducible one
    mode: GenerationMode,

    /// Corpus file to train on
    corpus: PathBuf,

    /// Print the trained model to stderr before generating
    #[arg(long)]
    dump: bool,
}

/// Maps the mode argument to a seeding strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
enum GenerationMode {
    Random,
    Reproducible,
}

impl std::str::FromStr for GenerationMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "random" { GenerationMode::Random } else { GenerationMode::Reproducible })
    }
}

impl GenerationMode {
    fn seed(self) -> Seed {
        match self {
            GenerationMode::Random => Seed::Entropy,
            GenerationMode::Reproducible => Seed::Fixed(DEFAULT_SEED),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Bad numbers are rejected here, before any model exists
    let cli = Cli::parse();

    let mut model = LanguageModel::new(cli.window_length, cli.mode.seed())?;

    // Missing or unreadable corpus aborts the run
    model.train_file(&cli.corpus)?;
    log::info!("trained {} windows from {}", model.len(), cli.corpus.display());

    if cli.dump {
        eprint!("{model}");
    }

    println!("{}", model.generate(&cli.initial_text, cli.text_length)?);

    Ok(())
}
