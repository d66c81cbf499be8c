//! triple-norm CLI: normalize dialogue triples.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use triple_norm::config::NormalizerConfig;
use triple_norm::dialogue::{DialogueContext, UtteranceContext};
use triple_norm::normalize::{BatchItem, TripleNormalizer};
use triple_norm::triple::{PartialPerspective, RawTriple};
use triple_norm::TripleNormResult;

/// Config file used when `--config` is not given and the file exists.
const DEFAULT_CONFIG_PATH: &str = "triple-norm.toml";

#[derive(Parser)]
#[command(name = "triple-norm", version, about = "Rule-based dialogue triple normalizer")]
struct Cli {
    /// Normalizer config file (TOML).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Lexicon file (TOML) replacing the bundled English lexicon.
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize a single triple and print it as JSON.
    Normalize {
        /// Who uttered the sentence.
        #[arg(long)]
        speaker: String,

        /// The human participant.
        #[arg(long)]
        human: String,

        /// The agent participant.
        #[arg(long)]
        agent: String,

        /// Treat the utterance as a question.
        #[arg(long)]
        question: bool,

        /// Dialogue-act tag carried through to the output.
        #[arg(long)]
        dialogue_act: Option<String>,

        #[arg(long, default_value = "")]
        subject: String,

        #[arg(long, default_value = "")]
        predicate: String,

        #[arg(long, default_value = "")]
        object: String,

        /// Upstream sentiment in [-1, 1].
        #[arg(long, allow_hyphen_values = true)]
        sentiment: Option<f32>,

        /// Upstream certainty in [0, 1].
        #[arg(long)]
        certainty: Option<f32>,

        /// Upstream polarity (-1 or 1).
        #[arg(long, allow_hyphen_values = true)]
        polarity: Option<f32>,

        /// Upstream emotion in [-1, 1].
        #[arg(long, allow_hyphen_values = true)]
        emotion: Option<f32>,
    },

    /// Normalize a JSON array of `{context, triple}` items.
    Batch {
        /// Path to the JSON file.
        #[arg(long)]
        file: PathBuf,
    },

    /// Show the lexicon entry for a word.
    Lookup {
        /// Word or hyphen-joined collocation.
        word: String,
    },

    /// Manage the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default config.
    Init {
        /// Destination path.
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config {
            action: ConfigAction::Init { path },
        } => {
            NormalizerConfig::default().save(&path)?;
            println!("Wrote default config to {}", path.display());
        }

        Commands::Normalize {
            speaker,
            human,
            agent,
            question,
            dialogue_act,
            subject,
            predicate,
            object,
            sentiment,
            certainty,
            polarity,
            emotion,
        } => {
            let dialogue = DialogueContext::new(speaker, human, agent)?;
            let mut context = if question {
                UtteranceContext::question(dialogue)
            } else {
                UtteranceContext::statement(dialogue)
            };
            context.dialogue_act = dialogue_act;

            let mut raw = RawTriple::new(subject, predicate, object);
            let upstream = PartialPerspective {
                sentiment,
                certainty,
                polarity,
                emotion,
            };
            if upstream != PartialPerspective::default() {
                raw = raw.with_perspective(upstream);
            }

            let normalizer = build_normalizer(cli.config.as_deref(), cli.lexicon.as_deref())?;
            let result = normalizer.normalize(&context, raw)?;
            let json = serde_json::to_string_pretty(&result).into_diagnostic()?;
            println!("{json}");
        }

        Commands::Batch { file } => {
            let content = std::fs::read_to_string(&file).into_diagnostic()?;
            let items: Vec<BatchItem> = serde_json::from_str(&content).into_diagnostic()?;
            let normalizer = build_normalizer(cli.config.as_deref(), cli.lexicon.as_deref())?;

            let mut output = Vec::with_capacity(items.len());
            for (i, result) in normalizer.normalize_batch(items).into_iter().enumerate() {
                match result {
                    Ok(triple) => output.push(serde_json::to_value(triple).into_diagnostic()?),
                    Err(e) => {
                        tracing::warn!(item = i, error = %e, "item failed");
                        output.push(serde_json::json!({ "error": e.to_string() }));
                    }
                }
            }
            let json = serde_json::to_string_pretty(&output).into_diagnostic()?;
            println!("{json}");
        }

        Commands::Lookup { word } => {
            let normalizer = build_normalizer(cli.config.as_deref(), cli.lexicon.as_deref())?;
            let lexicon = normalizer.lexicon();
            let key = word.trim().to_lowercase().replace(char::is_whitespace, "-");
            match lexicon.lookup(&key) {
                Some(entry) => {
                    let json = serde_json::to_string_pretty(entry).into_diagnostic()?;
                    println!("{json}");
                }
                None => {
                    let lemma = lexicon.lemmatize(&key, None);
                    match lexicon.lookup(&lemma) {
                        Some(entry) if lemma != key => {
                            println!("\"{key}\" is not in the lexicon; lemma \"{lemma}\":");
                            let json = serde_json::to_string_pretty(entry).into_diagnostic()?;
                            println!("{json}");
                        }
                        _ => println!("\"{key}\" is not in the lexicon."),
                    }
                }
            }
        }
    }

    Ok(())
}

/// Load the config (`--config`, else `triple-norm.toml` when present, else
/// defaults), let `--lexicon` override its lexicon path, and build the
/// normalizer.
fn build_normalizer(config_path: Option<&Path>, lexicon_path: Option<&Path>) -> TripleNormResult<TripleNormalizer> {
    let mut config = match config_path {
        Some(path) => NormalizerConfig::load(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_PATH);
            if default_path.exists() {
                NormalizerConfig::load(default_path)?
            } else {
                NormalizerConfig::default()
            }
        }
    };
    if let Some(path) = lexicon_path {
        config.lexicon_path = Some(path.to_path_buf());
    }
    tracing::debug!(?config, "configuration loaded");
    Ok(TripleNormalizer::from_config(config)?)
}
