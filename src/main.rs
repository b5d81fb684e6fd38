use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use genesyn::config::Config;
use genesyn::error::GsResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Trained model artifact (JSON).
    #[arg(global = true, short, long, default_value = "data/genesyn_model.json")]
    model: String,

    /// Optional JSON config; flags given on the command line override it.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate, score and rank synonymous coding sequences.
    Optimize(cmd::optimize::OptimizeArgs),
    /// Write a synthetic `dna_seq,score` training table.
    Dataset(cmd::dataset::DatasetArgs),
    /// Fit the character vocabulary from a training table.
    Vocab(cmd::vocab::VocabArgs),
    /// Write an untrained model artifact for smoke tests.
    ModelInit(cmd::model_init::ModelInitArgs),
}

fn resolve_config(
    cli_config: &Config,
    file: Option<&str>,
    sub_matches: Option<&ArgMatches>,
) -> GsResult<Config> {
    let config = match (file, sub_matches) {
        (Some(path), Some(matches)) => {
            info!("⚖️  Loading config from: {}", path);
            let mut from_file = Config::load_from_file(path)?;
            from_file.merge_from_cli(cli_config, matches);
            from_file
        }
        _ => cli_config.clone(),
    };
    config.validate()?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let outcome = match &cli.command {
        Commands::Optimize(args) => resolve_config(
            &args.config,
            cli.config.as_deref(),
            matches.subcommand_matches("optimize"),
        )
        .and_then(|config| cmd::optimize::run(args, config, &cli.model)),
        Commands::Dataset(args) => resolve_config(
            &args.config,
            cli.config.as_deref(),
            matches.subcommand_matches("dataset"),
        )
        .and_then(|config| cmd::dataset::run(args, config)),
        Commands::Vocab(args) => cmd::vocab::run(args, &cli.model),
        Commands::ModelInit(args) => cmd::model_init::run(args, &cli.model),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
