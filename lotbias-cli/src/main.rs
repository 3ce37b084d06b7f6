mod display;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use lotbias_data::history::History;
use lotbias_data::import::load_csv;
use lotbias_data::models::{profile, PROFILES};
use lotbias_engine::config::{load_config, EngineConfig};
use lotbias_engine::lines::LineRequest;
use lotbias_engine::{BiasEngine, Preset};

use crate::display::{
    display_draws, display_lines, display_lines_json, display_picks, display_profiles,
    display_score_chart,
};

#[derive(Parser)]
#[command(name = "lotbias", about = "Grilles de loterie pondérées par les biais de l'historique")]
struct Cli {
    /// Fichier CSV des tirages
    #[arg(short, long, global = true, default_value = "data/draws.csv")]
    file: PathBuf,

    /// Configuration JSON du moteur (fenêtres, poids, tentatives)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lister les loteries connues
    Profiles,

    /// Afficher les derniers tirages d'une loterie
    History {
        #[arg(short, long)]
        lottery: String,

        /// Nombre de tirages à afficher
        #[arg(long, default_value = "10")]
        last: usize,
    },

    /// Classer les numéros par score de biais
    Numbers {
        #[arg(short, long)]
        lottery: String,

        /// conservative, balanced ou aggressive
        #[arg(short, long, default_value = "balanced")]
        preset: String,

        /// Nombre de numéros à afficher
        #[arg(short, long, default_value = "10")]
        count: usize,

        /// Confiance minimale (entre 0 et 1)
        #[arg(long, default_value = "0.0")]
        min_confidence: f64,

        /// Graphique ASCII des scores
        #[arg(long)]
        chart: bool,
    },

    /// Générer des grilles complètes
    Lines {
        #[arg(short, long)]
        lottery: String,

        /// conservative, balanced ou aggressive
        #[arg(short, long, default_value = "balanced")]
        preset: String,

        /// Nombre de grilles
        #[arg(short = 'n', long, default_value = "5")]
        lines: usize,

        /// Numéro imposé dans chaque grille (répétable)
        #[arg(long = "lock")]
        locked: Vec<u8>,

        /// Désactiver la contrainte pair/impair et bas/haut
        #[arg(long)]
        no_balance: bool,

        /// Désactiver le bonus de co-occurrence des paires
        #[arg(long)]
        no_pairs: bool,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Sortie JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Profiles => {
            display_profiles(PROFILES);
            Ok(())
        }
        Command::History { lottery, last } => cmd_history(&cli.file, &lottery, last),
        Command::Numbers {
            lottery,
            preset,
            count,
            min_confidence,
            chart,
        } => {
            let engine = BiasEngine::new(engine_config(cli.config.as_deref())?);
            cmd_numbers(&engine, &cli.file, &lottery, &preset, count, min_confidence, chart)
        }
        Command::Lines {
            lottery,
            preset,
            lines,
            locked,
            no_balance,
            no_pairs,
            seed,
            json,
        } => {
            let engine = BiasEngine::new(engine_config(cli.config.as_deref())?);
            let request = LineRequest {
                line_count: lines,
                locked,
                enforce_balance: !no_balance,
                use_pairs: !no_pairs,
            };
            cmd_lines(&engine, &cli.file, &lottery, &preset, &request, seed, json)
        }
    }
}

fn engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(EngineConfig::default()),
    }
}

fn load_history(file: &Path) -> Result<History> {
    let history = load_csv(file)?;
    if history.is_empty() {
        bail!("Aucun tirage dans {:?}", file);
    }
    Ok(history)
}

fn cmd_history(file: &Path, lottery: &str, last: usize) -> Result<()> {
    let p = profile(lottery).with_context(|| format!("Loterie inconnue '{}'", lottery))?;
    let history = load_history(file)?;
    let draws = history.last_draws(lottery, last);
    println!(
        "\n{} : {} tirages au total\n",
        p.name,
        history.count_draws(lottery)
    );
    display_draws(&draws, p.has_bonus);
    Ok(())
}

fn cmd_numbers(
    engine: &BiasEngine,
    file: &Path,
    lottery: &str,
    preset: &str,
    count: usize,
    min_confidence: f64,
    chart: bool,
) -> Result<()> {
    let preset: Preset = preset.parse()?;
    let history = load_history(file)?;
    let picks = engine.predict_numbers(&history, lottery, preset, count, min_confidence)?;

    display_picks(&picks, lottery, preset);
    if chart {
        let table = engine.score_numbers(&history, lottery, preset)?;
        display_score_chart(&table);
    }
    Ok(())
}

fn cmd_lines(
    engine: &BiasEngine,
    file: &Path,
    lottery: &str,
    preset: &str,
    request: &LineRequest,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let history = load_history(file)?;
    let lines = engine.generate_lines(&history, lottery, preset, request, seed)?;

    if json {
        display_lines_json(&lines)
    } else {
        display_lines(&lines, lottery);
        Ok(())
    }
}
