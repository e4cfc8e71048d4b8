mod display;
mod import;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::display::{
    display_batch_stats, display_draws, display_games, display_import_summary, display_stats,
};
use lotofacil_db::db::{
    count_draws, db_path, fetch_last_draws, fetch_last_draws_numbers, insert_draw, migrate,
    open_db,
};
use lotofacil_db::models::{
    validate_numbers, BatchStats, Draw, Game, Plan, PICK_COUNT, POOL_SIZE,
};
use lotofacil_engine::batch::analyze_batch;
use lotofacil_engine::generator::generate_batch;
use lotofacil_engine::selector::{Constraints, NumberWeight, SelectorConfig};
use lotofacil_engine::stats::{compute_stats, sorted_by_delay, sorted_by_frequency};

#[derive(Parser)]
#[command(
    name = "lotofacil",
    about = "Statistiques et génération de grilles Lotofácil"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Importer les tirages depuis un fichier CSV
    Import {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = "assets/lotofacil.csv")]
        file: PathBuf,
    },

    /// Afficher le chemin de la base de données
    DbPath,

    /// Lister les derniers tirages
    List {
        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: u32,
    },

    /// Afficher les statistiques (fréquences et retards)
    Stats {
        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "100")]
        window: u32,
    },

    /// Générer des grilles pondérées par fréquence et retard
    Generate {
        /// Nombre de grilles à générer
        #[arg(short, long, default_value = "1")]
        count: usize,

        /// Formule d'abonnement (plafond de grilles par lot)
        #[arg(short, long, value_enum, default_value = "gratuit")]
        plan: Plan,

        /// Fenêtre d'analyse (nombre de tirages)
        #[arg(short, long, default_value = "100")]
        window: u32,

        /// Numéros imposés dans chaque grille (séparés par des virgules)
        #[arg(long, value_delimiter = ',')]
        fixed: Vec<u8>,

        /// Numéros exclus de chaque grille (séparés par des virgules)
        #[arg(long, value_delimiter = ',')]
        excluded: Vec<u8>,

        /// Retard minimal pour qu'un numéro reçoive le bonus de pondération
        #[arg(long, default_value = "3")]
        delay_threshold: u32,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        /// Afficher l'analyse croisée du lot
        #[arg(long)]
        analyze: bool,

        /// Écrire le lot et son analyse au format JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Ajouter un tirage manuellement
    Add,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = db_path();
    let conn = open_db(&path)?;
    migrate(&conn)?;

    match cli.command {
        Command::Import { file } => cmd_import(&conn, &file),
        Command::DbPath => {
            println!("{}", path.display());
            Ok(())
        }
        Command::List { last } => cmd_list(&conn, last),
        Command::Stats { window } => cmd_stats(&conn, window),
        Command::Generate {
            count,
            plan,
            window,
            fixed,
            excluded,
            delay_threshold,
            seed,
            analyze,
            output,
        } => cmd_generate(
            &conn,
            count,
            plan,
            window,
            fixed,
            excluded,
            delay_threshold,
            seed,
            analyze,
            output,
        ),
        Command::Add => cmd_add(&conn),
    }
}

fn cmd_import(conn: &lotofacil_db::rusqlite::Connection, file: &PathBuf) -> Result<()> {
    let result = import::import_csv(conn, file)?;
    display_import_summary(&result);
    Ok(())
}

fn cmd_list(conn: &lotofacil_db::rusqlite::Connection, last: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : lotofacil import");
        return Ok(());
    }
    let draws = fetch_last_draws(conn, last)?;
    display_draws(&draws);
    Ok(())
}

fn cmd_stats(conn: &lotofacil_db::rusqlite::Connection, window: u32) -> Result<()> {
    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : lotofacil import");
        return Ok(());
    }
    let effective_window = window.min(n);
    let draws = fetch_last_draws_numbers(conn, effective_window)?;

    let stats = compute_stats(&draws, POOL_SIZE);
    display_stats(
        &sorted_by_frequency(&stats),
        &sorted_by_delay(&stats),
        effective_window,
    );
    Ok(())
}

#[derive(Serialize)]
struct GenerationReport<'a> {
    games: &'a [Game],
    analysis: &'a BatchStats,
}

#[allow(clippy::too_many_arguments)]
fn cmd_generate(
    conn: &lotofacil_db::rusqlite::Connection,
    count: usize,
    plan: Plan,
    window: u32,
    fixed: Vec<u8>,
    excluded: Vec<u8>,
    delay_threshold: u32,
    seed: Option<u64>,
    analyze: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    if count == 0 {
        bail!("Le nombre de grilles doit être au moins 1");
    }
    if count > plan.max_games() {
        bail!(
            "La formule {} autorise au plus {} grilles par lot ({} demandées)",
            plan,
            plan.max_games(),
            count
        );
    }

    let n = count_draws(conn)?;
    if n == 0 {
        println!("Base vide. Lancez d'abord : lotofacil import");
        return Ok(());
    }
    let effective_window = window.min(n);
    let draws = fetch_last_draws_numbers(conn, effective_window)?;

    let stats = compute_stats(&draws, POOL_SIZE);
    let weights: Vec<NumberWeight> = stats
        .iter()
        .map(|s| NumberWeight {
            number: s.number,
            frequency: s.frequency,
            delayed: s.delay >= delay_threshold,
        })
        .collect();

    let constraints = Constraints {
        fixed,
        excluded,
        target_count: PICK_COUNT,
    };

    let games = generate_batch(
        &constraints,
        &weights,
        &SelectorConfig::default(),
        POOL_SIZE,
        count,
        seed,
    )
    .context("Échec de la génération du lot")?;

    display_games(&games);

    let batch_stats = analyze_batch(&games, POOL_SIZE);
    if analyze {
        display_batch_stats(&batch_stats);
    }

    if let Some(path) = output {
        let report = GenerationReport {
            games: &games,
            analysis: &batch_stats,
        };
        let json = serde_json::to_string_pretty(&report)
            .context("Impossible de sérialiser le lot")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Impossible d'écrire {:?}", path))?;
        println!("\nLot écrit dans {}", path.display());
    }

    Ok(())
}

fn cmd_add(conn: &lotofacil_db::rusqlite::Connection) -> Result<()> {
    println!("Ajout d'un tirage manuellement\n");

    let contest_id: u32 = prompt("Numéro du concours (ex: 3127) : ")?
        .parse()
        .context("Numéro de concours invalide")?;
    let raw_date = prompt("Date (JJ/MM/AAAA) : ")?;

    let date_parts: Vec<&str> = raw_date.split('/').collect();
    if date_parts.len() != 3 {
        bail!("Format de date invalide");
    }
    let date = format!("{}-{}-{}", date_parts[2], date_parts[1], date_parts[0]);

    let numbers = prompt_numbers()?;
    validate_numbers(&numbers)?;

    let draw = Draw {
        contest_id,
        date,
        numbers,
    };

    println!("\nTirage à insérer :");
    display_draws(&[draw.clone()]);

    let confirm = prompt("\nConfirmer l'insertion ? (o/n) : ")?;
    if confirm.trim().to_lowercase() == "o" {
        let inserted = insert_draw(conn, &draw)?;
        if inserted {
            println!("Tirage inséré avec succès.");
        } else {
            println!("Ce tirage existe déjà (doublon ignoré).");
        }
    } else {
        println!("Insertion annulée.");
    }

    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    Ok(input.trim().to_string())
}

fn prompt_numbers() -> Result<[u8; PICK_COUNT]> {
    loop {
        let input = prompt(&format!(
            "{} numéros (séparés par des espaces, 1-{}) : ",
            PICK_COUNT, POOL_SIZE
        ))?;
        let nums: Result<Vec<u8>, _> = input.split_whitespace().map(|s| s.parse::<u8>()).collect();
        match nums {
            Ok(v) if v.len() == PICK_COUNT => {
                let mut arr = [0u8; PICK_COUNT];
                arr.copy_from_slice(&v);
                if validate_numbers(&arr).is_ok() {
                    return Ok(arr);
                }
                println!(
                    "Numéros invalides (1-{}, pas de doublons). Réessayez.",
                    POOL_SIZE
                );
            }
            _ => println!("Entrez exactement {} numéros. Réessayez.", PICK_COUNT),
        }
    }
}
