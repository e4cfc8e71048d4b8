use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::import::ImportResult;
use lotofacil_db::models::{BatchStats, Draw, Game, NumberStats};

fn numbers_str(numbers: &[u8]) -> String {
    numbers
        .iter()
        .map(|n| format!("{:2}", n))
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn display_draws(draws: &[Draw]) {
    if draws.is_empty() {
        println!("Aucun tirage à afficher.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Concours", "Date", "Numéros"]);

    for draw in draws {
        let mut sorted = draw.numbers;
        sorted.sort();
        table.add_row(vec![
            &draw.contest_id.to_string(),
            &draw.date,
            &numbers_str(&sorted),
        ]);
    }

    println!("{table}");
}

pub fn display_import_summary(result: &ImportResult) {
    println!("Import terminé :");
    println!("  Total lignes lues : {}", result.total_records);
    println!("  Insérés           : {}", result.inserted);
    println!("  Doublons ignorés  : {}", result.skipped);
    if result.errors > 0 {
        println!("  Erreurs           : {}", result.errors);
    }
}

pub fn display_stats(by_frequency: &[NumberStats], by_delay: &[NumberStats], window: u32) {
    println!("\n📊 Statistiques sur les {} derniers tirages\n", window);

    println!("── Par fréquence ──");
    stats_table(by_frequency);

    println!("\n── Par retard ──");
    stats_table(by_delay);
}

fn stats_table(stats: &[NumberStats]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Numéro", "Fréquence", "Retard"]);

    for stat in stats {
        table.add_row(vec![
            &format!("{:2}", stat.number),
            &stat.frequency.to_string(),
            &stat.delay.to_string(),
        ]);
    }
    println!("{table}");
}

pub fn display_games(games: &[Game]) {
    println!("\n🎲 Grilles générées\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Numéros", "Générée le"]);

    for (i, game) in games.iter().enumerate() {
        table.add_row(vec![
            &format!("{}", i + 1),
            &numbers_str(&game.numbers),
            &game.generated_at,
        ]);
    }
    println!("{table}");
}

pub fn display_batch_stats(stats: &BatchStats) {
    println!("\n🔍 Analyse croisée du lot\n");

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Catégorie", "Numéros"]);

    let row = |label: &str, numbers: &[u8], color: Color| {
        vec![
            Cell::new(label).fg(color),
            Cell::new(if numbers.is_empty() {
                "—".to_string()
            } else {
                numbers_str(numbers)
            }),
        ]
    };

    table.add_row(row("Communs à toutes", &stats.common, Color::Green));
    table.add_row(row("Exclusifs à une seule", &stats.exclusive, Color::Yellow));
    table.add_row(row("Absents de toutes", &stats.absent, Color::Red));

    println!("{table}");
}
