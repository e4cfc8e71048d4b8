use anyhow::{bail, Context, Result};
use lotofacil_db::rusqlite::Connection;
use std::path::Path;

use lotofacil_db::db::insert_draw;
use lotofacil_db::models::{validate_numbers, Draw, PICK_COUNT};

fn parse_record(record: &csv::StringRecord) -> Result<Draw> {
    let get = |idx: usize| -> Result<String> {
        record
            .get(idx)
            .map(|s| s.trim().to_string())
            .with_context(|| format!("Champ manquant à l'index {}", idx))
    };

    let get_u8 = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        s.parse::<u8>()
            .with_context(|| format!("Impossible de parser '{}' (index {})", s, idx))
    };

    let raw_id = get(0)?;
    let contest_id: u32 = raw_id
        .parse()
        .with_context(|| format!("Numéro de concours invalide : '{}'", raw_id))?;

    let raw_date = get(1)?;
    let date = parse_date(&raw_date)?;

    let mut numbers = [0u8; PICK_COUNT];
    for (i, slot) in numbers.iter_mut().enumerate() {
        *slot = get_u8(2 + i)?;
    }
    validate_numbers(&numbers)?;

    Ok(Draw {
        contest_id,
        date,
        numbers,
    })
}

fn parse_date(raw: &str) -> Result<String> {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        bail!("Format de date invalide : '{}'", raw);
    }
    Ok(format!("{}-{}-{}", parts[2], parts[1], parts[0]))
}

pub struct ImportResult {
    pub total_records: u32,
    pub inserted: u32,
    pub skipped: u32,
    pub errors: u32,
}

pub fn import_csv(conn: &Connection, path: &Path) -> Result<ImportResult> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    let tx = conn
        .unchecked_transaction()
        .context("Impossible de démarrer la transaction")?;

    let mut result = ImportResult {
        total_records: 0,
        inserted: 0,
        skipped: 0,
        errors: 0,
    };

    for record_result in reader.records() {
        result.total_records += 1;
        match record_result {
            Ok(record) => match parse_record(&record) {
                Ok(draw) => match insert_draw(&tx, &draw) {
                    Ok(true) => result.inserted += 1,
                    Ok(false) => result.skipped += 1,
                    Err(e) => {
                        eprintln!("Erreur insertion tirage {}: {}", result.total_records, e);
                        result.errors += 1;
                    }
                },
                Err(e) => {
                    eprintln!("Erreur parsing ligne {}: {}", result.total_records, e);
                    result.errors += 1;
                }
            },
            Err(e) => {
                eprintln!("Erreur lecture ligne {}: {}", result.total_records, e);
                result.errors += 1;
            }
        }
    }

    tx.commit().context("Échec du commit")?;
    Ok(result)
}
