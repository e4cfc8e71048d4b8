use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;

use crate::models::{Draw, PICK_COUNT};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS draws (
    contest_id  INTEGER PRIMARY KEY,
    date        TEXT NOT NULL,
    n_01        INTEGER NOT NULL,
    n_02        INTEGER NOT NULL,
    n_03        INTEGER NOT NULL,
    n_04        INTEGER NOT NULL,
    n_05        INTEGER NOT NULL,
    n_06        INTEGER NOT NULL,
    n_07        INTEGER NOT NULL,
    n_08        INTEGER NOT NULL,
    n_09        INTEGER NOT NULL,
    n_10        INTEGER NOT NULL,
    n_11        INTEGER NOT NULL,
    n_12        INTEGER NOT NULL,
    n_13        INTEGER NOT NULL,
    n_14        INTEGER NOT NULL,
    n_15        INTEGER NOT NULL
);
";

const NUMBER_COLUMNS: &str =
    "n_01, n_02, n_03, n_04, n_05, n_06, n_07, n_08, n_09, n_10, n_11, n_12, n_13, n_14, n_15";

pub fn db_path() -> std::path::PathBuf {
    let mut path = std::env::current_dir().unwrap_or_default();
    path.push("data");
    path.push("lotofacil.db");
    path
}

pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Impossible de créer le répertoire {:?}", parent))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Impossible d'ouvrir la base {:?}", path))?;
    Ok(conn)
}

pub fn migrate(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)
        .context("Échec de la migration")?;
    Ok(())
}

pub fn insert_draw(conn: &Connection, draw: &Draw) -> Result<bool> {
    let sql = format!(
        "INSERT OR IGNORE INTO draws (contest_id, date, {})
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17)",
        NUMBER_COLUMNS
    );
    let changed = conn
        .execute(
            &sql,
            rusqlite::params![
                draw.contest_id,
                draw.date,
                draw.numbers[0],
                draw.numbers[1],
                draw.numbers[2],
                draw.numbers[3],
                draw.numbers[4],
                draw.numbers[5],
                draw.numbers[6],
                draw.numbers[7],
                draw.numbers[8],
                draw.numbers[9],
                draw.numbers[10],
                draw.numbers[11],
                draw.numbers[12],
                draw.numbers[13],
                draw.numbers[14],
            ],
        )
        .context("Échec de l'insertion")?;
    Ok(changed > 0)
}

fn row_numbers(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<[u8; PICK_COUNT]> {
    let mut numbers = [0u8; PICK_COUNT];
    for (i, slot) in numbers.iter_mut().enumerate() {
        *slot = row.get::<_, u8>(offset + i)?;
    }
    Ok(numbers)
}

pub fn fetch_last_draws(conn: &Connection, limit: u32) -> Result<Vec<Draw>> {
    let sql = format!(
        "SELECT contest_id, date, {} FROM draws ORDER BY contest_id DESC LIMIT ?1",
        NUMBER_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let draws = stmt
        .query_map([limit], |row| {
            Ok(Draw {
                contest_id: row.get(0)?,
                date: row.get(1)?,
                numbers: row_numbers(row, 2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(draws)
}

pub fn fetch_last_draws_numbers(conn: &Connection, limit: u32) -> Result<Vec<[u8; PICK_COUNT]>> {
    let sql = format!(
        "SELECT {} FROM draws ORDER BY contest_id DESC LIMIT ?1",
        NUMBER_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([limit], |row| row_numbers(row, 0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn count_draws(conn: &Connection) -> Result<u32> {
    let count: u32 = conn.query_row("SELECT COUNT(*) FROM draws", [], |row| row.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_draw(id: u32, date: &str) -> Draw {
        Draw {
            contest_id: id,
            date: date.to_string(),
            numbers: [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
        }
    }

    #[test]
    fn test_insert_and_count() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();
        assert_eq!(count_draws(&conn).unwrap(), 0);

        insert_draw(&conn, &test_draw(1, "2024-01-01")).unwrap();
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_duplicate_ignored() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        let inserted = insert_draw(&conn, &test_draw(1, "2024-01-01")).unwrap();
        assert!(inserted);
        let inserted = insert_draw(&conn, &test_draw(1, "2024-01-01")).unwrap();
        assert!(!inserted);
        assert_eq!(count_draws(&conn).unwrap(), 1);
    }

    #[test]
    fn test_fetch_order_most_recent_first() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_draw(&conn, &test_draw(1, "2024-01-01")).unwrap();
        insert_draw(&conn, &test_draw(3, "2024-01-05")).unwrap();
        insert_draw(&conn, &test_draw(2, "2024-01-03")).unwrap();

        let draws = fetch_last_draws(&conn, 10).unwrap();
        assert_eq!(draws.len(), 3);
        assert_eq!(draws[0].contest_id, 3);
        assert_eq!(draws[1].contest_id, 2);
        assert_eq!(draws[2].contest_id, 1);
    }

    #[test]
    fn test_fetch_numbers_roundtrip() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        insert_draw(&conn, &test_draw(1, "2024-01-01")).unwrap();
        let rows = fetch_last_draws_numbers(&conn, 10).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_fetch_limit() {
        let conn = Connection::open_in_memory().unwrap();
        migrate(&conn).unwrap();

        for id in 1..=5 {
            insert_draw(&conn, &test_draw(id, "2024-01-01")).unwrap();
        }
        let draws = fetch_last_draws(&conn, 2).unwrap();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].contest_id, 5);
    }
}
