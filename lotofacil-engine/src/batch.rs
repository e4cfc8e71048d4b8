use lotofacil_db::models::{BatchStats, Game};

/// Statistiques croisées d'un lot : numéros présents dans toutes les grilles,
/// dans exactement une, dans aucune. Chaque liste est triée par numéro
/// croissant. Un lot vide produit trois listes vides, ce n'est pas une erreur.
pub fn analyze_batch(games: &[Game], pool_size: u8) -> BatchStats {
    if games.is_empty() {
        return BatchStats {
            common: vec![],
            exclusive: vec![],
            absent: vec![],
        };
    }

    let mut counts = vec![0u32; pool_size as usize];
    for game in games {
        for &n in &game.numbers {
            let idx = (n - 1) as usize;
            if idx < counts.len() {
                counts[idx] += 1;
            }
        }
    }

    let batch_size = games.len() as u32;
    let mut common = Vec::new();
    let mut exclusive = Vec::new();
    let mut absent = Vec::new();

    for (i, &count) in counts.iter().enumerate() {
        let number = (i + 1) as u8;
        if count == batch_size {
            common.push(number);
        }
        if count == 1 {
            exclusive.push(number);
        }
        if count == 0 {
            absent.push(number);
        }
    }

    BatchStats {
        common,
        exclusive,
        absent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lotofacil_db::models::{PICK_COUNT, POOL_SIZE};

    fn game(numbers: [u8; PICK_COUNT]) -> Game {
        Game {
            numbers,
            generated_at: "2026-01-01 12:00:00".to_string(),
        }
    }

    #[test]
    fn test_two_games_reference_scenario() {
        let games = vec![
            game([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]),
            game([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 16]),
        ];
        let stats = analyze_batch(&games, POOL_SIZE);
        assert_eq!(stats.common, (1..=14).collect::<Vec<u8>>());
        assert_eq!(stats.exclusive, vec![15, 16]);
        assert_eq!(stats.absent, (17..=25).collect::<Vec<u8>>());
    }

    #[test]
    fn test_empty_batch_all_empty() {
        let stats = analyze_batch(&[], POOL_SIZE);
        assert!(stats.common.is_empty());
        assert!(stats.exclusive.is_empty());
        assert!(stats.absent.is_empty());
    }

    #[test]
    fn test_single_game() {
        // Avec une seule grille, chaque numéro présent est à la fois commun et
        // exclusif (compte = taille du lot = 1).
        let games = vec![game([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15])];
        let stats = analyze_batch(&games, POOL_SIZE);
        assert_eq!(stats.common, (1..=15).collect::<Vec<u8>>());
        assert_eq!(stats.exclusive, (1..=15).collect::<Vec<u8>>());
        assert_eq!(stats.absent, (16..=25).collect::<Vec<u8>>());
    }

    #[test]
    fn test_outputs_sorted_ascending() {
        let games = vec![
            game([25, 24, 23, 22, 21, 20, 19, 18, 17, 16, 15, 14, 13, 12, 11]),
            game([11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25]),
        ];
        let stats = analyze_batch(&games, POOL_SIZE);
        assert!(stats.common.windows(2).all(|w| w[0] < w[1]));
        assert!(stats.absent.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_analyze_idempotent() {
        let games = vec![
            game([1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]),
            game([2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16]),
        ];
        let a = analyze_batch(&games, POOL_SIZE);
        let b = analyze_batch(&games, POOL_SIZE);
        assert_eq!(a.common, b.common);
        assert_eq!(a.exclusive, b.exclusive);
        assert_eq!(a.absent, b.absent);
    }
}
