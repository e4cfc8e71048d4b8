use rand::rngs::StdRng;
use rand::SeedableRng;

use lotofacil_db::models::{Game, PICK_COUNT};

use crate::error::EngineError;
use crate::selector::{select, Constraints, NumberWeight, SelectorConfig};

/// Plafond de tentatives pour obtenir une grille inédite dans le lot.
pub const MAX_ATTEMPTS_PER_GAME: usize = 100;

/// Génère `quantity` grilles distinctes (comparées comme ensembles de numéros).
/// L'unicité n'est garantie qu'au sein du lot. Si le plafond de tentatives est
/// atteint avant d'obtenir le compte demandé, échoue avec `GenerationExhausted`
/// plutôt que de retourner un lot tronqué.
pub fn generate_batch(
    constraints: &Constraints,
    weights: &[NumberWeight],
    config: &SelectorConfig,
    pool_size: u8,
    quantity: usize,
    seed: Option<u64>,
) -> Result<Vec<Game>, EngineError> {
    if constraints.target_count != PICK_COUNT {
        return Err(EngineError::InfeasibleConstraints(format!(
            "une grille Lotofácil compte {} numéros, pas {}",
            PICK_COUNT, constraints.target_count
        )));
    }

    let mut rng: StdRng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let mut games: Vec<Game> = Vec::with_capacity(quantity);

    while games.len() < quantity {
        let mut accepted = false;
        for _ in 0..MAX_ATTEMPTS_PER_GAME {
            let numbers = select(constraints, weights, config, pool_size, &mut rng)?;
            if games.iter().any(|g| g.numbers[..] == numbers[..]) {
                continue;
            }
            let mut arr = [0u8; PICK_COUNT];
            arr.copy_from_slice(&numbers);
            games.push(Game {
                numbers: arr,
                generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            });
            accepted = true;
            break;
        }
        if !accepted {
            return Err(EngineError::GenerationExhausted {
                requested: quantity,
                generated: games.len(),
            });
        }
    }

    Ok(games)
}
