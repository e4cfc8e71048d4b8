use rand::rngs::StdRng;
use rand::Rng;

use crate::error::EngineError;

#[derive(Debug, Clone)]
pub struct Constraints {
    pub fixed: Vec<u8>,
    pub excluded: Vec<u8>,
    pub target_count: usize,
}

/// Pondération fournie par l'appelant ; le drapeau `delayed` n'est pas recalculé ici.
#[derive(Debug, Clone)]
pub struct NumberWeight {
    pub number: u8,
    pub frequency: u32,
    pub delayed: bool,
}

#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Bonus ajouté à la fréquence d'un numéro en retard.
    pub delay_bonus: u32,
    /// Taille maximale de la fenêtre de tirage parmi les meilleurs candidats.
    pub window_cap: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            delay_bonus: 8,
            window_cap: 10,
        }
    }
}

pub fn check_feasibility(constraints: &Constraints, pool_size: u8) -> Result<(), EngineError> {
    for &n in &constraints.fixed {
        if n < 1 || n > pool_size {
            return Err(EngineError::InfeasibleConstraints(format!(
                "numéro fixé {} hors limites (1-{})",
                n, pool_size
            )));
        }
    }
    for (i, &n) in constraints.fixed.iter().enumerate() {
        if constraints.fixed[..i].contains(&n) {
            return Err(EngineError::InfeasibleConstraints(format!(
                "numéro fixé en double : {}",
                n
            )));
        }
    }
    if let Some(&n) = constraints
        .fixed
        .iter()
        .find(|n| constraints.excluded.contains(n))
    {
        return Err(EngineError::InfeasibleConstraints(format!(
            "le numéro {} est à la fois fixé et exclu",
            n
        )));
    }
    if constraints.fixed.len() > constraints.target_count {
        return Err(EngineError::InfeasibleConstraints(format!(
            "{} numéros fixés pour une grille de {}",
            constraints.fixed.len(),
            constraints.target_count
        )));
    }
    let available = (1..=pool_size)
        .filter(|n| !constraints.fixed.contains(n) && !constraints.excluded.contains(n))
        .count();
    let needed = constraints.target_count - constraints.fixed.len();
    if available < needed {
        return Err(EngineError::InfeasibleConstraints(format!(
            "{} numéros disponibles pour {} à choisir",
            available, needed
        )));
    }
    Ok(())
}

/// Compose une grille : numéros fixés + tirage aléatoire uniforme dans une
/// fenêtre glissante des candidats les mieux pondérés (fréquence + bonus de
/// retard). La fenêtre couvre le double du besoin restant, plafonné par
/// `window_cap`, pour éviter de produire toujours la même grille.
///
/// Volontairement non déterministe à contraintes égales : deux appels avec des
/// états RNG différents peuvent produire des grilles différentes.
pub fn select(
    constraints: &Constraints,
    weights: &[NumberWeight],
    config: &SelectorConfig,
    pool_size: u8,
    rng: &mut StdRng,
) -> Result<Vec<u8>, EngineError> {
    check_feasibility(constraints, pool_size)?;

    let mut available: Vec<(u8, u32)> = weights
        .iter()
        .filter(|w| w.number >= 1 && w.number <= pool_size)
        .filter(|w| {
            !constraints.fixed.contains(&w.number) && !constraints.excluded.contains(&w.number)
        })
        .map(|w| {
            let bonus = if w.delayed { config.delay_bonus } else { 0 };
            (w.number, w.frequency + bonus)
        })
        .collect();

    available.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut selected = constraints.fixed.clone();
    while selected.len() < constraints.target_count {
        if available.is_empty() {
            // La faisabilité porte sur le domaine ; les poids fournis peuvent en couvrir moins.
            return Err(EngineError::InfeasibleConstraints(
                "les pondérations fournies ne couvrent pas assez de candidats".to_string(),
            ));
        }
        let need = constraints.target_count - selected.len();
        let window = available.len().min(config.window_cap).min(2 * need);
        let idx = rng.random_range(0..window);
        let (number, _) = available.remove(idx);
        selected.push(number);
    }

    selected.sort();
    Ok(selected)
}
