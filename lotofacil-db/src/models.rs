use anyhow::{bail, Result};
use serde::Serialize;

/// Domaine des numéros Lotofácil : 1 à 25.
pub const POOL_SIZE: u8 = 25;
/// Nombre de numéros par tirage et par grille.
pub const PICK_COUNT: usize = 15;

#[derive(Debug, Clone)]
pub struct Draw {
    pub contest_id: u32,
    pub date: String,
    pub numbers: [u8; PICK_COUNT],
}

#[derive(Debug, Clone, Serialize)]
pub struct NumberStats {
    pub number: u8,
    pub frequency: u32,
    pub delay: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Game {
    pub numbers: [u8; PICK_COUNT],
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    pub common: Vec<u8>,
    pub exclusive: Vec<u8>,
    pub absent: Vec<u8>,
}

/// Formule d'abonnement : plafond de grilles par lot généré.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Plan {
    Gratuit,
    Bronze,
    Argent,
    Or,
}

impl Plan {
    pub fn max_games(&self) -> usize {
        match self {
            Plan::Gratuit => 1,
            Plan::Bronze => 5,
            Plan::Argent => 15,
            Plan::Or => 50,
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Plan::Gratuit => write!(f, "Gratuit"),
            Plan::Bronze => write!(f, "Bronze"),
            Plan::Argent => write!(f, "Argent"),
            Plan::Or => write!(f, "Or"),
        }
    }
}

pub fn validate_numbers(numbers: &[u8; PICK_COUNT]) -> Result<()> {
    for &n in numbers {
        if n < 1 || n > POOL_SIZE {
            bail!("Numéro {} hors limites (1-{})", n, POOL_SIZE);
        }
    }
    for i in 0..numbers.len() {
        for j in (i + 1)..numbers.len() {
            if numbers[i] == numbers[j] {
                bail!("Numéro en double : {}", numbers[i]);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_numbers_ok() {
        let numbers: [u8; PICK_COUNT] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
        assert!(validate_numbers(&numbers).is_ok());
        let high: [u8; PICK_COUNT] = [11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25];
        assert!(validate_numbers(&high).is_ok());
    }

    #[test]
    fn test_validate_numbers_out_of_range() {
        let zero: [u8; PICK_COUNT] = [0, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
        assert!(validate_numbers(&zero).is_err());
        let high: [u8; PICK_COUNT] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 26];
        assert!(validate_numbers(&high).is_err());
    }

    #[test]
    fn test_validate_numbers_duplicate() {
        let dup: [u8; PICK_COUNT] = [1, 1, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15];
        assert!(validate_numbers(&dup).is_err());
    }

    #[test]
    fn test_plan_max_games() {
        assert_eq!(Plan::Gratuit.max_games(), 1);
        assert_eq!(Plan::Bronze.max_games(), 5);
        assert_eq!(Plan::Argent.max_games(), 15);
        assert_eq!(Plan::Or.max_games(), 50);
    }
}
