use lotofacil_db::models::{NumberStats, PICK_COUNT};

/// Fréquence et retard de chaque numéro du domaine sur une fenêtre de tirages.
/// draws[0] = tirage le plus récent. Le retard est l'indice du premier tirage
/// (en partant du plus récent) contenant le numéro ; un numéro jamais vu reçoit
/// la sentinelle draws.len().
pub fn compute_stats(draws: &[[u8; PICK_COUNT]], pool_size: u8) -> Vec<NumberStats> {
    let sentinel = draws.len() as u32;
    let mut stats: Vec<NumberStats> = (1..=pool_size)
        .map(|n| NumberStats {
            number: n,
            frequency: 0,
            delay: sentinel,
        })
        .collect();

    for (i, numbers) in draws.iter().enumerate() {
        for &n in numbers {
            let idx = (n - 1) as usize;
            if idx < stats.len() {
                stats[idx].frequency += 1;
                if stats[idx].delay == sentinel {
                    stats[idx].delay = i as u32;
                }
            }
        }
    }

    stats
}

/// Tri par fréquence décroissante, numéro croissant à égalité.
pub fn sorted_by_frequency(stats: &[NumberStats]) -> Vec<NumberStats> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency).then(a.number.cmp(&b.number)));
    sorted
}

/// Tri par retard décroissant, numéro croissant à égalité.
pub fn sorted_by_delay(stats: &[NumberStats]) -> Vec<NumberStats> {
    let mut sorted = stats.to_vec();
    sorted.sort_by(|a, b| b.delay.cmp(&a.delay).then(a.number.cmp(&b.number)));
    sorted
}
