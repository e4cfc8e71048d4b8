use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Contraintes infaisables : {0}")]
    InfeasibleConstraints(String),

    #[error("Génération épuisée : {generated} grilles distinctes obtenues sur {requested} demandées")]
    GenerationExhausted { requested: usize, generated: usize },
}
