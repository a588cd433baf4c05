//! Noyau de calcul (sans UI)
//!
//! Organisation interne :
//! - erreur.rs     : taxonomie d’erreurs + messages d’affichage
//! - jetons.rs     : normalisation des glyphes + tokenisation
//! - rpn.rs        : shunting-yard + évaluation f64
//! - eval.rs       : pipeline complet (garde ÷0, finitude)
//! - format.rs     : affichage borné des résultats
//! - trig.rs       : angles spéciaux en degrés
//! - fonctions.rs  : table des fonctions scientifiques
//! - moteur.rs     : accumulateur (machine à états par mode)
//! - conversion.rs : unités + devises

pub mod conversion;
pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod moteur;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use conversion::{convert_unit, CurrencyRateTable, UnitCategory};
pub use fonctions::ScientificFunction;
pub use format::format_result;
pub use moteur::{CalculatorEngine, EngineMode, HistoryEntry, InputEvent, OperatorKind};
