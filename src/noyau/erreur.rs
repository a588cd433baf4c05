// src/noyau/erreur.rs
//
// Taxonomie d’erreurs du noyau
// ----------------------------
// Toutes les erreurs sont récupérées à la frontière de l’accumulateur (moteur.rs) :
// elles ne remontent jamais jusqu’à la vue, seul leur message d’affichage y arrive.

use thiserror::Error;

/// Domaine de définition violé (log/ln/sqrt/factorielle).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    Logarithm,
    NaturalLogarithm,
    SquareRoot,
    Factorial,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("division par zéro")]
    DivisionByZero,

    /// Débordement ou forme indéterminée (inf, NaN).
    #[error("résultat non fini")]
    NonFinite,

    #[error("argument hors domaine ({0:?})")]
    InvalidDomain(Domain),

    /// Asymptote de la tangente (90°, 270°).
    #[error("tangente indéfinie")]
    Undefined,

    /// n! n’est plus représentable en f64 au-delà de 170.
    #[error("factorielle trop grande")]
    Overflow,

    /// Texte composé mal formé (jeton inattendu, parenthèse orpheline…).
    #[error("syntaxe: {0}")]
    Syntax(String),
}

impl EvalError {
    /// Message court affiché à la place du résultat.
    pub fn display_message(&self) -> &'static str {
        match self {
            EvalError::DivisionByZero => "Cannot divide by zero",
            EvalError::InvalidDomain(Domain::Logarithm) => "Invalid input for logarithm",
            EvalError::InvalidDomain(Domain::NaturalLogarithm) => {
                "Invalid input for natural logarithm"
            }
            EvalError::InvalidDomain(Domain::SquareRoot) => "Invalid input for square root",
            EvalError::InvalidDomain(Domain::Factorial) => "Invalid input for factorial",
            EvalError::Overflow => "Number too large for factorial",
            EvalError::NonFinite | EvalError::Undefined | EvalError::Syntax(_) => "Error",
        }
    }
}

/// Garde commune : tout résultat inf/NaN devient `NonFinite`.
pub fn fini(x: f64) -> Result<f64, EvalError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(EvalError::NonFinite)
    }
}
