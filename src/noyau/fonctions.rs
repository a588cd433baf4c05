// src/noyau/fonctions.rs
//
// Table des fonctions scientifiques (mode scientifique seulement).
// Chaque fonction s’applique à la valeur courante ; ^ et e ne calculent rien :
// ils posent un marqueur en attente, résolu plus tard par eval.rs.

use super::erreur::{fini, Domain, EvalError};
use super::trig::{trig_degres, TrigFn};

/// Dernière factorielle représentable sans devenir infinie en f64.
pub const FACTORIELLE_MAX: f64 = 170.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScientificFunction {
    Sin,
    Cos,
    Tan,
    Log,
    Ln,
    Sqrt,
    Square,
    Factorial,
    Pi,
    Power,
    Exp,
}

/// Ce que produit l’application d’une fonction sur la valeur courante.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Application {
    Valeur(f64),
    /// Marqueur à poser en fin d’expression en attente ('^' ou 'e').
    Marqueur(char),
}

impl ScientificFunction {
    pub fn libelle(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "√",
            Self::Square => "x²",
            Self::Factorial => "n!",
            Self::Pi => "π",
            Self::Power => "x^y",
            Self::Exp => "EXP",
        }
    }

    pub fn appliquer(self, x: f64) -> Result<Application, EvalError> {
        let v = match self {
            Self::Sin => trig_degres(TrigFn::Sin, x)?,
            Self::Cos => trig_degres(TrigFn::Cos, x)?,
            Self::Tan => trig_degres(TrigFn::Tan, x)?,
            Self::Log => {
                if x.is_nan() || x <= 0.0 {
                    return Err(EvalError::InvalidDomain(Domain::Logarithm));
                }
                x.log10()
            }
            Self::Ln => {
                if x.is_nan() || x <= 0.0 {
                    return Err(EvalError::InvalidDomain(Domain::NaturalLogarithm));
                }
                x.ln()
            }
            Self::Sqrt => {
                if x.is_nan() || x < 0.0 {
                    return Err(EvalError::InvalidDomain(Domain::SquareRoot));
                }
                x.sqrt()
            }
            Self::Square => x * x,
            Self::Factorial => factorial(x)?,
            Self::Pi => std::f64::consts::PI,
            Self::Power => return Ok(Application::Marqueur('^')),
            Self::Exp => return Ok(Application::Marqueur('e')),
        };
        Ok(Application::Valeur(fini(v)?))
    }
}

/// n! sur les entiers naturels, produit itératif 2..=n (0! = 1).
pub fn factorial(n: f64) -> Result<f64, EvalError> {
    if n.is_nan() || n < 0.0 || n.fract() != 0.0 {
        return Err(EvalError::InvalidDomain(Domain::Factorial));
    }
    if n > FACTORIELLE_MAX {
        return Err(EvalError::Overflow);
    }

    // n ≤ 170 : la conversion est exacte
    let n = n as u32;
    Ok((2..=n).fold(1.0, |acc, k| acc * f64::from(k)))
}
