// src/noyau/jetons.rs
//
// Normalisation (glyphes d’affichage -> opérateurs ASCII) + tokenisation.

use lazy_static::lazy_static;
use regex::Regex;

use super::erreur::EvalError;

lazy_static! {
    /// Marqueur scientifique saisi au clavier : <mantisse>e<exposant> (exposant non signé).
    /// Un exposant signé (ex: 1.00000000e+16) vient du formateur et reste un littéral.
    static ref MARQUEUR_E: Regex = Regex::new(r"(\d+)e(\d+)").expect("regex littérale");
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    Plus,
    Minus,
    Star,
    Slash,
    Pow, // **

    /// Moins unaire : produit seulement par rpn.rs, jamais par tokenize().
    Neg,

    LPar,
    RPar,
}

/// Réécrit le texte d’affichage en infixe standard :
/// - × ÷ − -> * / -
/// - ^ -> **
/// - 2e3 -> 2*10**3
pub fn normaliser(expr: &str) -> String {
    let s = expr
        .replace('×', "*")
        .replace('÷', "/")
        .replace('−', "-")
        .replace('^', "**");
    MARQUEUR_E.replace_all(&s, "$1*10**$2").into_owned()
}

/// Tokenize une chaîne déjà normalisée.
/// Supporte:
/// - décimaux (12, 0.5, .5, 3.)
/// - exposant signé collé au littéral (1.5e+16, 2e-3)
/// - opérateurs + - * / **
/// - parenthèses ( )
pub fn tokenize(s: &str) -> Result<Vec<Tok>, EvalError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Pow);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            _ => {}
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut point = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if point {
                        return Err(EvalError::Syntax("deux points décimaux".into()));
                    }
                    point = true;
                }
                i += 1;
            }

            // exposant signé : e+16 / e-3 (jamais e seul : normaliser() l’a déjà réécrit)
            if i + 2 < chars.len()
                && (chars[i] == 'e' || chars[i] == 'E')
                && (chars[i + 1] == '+' || chars[i + 1] == '-')
                && chars[i + 2].is_ascii_digit()
            {
                i += 2;
                while i < chars.len() && chars[i].is_ascii_digit() {
                    i += 1;
                }
            }

            let lit: String = chars[start..i].iter().collect();
            let v = lit
                .parse::<f64>()
                .map_err(|_| EvalError::Syntax(format!("nombre invalide: '{lit}'")))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(EvalError::Syntax(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}
