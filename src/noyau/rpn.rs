// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur f64
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur une pile de f64
//
// Règles:
// - précédence : + - < * / < moins unaire < **
// - ** associatif à droite (2**3**2 = 2**9)
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur, il devient Tok::Neg (préfixe)
//    - donc -2**2 = -(2**2) et 2*-3 = 2*(-3)
//    - le '+' unaire est simplement ignoré

use super::erreur::EvalError;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Pow => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Pow)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(2), Plus, Num(3), Star, Num(4)]
///   rpn:    [Num(2), Num(3), Num(4), Star, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, EvalError> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(EvalError::Syntax("deux nombres consécutifs".into()));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(EvalError::Syntax("parenthèse fermante orpheline".into()));
                }
                prev_was_value = true;
            }

            Tok::Plus if !prev_was_value => {
                // plus unaire : neutre
            }

            Tok::Minus | Tok::Neg if !prev_was_value => {
                // opérateur préfixe : rien à dépiler avant lui
                ops.push(Tok::Neg);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Pow | Tok::Neg => {
                if !prev_was_value || matches!(tok, Tok::Neg) {
                    return Err(EvalError::Syntax("opérateur sans opérande".into()));
                }
                empiler_operateur(&mut out, &mut ops, tok);
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(EvalError::Syntax("parenthèses non fermées".into()));
        }
        out.push(op);
    }

    Ok(out)
}

/// Dépile tant que la précédence/associativité exige de sortir l’opérateur du haut,
/// puis empile `tok`.
fn empiler_operateur(out: &mut Vec<Tok>, ops: &mut Vec<Tok>, tok: Tok) {
    let p_tok = precedence(&tok);
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }

        let p_top = precedence(top);
        let doit_pop = if is_right_associative(&tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        match (doit_pop, ops.pop()) {
            (true, Some(op)) => out.push(op),
            (false, Some(op)) => {
                ops.push(op);
                break;
            }
            (_, None) => break,
        }
    }
    ops.push(tok);
}

/// Évalue une RPN sur une pile de f64.
///
/// Pas de contrôle de finitude ici : eval.rs le fait une seule fois sur le résultat.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, EvalError> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(*v),

            Tok::Neg => {
                let a = st.pop().ok_or_else(invalide)?;
                st.push(-a);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Pow => {
                let b = st.pop().ok_or_else(invalide)?;
                let a = st.pop().ok_or_else(invalide)?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    Tok::Slash => a / b,
                    _ => a.powf(b),
                };
                st.push(v);
            }

            Tok::LPar | Tok::RPar => {
                return Err(EvalError::Syntax("parenthèse inattendue en RPN".into()))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(invalide()),
    }
}

fn invalide() -> EvalError {
    EvalError::Syntax("expression invalide".into())
}
