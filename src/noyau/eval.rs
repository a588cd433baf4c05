//! Noyau : évaluation (pipeline réel)
//!
//! garde ÷0 -> concat -> normaliser -> jetons -> RPN -> f64 -> garde finitude
//!
//! Aucune exécution de code dynamique : seul le sous-ensemble + - * / ** sur des
//! littéraux numériques est accepté.

use super::erreur::{fini, EvalError};
use super::jetons::{normaliser, tokenize};
use super::moteur::OperatorKind;
use super::rpn::{eval_rpn, to_rpn};

/// Évalue `pending + current` (texte d’affichage, glyphes × ÷ − ^ e).
///
/// La division par zéro est détectée AVANT le calcul : sinon x/0 = inf
/// serait classé comme `NonFinite`.
pub fn evaluate(
    pending: &str,
    current: &str,
    last_operator: Option<OperatorKind>,
) -> Result<f64, EvalError> {
    if last_operator == Some(OperatorKind::Divide) && diviseur_nul(current) {
        return Err(EvalError::DivisionByZero);
    }

    let texte = format!("{pending}{current}");
    evaluate_expression(&texte)
}

/// Évalue un texte déjà composé, avec la précédence standard.
pub fn evaluate_expression(texte: &str) -> Result<f64, EvalError> {
    let s = texte.trim();
    if s.is_empty() {
        return Err(EvalError::Syntax("entrée vide".into()));
    }

    let norm = normaliser(s);
    let jetons = tokenize(&norm)?;
    let rpn = to_rpn(&jetons)?;
    let v = eval_rpn(&rpn)?;

    log::trace!("{s:?} -> {norm:?} -> {v}");
    fini(v)
}

fn diviseur_nul(current: &str) -> bool {
    matches!(current.trim().parse::<f64>(), Ok(v) if v == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn precedence_dans_un_texte_compose() {
        assert_eq!(evaluate_expression("2+3×4"), Ok(14.0));
        assert_eq!(evaluate_expression("2+3*4"), Ok(14.0));
        assert_eq!(evaluate_expression("2×3^2"), Ok(18.0));
        assert_eq!(evaluate_expression("10−2÷4"), Ok(9.5));
    }

    #[test]
    fn marqueur_e_et_puissance() {
        assert_eq!(evaluate("2e", "3", None), Ok(2000.0));
        assert_eq!(evaluate("2^", "10", None), Ok(1024.0));
        assert_eq!(evaluate("1.5e", "2", None), Ok(150.0));
    }

    #[test]
    fn resultat_formate_reutilisable() {
        assert_eq!(evaluate("1.00000000e+16+", "1", None), Ok(1e16 + 1.0));
        assert_eq!(evaluate("-5×", "3", None), Ok(-15.0));
    }

    #[test]
    fn division_par_zero() {
        assert_eq!(
            evaluate("9÷", "0", Some(OperatorKind::Divide)),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(
            evaluate("0÷", "0.", Some(OperatorKind::Divide)),
            Err(EvalError::DivisionByZero)
        );
        assert_eq!(
            evaluate("9÷", "3", Some(OperatorKind::Divide)),
            Ok(3.0)
        );
    }

    #[test]
    fn non_fini() {
        // texte composé : pas de garde ÷0, le résultat infini est refusé
        assert_eq!(evaluate_expression("1÷0"), Err(EvalError::NonFinite));
        assert_eq!(evaluate_expression("0/0"), Err(EvalError::NonFinite));
        assert_eq!(evaluate_expression("10^400"), Err(EvalError::NonFinite));
    }

    #[test]
    fn syntaxe() {
        assert!(matches!(evaluate_expression(""), Err(EvalError::Syntax(_))));
        assert!(matches!(
            evaluate_expression("2+"),
            Err(EvalError::Syntax(_))
        ));
        assert!(matches!(
            evaluate_expression("alert(1)"),
            Err(EvalError::Syntax(_))
        ));
    }

    proptest! {
        #[test]
        fn addition_de_deux_entiers(a in 0u32..1_000_000, b in 0u32..1_000_000) {
            let v = evaluate(&format!("{a}+"), &b.to_string(), Some(OperatorKind::Add)).unwrap();
            prop_assert_eq!(v, f64::from(a) + f64::from(b));
        }

        #[test]
        fn evaluation_deterministe(a in 1u32..10_000, b in 1u32..10_000) {
            let t = format!("{a}÷{b}×{a}−{b}");
            prop_assert_eq!(evaluate_expression(&t), evaluate_expression(&t));
        }
    }
}
