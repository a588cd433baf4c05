//! Tests scientifiques (campagne) : séquences complètes d’événements en mode scientifique.
//!
//! On passe toujours par `CalculatorEngine::handle`, comme le fait la vue :
//! le texte affiché est le seul contrat observable.

use super::fonctions::ScientificFunction as F;
use super::moteur::{CalculatorEngine, EngineMode, InputEvent, OperatorKind};

use InputEvent::*;

fn sci() -> CalculatorEngine {
    CalculatorEngine::new(EngineMode::Scientific)
}

/// Tape un nombre (chiffres + point) dans le moteur.
fn taper(e: &mut CalculatorEngine, nombre: &str) {
    for c in nombre.chars() {
        match c {
            '.' => {
                e.handle(DecimalPoint);
            }
            d => {
                let v = d.to_digit(10).unwrap_or_else(|| panic!("chiffre: {d:?}"));
                e.handle(Digit(v as u8));
            }
        }
    }
}

fn fonction(nombre: &str, f: F) -> String {
    let mut e = sci();
    taper(&mut e, nombre);
    e.handle(ScientificFunction(f)).display.result_text
}

/* ------------------------ Angles spéciaux ------------------------ */

#[test]
fn sci_sinus_exact() {
    assert_eq!(fonction("30", F::Sin), "0.5");
    assert_eq!(fonction("150", F::Sin), "0.5");
    assert_eq!(fonction("270", F::Sin), "-1");
    assert_eq!(fonction("180", F::Sin), "0");
    assert_eq!(fonction("390", F::Sin), "0.5");
}

#[test]
fn sci_cosinus_et_tangente() {
    assert_eq!(fonction("60", F::Cos), "0.5");
    assert_eq!(fonction("90", F::Cos), "0");
    assert_eq!(fonction("45", F::Tan), "1");
    assert_eq!(fonction("45", F::Sin), "0.70710678");
    assert_eq!(fonction("60", F::Tan), "1.73205081");
}

#[test]
fn sci_tangente_indefinie() {
    assert_eq!(fonction("90", F::Tan), "Error");
    assert_eq!(fonction("270", F::Tan), "Error");
}

#[test]
fn sci_angle_quelconque_bruit_supprime() {
    // 10° : repli transcendant, 8 décimales
    assert_eq!(fonction("10", F::Sin), "0.17364818");
    // 0.0000001° : sin ≈ 1.7e-9, arrondi à 8 décimales => "0"
    assert_eq!(fonction("0.0000001", F::Sin), "0");
}

/* ------------------------ Domaines ------------------------ */

#[test]
fn sci_domaines_messages() {
    assert_eq!(fonction("0", F::Log), "Invalid input for logarithm");
    assert_eq!(fonction("0", F::Ln), "Invalid input for natural logarithm");
    assert_eq!(fonction("3.5", F::Factorial), "Invalid input for factorial");
    assert_eq!(fonction("171", F::Factorial), "Number too large for factorial");
}

#[test]
fn sci_racine_negative() {
    // seul un résultat négatif peut alimenter sqrt (le clavier n’a pas de signe)
    let mut e = sci();
    taper(&mut e, "2");
    e.handle(Operator(OperatorKind::Subtract));
    taper(&mut e, "6");
    e.handle(Evaluate);
    let out = e.handle(ScientificFunction(F::Sqrt));
    assert_eq!(out.display.result_text, "Invalid input for square root");
}

#[test]
fn sci_valeurs() {
    assert_eq!(fonction("0", F::Factorial), "1");
    assert_eq!(fonction("5", F::Factorial), "120");
    assert_eq!(fonction("18", F::Factorial), "6.40237371e+15");
    assert_eq!(fonction("1000", F::Log), "3");
    assert_eq!(fonction("81", F::Sqrt), "9");
    assert_eq!(fonction("12", F::Square), "144");
    assert_eq!(fonction("0", F::Pi), "3.14159265");
}

/* ------------------------ Marqueurs différés ------------------------ */

#[test]
fn sci_puissance_differee() {
    let mut e = sci();
    taper(&mut e, "2");
    let out = e.handle(ScientificFunction(F::Power));
    assert_eq!(out.display.expression_text, "2^");
    assert_eq!(out.display.result_text, "0");
    taper(&mut e, "10");
    let out = e.handle(Evaluate);
    assert_eq!(out.display.result_text, "1024");
    assert_eq!(out.history.map(|h| h.expression), Some("2^10".to_string()));
}

#[test]
fn sci_notation_exp() {
    let mut e = sci();
    taper(&mut e, "1.5");
    e.handle(ScientificFunction(F::Exp));
    taper(&mut e, "3");
    let out = e.handle(Evaluate);
    assert_eq!(out.display.result_text, "1500");
}

#[test]
fn sci_puissance_chainee_apres_addition() {
    // 3 + 2 ^ : la somme est évaluée d’abord (chaînage), puis 5^2
    let mut e = sci();
    taper(&mut e, "3");
    e.handle(Operator(OperatorKind::Add));
    taper(&mut e, "2");
    let out = e.handle(ScientificFunction(F::Power));
    assert_eq!(out.display.expression_text, "5^");
    taper(&mut e, "2");
    assert_eq!(e.handle(Evaluate).display.result_text, "25");
}

#[test]
fn sci_fonction_sur_operande_droit() {
    // 2 + sin(30) = 2.5 : la fonction ne touche pas l’expression en attente
    let mut e = sci();
    taper(&mut e, "2");
    e.handle(Operator(OperatorKind::Add));
    taper(&mut e, "30");
    let out = e.handle(ScientificFunction(F::Sin));
    assert_eq!(out.display.expression_text, "2+");
    assert_eq!(out.display.result_text, "0.5");
    assert_eq!(e.handle(Evaluate).display.result_text, "2.5");
}

#[test]
fn sci_resultat_exponentiel_reutilise() {
    let mut e = sci();
    taper(&mut e, "20");
    e.handle(ScientificFunction(F::Factorial));
    let out = e.handle(Operator(OperatorKind::Multiply));
    assert_eq!(out.display.expression_text, "2.43290201e+18×");
    taper(&mut e, "2");
    let out = e.handle(Evaluate);
    assert_eq!(out.display.result_text, "4.86580402e+18");
}

#[test]
fn sci_debordement_non_fini() {
    let mut e = sci();
    taper(&mut e, "10");
    e.handle(ScientificFunction(F::Power));
    taper(&mut e, "400");
    let out = e.handle(Evaluate);
    assert_eq!(out.display.result_text, "Error");
    assert_eq!(out.display.expression_text, "");
}

#[test]
fn sci_erreur_ne_bloque_pas_la_suite() {
    let mut e = sci();
    taper(&mut e, "90");
    e.handle(ScientificFunction(F::Tan));
    taper(&mut e, "7");
    e.handle(Operator(OperatorKind::Multiply));
    taper(&mut e, "6");
    assert_eq!(e.handle(Evaluate).display.result_text, "42");
}

#[test]
fn sci_deux_instances_independantes() {
    let mut basique = CalculatorEngine::new(EngineMode::Basic);
    let mut scientifique = sci();
    taper(&mut basique, "12");
    taper(&mut scientifique, "30");
    scientifique.handle(ScientificFunction(F::Sin));
    assert_eq!(basique.display().result_text, "12");
    assert_eq!(scientifique.display().result_text, "0.5");
}
