//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler l’accumulateur sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - séquences bornées
//! - budget temps global
//! - invariants vérifiés après CHAQUE événement

use std::time::{Duration, Instant};

use super::fonctions::ScientificFunction as F;
use super::moteur::{CalculatorEngine, EngineMode, InputEvent, InputPhase, OperatorKind};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’événements ------------------------ */

const OPERATEURS: [OperatorKind; 4] = [
    OperatorKind::Add,
    OperatorKind::Subtract,
    OperatorKind::Multiply,
    OperatorKind::Divide,
];

const FONCTIONS: [F; 11] = [
    F::Sin,
    F::Cos,
    F::Tan,
    F::Log,
    F::Ln,
    F::Sqrt,
    F::Square,
    F::Factorial,
    F::Pi,
    F::Power,
    F::Exp,
];

fn gen_event(rng: &mut Rng) -> InputEvent {
    // chiffres majoritaires : sinon les opérandes restent triviaux
    match rng.pick(20) {
        0..=8 => InputEvent::Digit(rng.pick(10) as u8),
        9 => InputEvent::DecimalPoint,
        10..=12 => InputEvent::Operator(OPERATEURS[rng.pick(4) as usize]),
        13 | 14 => InputEvent::Evaluate,
        15 => InputEvent::Delete,
        16 => InputEvent::Percent,
        17 if rng.pick(4) == 0 => InputEvent::Clear,
        _ => InputEvent::ScientificFunction(FONCTIONS[rng.pick(11) as usize]),
    }
}

fn gen_sequence(rng: &mut Rng, n: usize) -> Vec<InputEvent> {
    (0..n).map(|_| gen_event(rng)).collect()
}

/* ------------------------ Invariants ------------------------ */

const MESSAGES: [&str; 7] = [
    "Cannot divide by zero",
    "Invalid input for logarithm",
    "Invalid input for natural logarithm",
    "Invalid input for square root",
    "Invalid input for factorial",
    "Number too large for factorial",
    "Error",
];

fn numeral_partiel(s: &str) -> bool {
    !s.is_empty()
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
        && s.chars().filter(|&c| c == '.').count() <= 1
}

fn check_invariants(e: &CalculatorEngine, ctx: &str) {
    let d = e.display();

    if e.phase() == InputPhase::Accumulating {
        assert!(
            numeral_partiel(e.current_input()),
            "tampon invalide {:?} ({ctx})",
            e.current_input()
        );
    }

    let pending = e.pending_expression();
    if let Some(fin) = pending.chars().last() {
        assert!(
            matches!(fin, '+' | '−' | '×' | '÷' | '^' | 'e'),
            "expression en attente sans opérateur final: {pending:?} ({ctx})"
        );
    }

    let r = d.result_text.as_str();
    assert!(
        MESSAGES.contains(&r) || r.parse::<f64>().is_ok(),
        "affichage illisible: {r:?} ({ctx})"
    );

    if MESSAGES.contains(&r) {
        assert!(d.expression_text.is_empty(), "erreur => expression vidée ({ctx})");
    }
}

fn rejouer(mode: EngineMode, seq: &[InputEvent]) -> Vec<String> {
    let mut e = CalculatorEngine::new(mode);
    let mut affichages = Vec::with_capacity(seq.len());
    for (i, ev) in seq.iter().enumerate() {
        let out = e.handle(*ev);
        check_invariants(&e, &format!("pas {i}: {ev:?}"));
        if let Some(h) = &out.history {
            assert!(!h.expression.is_empty());
            assert!(h.result.parse::<f64>().is_ok(), "historique: {h:?}");
        }
        affichages.push(format!("{}|{}", out.display.expression_text, out.display.result_text));
    }
    affichages
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_invariants_scientifique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);
    let mut rng = Rng::new(0x5EED_CAFE);

    for _ in 0..400 {
        let seq = gen_sequence(&mut rng, 40);
        rejouer(EngineMode::Scientific, &seq);
        budget(t0, max);
    }
}

#[test]
fn fuzz_invariants_basique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(1500);
    let mut rng = Rng::new(42);

    for _ in 0..400 {
        let seq = gen_sequence(&mut rng, 40);
        rejouer(EngineMode::Basic, &seq);
        budget(t0, max);
    }
}

#[test]
fn fuzz_determinisme() {
    let mut rng = Rng::new(7);
    for _ in 0..50 {
        let seq = gen_sequence(&mut rng, 30);
        let a = rejouer(EngineMode::Scientific, &seq);
        let b = rejouer(EngineMode::Scientific, &seq);
        assert_eq!(a, b);
    }
}

#[test]
fn fuzz_effacer_remet_a_neuf() {
    let mut rng = Rng::new(99);
    for _ in 0..100 {
        let seq = gen_sequence(&mut rng, 25);
        let mut e = CalculatorEngine::new(EngineMode::Scientific);
        for ev in &seq {
            e.handle(*ev);
        }
        let apres = e.handle(InputEvent::Clear);
        let neuf = CalculatorEngine::new(EngineMode::Scientific).display();
        assert_eq!(apres.display, neuf);
        assert_eq!(e.phase(), InputPhase::AwaitingOperand);
        assert_eq!(e.last_result(), None);
    }
}
