//! src/noyau/moteur.rs
//!
//! Accumulateur d’expression (machine à états, un exemplaire par mode).
//!
//! Contrats :
//! - Un événement = une transition complète, synchrone.
//! - En phase `Accumulating`, `current_input` est un numéral partiel valide
//!   (chiffres, au plus un point). En `AwaitingOperand`, il peut contenir un résultat formaté.
//! - `pending_expression` est vide ou se termine par un symbole d’opérateur.
//! - Les erreurs s’arrêtent ici : seul leur message sort (DisplayState).

use super::erreur::{fini, EvalError};
use super::eval::evaluate;
use super::fonctions::{Application, ScientificFunction};
use super::format::format_result;

/// Tampon au repos.
const ZERO: &str = "0";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatorKind {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl OperatorKind {
    /// Glyphe d’affichage (celui que normaliser() réécrit).
    pub fn glyph(self) -> char {
        match self {
            OperatorKind::Add => '+',
            OperatorKind::Subtract => '−',
            OperatorKind::Multiply => '×',
            OperatorKind::Divide => '÷',
        }
    }
}

/// Seule différence entre les deux instances : la table de fonctions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineMode {
    Basic,
    Scientific,
}

/// Remplace le booléen “fresh input”.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputPhase {
    /// Le prochain chiffre démarre un nouvel opérande.
    AwaitingOperand,
    /// Les chiffres s’ajoutent au tampon.
    Accumulating,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Digit(u8),
    DecimalPoint,
    Operator(OperatorKind),
    Evaluate,
    Delete,
    Clear,
    Percent,
    ScientificFunction(ScientificFunction),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayState {
    pub expression_text: String,
    pub result_text: String,
}

/// Paire émise à chaque évaluation réussie (le stockage est l’affaire de l’UI).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventOutcome {
    pub display: DisplayState,
    pub history: Option<HistoryEntry>,
}

#[derive(Clone, Debug)]
pub struct CalculatorEngine {
    mode: EngineMode,
    pending_expression: String,
    current_input: String,
    phase: InputPhase,
    last_result: Option<String>,
    last_operator: Option<OperatorKind>,
    // message d’erreur affiché à la place du tampon (jusqu’au prochain événement)
    message: Option<String>,
}

impl CalculatorEngine {
    pub fn new(mode: EngineMode) -> Self {
        Self {
            mode,
            pending_expression: String::new(),
            current_input: ZERO.to_string(),
            phase: InputPhase::AwaitingOperand,
            last_result: None,
            last_operator: None,
            message: None,
        }
    }

    // Accesseurs d’inspection : seuls les tests regardent sous le capot.

    #[cfg(test)]
    pub fn phase(&self) -> InputPhase {
        self.phase
    }

    #[cfg(test)]
    pub fn pending_expression(&self) -> &str {
        &self.pending_expression
    }

    #[cfg(test)]
    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    #[cfg(test)]
    pub fn last_result(&self) -> Option<&str> {
        self.last_result.as_deref()
    }

    #[cfg(test)]
    pub fn last_operator(&self) -> Option<OperatorKind> {
        self.last_operator
    }

    pub fn display(&self) -> DisplayState {
        DisplayState {
            expression_text: self.pending_expression.clone(),
            result_text: self
                .message
                .clone()
                .unwrap_or_else(|| self.current_input.clone()),
        }
    }

    /// Point d’entrée unique pour le collaborateur UI.
    pub fn handle(&mut self, event: InputEvent) -> EventOutcome {
        self.message = None;

        let history = match event {
            InputEvent::Digit(d) => {
                self.append_digit(d);
                None
            }
            InputEvent::DecimalPoint => {
                self.append_decimal_point();
                None
            }
            InputEvent::Operator(op) => self.append_operator(op),
            InputEvent::Evaluate => self.evaluate(),
            InputEvent::Delete => {
                self.delete();
                None
            }
            InputEvent::Clear => {
                self.clear();
                None
            }
            InputEvent::Percent => {
                self.percent();
                None
            }
            InputEvent::ScientificFunction(f) => self.apply_function(f),
        };

        EventOutcome {
            display: self.display(),
            history,
        }
    }

    /* ------------------------ Transitions ------------------------ */

    pub fn append_digit(&mut self, d: u8) {
        if d > 9 {
            log::debug!("chiffre ignoré: {d}");
            return;
        }
        let c = char::from(b'0' + d);

        match self.phase {
            InputPhase::AwaitingOperand => {
                self.current_input = c.to_string();
                self.phase = InputPhase::Accumulating;
            }
            InputPhase::Accumulating if self.current_input == ZERO => {
                self.current_input = c.to_string();
            }
            InputPhase::Accumulating => self.current_input.push(c),
        }
    }

    pub fn append_decimal_point(&mut self) {
        match self.phase {
            InputPhase::AwaitingOperand => {
                self.current_input = "0.".to_string();
                self.phase = InputPhase::Accumulating;
            }
            InputPhase::Accumulating => {
                if !self.current_input.contains('.') {
                    self.current_input.push('.');
                }
            }
        }
    }

    /// Opérateur binaire : chaînage gauche -> droite, sans précédence.
    pub fn append_operator(&mut self, op: OperatorKind) -> Option<HistoryEntry> {
        let history = self.poser_marqueur(op.glyph())?;
        self.last_operator = Some(op);
        history
    }

    /// Pose `marqueur` en fin d’expression en attente (opérateur, '^' ou 'e').
    ///
    /// Retour : None si le chaînage a échoué (l’erreur est déjà affichée),
    /// sinon Some(entrée d’historique éventuelle du chaînage).
    fn poser_marqueur(&mut self, marqueur: char) -> Option<Option<HistoryEntry>> {
        let fresh = self.phase == InputPhase::AwaitingOperand;

        // 1) nouvelle expression à partir du résultat précédent
        if fresh && self.pending_expression.is_empty() {
            if let Some(prev) = self.last_result.clone() {
                self.pending_expression = format!("{prev}{marqueur}");
                self.current_input = ZERO.to_string();
                self.phase = InputPhase::Accumulating;
                return Some(None);
            }
        }

        // 2) changement d’avis : on remplace l’opérateur final
        if !self.pending_expression.is_empty() && self.current_input == ZERO {
            self.pending_expression.pop();
            self.pending_expression.push(marqueur);
            return Some(None);
        }

        // 3) chaînage : évaluer d’abord ce qui est en attente
        let mut history = None;
        if !self.pending_expression.is_empty() {
            history = self.evaluate();
            if history.is_none() {
                return None;
            }
        }
        self.pending_expression = format!("{}{marqueur}", self.current_input);
        self.current_input = ZERO.to_string();
        Some(history)
    }

    pub fn evaluate(&mut self) -> Option<HistoryEntry> {
        if self.pending_expression.is_empty() {
            return None;
        }

        let expression = format!("{}{}", self.pending_expression, self.current_input);
        match evaluate(
            &self.pending_expression,
            &self.current_input,
            self.last_operator,
        ) {
            Ok(v) => {
                let result = format_result(v);
                log::info!("{expression} = {result}");

                self.current_input = result.clone();
                self.last_result = Some(result.clone());
                self.pending_expression.clear();
                self.phase = InputPhase::AwaitingOperand;
                self.last_operator = None;

                Some(HistoryEntry { expression, result })
            }
            Err(e) => {
                self.echec(&expression, e);
                None
            }
        }
    }

    pub fn delete(&mut self) {
        if self.phase == InputPhase::AwaitingOperand {
            self.clear();
            return;
        }
        self.current_input.pop();
        if self.current_input.is_empty() {
            self.current_input = ZERO.to_string();
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new(self.mode);
    }

    /// % : divise l’opérande courant (ou la valeur seule) par 100.
    pub fn percent(&mut self) {
        let res = self.valeur_courante().map(|x| x / 100.0);
        self.deposer_valeur("%", res);
    }

    fn apply_function(&mut self, f: ScientificFunction) -> Option<HistoryEntry> {
        if self.mode == EngineMode::Basic {
            log::debug!("fonction {f:?} ignorée en mode basique");
            return None;
        }

        let app = match self.valeur_courante().and_then(|x| f.appliquer(x)) {
            Ok(app) => app,
            Err(e) => {
                self.echec(f.libelle(), e);
                return None;
            }
        };

        match app {
            Application::Valeur(v) => {
                self.deposer_valeur(f.libelle(), Ok(v));
                None
            }
            Application::Marqueur(m) => {
                let history = self.poser_marqueur(m)?;
                // ^ et e ne sont pas des divisions
                self.last_operator = None;
                history
            }
        }
    }

    /* ------------------------ Outils ------------------------ */

    fn valeur_courante(&self) -> Result<f64, EvalError> {
        self.current_input
            .parse::<f64>()
            .map_err(|_| EvalError::Syntax(format!("tampon illisible: {}", self.current_input)))
    }

    /// Résultat d’une opération unaire : tampon formaté, saisie fraîche.
    /// Sans expression en attente, la valeur devient aussi le dernier résultat.
    fn deposer_valeur(&mut self, origine: &str, res: Result<f64, EvalError>) {
        match res.and_then(fini) {
            Ok(v) => {
                let s = format_result(v);
                if self.pending_expression.is_empty() {
                    self.last_result = Some(s.clone());
                }
                self.current_input = s;
                self.phase = InputPhase::AwaitingOperand;
            }
            Err(e) => self.echec(origine, e),
        }
    }

    /// Récupération d’erreur : message affiché, expression abandonnée, saisie réarmée.
    fn echec(&mut self, contexte: &str, e: EvalError) {
        log::warn!("{contexte}: {e}");
        self.message = Some(e.display_message().to_string());
        self.pending_expression.clear();
        self.current_input = ZERO.to_string();
        self.phase = InputPhase::AwaitingOperand;
        self.last_result = None;
        self.last_operator = None;
    }
}
