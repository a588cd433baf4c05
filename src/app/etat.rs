//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir les deux moteurs (basique / scientifique), l’historique en mémoire,
//! le thème et l’état du convertisseur ; router les événements vers le bon moteur.
//!
//! Contrats :
//! - Aucun calcul ici : tout passe par le noyau (CalculatorEngine, convert_unit, taux).
//! - Actions déterministes, sans effet de bord caché (hors horodatage de l’historique).
//! - Défense en profondeur : historique borné.

use crate::noyau::conversion::ConversionError;
use crate::noyau::{
    convert_unit, format_result, CalculatorEngine, CurrencyRateTable, EngineMode, HistoryEntry,
    InputEvent, OperatorKind, ScientificFunction, UnitCategory,
};

/// Garde-fou : nombre maximal de lignes d’historique gardées en mémoire.
const HISTORIQUE_MAX: usize = 100;

/// Format de l’heure affichée dans l’historique.
const FORMAT_HEURE: &str = "%H:%M:%S";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Calculatrice,
    Scientifique,
    Convertisseur,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OngletConvertisseur {
    Unites,
    Devises,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LigneHistorique {
    pub expression: String,
    pub resultat: String,
    pub heure: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- modes ---
    pub mode: Mode,
    pub basique: CalculatorEngine,
    pub scientifique: CalculatorEngine,

    // --- historique (plus récent en tête) ---
    pub historique: Vec<LigneHistorique>,
    pub historique_visible: bool,

    // --- thème ---
    pub sombre: bool,

    // --- convertisseur ---
    pub onglet: OngletConvertisseur,
    pub categorie: UnitCategory,
    pub unite_de: String,
    pub unite_vers: String,
    pub valeur_de: String,

    pub devises: CurrencyRateTable,
    pub devise_de: String,
    pub devise_vers: String,
    pub montant_de: String,
}

/// Instantané local (pas de réseau) : unités pour 1 USD.
fn taux_par_defaut() -> CurrencyRateTable {
    CurrencyRateTable::new("USD")
        .with_rate("EUR", 0.92)
        .with_rate("GBP", 0.79)
        .with_rate("JPY", 149.5)
        .with_rate("CHF", 0.88)
        .with_rate("CAD", 1.36)
        .with_rate("AUD", 1.52)
        .with_rate("CNY", 7.24)
        .with_rate("INR", 83.1)
}

impl Default for AppCalc {
    fn default() -> Self {
        let categorie = UnitCategory::Length;
        let (unite_de, unite_vers) = unites_par_defaut(categorie);
        Self {
            mode: Mode::Calculatrice,
            basique: CalculatorEngine::new(EngineMode::Basic),
            scientifique: CalculatorEngine::new(EngineMode::Scientific),
            historique: Vec::new(),
            historique_visible: false,
            sombre: true, // au démarrage : thème sombre
            onglet: OngletConvertisseur::Unites,
            categorie,
            unite_de,
            unite_vers,
            valeur_de: "1".to_string(),
            devises: taux_par_defaut(),
            devise_de: "USD".to_string(),
            devise_vers: "EUR".to_string(),
            montant_de: "1".to_string(),
        }
    }
}

/// Première et deuxième unité de la table (comme les listes déroulantes au départ).
fn unites_par_defaut(c: UnitCategory) -> (String, String) {
    let mut it = c.units();
    let de = it.next().unwrap_or_default().to_string();
    let vers = it.next().map(str::to_string).unwrap_or_else(|| de.clone());
    (de, vers)
}

/// Une saisie illisible vaut 0 (y compris "inf" / "nan", acceptés par `f64::from_str`).
fn lire_nombre(s: &str) -> f64 {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

impl AppCalc {
    /* ------------------------ Calculatrice ------------------------ */

    /// Moteur du mode courant (None en mode convertisseur).
    pub fn moteur(&self) -> Option<&CalculatorEngine> {
        match self.mode {
            Mode::Calculatrice => Some(&self.basique),
            Mode::Scientifique => Some(&self.scientifique),
            Mode::Convertisseur => None,
        }
    }

    /// Envoie un événement au moteur du mode courant et archive l’éventuel résultat.
    pub fn envoyer(&mut self, ev: InputEvent) {
        let moteur = match self.mode {
            Mode::Calculatrice => &mut self.basique,
            Mode::Scientifique => &mut self.scientifique,
            Mode::Convertisseur => {
                log::debug!("événement {ev:?} ignoré (convertisseur)");
                return;
            }
        };

        let out = moteur.handle(ev);
        if let Some(h) = out.history {
            self.archiver(h);
        }
    }

    fn archiver(&mut self, h: HistoryEntry) {
        let heure = chrono::Local::now().format(FORMAT_HEURE).to_string();
        self.historique.insert(
            0,
            LigneHistorique {
                expression: h.expression,
                resultat: h.result,
                heure,
            },
        );
        self.historique.truncate(HISTORIQUE_MAX);
    }

    pub fn clear_historique(&mut self) {
        self.historique.clear();
    }

    pub fn basculer_historique(&mut self) {
        self.historique_visible = !self.historique_visible;
    }

    pub fn basculer_theme(&mut self) {
        self.sombre = !self.sombre;
    }

    /* ------------------------ Convertisseur : unités ------------------------ */

    pub fn changer_categorie(&mut self, c: UnitCategory) {
        if c == self.categorie {
            return;
        }
        self.categorie = c;
        let (de, vers) = unites_par_defaut(c);
        self.unite_de = de;
        self.unite_vers = vers;
    }

    pub fn resultat_unite(&self) -> String {
        match convert_unit(
            self.categorie,
            lire_nombre(&self.valeur_de),
            &self.unite_de,
            &self.unite_vers,
        ) {
            Ok(v) => format_result(v),
            Err(e) => e.to_string(),
        }
    }

    /// Échange les unités ; la valeur convertie devient la nouvelle saisie.
    pub fn echanger_unites(&mut self) {
        let converti = self.resultat_unite();
        std::mem::swap(&mut self.unite_de, &mut self.unite_vers);
        self.valeur_de = converti;
    }

    /* ------------------------ Convertisseur : devises ------------------------ */

    fn conversion_devise(&self) -> Result<(String, String), ConversionError> {
        let montant = self.devises.convert(
            lire_nombre(&self.montant_de),
            &self.devise_de,
            &self.devise_vers,
        )?;
        let taux = self.devises.rate(&self.devise_de, &self.devise_vers)?;
        let libelle = format!(
            "1 {} = {} {}",
            self.devise_de,
            format_result(taux),
            self.devise_vers
        );
        Ok((format_result(montant), libelle))
    }

    /// (montant converti, libellé du taux) ; message d’erreur à la place du taux sinon.
    pub fn resultat_devise(&self) -> (String, String) {
        match self.conversion_devise() {
            Ok(r) => r,
            Err(e) => (String::new(), e.to_string()),
        }
    }

    pub fn echanger_devises(&mut self) {
        let (converti, _) = self.resultat_devise();
        std::mem::swap(&mut self.devise_de, &mut self.devise_vers);
        self.montant_de = converti;
    }
}

/* ------------------------ Clavier physique ------------------------ */

/// Caractère tapé -> événement moteur (None si la touche n’a pas de sens dans ce mode).
///
/// Enter / Backspace / Escape ne produisent pas de texte : app.rs les traite à part.
pub fn evenement_pour_caractere(mode: Mode, c: char) -> Option<InputEvent> {
    let commun = match c {
        '0'..='9' => c.to_digit(10).map(|d| InputEvent::Digit(d as u8)),
        '.' => Some(InputEvent::DecimalPoint),
        '+' => Some(InputEvent::Operator(OperatorKind::Add)),
        '-' => Some(InputEvent::Operator(OperatorKind::Subtract)),
        '*' => Some(InputEvent::Operator(OperatorKind::Multiply)),
        '/' => Some(InputEvent::Operator(OperatorKind::Divide)),
        '=' => Some(InputEvent::Evaluate),
        '%' => Some(InputEvent::Percent),
        _ => None,
    };
    if commun.is_some() {
        return commun;
    }

    match (mode, c.to_ascii_lowercase()) {
        (Mode::Scientifique, 'p') => Some(InputEvent::ScientificFunction(ScientificFunction::Pi)),
        (Mode::Scientifique, 'e') => Some(InputEvent::ScientificFunction(ScientificFunction::Exp)),
        (Mode::Scientifique, '^') => {
            Some(InputEvent::ScientificFunction(ScientificFunction::Power))
        }
        (Mode::Scientifique, '!') => {
            Some(InputEvent::ScientificFunction(ScientificFunction::Factorial))
        }
        _ => None,
    }
}
