// src/noyau/conversion.rs
//
// Conversions d’unités (tables statiques) et de devises (instantané fourni par l’appelant).
// Le noyau ne va jamais chercher de taux : la table arrive toute faite.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConversionError {
    #[error("unité inconnue: {0}")]
    UniteInconnue(String),

    #[error("devise inconnue: {0}")]
    DeviseInconnue(String),

    #[error("taux invalide pour {0}")]
    TauxInvalide(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitCategory {
    Length,
    Weight,
    Temperature,
    Area,
    Volume,
}

/* ------------------------ Tables (facteur vers l’unité de base) ------------------------ */

const LONGUEURS: &[(&str, f64)] = &[
    ("meter", 1.0),
    ("kilometer", 1000.0),
    ("centimeter", 0.01),
    ("millimeter", 0.001),
    ("inch", 0.0254),
    ("foot", 0.3048),
    ("yard", 0.9144),
    ("mile", 1609.344),
];

const MASSES: &[(&str, f64)] = &[
    ("kilogram", 1.0),
    ("gram", 0.001),
    ("pound", 0.45359237),
    ("ounce", 0.028349523125),
];

// facteurs inutilisés : la température passe par le Celsius
const TEMPERATURES: &[(&str, f64)] = &[("celsius", 1.0), ("fahrenheit", 1.0), ("kelvin", 1.0)];

const SURFACES: &[(&str, f64)] = &[
    ("square meter", 1.0),
    ("square kilometer", 1_000_000.0),
    ("square centimeter", 0.0001),
    ("square millimeter", 0.000001),
    ("square inch", 0.00064516),
    ("square foot", 0.09290304),
    ("square yard", 0.83612736),
    ("acre", 4046.8564224),
    ("hectare", 10000.0),
];

const VOLUMES: &[(&str, f64)] = &[
    ("cubic meter", 1.0),
    ("liter", 0.001),
    ("milliliter", 0.000001),
    ("cubic centimeter", 0.000001),
    ("cubic inch", 0.000016387064),
    ("cubic foot", 0.028316846592),
    ("gallon", 0.003785411784),
    ("quart", 0.000946352946),
    ("pint", 0.000473176473),
];

impl UnitCategory {
    pub const TOUTES: [UnitCategory; 5] = [
        UnitCategory::Length,
        UnitCategory::Weight,
        UnitCategory::Temperature,
        UnitCategory::Area,
        UnitCategory::Volume,
    ];

    pub fn libelle(self) -> &'static str {
        match self {
            UnitCategory::Length => "length",
            UnitCategory::Weight => "weight",
            UnitCategory::Temperature => "temperature",
            UnitCategory::Area => "area",
            UnitCategory::Volume => "volume",
        }
    }

    fn table(self) -> &'static [(&'static str, f64)] {
        match self {
            UnitCategory::Length => LONGUEURS,
            UnitCategory::Weight => MASSES,
            UnitCategory::Temperature => TEMPERATURES,
            UnitCategory::Area => SURFACES,
            UnitCategory::Volume => VOLUMES,
        }
    }

    /// Noms d’unités, dans l’ordre de la table.
    pub fn units(self) -> impl Iterator<Item = &'static str> {
        self.table().iter().map(|(nom, _)| *nom)
    }

    fn facteur(self, unite: &str) -> Result<f64, ConversionError> {
        self.table()
            .iter()
            .find(|(nom, _)| *nom == unite)
            .map(|(_, f)| *f)
            .ok_or_else(|| ConversionError::UniteInconnue(unite.to_string()))
    }
}

/// value·from/to ; la température passe par le Celsius.
pub fn convert_unit(
    category: UnitCategory,
    value: f64,
    from: &str,
    to: &str,
) -> Result<f64, ConversionError> {
    if category == UnitCategory::Temperature {
        let celsius = vers_celsius(value, from)?;
        return depuis_celsius(celsius, to);
    }

    let f = category.facteur(from)?;
    let t = category.facteur(to)?;
    Ok(value * f / t)
}

fn vers_celsius(v: f64, from: &str) -> Result<f64, ConversionError> {
    match from {
        "celsius" => Ok(v),
        "fahrenheit" => Ok((v - 32.0) * 5.0 / 9.0),
        "kelvin" => Ok(v - 273.15),
        autre => Err(ConversionError::UniteInconnue(autre.to_string())),
    }
}

fn depuis_celsius(c: f64, to: &str) -> Result<f64, ConversionError> {
    match to {
        "celsius" => Ok(c),
        "fahrenheit" => Ok(c * 9.0 / 5.0 + 32.0),
        "kelvin" => Ok(c + 273.15),
        autre => Err(ConversionError::UniteInconnue(autre.to_string())),
    }
}

/* ------------------------ Devises ------------------------ */

/// Instantané de taux : `rates[code]` = unités de `code` pour 1 `base`.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrencyRateTable {
    base: String,
    rates: BTreeMap<String, f64>,
}

impl CurrencyRateTable {
    /// La devise de base vaut toujours 1.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        let mut rates = BTreeMap::new();
        rates.insert(base.clone(), 1.0);
        Self { base, rates }
    }

    pub fn with_rate(mut self, code: impl Into<String>, rate: f64) -> Self {
        self.set_rate(code, rate);
        self
    }

    pub fn set_rate(&mut self, code: impl Into<String>, rate: f64) {
        self.rates.insert(code.into(), rate);
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.rates.keys().map(String::as_str)
    }

    /// Taux brut tel que stocké (édition côté UI).
    pub fn rate_for(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    fn taux(&self, code: &str) -> Result<f64, ConversionError> {
        let r = *self
            .rates
            .get(code)
            .ok_or_else(|| ConversionError::DeviseInconnue(code.to_string()))?;
        if !(r.is_finite() && r > 0.0) {
            return Err(ConversionError::TauxInvalide(code.to_string()));
        }
        Ok(r)
    }

    /// Taux croisé : 1 `from` = rate(from, to) `to`.
    pub fn rate(&self, from: &str, to: &str) -> Result<f64, ConversionError> {
        Ok(self.taux(to)? / self.taux(from)?)
    }

    pub fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
        Ok(amount / self.taux(from)? * self.taux(to)?)
    }
}
