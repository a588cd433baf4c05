// src/noyau/trig.rs
//
// Trig en degrés (angles “exactement reconnus”) pour sin/cos/tan
// -------------------------------------------------------------
// - Réduction de l’angle dans [0, 360)
// - Table statique des angles spéciaux : forme exacte q·√r (q rationnel, r ∈ {1,2,3})
// - Sinon : fonction standard sur deg·π/180

use std::fmt;

use num_rational::Rational64;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::EvalError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

impl TrigFn {
    fn nom(self) -> &'static str {
        match self {
            TrigFn::Sin => "sin",
            TrigFn::Cos => "cos",
            TrigFn::Tan => "tan",
        }
    }
}

/// Valeur exacte q·√r.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormeExacte {
    q: Rational64,
    r: u32,
}

const fn forme(n: i64, d: i64, r: u32) -> FormeExacte {
    FormeExacte {
        q: Rational64::new_raw(n, d),
        r,
    }
}

impl FormeExacte {
    /// Conversion f64 : n·√r/d (exact pour les demis, bruit minimal sinon).
    pub fn valeur(&self) -> f64 {
        let racine = f64::from(self.r).sqrt();
        match (self.q.numer().to_f64(), self.q.denom().to_f64()) {
            (Some(n), Some(d)) => n * racine / d,
            _ => f64::NAN,
        }
    }
}

/// Affichage “joli” : 1/2, √2/2, -√3/3, √3, -1…
impl fmt::Display for FormeExacte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.q.is_zero() {
            return write!(f, "0");
        }
        if self.r == 1 {
            return write!(f, "{}", self.q);
        }

        let signe = if self.q.is_negative() { "-" } else { "" };
        let p = self.q.numer().abs();
        let d = *self.q.denom();

        let tete = if p.is_one() {
            format!("{signe}√{}", self.r)
        } else {
            format!("{signe}{p}√{}", self.r)
        };
        if d == 1 {
            write!(f, "{tete}")
        } else {
            write!(f, "{tete}/{d}")
        }
    }
}

/// Ligne de table : (angle, sin, cos, tan) ; tan = None => asymptote.
type Ligne = (i64, FormeExacte, FormeExacte, Option<FormeExacte>);

const ZERO: FormeExacte = forme(0, 1, 1);
const UN: FormeExacte = forme(1, 1, 1);
const MOINS_UN: FormeExacte = forme(-1, 1, 1);
const DEMI: FormeExacte = forme(1, 2, 1);
const MOINS_DEMI: FormeExacte = forme(-1, 2, 1);
const RAC2_2: FormeExacte = forme(1, 2, 2);
const MOINS_RAC2_2: FormeExacte = forme(-1, 2, 2);
const RAC3_2: FormeExacte = forme(1, 2, 3);
const MOINS_RAC3_2: FormeExacte = forme(-1, 2, 3);
const RAC3_3: FormeExacte = forme(1, 3, 3);
const MOINS_RAC3_3: FormeExacte = forme(-1, 3, 3);
const RAC3: FormeExacte = forme(1, 1, 3);
const MOINS_RAC3: FormeExacte = forme(-1, 1, 3);

static ANGLES_SPECIAUX: [Ligne; 16] = [
    (0, ZERO, UN, Some(ZERO)),
    (30, DEMI, RAC3_2, Some(RAC3_3)),
    (45, RAC2_2, RAC2_2, Some(UN)),
    (60, RAC3_2, DEMI, Some(RAC3)),
    (90, UN, ZERO, None),
    (120, RAC3_2, MOINS_DEMI, Some(MOINS_RAC3)),
    (135, RAC2_2, MOINS_RAC2_2, Some(MOINS_UN)),
    (150, DEMI, MOINS_RAC3_2, Some(MOINS_RAC3_3)),
    (180, ZERO, MOINS_UN, Some(ZERO)),
    (210, MOINS_DEMI, MOINS_RAC3_2, Some(RAC3_3)),
    (225, MOINS_RAC2_2, MOINS_RAC2_2, Some(UN)),
    (240, MOINS_RAC3_2, MOINS_DEMI, Some(RAC3)),
    (270, MOINS_UN, ZERO, None),
    (300, MOINS_RAC3_2, DEMI, Some(MOINS_RAC3)),
    (315, MOINS_RAC2_2, RAC2_2, Some(MOINS_UN)),
    (330, MOINS_DEMI, RAC3_2, Some(MOINS_RAC3_3)),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrigOutcome {
    Valeur(FormeExacte),
    Indefini,
}

/// Réduit un angle en degrés dans [0, 360).
pub fn normaliser_degres(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d < 0.0 {
        d += 360.0;
    }
    // -1e-20 + 360 s’arrondit à 360
    if d >= 360.0 {
        d -= 360.0;
    }
    d
}

/// Reconnaît les angles spéciaux (angle déjà normalisé).
///
/// Retour:
/// - Some(Valeur(forme)) si reconnu
/// - Some(Indefini) pour tan(90°), tan(270°)
/// - None si non reconnu
pub fn trig_special(deg: f64, f: TrigFn) -> Option<TrigOutcome> {
    if deg.fract() != 0.0 {
        return None;
    }
    let cle = deg.to_i64()?;
    if cle % 15 != 0 {
        return None;
    }

    let (_, s, c, t) = ANGLES_SPECIAUX.iter().find(|(a, ..)| *a == cle)?;
    let out = match f {
        TrigFn::Sin => TrigOutcome::Valeur(*s),
        TrigFn::Cos => TrigOutcome::Valeur(*c),
        TrigFn::Tan => match t {
            Some(v) => TrigOutcome::Valeur(*v),
            None => TrigOutcome::Indefini,
        },
    };
    Some(out)
}

/// sin/cos/tan d’un angle en degrés.
pub fn trig_degres(f: TrigFn, deg: f64) -> Result<f64, EvalError> {
    if !deg.is_finite() {
        return Err(EvalError::NonFinite);
    }
    let d = normaliser_degres(deg);

    match trig_special(d, f) {
        Some(TrigOutcome::Valeur(forme)) => {
            log::debug!("{}({d}°) = {forme}", f.nom());
            Ok(forme.valeur())
        }
        Some(TrigOutcome::Indefini) => {
            log::debug!("{}({d}°) = indéfini", f.nom());
            Err(EvalError::Undefined)
        }
        None => {
            let rad = d.to_radians();
            Ok(match f {
                TrigFn::Sin => rad.sin(),
                TrigFn::Cos => rad.cos(),
                TrigFn::Tan => rad.tan(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalisation() {
        assert_eq!(normaliser_degres(390.0), 30.0);
        assert_eq!(normaliser_degres(-30.0), 330.0);
        assert_eq!(normaliser_degres(-360.0), 0.0);
        assert_eq!(normaliser_degres(720.0), 0.0);
        assert!(normaliser_degres(-1e-20) < 360.0);
    }

    #[test]
    fn valeurs_exactes() {
        assert_eq!(trig_degres(TrigFn::Sin, 30.0), Ok(0.5));
        assert_eq!(trig_degres(TrigFn::Sin, 150.0), Ok(0.5));
        assert_eq!(trig_degres(TrigFn::Cos, 60.0), Ok(0.5));
        assert_eq!(trig_degres(TrigFn::Cos, 180.0), Ok(-1.0));
        assert_eq!(trig_degres(TrigFn::Sin, 180.0), Ok(0.0));
        assert_eq!(trig_degres(TrigFn::Tan, 45.0), Ok(1.0));
        assert_eq!(trig_degres(TrigFn::Tan, 135.0), Ok(-1.0));
        assert_eq!(
            trig_degres(TrigFn::Sin, 45.0),
            Ok(std::f64::consts::SQRT_2 / 2.0)
        );
    }

    #[test]
    fn periodicite_et_angles_negatifs() {
        assert_eq!(trig_degres(TrigFn::Sin, 390.0), Ok(0.5));
        assert_eq!(trig_degres(TrigFn::Sin, -30.0), Ok(-0.5));
        assert_eq!(trig_degres(TrigFn::Cos, -60.0), Ok(0.5));
        assert_eq!(trig_degres(TrigFn::Cos, 360.0), Ok(1.0));
    }

    #[test]
    fn tangente_indefinie() {
        assert_eq!(trig_degres(TrigFn::Tan, 90.0), Err(EvalError::Undefined));
        assert_eq!(trig_degres(TrigFn::Tan, 270.0), Err(EvalError::Undefined));
        assert_eq!(trig_degres(TrigFn::Tan, -90.0), Err(EvalError::Undefined));
        assert_eq!(trig_degres(TrigFn::Tan, 450.0), Err(EvalError::Undefined));
    }

    #[test]
    fn repli_transcendant() {
        let s = trig_degres(TrigFn::Sin, 10.0).unwrap();
        assert!((s - 10f64.to_radians().sin()).abs() < 1e-15);
        // 15° : multiple de 15 mais sans forme exacte dans la table
        assert_eq!(trig_special(15.0, TrigFn::Sin), None);
        assert_eq!(trig_special(30.5, TrigFn::Sin), None);
    }

    #[test]
    fn formes_affichees() {
        assert_eq!(RAC2_2.to_string(), "√2/2");
        assert_eq!(MOINS_RAC3_3.to_string(), "-√3/3");
        assert_eq!(RAC3.to_string(), "√3");
        assert_eq!(MOINS_DEMI.to_string(), "-1/2");
        assert_eq!(ZERO.to_string(), "0");
    }

    #[test]
    fn table_coherente_avec_le_flottant() {
        for (a, s, c, t) in ANGLES_SPECIAUX.iter() {
            let rad = (*a as f64).to_radians();
            assert!((s.valeur() - rad.sin()).abs() < 1e-12, "sin({a})");
            assert!((c.valeur() - rad.cos()).abs() < 1e-12, "cos({a})");
            if let Some(t) = t {
                assert!((t.valeur() - rad.tan()).abs() < 1e-12, "tan({a})");
            }
        }
    }
}
