// src/noyau/format.rs
//
// Affichage borné d’un f64
// ------------------------
// Règles (dans l’ordre) :
// 1) |x| > 1e15 ou 0 < |x| < 1e-15 : exponentielle, 8 décimales
// 2) |x| < 1e-10 : "0" (bruit trig)
// 3) entier : écriture entière
// 4) sinon : virgule fixe 8 décimales, zéros (et point) finaux retirés
// 5) plus de 15 caractères : exponentielle, 8 décimales
//
// Arrondi : demi s’éloigne de zéro (0.001953125 -> 0.00195313), pas demi-pair.
// Non fini : "NaN", "Infinity", "-Infinity" (le moteur ne les produit jamais).
// Aucune dépendance à la locale : même entrée => même chaîne.

/// Au-delà : exponentielle.
const SEUIL_GRAND: f64 = 1e15;

/// En deçà (non nul) : exponentielle.
const SEUIL_PETIT: f64 = 1e-15;

/// Bruit flottant ramené à "0".
const SEUIL_ZERO: f64 = 1e-10;

const DECIMALES: usize = 8;

/// Longueur maximale d’un affichage non exponentiel.
const LONGUEUR_MAX: usize = 15;

pub fn format_result(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        let s = if x > 0.0 { "Infinity" } else { "-Infinity" };
        return s.to_string();
    }

    let a = x.abs();

    if a > SEUIL_GRAND || (a > 0.0 && a < SEUIL_PETIT) {
        return exponentielle(x);
    }

    if a < SEUIL_ZERO {
        return "0".to_string();
    }

    let s = if x.fract() == 0.0 {
        format!("{x}")
    } else {
        let fixe = virgule_fixe(x);
        let sans_zeros = fixe.trim_end_matches('0');
        sans_zeros
            .strip_suffix('.')
            .unwrap_or(sans_zeros)
            .to_string()
    };

    // "-0" possible si l’arrondi à 8 décimales efface tout (ex: -1e-9)
    let s = if s == "-0" { "0".to_string() } else { s };

    if s.len() > LONGUEUR_MAX {
        return exponentielle(x);
    }
    s
}

/* ------------------------ Arrondi demi-loin-de-zéro ------------------------ */

/// Développement décimal exact de |x| (toujours fini pour un f64) :
/// (partie entière, décimales sans zéros finaux).
fn developpement_exact(a: f64) -> (String, String) {
    let s = format!("{:.1074}", a.abs());
    match s.split_once('.') {
        Some((e, f)) => (e.to_string(), f.trim_end_matches('0').to_string()),
        None => (s, String::new()),
    }
}

/// +1 sur une suite de chiffres ASCII (retenue comprise : "0999" -> "1000", "99" -> "100").
fn plus_un(chiffres: &str) -> String {
    let mut v: Vec<u8> = chiffres.bytes().collect();
    for c in v.iter_mut().rev() {
        if *c == b'9' {
            *c = b'0';
        } else {
            *c += 1;
            return String::from_utf8_lossy(&v).into_owned();
        }
    }
    v.insert(0, b'1');
    String::from_utf8_lossy(&v).into_owned()
}

fn signe(x: f64) -> &'static str {
    if x < 0.0 {
        "-"
    } else {
        ""
    }
}

/// Virgule fixe à DECIMALES chiffres ; égalité parfaite => chiffre supérieur.
fn virgule_fixe(x: f64) -> String {
    let (entier, frac) = developpement_exact(x);
    if frac.len() != DECIMALES + 1 || !frac.ends_with('5') {
        return format!("{x:.prec$}", prec = DECIMALES);
    }

    let arrondi = plus_un(&format!("{entier}{}", &frac[..DECIMALES]));
    let (e, f) = arrondi.split_at(arrondi.len() - DECIMALES);
    format!("{}{e}.{f}", signe(x))
}

/// d.dddddddde±x : exposant toujours signé (1.00000000e+15, 1.00000000e-16).
fn exponentielle(x: f64) -> String {
    let (entier, frac) = developpement_exact(x);
    let chiffres = format!("{entier}{frac}");
    let sans_tete = chiffres.trim_start_matches('0');
    let significatifs = sans_tete.trim_end_matches('0');

    if significatifs.len() == DECIMALES + 2 && significatifs.ends_with('5') {
        // position du premier chiffre significatif
        let zeros_tete = (chiffres.len() - sans_tete.len()) as i32;
        let mut exposant = entier.len() as i32 - 1 - zeros_tete;

        let mut m = plus_un(&significatifs[..=DECIMALES]);
        if m.len() > DECIMALES + 1 {
            m.pop();
            exposant += 1;
        }
        return format!("{}{}.{}e{exposant:+}", signe(x), &m[..1], &m[1..]);
    }

    let s = format!("{x:.prec$e}", prec = DECIMALES);
    match s.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => s,
    }
}
