// src/app.rs
//
// Calculatrice trimode : module App (racine)
// -----------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Le clavier physique est global, SAUF quand un champ texte a le focus
//   (convertisseur) : sinon les chiffres tapés partiraient aussi au moteur.

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::AppCalc;

use eframe::egui;

use crate::noyau::InputEvent;
use etat::{evenement_pour_caractere, Mode};

impl AppCalc {
    /// Événements clavier de la frame -> événements moteur.
    fn lire_clavier(&self, ctx: &egui::Context) -> Vec<InputEvent> {
        if self.mode == Mode::Convertisseur || ctx.wants_keyboard_input() {
            return Vec::new();
        }

        let mode = self.mode;
        ctx.input(|i| {
            let mut out = Vec::new();
            for ev in &i.events {
                match ev {
                    egui::Event::Text(t) => {
                        out.extend(t.chars().filter_map(|c| evenement_pour_caractere(mode, c)));
                    }
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => {
                        let e = match key {
                            egui::Key::Enter => Some(InputEvent::Evaluate),
                            egui::Key::Backspace => Some(InputEvent::Delete),
                            egui::Key::Escape => Some(InputEvent::Clear),
                            _ => None,
                        };
                        out.extend(e);
                    }
                    _ => {}
                }
            }
            out
        })
    }
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(if self.sombre {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        for ev in self.lire_clavier(ctx) {
            self.envoyer(ev);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
