// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Onglets : Calculatrice / Scientifique / Convertisseur
// - Tactile : gros boutons en grille (Grid), comme un pavé physique
// - Historique repliable, thème clair/sombre
//
// Note :
// - Le clavier physique est traité dans app.rs (hors champs texte).
// - La vue n’interprète rien : chaque bouton devient un InputEvent.

use eframe::egui;

use super::etat::{AppCalc, Mode, OngletConvertisseur};
use crate::noyau::{InputEvent, OperatorKind, ScientificFunction, UnitCategory};

const TAILLE_TOUCHE: [f32; 2] = [64.0, 40.0];
const TAILLE_RESULTAT: f32 = 30.0;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.ui_barre(ui);
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.mode {
                Mode::Calculatrice | Mode::Scientifique => {
                    self.ui_affichage(ui);
                    ui.add_space(8.0);
                    if self.mode == Mode::Scientifique {
                        self.ui_fonctions(ui);
                        ui.add_space(6.0);
                    }
                    self.ui_pave_numerique(ui);

                    if self.historique_visible {
                        ui.add_space(8.0);
                        ui.separator();
                        self.ui_historique(ui);
                    }
                }
                Mode::Convertisseur => self.ui_convertisseur(ui),
            });
    }

    fn ui_barre(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.mode, Mode::Calculatrice, "Calculatrice");
            ui.selectable_value(&mut self.mode, Mode::Scientifique, "Scientifique");
            ui.selectable_value(&mut self.mode, Mode::Convertisseur, "Convertisseur");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let theme = if self.sombre { "Clair" } else { "Sombre" };
                if ui.button(theme).on_hover_text("Changer de thème").clicked() {
                    self.basculer_theme();
                }
                if self.mode != Mode::Convertisseur {
                    let titre = if self.historique_visible {
                        "Masquer l’historique"
                    } else {
                        "Historique"
                    };
                    if ui.button(titre).clicked() {
                        self.basculer_historique();
                    }
                }
            });
        });
    }

    /* ------------------------ Calculatrice ------------------------ */

    fn ui_affichage(&mut self, ui: &mut egui::Ui) {
        let Some(moteur) = self.moteur() else {
            return;
        };
        let d = moteur.display();

        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::top_down(egui::Align::Max), |ui| {
                    ui.label(egui::RichText::new(&d.expression_text).monospace().weak());
                    ui.label(
                        egui::RichText::new(&d.result_text)
                            .monospace()
                            .size(TAILLE_RESULTAT),
                    );
                });
            });
    }

    fn ui_fonctions(&mut self, ui: &mut egui::Ui) {
        use ScientificFunction as F;

        egui::Grid::new("pave_scientifique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for rangee in [
                    [F::Sin, F::Cos, F::Tan, F::Pi],
                    [F::Log, F::Ln, F::Sqrt, F::Square],
                ] {
                    for f in rangee {
                        self.bouton_fonction(ui, f);
                    }
                    ui.end_row();
                }

                self.bouton_fonction(ui, F::Power);
                self.bouton_fonction(ui, F::Exp);
                self.bouton_fonction(ui, F::Factorial);
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_action(ui, "C", "Remise à zéro", InputEvent::Clear);
                self.bouton_action(ui, "DEL", "Efface le dernier chiffre", InputEvent::Delete);
                self.bouton_action(ui, "%", "Pourcentage", InputEvent::Percent);
                self.bouton_operateur(ui, OperatorKind::Divide);
                ui.end_row();

                self.bouton_chiffre(ui, 7);
                self.bouton_chiffre(ui, 8);
                self.bouton_chiffre(ui, 9);
                self.bouton_operateur(ui, OperatorKind::Multiply);
                ui.end_row();

                self.bouton_chiffre(ui, 4);
                self.bouton_chiffre(ui, 5);
                self.bouton_chiffre(ui, 6);
                self.bouton_operateur(ui, OperatorKind::Subtract);
                ui.end_row();

                self.bouton_chiffre(ui, 1);
                self.bouton_chiffre(ui, 2);
                self.bouton_chiffre(ui, 3);
                self.bouton_operateur(ui, OperatorKind::Add);
                ui.end_row();

                self.bouton_chiffre(ui, 0);
                self.bouton_action(ui, ".", "Virgule", InputEvent::DecimalPoint);
                self.bouton_action(ui, "=", "Évaluer", InputEvent::Evaluate);
                ui.label("");
                ui.end_row();
            });
    }

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(format!("Historique ({})", self.historique.len()))
            .default_open(true)
            .show(ui, |ui| {
                if self.historique.is_empty() {
                    ui.weak("aucun calcul");
                    return;
                }

                for (i, ligne) in self.historique.iter().enumerate() {
                    ui.push_id(i, |ui| {
                        ui.horizontal(|ui| {
                            ui.weak(ligne.heure.as_str());
                            ui.monospace(format!("{} = {}", ligne.expression, ligne.resultat));
                        });
                    });
                }

                ui.add_space(4.0);
                if ui.button("Effacer l’historique").clicked() {
                    self.clear_historique();
                }
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, ev: InputEvent) {
        let resp = ui
            .add_sized(TAILLE_TOUCHE, egui::Button::new(label))
            .on_hover_text(tip);
        if resp.clicked() {
            self.envoyer(ev);
        }
    }

    fn bouton_chiffre(&mut self, ui: &mut egui::Ui, d: u8) {
        let resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(d.to_string()));
        if resp.clicked() {
            self.envoyer(InputEvent::Digit(d));
        }
    }

    fn bouton_operateur(&mut self, ui: &mut egui::Ui, op: OperatorKind) {
        let resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(op.glyph().to_string()));
        if resp.clicked() {
            self.envoyer(InputEvent::Operator(op));
        }
    }

    fn bouton_fonction(&mut self, ui: &mut egui::Ui, f: ScientificFunction) {
        let resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(f.libelle()));
        if resp.clicked() {
            self.envoyer(InputEvent::ScientificFunction(f));
        }
    }

    /* ------------------------ Convertisseur ------------------------ */

    fn ui_convertisseur(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.onglet, OngletConvertisseur::Unites, "Unités");
            ui.selectable_value(&mut self.onglet, OngletConvertisseur::Devises, "Devises");
        });
        ui.add_space(6.0);

        match self.onglet {
            OngletConvertisseur::Unites => self.ui_unites(ui),
            OngletConvertisseur::Devises => self.ui_devises(ui),
        }
    }

    fn ui_unites(&mut self, ui: &mut egui::Ui) {
        let mut categorie = self.categorie;
        egui::ComboBox::from_id_salt("categorie")
            .selected_text(categorie.libelle())
            .show_ui(ui, |ui| {
                for c in UnitCategory::TOUTES {
                    ui.selectable_value(&mut categorie, c, c.libelle());
                }
            });
        self.changer_categorie(categorie);

        ui.add_space(6.0);
        let unites: Vec<&'static str> = self.categorie.units().collect();

        egui::Grid::new("grille_unites")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("De :");
                Self::choix(ui, "unite_de", &mut self.unite_de, &unites);
                ui.end_row();

                ui.label("Valeur :");
                ui.add(egui::TextEdit::singleline(&mut self.valeur_de).id_salt("valeur_de"));
                ui.end_row();

                ui.label("Vers :");
                Self::choix(ui, "unite_vers", &mut self.unite_vers, &unites);
                ui.end_row();
            });

        ui.add_space(6.0);
        if ui.button("Échanger").clicked() {
            self.echanger_unites();
        }

        ui.add_space(6.0);
        Self::champ_monospace(ui, "resultat_unite", &self.resultat_unite());
    }

    fn ui_devises(&mut self, ui: &mut egui::Ui) {
        let codes: Vec<String> = self.devises.codes().map(str::to_string).collect();
        let codes_ref: Vec<&str> = codes.iter().map(String::as_str).collect();

        egui::Grid::new("grille_devises")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("De :");
                Self::choix(ui, "devise_de", &mut self.devise_de, &codes_ref);
                ui.end_row();

                ui.label("Montant :");
                ui.add(egui::TextEdit::singleline(&mut self.montant_de).id_salt("montant_de"));
                ui.end_row();

                ui.label("Vers :");
                Self::choix(ui, "devise_vers", &mut self.devise_vers, &codes_ref);
                ui.end_row();
            });

        ui.add_space(6.0);
        if ui.button("Échanger").clicked() {
            self.echanger_devises();
        }

        ui.add_space(6.0);
        let (montant, taux) = self.resultat_devise();
        Self::champ_monospace(ui, "resultat_devise", &montant);
        ui.weak(taux);

        ui.add_space(8.0);
        egui::CollapsingHeader::new(format!("Taux (pour 1 {})", self.devises.base()))
            .default_open(false)
            .show(ui, |ui| {
                for code in &codes {
                    if code == self.devises.base() {
                        continue;
                    }
                    let Some(mut r) = self.devises.rate_for(code) else {
                        continue;
                    };
                    ui.horizontal(|ui| {
                        ui.monospace(code.as_str());
                        let resp = ui.add(
                            egui::DragValue::new(&mut r)
                                .speed(0.01)
                                .range(0.0..=1.0e6),
                        );
                        if resp.changed() {
                            self.devises.set_rate(code.as_str(), r);
                        }
                    });
                }
            });
    }

    fn choix(ui: &mut egui::Ui, id: &str, valeur: &mut String, options: &[&str]) {
        egui::ComboBox::from_id_salt(id)
            .selected_text(valeur.as_str())
            .show_ui(ui, |ui| {
                for &o in options {
                    if ui.selectable_label(valeur.as_str() == o, o).clicked() {
                        *valeur = o.to_string();
                    }
                }
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }
}
