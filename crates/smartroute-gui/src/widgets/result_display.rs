//! Display of a completed generation result.

use crate::ui_state::ResultPanel;
use crate::widgets::markdown;
use smartroute_core::GenerationResult;
use tracing::warn;

/// Action emitted by the result display.
pub enum ResultEvent {
    /// Persist the displayed result as a saved route.
    Save,
}

/// Render the generated narrative plus its location references.
pub fn render(
    ui: &mut egui::Ui,
    result: &GenerationResult,
    panel: &mut ResultPanel,
) -> Option<ResultEvent> {
    let mut event = None;

    ui.add_space(12.0);
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Resultado Gerado").strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if panel.saved {
                    ui.colored_label(egui::Color32::DARK_GREEN, "✔ Rota Salva!");
                } else {
                    let label = if panel.saving { "Salvando..." } else { "💾 Salvar Rota" };
                    if ui.add_enabled(!panel.saving, egui::Button::new(label)).clicked() {
                        event = Some(ResultEvent::Save);
                    }
                }
            });
        });
        ui.separator();

        markdown::render(ui, &result.text);
    });

    if !result.locations.is_empty() {
        ui.add_space(8.0);
        ui.group(|ui| {
            ui.set_min_width(ui.available_width());
            ui.label(egui::RichText::new("📍 Locais Verificados").strong());
            ui.separator();
            for (index, location) in result.locations.iter().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(format!("{}.", index + 1));
                    ui.label(egui::RichText::new(&location.title).strong());
                    if ui.button("🔗 Abrir no mapa").clicked() {
                        if let Err(err) = open::that(&location.uri) {
                            warn!(%err, uri = %location.uri, "failed to open location link");
                        }
                    }
                });
                if let Some(ref review) = location.review {
                    ui.label(egui::RichText::new(format!("“{review}”")).italics().weak());
                }
                ui.add_space(4.0);
            }
        });
    }

    event
}
