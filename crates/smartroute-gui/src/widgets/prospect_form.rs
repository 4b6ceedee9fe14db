//! Prospecting form: business type, target location, lead count.

use crate::ui_state::ProspectForm;
use smartroute_core::{LeadCount, SearchParams};

/// Action emitted by the prospecting form.
pub enum ProspectEvent {
    Back,
    Submit(SearchParams),
}

/// Selector copy for each lead-count option.
fn count_label(count: LeadCount) -> &'static str {
    match count {
        LeadCount::Three => "3 leads (Rápido)",
        LeadCount::Five => "5 leads (Padrão)",
        LeadCount::Ten => "10 leads (Detalhado)",
    }
}

/// Render the prospecting form. Validation is local and synchronous; a
/// gateway is only reached through the returned [`SearchParams`].
pub fn render(ui: &mut egui::Ui, form: &mut ProspectForm, is_loading: bool) -> Option<ProspectEvent> {
    let mut event = None;

    if ui.link("⬅ Voltar").clicked() {
        return Some(ProspectEvent::Back);
    }

    ui.add_space(8.0);
    ui.heading("👥 Prospecção de Clientes");
    ui.label("Defina o perfil do cliente ideal e a região alvo.");
    ui.add_space(12.0);

    ui.horizontal(|ui| {
        ui.label("Tipo de Estabelecimento:");
        ui.add(
            egui::TextEdit::singleline(&mut form.business_type)
                .hint_text("Ex: Padarias, Restaurantes, Dentistas..."),
        );
    });

    ui.add_space(6.0);

    ui.horizontal(|ui| {
        ui.label("Localização Alvo:");
        ui.add(
            egui::TextEdit::singleline(&mut form.location)
                .hint_text("Ex: Centro, São Paulo - SP"),
        );
    });

    ui.add_space(6.0);

    ui.horizontal(|ui| {
        ui.label("Quantidade de Resultados:");
        egui::ComboBox::from_id_salt("lead_count_selector")
            .selected_text(count_label(form.count))
            .show_ui(ui, |ui| {
                for count in LeadCount::ALL {
                    ui.selectable_value(&mut form.count, count, count_label(count));
                }
            });
    });

    if let Some(ref error) = form.error {
        ui.add_space(6.0);
        ui.colored_label(egui::Color32::RED, error);
    }

    ui.add_space(12.0);

    let label = if is_loading {
        "⏳ Gerando Lista..."
    } else {
        "🔍 Gerar Lista de Prospecção"
    };
    let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 40.0));
    if ui.add_enabled(!is_loading, button).clicked() {
        match SearchParams::new(&form.business_type, &form.location, form.count) {
            Ok(params) => {
                form.error = None;
                event = Some(ProspectEvent::Submit(params));
            }
            Err(err) => form.error = Some(err.to_string()),
        }
    }

    event
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_lead_count_has_selector_copy() {
        for count in LeadCount::ALL {
            let label = count_label(count);
            assert!(label.starts_with(&count.value().to_string()));
        }
    }
}
