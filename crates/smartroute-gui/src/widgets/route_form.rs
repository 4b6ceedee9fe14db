//! Route planner form: dynamic address rows, reference city, spreadsheet import.

use crate::ui_state::RouteForm;
use smartroute_core::RouteParams;

/// Action emitted by the route planner form.
pub enum RouteEvent {
    Back,
    /// The user asked to import addresses from a spreadsheet; the app opens
    /// the picker and replaces the rows.
    ImportSpreadsheet,
    Submit(RouteParams),
}

/// Render the route planner form.
pub fn render(ui: &mut egui::Ui, form: &mut RouteForm, is_loading: bool) -> Option<RouteEvent> {
    let mut event = None;

    ui.horizontal(|ui| {
        if ui.link("⬅ Voltar").clicked() {
            event = Some(RouteEvent::Back);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("📄 Importar Planilha").clicked() {
                event = Some(RouteEvent::ImportSpreadsheet);
            }
        });
    });
    if event.is_some() {
        return event;
    }

    ui.add_space(8.0);
    ui.heading("🚚 Planejador de Rotas");
    ui.label("A IA usará a cidade abaixo para encontrar endereços incompletos.");
    ui.add_space(12.0);

    ui.group(|ui| {
        ui.label(egui::RichText::new("📍 Cidade/Região de Referência").strong());
        ui.add(
            egui::TextEdit::singleline(&mut form.reference_city).hint_text("Ex: Bauru, SP"),
        );
        ui.label(
            egui::RichText::new("* Será adicionada automaticamente aos endereços da lista abaixo.")
                .weak(),
        );
    });

    ui.add_space(8.0);

    let mut remove_row = None;
    egui::ScrollArea::vertical()
        .max_height(320.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            let row_count = form.rows.len();
            for (index, row) in form.rows.iter_mut().enumerate() {
                ui.horizontal(|ui| {
                    ui.label(format!("{}.", index + 1));
                    let hint = if index == 0 {
                        "Ponto de partida".to_string()
                    } else {
                        format!("Parada {index}")
                    };
                    ui.add(
                        egui::TextEdit::singleline(row)
                            .hint_text(hint)
                            .desired_width(ui.available_width() - 36.0),
                    );
                    // The form never drops below two rows.
                    if ui.add_enabled(row_count > 2, egui::Button::new("🗑")).clicked() {
                        remove_row = Some(index);
                    }
                });
            }
        });
    if let Some(index) = remove_row {
        form.rows.remove(index);
    }

    if ui.button("➕ Adicionar novo endereço").clicked() {
        form.rows.push(String::new());
    }

    if let Some(ref error) = form.error {
        ui.add_space(6.0);
        ui.colored_label(egui::Color32::RED, error);
    }

    ui.add_space(12.0);
    ui.separator();

    let effective = form.rows.iter().filter(|row| !row.trim().is_empty()).count();
    let label = if is_loading {
        "⏳ Otimizando Rota..."
    } else {
        "🚚 Gerar Rota Otimizada"
    };
    let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 40.0));
    if ui.add_enabled(!is_loading && effective >= 2, button).clicked() {
        match RouteParams::from_rows(&form.rows, &form.reference_city) {
            Ok(params) => {
                form.error = None;
                event = Some(RouteEvent::Submit(params));
            }
            Err(err) => form.error = Some(err.to_string()),
        }
    }

    event
}
