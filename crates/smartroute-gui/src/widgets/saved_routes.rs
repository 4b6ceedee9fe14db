//! Saved routes browser: list and detail views over the History fetch.

use chrono::Local;

use crate::state::HistoryState;
use crate::ui_state::HistoryPanel;
use crate::widgets::markdown;

/// Action emitted by the saved-routes browser.
pub enum HistoryEvent {
    /// Leave the History screen entirely (the list/detail toggle is local).
    Back,
}

/// Render the saved-routes browser.
pub fn render(
    ui: &mut egui::Ui,
    history: &HistoryState,
    panel: &mut HistoryPanel,
) -> Option<HistoryEvent> {
    let mut event = None;

    let back_label = if panel.selected.is_some() {
        "⬅ Voltar para lista"
    } else {
        "⬅ Voltar para Home"
    };
    if ui.link(back_label).clicked() {
        if panel.selected.is_some() {
            panel.selected = None;
        } else {
            event = Some(HistoryEvent::Back);
        }
        return event;
    }

    ui.add_space(8.0);

    match history {
        HistoryState::Loading { .. } => {
            ui.heading("🗺 Minhas Rotas Salvas");
            ui.add_space(16.0);
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Carregando histórico...");
            });
        }
        HistoryState::Error { message } => {
            ui.heading("🗺 Minhas Rotas Salvas");
            ui.add_space(16.0);
            ui.colored_label(egui::Color32::RED, message);
        }
        HistoryState::Loaded { routes } if routes.is_empty() => {
            ui.heading("🗺 Minhas Rotas Salvas");
            ui.add_space(16.0);
            ui.group(|ui| {
                ui.set_min_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    ui.label("Você ainda não salvou nenhuma rota.");
                    ui.add_space(24.0);
                });
            });
        }
        HistoryState::Loaded { routes } => {
            // A stale selection can outlive a refetch that shrank the list.
            if panel.selected.is_some_and(|index| index >= routes.len()) {
                panel.selected = None;
            }

            match panel.selected {
                Some(index) => {
                    let route = &routes[index];
                    ui.heading(format!("🗺 {}", route.title));
                    ui.add_space(8.0);
                    let local = route.created_at.with_timezone(&Local);
                    ui.horizontal(|ui| {
                        ui.label(format!("📅 {}", local.format("%d/%m/%Y")));
                        ui.label(format!("🕘 {}", local.format("%H:%M")));
                    });
                    ui.separator();
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            markdown::render(ui, &route.route_data);
                        });
                }
                None => {
                    ui.heading("🗺 Minhas Rotas Salvas");
                    ui.add_space(12.0);
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, true])
                        .show(ui, |ui| {
                            for (index, route) in routes.iter().enumerate() {
                                let local = route.created_at.with_timezone(&Local);
                                ui.group(|ui| {
                                    ui.set_min_width(ui.available_width());
                                    ui.horizontal(|ui| {
                                        ui.vertical(|ui| {
                                            ui.label(
                                                egui::RichText::new(&route.title).strong(),
                                            );
                                            ui.label(
                                                egui::RichText::new(format!(
                                                    "📅 {} às {}",
                                                    local.format("%d/%m/%Y"),
                                                    local.format("%H:%M")
                                                ))
                                                .weak(),
                                            );
                                        });
                                        ui.with_layout(
                                            egui::Layout::right_to_left(egui::Align::Center),
                                            |ui| {
                                                if ui.button("Ver detalhes").clicked() {
                                                    panel.selected = Some(index);
                                                }
                                            },
                                        );
                                    });
                                });
                                ui.add_space(4.0);
                            }
                        });
                }
            }
        }
        HistoryState::Idle => {}
    }

    event
}
