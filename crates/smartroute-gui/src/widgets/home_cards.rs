//! Home screen selection cards.

use crate::state::ViewMode;

struct Card {
    mode: ViewMode,
    title: &'static str,
    description: &'static str,
    action: &'static str,
}

const CARDS: [Card; 3] = [
    Card {
        mode: ViewMode::Route,
        title: "🚚 Roteirizar Rotas",
        description: "Insira múltiplos endereços manualmente ou via planilha e deixe a IA organizar a sequência.",
        action: "Começar Roteiro ➡",
    },
    Card {
        mode: ViewMode::Prospect,
        title: "👥 Prospecção",
        description: "Encontre leads qualificados por setor e região, gere ganchos de vendas e localize-os.",
        action: "Buscar Leads ➡",
    },
    Card {
        mode: ViewMode::History,
        title: "🕘 Minhas Rotas",
        description: "Acesse o histórico das rotas e planejamentos que você já salvou anteriormente.",
        action: "Ver Histórico ➡",
    },
];

/// Render the three selection cards. Returns the chosen screen, if any.
pub fn render(ui: &mut egui::Ui) -> Option<ViewMode> {
    let mut selected = None;

    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        ui.heading("Bem-vindo ao SmartRoute");
        ui.label("Sua plataforma inteligente para otimizar vendas de campo. Escolha abaixo como deseja começar hoje.");
        ui.add_space(24.0);
    });

    ui.columns(CARDS.len(), |columns| {
        for (column, card) in columns.iter_mut().zip(&CARDS) {
            column.group(|ui| {
                ui.set_min_height(160.0);
                ui.vertical(|ui| {
                    ui.label(egui::RichText::new(card.title).size(18.0).strong());
                    ui.add_space(6.0);
                    ui.label(card.description);
                    ui.add_space(10.0);
                    if ui.button(card.action).clicked() {
                        selected = Some(card.mode);
                    }
                });
            });
        }
    });

    selected
}
