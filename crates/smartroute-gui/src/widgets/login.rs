//! Login / registration screen.

use crate::ui_state::LoginForm;

/// Action emitted by the login screen.
pub enum LoginEvent {
    SubmitLogin { username: String, password: String },
    SubmitRegister { username: String, password: String },
}

/// Render the login screen. Returns the submit action, if any.
pub fn render(ui: &mut egui::Ui, form: &mut LoginForm) -> Option<LoginEvent> {
    let mut event = None;

    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.heading(egui::RichText::new("SmartRoute").size(32.0).strong());
        ui.label("Inteligência Artificial para Logística");
        ui.add_space(24.0);

        ui.group(|ui| {
            ui.set_max_width(380.0);

            ui.label(egui::RichText::new(if form.register_mode {
                "Criar Nova Conta"
            } else {
                "Acessar Painel"
            })
            .strong());
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Usuário:");
                ui.add(
                    egui::TextEdit::singleline(&mut form.username)
                        .hint_text("Seu nome de usuário"),
                );
            });
            ui.horizontal(|ui| {
                ui.label("Senha:");
                ui.add(
                    egui::TextEdit::singleline(&mut form.password)
                        .password(true)
                        .hint_text("••••••••"),
                );
            });

            if let Some(ref error) = form.error {
                ui.add_space(4.0);
                ui.colored_label(egui::Color32::RED, error);
            }

            ui.add_space(8.0);

            let submit_label = if form.pending {
                "⏳ Aguarde..."
            } else if form.register_mode {
                "Cadastrar e Entrar"
            } else {
                "Entrar no Sistema"
            };
            let can_submit =
                !form.pending && !form.username.trim().is_empty() && !form.password.is_empty();
            let button = egui::Button::new(submit_label)
                .min_size(egui::vec2(ui.available_width(), 36.0));
            if ui.add_enabled(can_submit, button).clicked() {
                let username = form.username.trim().to_string();
                let password = form.password.clone();
                event = Some(if form.register_mode {
                    LoginEvent::SubmitRegister { username, password }
                } else {
                    LoginEvent::SubmitLogin { username, password }
                });
            }

            ui.add_space(8.0);
            ui.separator();

            let toggle_label = if form.register_mode {
                "Já possui conta? Faça login"
            } else {
                "Não tem acesso? Crie uma conta"
            };
            if ui.link(toggle_label).clicked() {
                form.register_mode = !form.register_mode;
                form.error = None;
            }
        });
    });

    event
}
