//! Minimal markdown display for generated narratives.
//!
//! The narrative is trusted display content produced by our own backend, so
//! this stays a small transform over `pulldown-cmark` events: headings,
//! paragraphs, emphasis, lists and links. Anything fancier is rendered as
//! plain text.

use egui::RichText;
use pulldown_cmark::{Event, HeadingLevel, Parser, Tag, TagEnd};

/// Render a markdown string into the current egui layout.
pub fn render(ui: &mut egui::Ui, markdown: &str) {
    let mut view = MarkdownView::default();
    for event in Parser::new(markdown) {
        view.handle(ui, event);
    }
    view.flush(ui);
}

#[derive(Clone)]
struct Inline {
    text: String,
    strong: bool,
    emphasis: bool,
    code: bool,
    link: Option<String>,
}

#[derive(Default)]
struct MarkdownView {
    segments: Vec<Inline>,
    strong: u32,
    emphasis: u32,
    link: Option<String>,
    heading: Option<HeadingLevel>,
    list_stack: Vec<Option<u64>>,
    prefix: Option<String>,
}

impl MarkdownView {
    fn handle(&mut self, ui: &mut egui::Ui, event: Event<'_>) {
        match event {
            Event::Start(Tag::Paragraph) => {}
            Event::End(TagEnd::Paragraph) => {
                self.flush(ui);
                ui.add_space(4.0);
            }
            Event::Start(Tag::Heading { level, .. }) => {
                self.flush(ui);
                self.heading = Some(level);
            }
            Event::End(TagEnd::Heading(_)) => {
                self.flush(ui);
                self.heading = None;
                ui.add_space(6.0);
            }
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Start(Tag::Link { dest_url, .. }) => {
                self.link = Some(dest_url.to_string());
            }
            Event::End(TagEnd::Link) => self.link = None,
            Event::Start(Tag::List(start)) => {
                self.flush(ui);
                self.list_stack.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.list_stack.pop();
                if self.list_stack.is_empty() {
                    ui.add_space(4.0);
                }
            }
            Event::Start(Tag::Item) => {
                self.flush(ui);
                let depth = self.list_stack.len().saturating_sub(1);
                let indent = "    ".repeat(depth);
                let marker = match self.list_stack.last_mut() {
                    Some(Some(index)) => {
                        let marker = format!("{index}. ");
                        *index += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.prefix = Some(format!("{indent}{marker}"));
            }
            Event::End(TagEnd::Item) => self.flush(ui),
            Event::Text(text) => self.push_text(&text, false),
            Event::Code(text) => self.push_text(&text, true),
            Event::SoftBreak => self.push_text(" ", false),
            Event::HardBreak => self.flush(ui),
            Event::Rule => {
                self.flush(ui);
                ui.separator();
            }
            // Unstyled fallback keeps unexpected constructs readable.
            Event::Html(raw) | Event::InlineHtml(raw) => self.push_text(&raw, false),
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str, code: bool) {
        self.segments.push(Inline {
            text: text.to_string(),
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            code,
            link: self.link.clone(),
        });
    }

    fn flush(&mut self, ui: &mut egui::Ui) {
        if self.segments.is_empty() && self.prefix.is_none() {
            return;
        }

        let heading = self.heading;
        let prefix = self.prefix.take();
        let segments = std::mem::take(&mut self.segments);

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            if let Some(prefix) = prefix {
                ui.label(RichText::new(prefix));
            }
            for segment in segments {
                let mut rich = RichText::new(&segment.text);
                if let Some(size) = heading_size(heading) {
                    rich = rich.size(size).strong();
                }
                if segment.strong {
                    rich = rich.strong();
                }
                if segment.emphasis {
                    rich = rich.italics();
                }
                if segment.code {
                    rich = rich.monospace();
                }
                match segment.link {
                    Some(url) => {
                        ui.hyperlink_to(rich, url);
                    }
                    None => {
                        ui.label(rich);
                    }
                }
            }
        });
    }
}

fn heading_size(level: Option<HeadingLevel>) -> Option<f32> {
    match level? {
        HeadingLevel::H1 => Some(22.0),
        HeadingLevel::H2 => Some(19.0),
        HeadingLevel::H3 => Some(17.0),
        _ => Some(15.0),
    }
}
