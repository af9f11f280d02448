//! Clipboard history preview window.
//!
//! The window stays hidden until the user cycles with Win+Shift, then shows
//! the currently previewed snippet. The hotkey worker thread never touches
//! egui state directly: it sends [`DisplayCommand`]s through a channel (plus
//! a repaint poke) and the UI thread applies them in `update`.

use std::sync::mpsc::{Receiver, Sender};

use eframe::egui;

use crate::core::hotkey::HistoryView;

/// Commands the hotkey worker sends to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCommand {
    SetVisible(bool),
    DisplayText(String),
}

/// Worker-side handle to the preview window.
///
/// Cloneable and `Send`; every call enqueues a command and wakes the UI
/// thread, so it is safe to use from the hook worker.
#[derive(Clone)]
pub struct PreviewHandle {
    commands: Sender<DisplayCommand>,
    ctx: egui::Context,
}

impl PreviewHandle {
    pub fn new(commands: Sender<DisplayCommand>, ctx: egui::Context) -> Self {
        Self { commands, ctx }
    }

    fn send(&self, command: DisplayCommand) {
        // The UI hanging up means the process is shutting down already.
        let _ = self.commands.send(command);
        self.ctx.request_repaint();
    }
}

impl HistoryView for PreviewHandle {
    fn set_visible(&mut self, visible: bool) {
        self.send(DisplayCommand::SetVisible(visible));
    }

    fn display_text(&mut self, text: &str) {
        self.send(DisplayCommand::DisplayText(text.to_string()));
    }
}

/// Main application state.
pub struct PreviewApp {
    commands: Receiver<DisplayCommand>,
    preview_text: String,
    visible: bool,
}

impl PreviewApp {
    pub fn new(commands: Receiver<DisplayCommand>) -> Self {
        Self {
            commands,
            preview_text: String::new(),
            visible: false,
        }
    }

    fn apply_pending_commands(&mut self, ctx: &egui::Context) {
        let mut visibility_changed = false;
        while let Ok(command) = self.commands.try_recv() {
            match command {
                DisplayCommand::SetVisible(visible) => {
                    if self.visible != visible {
                        self.visible = visible;
                        visibility_changed = true;
                    }
                }
                DisplayCommand::DisplayText(text) => {
                    self.preview_text = text;
                }
            }
        }

        if visibility_changed {
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(self.visible));
            if self.visible {
                ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
            }
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_pending_commands(ctx);

        egui::TopBottomPanel::top("instructions").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.strong("Clipboard History Preview");
            ui.label(
                "Press SHIFT for next item \u{2022} Release Win to paste \u{2022} \
                 Win+Shift+E to exit",
            );
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add(
                        egui::Label::new(egui::RichText::new(&self.preview_text).size(14.0))
                            .wrap(),
                    );
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_handle_forwards_commands() {
        let (tx, rx) = mpsc::channel();
        let ctx = egui::Context::default();
        let mut handle = PreviewHandle::new(tx, ctx);

        handle.display_text("snippet");
        handle.set_visible(true);
        handle.set_visible(false);

        assert_eq!(
            rx.try_recv().unwrap(),
            DisplayCommand::DisplayText("snippet".to_string())
        );
        assert_eq!(rx.try_recv().unwrap(), DisplayCommand::SetVisible(true));
        assert_eq!(rx.try_recv().unwrap(), DisplayCommand::SetVisible(false));
    }

    #[test]
    fn test_app_applies_latest_state() {
        let (tx, rx) = mpsc::channel();
        let mut app = PreviewApp::new(rx);

        tx.send(DisplayCommand::DisplayText("first".to_string()))
            .unwrap();
        tx.send(DisplayCommand::DisplayText("second".to_string()))
            .unwrap();
        tx.send(DisplayCommand::SetVisible(true)).unwrap();

        let ctx = egui::Context::default();
        app.apply_pending_commands(&ctx);

        assert_eq!(app.preview_text, "second");
        assert!(app.visible);
    }
}
