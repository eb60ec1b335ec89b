use egui::{Key, Modifiers};
use serde::{Deserialize, Serialize};

use crate::canvas::SketchCanvas;
use crate::config::DrawingConfig;
use crate::file_handler::{FileHandler, FileStatus};
use crate::input::InputHandler;
use crate::renderer::{PanelAction, Renderer};

/// What survives a restart: the configuration and the sketch as a vector
/// document.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct PersistedState {
    config: DrawingConfig,
    sketch_svg: Option<String>,
}

pub struct SketchApp {
    canvas: SketchCanvas,
    input: InputHandler,
    renderer: Renderer,
    files: FileHandler,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self::with_canvas(SketchCanvas::default())
    }
}

impl SketchApp {
    /// Called once before the first frame.
    ///
    /// A `config` passed in by the host wins over the one stored from the
    /// previous run.
    pub fn new(cc: &eframe::CreationContext<'_>, config: Option<DrawingConfig>) -> Self {
        let persisted: PersistedState = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let mut canvas = SketchCanvas::new(config.unwrap_or(persisted.config));
        if let Some(svg) = persisted.sketch_svg {
            if let Err(err) = canvas.import_svg(&svg) {
                log::warn!("Could not restore previous sketch: {}", err);
            }
        }

        Self::with_canvas(canvas)
    }

    pub fn with_canvas(canvas: SketchCanvas) -> Self {
        Self {
            canvas,
            input: InputHandler::new(egui::Rect::NOTHING),
            renderer: Renderer::new(),
            files: FileHandler::new(),
        }
    }

    pub fn canvas(&self) -> &SketchCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut SketchCanvas {
        &mut self.canvas
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        // Shift+Z has to be consumed first, plain COMMAND also matches it.
        let redo = ctx.input_mut(|i| {
            i.consume_key(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z)
                || i.consume_key(Modifiers::COMMAND, Key::Y)
        });
        let undo = ctx.input_mut(|i| i.consume_key(Modifiers::COMMAND, Key::Z));
        let toggle = ctx.input_mut(|i| i.consume_key(Modifiers::NONE, Key::E));

        if redo {
            self.canvas.redo();
        }
        if undo {
            self.canvas.undo();
        }
        if toggle {
            self.canvas.toggle_eraser();
        }
    }

    fn export_to_clipboard(&self, ctx: &egui::Context) {
        let svg = self.canvas.export_svg();
        log::info!("Copied {} strokes as SVG", self.canvas.strokes().len());
        ctx.copy_text(svg);
    }

    /// Saves into the working directory; the result shows in the tools panel.
    fn save_to_file(&mut self) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = self.files.save_svg(&self.canvas, std::path::Path::new("."));
        }
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let state = PersistedState {
            config: self.canvas.config().clone(),
            sketch_svg: Some(self.canvas.export_svg()),
        };
        eframe::set_value(storage, eframe::APP_KEY, &state);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        if self.files.check_for_dropped_files(ctx, &mut self.canvas) {
            ctx.request_repaint();
        }

        egui::SidePanel::left("tools_panel").show(ctx, |ui| {
            match self.renderer.render_tools_panel(ui, &mut self.canvas) {
                Some(PanelAction::ExportSvg) => self.export_to_clipboard(ctx),
                Some(PanelAction::SaveSvg) => self.save_to_file(),
                None => {}
            }

            match self.files.status() {
                Some(FileStatus::Done(message)) => {
                    ui.label(message);
                }
                Some(FileStatus::Failed(message)) => {
                    ui.colored_label(ui.visuals().error_fg_color, message);
                }
                None => {}
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
            let rect = response.rect;

            self.input.set_canvas_rect(rect);
            self.canvas.set_surface_size(rect.width() as f64, rect.height() as f64);

            let mut changed = false;
            for event in self.input.process_input(ctx) {
                changed |= self.canvas.handle_pointer_event(event);
            }

            self.renderer.render(&painter, rect, &self.canvas);

            if changed {
                ctx.request_repaint();
            }
        });
    }
}
