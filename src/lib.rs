#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod canvas;
pub mod command;
pub mod config;
pub mod document;
pub mod file_handler;
pub mod geometry;
pub mod input;
pub mod renderer;
pub mod stroke;
pub mod svg;

pub use app::SketchApp;
pub use canvas::{CanvasState, SketchCanvas, ToolMode};
pub use command::{Command, CommandError, CommandHistory};
pub use config::{ConfigError, DrawingConfig};
pub use document::Document;
pub use file_handler::{FileError, FileHandler};
pub use geometry::SmoothingMode;
pub use input::{InputHandler, PointerEvent, PointerKind};
pub use renderer::{Renderer, StrokePreview};
pub use stroke::{Stroke, StrokeId, StrokeStyle};
pub use svg::SvgError;
