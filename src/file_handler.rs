use std::path::PathBuf;

use eframe::egui;
use thiserror::Error;

use crate::canvas::SketchCanvas;
use crate::svg::SvgError;

/// Errors that can occur while loading or saving sketch files
#[derive(Debug, Error)]
pub enum FileError {
    #[error("{0} is not an SVG file")]
    Unsupported(String),

    #[error("{0} has no readable content")]
    Empty(String),

    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        source: std::io::Error,
    },

    #[error("{0} is not valid UTF-8")]
    NotUtf8(String),

    #[error("Failed to load {name}: {source}")]
    Import { name: String, source: SvgError },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Outcome of the last file operation, for display in the tools panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Done(String),
    Failed(String),
}

/// Loads sketches dropped onto the window and saves the current one.
#[derive(Debug, Default)]
pub struct FileHandler {
    status: Option<FileStatus>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<&FileStatus> {
        self.status.as_ref()
    }

    /// Import any files dropped this frame. Returns true if there were any.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context, canvas: &mut SketchCanvas) -> bool {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return false;
        }
        self.import_dropped(&dropped, canvas);
        true
    }

    /// Import each dropped file in turn; every successful import replaces
    /// the sketch. Returns the stroke count or error per file.
    pub fn import_dropped(
        &mut self,
        files: &[egui::DroppedFile],
        canvas: &mut SketchCanvas,
    ) -> Vec<Result<usize, FileError>> {
        let mut results = Vec::with_capacity(files.len());
        for file in files {
            let name = dropped_file_name(file);
            let result = load_dropped_file(file, &name, canvas);
            match &result {
                Ok(count) => {
                    log::info!("Loaded {} with {} strokes", name, count);
                    self.status = Some(FileStatus::Done(format!("Loaded {name} ({count} strokes)")));
                }
                Err(err) => {
                    log::warn!("{}", err);
                    self.status = Some(FileStatus::Failed(err.to_string()));
                }
            }
            results.push(result);
        }
        results
    }

    /// Write the sketch to `dir` as `sketch_<unix ms>.svg`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_svg(&mut self, canvas: &SketchCanvas, dir: &std::path::Path) -> Result<PathBuf, FileError> {
        let path = dir.join(sketch_file_name(unix_millis()));
        let result = std::fs::write(&path, canvas.export_svg())
            .map(|()| path.clone())
            .map_err(|source| FileError::Write { path, source });

        match &result {
            Ok(path) => {
                log::info!("Saved sketch to {}", path.display());
                self.status = Some(FileStatus::Done(format!("Saved {}", path.display())));
            }
            Err(err) => {
                log::error!("{}", err);
                self.status = Some(FileStatus::Failed(err.to_string()));
            }
        }
        result
    }
}

/// File name for a sketch saved at `unix_ms`.
pub fn sketch_file_name(unix_ms: u128) -> String {
    format!("sketch_{unix_ms}.svg")
}

#[cfg(not(target_arch = "wasm32"))]
fn unix_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

/// Check the MIME type first, then the extension of the path or name.
pub fn is_svg_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime == "image/svg+xml";
    }
    let has_svg_extension = |name: &str| name.to_lowercase().ends_with(".svg");
    match &file.path {
        Some(path) => has_svg_extension(&path.to_string_lossy()),
        None => has_svg_extension(&file.name),
    }
}

fn dropped_file_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

fn load_dropped_file(file: &egui::DroppedFile, name: &str, canvas: &mut SketchCanvas) -> Result<usize, FileError> {
    if !is_svg_file(file) {
        return Err(FileError::Unsupported(name.to_owned()));
    }
    let source = read_dropped_file(file, name)?;
    canvas.import_svg(&source).map_err(|source| FileError::Import {
        name: name.to_owned(),
        source,
    })?;
    Ok(canvas.strokes().len())
}

fn read_dropped_file(file: &egui::DroppedFile, name: &str) -> Result<String, FileError> {
    // Web drops carry their bytes; native drops carry a path.
    if let Some(bytes) = &file.bytes {
        return String::from_utf8(bytes.to_vec()).map_err(|_| FileError::NotUtf8(name.to_owned()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    if let Some(path) = &file.path {
        return std::fs::read_to_string(path).map_err(|source| match source.kind() {
            std::io::ErrorKind::InvalidData => FileError::NotUtf8(name.to_owned()),
            _ => FileError::Read {
                name: name.to_owned(),
                source,
            },
        });
    }

    Err(FileError::Empty(name.to_owned()))
}
