//! SVG document loading and rasterization
//!
//! Parsing and rendering are owned by usvg/resvg, this module only wires the
//! view transform through.
use crate::{Scalar, ViewTransform};
use std::{fmt, fs, io, path::Path};

/// Parsed SVG document
pub struct Document {
    tree: usvg::Tree,
}

impl Document {
    /// Load and parse an SVG file
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let mut options = usvg::Options::default();
        options.resources_dir = fs::canonicalize(path)
            .ok()
            .and_then(|path| path.parent().map(|dir| dir.to_path_buf()));
        options.fontdb_mut().load_system_fonts();
        let data = fs::read(path)?;
        let tree =
            tracing::debug_span!("[parse]").in_scope(|| usvg::Tree::from_data(&data, &options))?;
        tracing::debug!(
            "[document:size] {}x{}",
            tree.size().width(),
            tree.size().height()
        );
        Ok(Self { tree })
    }

    /// Document width in document units, guaranteed non-zero by usvg
    pub fn width(&self) -> Scalar {
        self.tree.size().width() as Scalar
    }

    /// Document height in document units, guaranteed non-zero by usvg
    pub fn height(&self) -> Scalar {
        self.tree.size().height() as Scalar
    }

    /// Rasterize the document into `pixmap` under the view transform
    pub fn render(&self, tr: ViewTransform, pixmap: &mut tiny_skia::PixmapMut<'_>) {
        resvg::render(&self.tree, tr.to_tiny_skia(), pixmap);
    }
}

/// Failed to load the input document
#[derive(Debug)]
pub enum DocumentError {
    /// IO error propagated while reading the input file
    Io(io::Error),
    /// SVG parsing failed
    Parse(usvg::Error),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Document::{:?}", self)
    }
}

impl From<io::Error> for DocumentError {
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<usvg::Error> for DocumentError {
    fn from(error: usvg::Error) -> Self {
        Self::Parse(error)
    }
}

impl std::error::Error for DocumentError {}
