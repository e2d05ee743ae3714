//! # Rendering Backend Layer
//!
//! Trait and implementations for graph rendering backends.
//!
//! ## Overview
//!
//! The render module defines how pipeviz turns DOT source into image bytes:
//!
//! - [`RenderBackend`] - Core trait for rendering DOT source
//! - [`GraphvizBackend`] - Production backend shelling out to `dot`
//! - [`MockBackend`] - Test backend with configurable responses
//!
//! Backends return image BYTES rather than writing files; the caller
//! decides where (and whether) anything lands on disk, so a failed render
//! leaves the filesystem untouched.
//!
//! ## Available Backends
//!
//! | Backend | Use Case | Requires |
//! |----------|----------|----------|
//! | `graphviz` | Production | Graphviz `dot` on PATH |
//! | `mock` | Testing | Nothing |
//!
//! ## Creating Backends
//!
//! Use [`create_backend`] to instantiate a backend by name:
//!
//! ```rust
//! use pipeviz::render::create_backend;
//!
//! let graphviz = create_backend("graphviz");
//! assert!(graphviz.is_ok());
//!
//! let unknown = create_backend("imagemagick");
//! assert!(unknown.is_err());
//! ```

mod dot;
mod graphviz;
mod mock;

pub use dot::dot_source;
pub use graphviz::GraphvizBackend;
pub use mock::MockBackend;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::{PipevizError, Result};

// ============================================================================
// IMAGE FORMATS
// ============================================================================

/// Output image formats the backends understand.
///
/// `Jpg` and `Jpeg` are distinct spellings: the output file keeps the
/// extension the user asked for, while the backend flag is always `jpeg`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
    Pdf,
    Jpg,
    Jpeg,
}

impl ImageFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
            ImageFormat::Pdf => "pdf",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Jpeg => "jpeg",
        }
    }

    /// Format flag passed to the backend (`dot -T<flag>`)
    pub fn dot_format(&self) -> &'static str {
        match self {
            ImageFormat::Jpg => "jpeg",
            other => other.extension(),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = PipevizError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            "pdf" => Ok(ImageFormat::Pdf),
            "jpg" => Ok(ImageFormat::Jpg),
            "jpeg" => Ok(ImageFormat::Jpeg),
            other => Err(PipevizError::UnknownFormat {
                format: other.to_string(),
            }),
        }
    }
}

// ============================================================================
// BACKEND TRAIT
// ============================================================================

/// Core trait that all rendering backends must implement
///
/// The trait abstracts over how DOT source becomes an image, allowing the
/// diagram pipeline to run without knowing which renderer is installed.
pub trait RenderBackend: Send + Sync {
    /// Returns the backend name (e.g., "graphviz", "mock")
    fn name(&self) -> &str;

    /// Check if this backend can render right now (e.g., CLI installed).
    ///
    /// The probe is bounded by a short internal timeout; rendering itself
    /// never is.
    fn is_available(&self) -> bool {
        true
    }

    /// Render DOT source to image bytes in the given format.
    ///
    /// Implementations must not write files.
    fn render(&self, dot_source: &str, format: ImageFormat) -> Result<Vec<u8>>;
}

// ============================================================================
// BACKEND FACTORY
// ============================================================================

/// Create a backend instance by name
///
/// # Supported Backends
///
/// | Name | Description | Requires |
/// |------|-------------|----------|
/// | `graphviz` (alias `dot`) | Graphviz CLI | `dot` installed |
/// | `mock` | Testing | Nothing |
pub fn create_backend(name: &str) -> Result<Box<dyn RenderBackend>> {
    match name.to_lowercase().as_str() {
        "graphviz" | "dot" => Ok(Box::new(GraphvizBackend::new())),
        "mock" => Ok(Box::new(MockBackend::new())),
        _ => Err(PipevizError::UnknownBackend {
            name: name.to_string(),
        }),
    }
}

// ============================================================================
// TESTS
// ============================================================================
