//! Text renderings of a definition.
//!
//! A [`Generator`] reads a [`Definition`] and returns a document describing
//! it. Generators never see a running machine. [`write_if_changed`] lets
//! build scripts regenerate files without touching their timestamps when
//! nothing changed.

mod dot;
mod json;

pub use dot::DotGenerator;
pub use json::JsonGenerator;

use crate::core::State;
use crate::definition::Definition;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Renders a definition as text.
pub trait Generator {
    /// Render `definition` under the given machine `name`.
    fn generate<S: State, E: Debug, O>(&self, definition: &Definition<S, E, O>, name: &str)
        -> String;
}

/// Write `content` to `path` unless the file already holds exactly that
/// content. Returns whether the file was written.
pub fn write_if_changed(path: impl AsRef<Path>, content: &str) -> io::Result<bool> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(existing) if existing == content => {
            debug!(path = %path.display(), "generated file unchanged");
            return Ok(false);
        }
        Ok(_) => {}
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error),
    }
    fs::write(path, content)?;
    debug!(path = %path.display(), bytes = content.len(), "generated file written");
    Ok(true)
}
