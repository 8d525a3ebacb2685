//! Reading and writing of Wavefront OBJ and MTL files
//!
//! Both formats are line oriented text. Reading goes through three layers:
//! - [`lines`] turns physical lines into tokenized statements
//! - [`obj`] and [`mtl`] apply statements to a document, one at a time
//! - [`format`] and the writers turn a document back into canonical text
//!
//! ```no_run
//! use wavecrate_io::{DocumentReader, DocumentWriter, ObjReadOptions, ObjReader, ObjWriter};
//!
//! let document = ObjReader::read_file("model.obj", &ObjReadOptions::default())?;
//! ObjWriter::write_file(&document, "model_out.obj")?;
//! # Ok::<(), wavecrate_core::Error>(())
//! ```

pub mod format;
pub mod lines;
pub mod mtl;
pub mod obj;
pub mod options;
pub mod technique;

#[cfg(test)]
mod tests;

pub use lines::{LineReader, Statement};
pub use mtl::{MtlReader, MtlWriter};
pub use obj::{ObjParseContext, ObjReader, ObjWriter};
pub use options::{MtlReadOptions, ObjReadOptions};

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use wavecrate_core::{Error, MtlDocument, ObjDocument, Result};

/// Trait for parsing a document from text
pub trait DocumentReader {
    type Document;
    type Options: Default;

    /// Parse a whole document from a buffered reader
    fn read_from<R: BufRead>(reader: R, options: &Self::Options) -> Result<Self::Document>;

    fn read_file<P: AsRef<Path>>(path: P, options: &Self::Options) -> Result<Self::Document> {
        let path = path.as_ref();
        log::info!("reading {}", path.display());
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file), options)
    }

    fn read_str(text: &str, options: &Self::Options) -> Result<Self::Document> {
        Self::read_from(text.as_bytes(), options)
    }
}

/// Trait for writing a document as text
pub trait DocumentWriter {
    type Document;

    /// Write a whole document. Only I/O errors of `writer` can fail this.
    fn write_to<W: Write>(document: &Self::Document, writer: W) -> Result<()>;

    fn write_file<P: AsRef<Path>>(document: &Self::Document, path: P) -> Result<()> {
        let path = path.as_ref();
        log::info!("writing {}", path.display());
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(document, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_string(document: &Self::Document) -> Result<String> {
        let mut buffer = Vec::new();
        Self::write_to(document, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }
}

/// A document of either format
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Obj(ObjDocument),
    Mtl(MtlDocument),
}

/// Options for [`read_document`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    pub obj: ObjReadOptions,
    pub mtl: MtlReadOptions,
}

/// Auto-detect the format from the file extension and read the document
pub fn read_document<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<Document> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("obj") => Ok(Document::Obj(ObjReader::read_file(path, &options.obj)?)),
        Some("mtl") => Ok(Document::Mtl(MtlReader::read_file(path, &options.mtl)?)),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported file format: {:?}",
            path.extension()
        ))),
    }
}

/// Write a document, checking that the file extension matches its format
pub fn write_document<P: AsRef<Path>>(document: &Document, path: P) -> Result<()> {
    let path = path.as_ref();
    match (document, extension(path).as_deref()) {
        (Document::Obj(obj), Some("obj")) => ObjWriter::write_file(obj, path),
        (Document::Mtl(mtl), Some("mtl")) => MtlWriter::write_file(mtl, path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Cannot write this document to {:?}",
            path.extension()
        ))),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}
