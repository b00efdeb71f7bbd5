//! Output formatting.

use crate::cli::OutputFormat;
use crate::error::CliError;
use camino::Utf8PathBuf;
use serde::{Serialize, Serializer};
use source_map::SourceMap;
use std::io::Write;

/// A printed file ready for output.
#[derive(Debug, Serialize)]
pub struct PrintedFile {
    /// The source file.
    pub path: Utf8PathBuf,
    /// The generated TSX.
    pub code: String,
    /// Source map from `code` back to `path`.
    #[serde(serialize_with = "serialize_source_map")]
    pub map: SourceMap,
}

/// Embeds a source map as its v3 JSON object.
fn serialize_source_map<S: Serializer>(map: &SourceMap, serializer: S) -> Result<S::Ok, S::Error> {
    let mut json = Vec::new();
    map.to_writer(&mut json).map_err(serde::ser::Error::custom)?;
    let value: serde_json::Value =
        serde_json::from_slice(&json).map_err(serde::ser::Error::custom)?;
    value.serialize(serializer)
}

/// Writes printed files in the selected format.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Writes all files to `out`.
    pub fn write(&self, files: &[PrintedFile], out: &mut impl Write) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Tsx => self.write_tsx(files, out),
            OutputFormat::Json => self.write_json(files, out),
        }
    }

    /// Writes the code of each file; several files are separated by a path comment.
    fn write_tsx(&self, files: &[PrintedFile], out: &mut impl Write) -> Result<(), CliError> {
        let headers = files.len() > 1;
        for file in files {
            if headers {
                writeln!(out, "// {}", file.path)?;
            }
            out.write_all(file.code.as_bytes())?;
        }
        Ok(())
    }

    fn write_json(&self, files: &[PrintedFile], out: &mut impl Write) -> Result<(), CliError> {
        serde_json::to_writer_pretty(&mut *out, files)?;
        writeln!(out)?;
        Ok(())
    }
}
