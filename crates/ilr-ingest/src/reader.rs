//! Reading ILR messages from XML and JSON documents.

use std::path::Path;

use ilr_model::Message;

use crate::error::{IngestError, Result};

/// Supported submission encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Xml,
    Json,
}

impl InputFormat {
    /// Format implied by the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("xml") {
            Some(Self::Xml)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

/// Parse an ILR XML message.
pub fn parse_message_xml(xml: &str) -> Result<Message> {
    quick_xml::de::from_str(xml).map_err(|e| IngestError::InvalidXml {
        message: e.to_string(),
    })
}

/// Parse an ILR message encoded as JSON with ILR element names.
pub fn parse_message_json(json: &str) -> Result<Message> {
    serde_json::from_str(json).map_err(|e| IngestError::InvalidJson {
        message: e.to_string(),
    })
}

/// Read and parse a submission file, choosing the parser by extension.
pub fn read_message(path: &Path) -> Result<Message> {
    let format = InputFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    // Some provider software writes a BOM.
    let content = content.trim_start_matches('\u{feff}');

    let parsed = match format {
        InputFormat::Xml => parse_message_xml(content),
        InputFormat::Json => parse_message_json(content),
    };
    let message = parsed.map_err(|source| IngestError::Parse {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;

    tracing::debug!(
        path = %path.display(),
        learners = message.learners.len(),
        ukprn = message.ukprn(),
        "Read ILR message"
    );
    Ok(message)
}

/// File name component of `path`, used for file name rules.
pub fn file_name_of(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}
