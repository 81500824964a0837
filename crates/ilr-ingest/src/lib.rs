//! Reading ILR submissions.
//!
//! - [`reader`]: XML and JSON messages
//! - [`file_name`]: the ILR file naming convention
//! - [`discovery`]: resolving files and directories into inputs

pub mod discovery;
pub mod error;
pub mod file_name;
pub mod reader;

pub use discovery::discover_inputs;
pub use error::{IngestError, Result};
pub use file_name::IlrFileName;
pub use reader::{InputFormat, file_name_of, parse_message_json, parse_message_xml, read_message};
