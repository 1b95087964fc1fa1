//! Line level reading and writing of CONTROL files
//!
//! [LineCursor] walks the decoded lines and [ControlWriter] writes encoded
//! lines to any sink.
mod reader;
mod writer;

pub use self::reader::{read_lines, LineCursor};
pub use self::writer::{ControlWriter, ControlWriterBuilder, EncodeOptions};
