//! Serial console command interpreter
//!
//! Character-fed, polled from the host loop - no dedicated task.
//! Zero heap allocation - all fixed-capacity buffers.

pub mod ansi;
pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod dispatch;
pub mod error;
pub mod escape;
pub mod help;
pub mod history;
pub mod line_buffer;
pub mod macros;
pub mod parser;
pub mod pattern;

pub use commands::{Category, CommandDescriptor, CommandId, CommandTable};
pub use console::{Console, VERSION};
pub use dispatch::{Dispatch, Invocation, SessionView};
pub use error::{ConsoleError, TableError};
pub use escape::{EscapeDecoder, EscapeKey};
pub use help::HelpView;
pub use history::History;
pub use line_buffer::LineBuffer;
pub use macros::MacroBuffer;
pub use parser::{convert, parse_line, Param, Params, ParsedLine};
pub use pattern::PatternToken;
