//! # serial-cmdb
//!
//! Line-oriented command interpreter for character-stream consoles.
//!
//! ## Architecture
//!
//! The interpreter is fed one byte at a time by the host loop:
//! - Input state machine: line editing, cursor keys, single-slot recall
//! - Parser: command lookup scoped to the active subsystem, pattern-typed
//!   parameter conversion with range checks
//! - Dispatcher: subsystem switching and built-ins handled internally,
//!   everything else forwarded to the application's [`Dispatch`]
//!
//! Single threaded, no heap, no blocking calls.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod io;

pub use config::SessionConfig;
pub use console::{
    Category, CommandDescriptor, CommandId, CommandTable, Console, ConsoleError, Dispatch,
    Invocation, Param, Params, SessionView, TableError,
};
pub use io::{ByteSource, SliceSource};
