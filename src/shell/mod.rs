//! Terminal Shell
//!
//! Text front-end for the app:
//!
//! - **command**: input line → `ShellCommand`
//! - **render**: `App` → page text
//! - **repl**: `Shell`, tying the two together around one `App`

pub mod command;
pub mod render;
pub mod repl;

pub use command::{help, parse, ShellCommand};
pub use render::{progress_line, render};
pub use repl::{Reply, Shell};
