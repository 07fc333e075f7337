mod terminal;

pub use terminal::{Command, TerminalSession};
