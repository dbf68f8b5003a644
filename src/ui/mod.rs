// UI - Text input surface for the command session

pub mod command_bar;
pub mod console;

pub use command_bar::CommandBar;
pub use console::Console;
