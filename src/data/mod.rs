pub mod cleaner;
pub mod loader;
pub mod parser;
