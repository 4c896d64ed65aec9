pub mod config;
pub mod generator;
pub mod metadata;
pub mod parser;
pub mod prompt;
pub mod store;
pub mod taste;
pub mod utils;


pub use config::*;
pub use generator::*;
pub use metadata::*;
pub use parser::*;
pub use prompt::*;
pub use store::*;
pub use taste::*;
