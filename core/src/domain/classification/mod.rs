pub mod contract;
pub mod entities;
pub mod parser;
pub mod revisions;
pub mod templates;

pub use contract::*;
pub use entities::*;
