//! The song catalog: model types, the folder indexer and search.

mod model;
mod scan;
mod search;

pub use model::*;
pub use scan::build;
pub use search::search;
