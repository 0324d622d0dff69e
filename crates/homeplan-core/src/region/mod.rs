pub mod selection;
pub mod table;

pub use selection::{RegionEvent, RegionSelection};
pub use table::{District, Province, RegionTable};
