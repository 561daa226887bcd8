pub mod records;
pub mod time;

pub use records::*;
pub use time::*;
