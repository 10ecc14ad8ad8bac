pub mod series;
pub mod storage;

pub use series::*;
pub use storage::*;
