pub mod capabilities;
pub mod criteria;
pub mod indexer;
pub mod parsed;
pub mod release;

pub use capabilities::*;
pub use criteria::*;
pub use indexer::*;
pub use parsed::*;
pub use release::*;
