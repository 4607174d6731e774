mod address;
mod records;
mod status;
mod transaction;

pub use address::*;
pub use records::*;
pub use status::*;
pub use transaction::*;
