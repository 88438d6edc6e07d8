mod aggregate;
mod chart;
mod filter;
mod money;
mod period;
mod records;
mod summary;

pub use aggregate::*;
pub use chart::*;
pub use filter::*;
pub use money::*;
pub use period::*;
pub use records::*;
pub use summary::*;
