//! Difference model: codes, single records, aggregates and the final result.

pub mod code;
pub mod details;
pub mod information;
pub mod result;

pub use code::DifferenceCode;
pub use details::DifferenceDetails;
pub use information::{DiffNode, DifferenceInformation, DifferenceInformationBuilder};
pub use result::XmlDiff;
