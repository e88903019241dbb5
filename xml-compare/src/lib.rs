//! Command-line support for `xml-compare`: config files, terminal reports and
//! tree inspection on top of [`xml_compare_core`].

pub mod config;
pub mod inspect;
pub mod report;
