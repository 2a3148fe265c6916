pub mod classification;
pub mod common;
pub mod label_scan;
