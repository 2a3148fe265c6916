pub mod health;
pub mod label_scan;
pub mod server;
