pub mod classify_label;
pub mod classify_text;
