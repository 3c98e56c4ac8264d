//! Helper functions for dates, text, and HTML output

pub mod date;
pub mod html;
pub mod text;
