pub mod error;
pub mod text;

pub use text::truncate_chars;
