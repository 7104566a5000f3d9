pub mod char_type;
pub mod text;

pub use char_type::{is_kana_only, CharType};
