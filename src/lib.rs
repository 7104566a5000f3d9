pub mod filter;
pub mod level;
pub mod mecab;
pub mod quiz;
pub mod utility;
pub mod wordlist;
