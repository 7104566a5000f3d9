// MeCab (IPA 辞書形式) の出力 1 行を扱う
//
//   表層形\t品詞,品詞細分類1,品詞細分類2,品詞細分類3,活用型,活用形,原形,読み,発音
//
// 解析に失敗した行 (タブが無い・空行・EOS) はエラーにせず単に無視する

mod feature;
pub mod parser;
pub mod record;

pub use parser::MorphemeParser;
pub use record::MorphemeRecord;
