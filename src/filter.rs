// 名詞の絞り込み
//
// 数詞 (名詞,数) と仮名だけの語は単語帳に向かないので除く

use std::collections::HashSet;

use crate::{mecab::MorphemeParser, mecab::MorphemeRecord, utility::is_kana_only};

const NOUN: &str = "名詞";
const NUMERAL: &str = "数";

#[derive(Debug, Clone)]
pub struct NounFilter {
    pub part_of_speech: String,
    pub exclude_numerals: bool,
    pub exclude_kana_only: bool,
    pub unique: bool, // 見出し語ごとに最初の 1 つだけ残す
}

impl Default for NounFilter {
    fn default() -> Self {
        NounFilter {
            part_of_speech: NOUN.to_owned(),
            exclude_numerals: true,
            exclude_kana_only: true,
            unique: false,
        }
    }
}

impl NounFilter {
    pub fn accepts(&self, record: &MorphemeRecord) -> bool {
        if record.part_of_speech.as_deref() != Some(self.part_of_speech.as_str()) {
            return false;
        }

        if self.exclude_numerals && record.part_of_speech_detail1.as_deref() == Some(NUMERAL) {
            return false;
        }

        if self.exclude_kana_only {
            let surface = record.surface.as_deref().unwrap_or("");
            if is_kana_only(surface) {
                return false;
            }
        }

        true
    }
}

/// 原形。未知語などで原形が "*" のときは表層形
pub fn headword(record: &MorphemeRecord) -> Option<&str> {
    match record.base_form.as_deref() {
        Some(base_form) if !base_form.is_empty() && base_form != "*" => Some(base_form),
        _ => record.surface.as_deref(),
    }
}

pub fn filter_nouns<'l, I>(
    lines: I,
    parser: &MorphemeParser,
    filter: &NounFilter,
) -> Vec<MorphemeRecord>
where
    I: IntoIterator<Item = &'l str>,
{
    let mut seen = HashSet::new();

    lines
        .into_iter()
        .filter_map(|line| parser.parse(line))
        .filter(|record| filter.accepts(record))
        .filter(|record| {
            if !filter.unique {
                return true;
            }
            match headword(record) {
                Some(word) => seen.insert(word.to_owned()),
                None => false,
            }
        })
        .collect()
}
