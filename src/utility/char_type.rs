// 単語の絞り込み・列の判定に使う文字種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharType {
    LatinAlphabet,
    Digit,
    Hiragana,
    Katakana,
    Kanji,
    Other,
}

impl CharType {
    pub fn from(c: char) -> Self {
        let u = c as u32;

        if 0x0041 <= u && u <= 0x005a || 0x0061 <= u && u <= 0x007a {
            Self::LatinAlphabet
        } else if 0xff21 <= u && u <= 0xff3a || 0xff41 <= u && u <= 0xff5a {
            // 全角
            Self::LatinAlphabet
        } else if c.is_ascii_digit() || ('０'..='９').contains(&c) {
            Self::Digit
        } else if 0x3040 <= u && u <= 0x309f {
            Self::Hiragana
        } else if 0x30a0 <= u && u <= 0x30ff || 0x31f0 <= u && u <= 0x31ff {
            // 長音符 "ー" もここに入る
            Self::Katakana
        } else if 0xff66 <= u && u <= 0xff9f {
            // 半角
            Self::Katakana
        } else if 0x3400 <= u && u <= 0x4dbf
            || 0x4e00 <= u && u <= 0x9fff
            || 0xf900 <= u && u <= 0xfaff
            || c == '々'
            || c == '〆'
            || c == '〇'
        {
            Self::Kanji
        } else {
            Self::Other
        }
    }

    pub fn is_kana(&self) -> bool {
        matches!(self, Self::Hiragana | Self::Katakana)
    }
}

// 空文字列は false
pub fn is_kana_only(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| CharType::from(c).is_kana())
}
