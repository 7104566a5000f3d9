// 単語 → レベル (JLPT 等の難易度) の対応表
//
// 表は CSV (word,level,...) で，先頭 2 列のみ読む。
// 読み込みに失敗しても呼び出し側にはエラーを返さず，空または部分的な表として扱う

use std::{
    collections::{hash_map::Entry, HashMap},
    fmt,
    fs::File,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::mecab::MorphemeRecord;

pub const DEFAULT_LEVEL_TABLE_PATH: &str = "data/levels.csv";

static GLOBAL_LEVEL_TABLE: Lazy<LevelTable> =
    Lazy::new(|| LevelTable::load(DEFAULT_LEVEL_TABLE_PATH));

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Level {
    Number(u32),  // "4" 等
    Text(String), // "N4" 等
}

impl Level {
    pub fn of(value: &str) -> Self {
        let value = value.trim();
        match value.parse() {
            Ok(number) => Self::Number(number),
            Err(_) => Self::Text(value.to_owned()),
        }
    }

    pub fn as_number(&self) -> Option<u32> {
        match self {
            Self::Number(number) => Some(*number),
            Self::Text(_) => None,
        }
    }

    pub fn to_value(&self) -> serde_yaml::Value {
        match self {
            Self::Number(number) => (*number).into(),
            Self::Text(text) => text.as_str().into(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{}", number),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelTable {
    levels: HashMap<String, Level>,
}

impl LevelTable {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `data/levels.csv` から一度だけ読み込む。以降ファイルが変わっても読み直さない
    pub fn global() -> &'static LevelTable {
        &GLOBAL_LEVEL_TABLE
    }

    /// 同じ単語が複数あるときは最初のものを使う
    pub fn from_pairs<I, W, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (W, L)>,
        W: AsRef<str>,
        L: AsRef<str>,
    {
        let mut table = Self::empty();
        for (word, level) in pairs {
            table.insert(word.as_ref(), level.as_ref());
        }
        table
    }

    /// ファイルが無ければ空の表
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match File::open(path) {
            Ok(file) => Self::from_reader(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Level table not found: {}", path.display());
                Self::empty()
            }
            Err(e) => {
                log::warn!("Failed to open level table {}: {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// 明示的に指定されたファイル用。開けなければエラー
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open level table: {}", path.display()))?;
        Ok(Self::from_reader(file))
    }

    pub fn from_reader(reader: impl Read) -> Self {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut table = Self::empty();

        for (i, record) in reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    if let csv::ErrorKind::Io(_) = e.kind() {
                        log::warn!("Failed to read level table: {}", e);
                        return Self::empty();
                    }
                    log::warn!("Skipped broken row {} in level table: {}", i, e);
                    continue;
                }
            };

            if record.len() < 2 {
                log::warn!("Skipped row {} in level table: too few columns", i);
                continue;
            }

            let word = record[0].trim();
            if word.is_empty() {
                log::warn!("Skipped row {} in level table: empty word", i);
                continue;
            }

            // word,level,... のヘッダ
            if i == 0 && word.eq_ignore_ascii_case("word") {
                continue;
            }

            table.insert(word, &record[1]);
        }

        log::info!("Loaded {} words into level table", table.len());

        table
    }

    fn insert(&mut self, word: &str, level: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }

        // 単語帳 CSV のレベル無しの行 (猫,,ねこ,cat) は登録しない
        let level = level.trim();
        if level.is_empty() {
            log::warn!("Skipped {} in level table: empty level", word);
            return;
        }

        if let Entry::Vacant(entry) = self.levels.entry(word.to_owned()) {
            entry.insert(Level::of(level));
        }
    }

    pub fn get(&self, word: &str) -> Option<&Level> {
        self.levels.get(word)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// 原形 → 読み の順に完全一致で探す
    pub fn lookup_level(&self, record: &MorphemeRecord) -> Option<&Level> {
        if self.is_empty() {
            return None;
        }

        record
            .base_form
            .as_deref()
            .and_then(|word| self.get(word))
            .or_else(|| record.reading.as_deref().and_then(|word| self.get(word)))
    }
}
