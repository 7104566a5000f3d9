use std::fmt;

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};
use serde_yaml::{Mapping, Value};

use crate::level::Level;

use super::feature::{self, FEATURE_COUNT};

const SURFACE_KEY: &str = "surface";
const LEVEL_KEY: &str = "level";
const FEATURE_KEYS: [&str; FEATURE_COUNT] = [
    "partOfSpeech",
    "partOfSpeechDetail1",
    "partOfSpeechDetail2",
    "partOfSpeechDetail3",
    "inflectionType",
    "inflectionForm",
    "baseForm",
    "reading",
    "pronunciation",
];

/// MeCab が出力する形態素 1 つ分
///
/// `new()` 直後はすべて `None`。`*` (該当なし) も `None` で表す。
/// 比較は表に見える値と `level` だけで行い、どのパーサで解析したかは見ない。
#[derive(Debug, Clone, Default)]
pub struct MorphemeRecord {
    pub surface: Option<String>,                // 表層形
    pub part_of_speech: Option<String>,         // 品詞
    pub part_of_speech_detail1: Option<String>, // 品詞細分類1
    pub part_of_speech_detail2: Option<String>, // 品詞細分類2
    pub part_of_speech_detail3: Option<String>, // 品詞細分類3
    pub inflection_type: Option<String>,        // 活用型
    pub inflection_form: Option<String>,        // 活用形
    pub base_form: Option<String>,              // 原形
    pub reading: Option<String>,                // 読み
    pub pronunciation: Option<String>,          // 発音

    pub level: Option<Level>,

    // レベル表付きで解析されたか (出力に level を含めるかどうか)
    pub(crate) annotated: bool,
}

impl MorphemeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// 1 行を解析する。タブを含まない行・空行は `None`
    pub fn parse(line: &str) -> Option<Self> {
        let mut record = Self::new();
        if record.fill(line) {
            Some(record)
        } else {
            None
        }
    }

    // 解析できたときだけ self を置き換える
    pub(crate) fn fill(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return false;
        }

        let line = line.trim_end_matches(['\r', '\n']);

        // 2 つ目以降のタブは素性の一部として扱う
        let Some((surface, features)) = line.split_once('\t') else {
            return false;
        };

        *self = Self {
            surface: Some(surface.to_owned()),
            ..Self::default()
        };

        if features.is_empty() {
            return true;
        }

        for (index, value) in features.split(',').take(FEATURE_COUNT).enumerate() {
            *self.feature_mut(index) = feature::normalize(index, value);
        }

        true
    }

    pub fn features(&self) -> [Option<&str>; FEATURE_COUNT] {
        [
            self.part_of_speech.as_deref(),
            self.part_of_speech_detail1.as_deref(),
            self.part_of_speech_detail2.as_deref(),
            self.part_of_speech_detail3.as_deref(),
            self.inflection_type.as_deref(),
            self.inflection_form.as_deref(),
            self.base_form.as_deref(),
            self.reading.as_deref(),
            self.pronunciation.as_deref(),
        ]
    }

    fn feature_mut(&mut self, index: usize) -> &mut Option<String> {
        match index {
            0 => &mut self.part_of_speech,
            1 => &mut self.part_of_speech_detail1,
            2 => &mut self.part_of_speech_detail2,
            3 => &mut self.part_of_speech_detail3,
            4 => &mut self.inflection_type,
            5 => &mut self.inflection_form,
            6 => &mut self.base_form,
            7 => &mut self.reading,
            8 => &mut self.pronunciation,
            _ => unreachable!("feature index out of range: {}", index),
        }
    }

    /// MeCab の出力形式に戻す
    pub fn to_line_format(&self) -> String {
        let features: Vec<&str> = self
            .features()
            .into_iter()
            .enumerate()
            .map(|(index, value)| feature::denormalize(index, value))
            .collect();

        format!(
            "{}\t{}",
            self.surface.as_deref().unwrap_or(""),
            features.join(",")
        )
    }

    /// フィールド名 → 値 の順序付きマップ。値が無いものは null
    pub fn to_mapping(&self) -> Mapping {
        let mut mapping = Mapping::new();

        mapping.insert(SURFACE_KEY.into(), optional_value(self.surface.as_deref()));
        for (key, value) in FEATURE_KEYS.iter().zip(self.features()) {
            mapping.insert((*key).into(), optional_value(value));
        }

        if self.annotated || self.level.is_some() {
            let level = match &self.level {
                Some(level) => level.to_value(),
                None => Value::Null,
            };
            mapping.insert(LEVEL_KEY.into(), level);
        }

        mapping
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to encode record as YAML")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to encode record as JSON")
    }
}

fn optional_value(value: Option<&str>) -> Value {
    match value {
        Some(value) => value.into(),
        None => Value::Null,
    }
}

impl PartialEq for MorphemeRecord {
    fn eq(&self, other: &Self) -> bool {
        self.surface == other.surface
            && self.features() == other.features()
            && self.level == other.level
    }
}

impl Eq for MorphemeRecord {}

impl Serialize for MorphemeRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_mapping().serialize(serializer)
    }
}

impl fmt::Display for MorphemeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line_format())
    }
}
