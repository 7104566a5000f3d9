use crate::level::LevelTable;

use super::record::MorphemeRecord;

/// 行の解析と、レベル表があればレベル付けを行う
#[derive(Debug, Clone, Copy, Default)]
pub struct MorphemeParser<'a> {
    levels: Option<&'a LevelTable>,
}

impl<'a> MorphemeParser<'a> {
    /// レベル付けをしない
    pub fn new() -> Self {
        Self { levels: None }
    }

    pub fn with_levels(levels: &'a LevelTable) -> Self {
        Self {
            levels: Some(levels),
        }
    }

    pub fn levels(&self) -> Option<&'a LevelTable> {
        self.levels
    }

    pub fn parse(&self, line: &str) -> Option<MorphemeRecord> {
        let mut record = MorphemeRecord::new();
        if self.parse_into(&mut record, Some(line)) {
            Some(record)
        } else {
            None
        }
    }

    /// 解析できなかった場合は record に触れず false を返す
    pub fn parse_into(&self, record: &mut MorphemeRecord, line: Option<&str>) -> bool {
        let Some(line) = line else {
            return false;
        };

        if !record.fill(line) {
            return false;
        }

        if let Some(levels) = self.levels {
            record.annotated = true;
            record.level = levels.lookup_level(record).cloned();
        }

        true
    }
}

impl MorphemeParser<'static> {
    /// 既定のレベル表 (`data/levels.csv`) を使う
    pub fn global() -> Self {
        Self::with_levels(LevelTable::global())
    }
}
