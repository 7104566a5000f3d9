// TSV の単語リスト → CSV (word,level,reading,meaning)
//
// 入力の列構成は一定でないので，ヘッダ名か中身から列を推定する。
// 出力の先頭 2 列はそのままレベル表として読める

mod columns;
mod synonym;

use std::{
    collections::HashSet,
    io::{Read, Write},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::level::Level;

pub use columns::{detect_columns, ColumnLayout};
pub use synonym::split_synonyms;

pub const WORDLIST_HEADER: [&str; 4] = ["word", "level", "reading", "meaning"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub level: String, // 空文字列はレベル無し
    #[serde(default)]
    pub reading: String,
    #[serde(default)]
    pub meaning: String,
}

impl WordEntry {
    pub fn level(&self) -> Option<Level> {
        if self.level.trim().is_empty() {
            None
        } else {
            Some(Level::of(&self.level))
        }
    }
}

pub fn build_wordlist(tsv: &str) -> Result<Vec<WordEntry>> {
    let rows: Vec<Vec<&str>> = tsv
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(|line| line.split('\t').map(str::trim).collect())
        .collect();

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let (layout, header_rows) = detect_columns(&rows)?;
    log::info!("Detected columns: {:?}", layout);

    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for (i, row) in rows.iter().enumerate().skip(header_rows) {
        let cell =
            |column: Option<usize>| column.and_then(|c| row.get(c)).copied().unwrap_or("");

        let word = cell(Some(layout.word));
        if word.is_empty() {
            log::warn!("Skipped row {}: word is empty", i);
            continue;
        }

        let level = cell(layout.level);
        let meaning = cell(layout.meaning);

        for (word, reading) in split_synonyms(word, cell(layout.reading)) {
            if !seen.insert((word.clone(), reading.clone())) {
                continue;
            }

            entries.push(WordEntry {
                word,
                level: level.to_owned(),
                reading,
                meaning: meaning.to_owned(),
            });
        }
    }

    Ok(entries)
}

pub fn write_wordlist_csv(entries: &[WordEntry], writer: impl Write) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    writer
        .write_record(WORDLIST_HEADER)
        .context("Failed to write header")?;

    for entry in entries {
        writer
            .serialize(entry)
            .with_context(|| format!("Failed to write {:?}", entry))?;
    }

    writer.flush().context("Failed to flush word list")?;

    Ok(())
}

pub fn read_wordlist_csv(reader: impl Read) -> Result<Vec<WordEntry>> {
    let mut reader = csv::Reader::from_reader(reader);

    let mut entries = Vec::new();
    for (i, record) in reader.deserialize().enumerate() {
        let entry: WordEntry =
            record.with_context(|| format!("Failed to parse word list record at {}", i))?;
        entries.push(entry);
    }

    Ok(entries)
}
