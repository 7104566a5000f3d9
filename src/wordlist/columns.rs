use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::utility::{is_kana_only, CharType};

// 中身から推定するときに見る行数
const SAMPLE_ROWS: usize = 50;

const WORD_HEADERS: &[&str] = &["word", "単語", "語", "見出し語", "漢字", "表記"];
const READING_HEADERS: &[&str] = &["reading", "読み", "よみ", "かな", "ふりがな"];
const MEANING_HEADERS: &[&str] = &["meaning", "意味", "英訳", "english", "translation"];
const LEVEL_HEADERS: &[&str] = &["level", "レベル", "級", "jlpt"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub word: usize,
    pub reading: Option<usize>,
    pub meaning: Option<usize>,
    pub level: Option<usize>,
}

#[derive(Debug, Default)]
struct Roles {
    word: Option<usize>,
    reading: Option<usize>,
    meaning: Option<usize>,
    level: Option<usize>,
}

impl Roles {
    fn is_assigned(&self, column: usize) -> bool {
        [self.word, self.reading, self.meaning, self.level].contains(&Some(column))
    }

    fn is_empty(&self) -> bool {
        self.word.is_none()
            && self.reading.is_none()
            && self.meaning.is_none()
            && self.level.is_none()
    }
}

/// 列の役割と，読み飛ばすヘッダ行数を返す
pub fn detect_columns(rows: &[Vec<&str>]) -> Result<(ColumnLayout, usize)> {
    let Some(first) = rows.first() else {
        bail!("Cannot detect columns of empty word list");
    };

    let header = detect_by_header(first);
    if !header.is_empty() {
        let Some(word) = header.word else {
            bail!("Header has no word column: {:?}", first);
        };

        let layout = ColumnLayout {
            word,
            reading: header.reading,
            meaning: header.meaning,
            level: header.level,
        };
        return Ok((layout, 1));
    }

    let roles = detect_by_content(&rows[..rows.len().min(SAMPLE_ROWS)]);
    let Some(word) = roles.word else {
        bail!("Failed to detect word column: {:?}", first);
    };

    let layout = ColumnLayout {
        word,
        reading: roles.reading,
        meaning: roles.meaning,
        level: roles.level,
    };
    Ok((layout, 0))
}

fn detect_by_header(row: &[&str]) -> Roles {
    let mut roles = Roles::default();

    for (column, cell) in row.iter().enumerate() {
        let name = cell.trim().to_lowercase();
        let name = name.as_str();

        let slot = if WORD_HEADERS.contains(&name) {
            &mut roles.word
        } else if READING_HEADERS.contains(&name) {
            &mut roles.reading
        } else if MEANING_HEADERS.contains(&name) {
            &mut roles.meaning
        } else if LEVEL_HEADERS.contains(&name) {
            &mut roles.level
        } else {
            continue;
        };

        if slot.is_none() {
            *slot = Some(column);
        }
    }

    roles
}

fn detect_by_content(rows: &[Vec<&str>]) -> Roles {
    static REGEX_LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[Nn]?[0-9]+$").unwrap());

    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);

    let columns: Vec<Vec<&str>> = (0..width)
        .map(|column| {
            rows.iter()
                .filter_map(|row| row.get(column).copied())
                .filter(|cell| !cell.is_empty())
                .collect()
        })
        .collect();

    let mut roles = Roles::default();

    roles.level = find_column(&columns, &roles, 0.8, |cell| REGEX_LEVEL.is_match(cell));
    roles.reading = find_column(&columns, &roles, 0.8, is_kana_only);
    roles.meaning = find_column(&columns, &roles, 0.5, |cell| {
        cell.chars()
            .any(|c| c.is_ascii() && CharType::from(c) == CharType::LatinAlphabet)
    });
    roles.word =
        (0..width).find(|&column| !roles.is_assigned(column) && !columns[column].is_empty());

    roles
}

// 空でないセルのうち ratio 以上が predicate を満たす最初の列
fn find_column(
    columns: &[Vec<&str>],
    roles: &Roles,
    ratio: f64,
    predicate: impl Fn(&str) -> bool,
) -> Option<usize> {
    for (column, cells) in columns.iter().enumerate() {
        if roles.is_assigned(column) || cells.is_empty() {
            continue;
        }

        let matched = cells.iter().filter(|&&cell| predicate(cell)).count();
        if matched as f64 >= cells.len() as f64 * ratio {
            return Some(column);
        }
    }

    None
}
