// 単語帳 → 4 択問題 (GIFT 形式)
//
// 誤答は同じレベルの他の単語の答えから選ぶ

use std::{cmp::Ordering, collections::BTreeMap, collections::HashSet, fmt};

use anyhow::{bail, Result};
use rand::{seq::SliceRandom, Rng};

use crate::{level::Level, wordlist::WordEntry};

pub const DEFAULT_DISTRACTORS: usize = 3;

const GIFT_TEMPLATE: &str = "::{title}:: {prompt} {\n{choices}}\n";
const GIFT_SPECIAL_CHARS: &[char] = &['~', '=', '#', '{', '}', ':'];

// 数値のレベル → 文字列のレベル → レベル無し の順に並ぶ
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LevelKey {
    Number(u32),
    Text(String),
    Unleveled,
}

// 末尾の数字は数として比べる (N2 < N10)
fn split_numeric_suffix(text: &str) -> (&str, Option<u32>) {
    let prefix = text.trim_end_matches(|c: char| c.is_ascii_digit());
    (prefix, text[prefix.len()..].parse().ok())
}

impl Ord for LevelKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => split_numeric_suffix(a)
                .cmp(&split_numeric_suffix(b))
                .then_with(|| a.cmp(b)),
            (Self::Unleveled, Self::Unleveled) => Ordering::Equal,
            (Self::Number(_), _) | (Self::Text(_), Self::Unleveled) => Ordering::Less,
            _ => Ordering::Greater,
        }
    }
}

impl PartialOrd for LevelKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Option<Level>> for LevelKey {
    fn from(level: Option<Level>) -> Self {
        match level {
            Some(Level::Number(number)) => Self::Number(number),
            Some(Level::Text(text)) => Self::Text(text),
            None => Self::Unleveled,
        }
    }
}

impl fmt::Display for LevelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{}", number),
            Self::Text(text) => f.write_str(text),
            Self::Unleveled => f.write_str("unleveled"),
        }
    }
}

pub fn bucket_by_level(entries: Vec<WordEntry>) -> BTreeMap<LevelKey, Vec<WordEntry>> {
    let mut buckets = BTreeMap::<LevelKey, Vec<WordEntry>>::new();
    for entry in entries {
        buckets.entry(entry.level().into()).or_default().push(entry);
    }
    buckets
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerField {
    Meaning,
    Reading,
}

impl AnswerField {
    pub fn of(name: &str) -> Result<Self> {
        match name {
            "meaning" => Ok(Self::Meaning),
            "reading" => Ok(Self::Reading),
            name => bail!("Unknown answer field: {}", name),
        }
    }

    fn value<'a>(&self, entry: &'a WordEntry) -> &'a str {
        match self {
            Self::Meaning => entry.meaning.trim(),
            Self::Reading => entry.reading.trim(),
        }
    }

    fn prompt(&self, word: &str) -> String {
        match self {
            Self::Meaning => format!("「{}」の意味は？", word),
            Self::Reading => format!("「{}」の読み方は？", word),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    pub word: String,
    pub prompt: String,
    pub answer: String,
    pub distractors: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct QuizGenerator {
    pub distractors: usize,
    pub answer: AnswerField,
}

impl Default for QuizGenerator {
    fn default() -> Self {
        QuizGenerator {
            distractors: DEFAULT_DISTRACTORS,
            answer: AnswerField::Meaning,
        }
    }
}

impl QuizGenerator {
    /// 1 つのレベルの単語から問題を作る。誤答を 1 つも選べない単語は飛ばす
    pub fn generate<R: Rng + ?Sized>(&self, words: &[WordEntry], rng: &mut R) -> Vec<QuizItem> {
        let mut seen = HashSet::new();
        let answers: Vec<&str> = words
            .iter()
            .map(|word| self.answer.value(word))
            .filter(|answer| !answer.is_empty() && seen.insert(*answer))
            .collect();

        let mut items = Vec::new();

        for word in words {
            let answer = self.answer.value(word);
            if answer.is_empty() {
                log::debug!("Skipped {:?}: no answer", word.word);
                continue;
            }

            let candidates: Vec<&str> = answers
                .iter()
                .copied()
                .filter(|&candidate| candidate != answer)
                .collect();
            if candidates.is_empty() {
                log::warn!("Skipped {:?}: no other answers to choose from", word.word);
                continue;
            }

            let distractors = candidates
                .choose_multiple(rng, self.distractors)
                .map(|candidate| candidate.to_string())
                .collect();

            items.push(QuizItem {
                word: word.word.clone(),
                prompt: self.answer.prompt(&word.word),
                answer: answer.to_owned(),
                distractors,
            });
        }

        items
    }
}

pub fn escape_gift(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if GIFT_SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn render_gift(level: &LevelKey, items: &[QuizItem]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let title = escape_gift(&format!("{}-{} {}", level, i + 1, item.word));

            let mut choices = format!("={}\n", escape_gift(&item.answer));
            for distractor in &item.distractors {
                choices.push_str(&format!("~{}\n", escape_gift(distractor)));
            }

            GIFT_TEMPLATE
                .replace("{title}", &title)
                .replace("{prompt}", &escape_gift(&item.prompt))
                .replace("{choices}", &choices)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
