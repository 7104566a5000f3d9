use once_cell::sync::Lazy;
use regex::Regex;

// "見る・観る" "見る／観る" "見る、観る" 等
static REGEX_SYNONYM_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[・／/、;；]").unwrap());

fn split(value: &str) -> Vec<&str> {
    REGEX_SYNONYM_DELIMITER
        .split(value)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect()
}

/// (単語, 読み) の組に分ける
///
/// 読みも同じ数に分かれるならそれぞれ対応させ，そうでなければ読み全体を共有する
pub fn split_synonyms(word: &str, reading: &str) -> Vec<(String, String)> {
    let words = split(word);
    let readings = split(reading);

    if words.len() > 1 && words.len() == readings.len() {
        return words
            .into_iter()
            .zip(readings)
            .map(|(word, reading)| (word.to_owned(), reading.to_owned()))
            .collect();
    }

    words
        .into_iter()
        .map(|word| (word.to_owned(), reading.trim().to_owned()))
        .collect()
}
