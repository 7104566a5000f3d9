use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;

pub const DEFAULT_ENCODING: &str = "utf-8";

// MeCab の辞書によっては Shift_JIS・EUC-JP で出力される
pub fn decode(bytes: &[u8], label: &str) -> Result<String> {
    let encoding = Encoding::for_label(label.as_bytes())
        .with_context(|| format!("Unknown encoding: {}", label))?;

    let (text, actual, had_errors) = encoding.decode(bytes);
    if had_errors {
        log::warn!("Input contains malformed {} sequences", actual.name());
    }

    Ok(text.into_owned())
}

/// path が無ければ標準入力から読む
pub fn read_input(path: Option<&Path>, label: &str) -> Result<String> {
    let bytes = match path {
        Some(path) => {
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
        }
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut bytes)
                .context("Failed to read stdin")?;
            bytes
        }
    };

    decode(&bytes, label)
}
