// "該当なし" を表す記号
pub const UNSPECIFIED: &str = "*";

// 品詞から発音まで
pub const FEATURE_COUNT: usize = 9;

// 品詞細分類1..3・活用型・活用形 のみ "*" を None として扱う
// 原形・読み・発音の "*" はそのまま残す
fn is_optional_position(index: usize) -> bool {
    (1..=5).contains(&index)
}

pub fn normalize(index: usize, value: &str) -> Option<String> {
    if is_optional_position(index) && value == UNSPECIFIED {
        None
    } else {
        Some(value.to_owned())
    }
}

pub fn denormalize(index: usize, value: Option<&str>) -> &str {
    match value {
        Some(value) => value,
        None if is_optional_position(index) => UNSPECIFIED,
        None => "",
    }
}
