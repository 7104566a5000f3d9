use anyhow::Result;

use mecab_vocab::mecab::{MorphemeParser, MorphemeRecord};

static HASHITTA: &str = "走っ\t動詞,自立,*,*,五段・ラ行,連用タ接続,走る,ハシッ,ハシッ";

fn is_blank(record: &MorphemeRecord) -> bool {
    record == &MorphemeRecord::new()
}

#[test]
fn test_parse_full_line() {
    let record = MorphemeRecord::parse(HASHITTA).unwrap();

    assert_eq!(record.surface.as_deref(), Some("走っ"));
    assert_eq!(record.part_of_speech.as_deref(), Some("動詞"));
    assert_eq!(record.part_of_speech_detail1.as_deref(), Some("自立"));
    assert_eq!(record.part_of_speech_detail2, None);
    assert_eq!(record.part_of_speech_detail3, None);
    assert_eq!(record.inflection_type.as_deref(), Some("五段・ラ行"));
    assert_eq!(record.inflection_form.as_deref(), Some("連用タ接続"));
    assert_eq!(record.base_form.as_deref(), Some("走る"));
    assert_eq!(record.reading.as_deref(), Some("ハシッ"));
    assert_eq!(record.pronunciation.as_deref(), Some("ハシッ"));
    assert_eq!(record.level, None);
}

#[test]
fn test_new_record_is_blank() {
    let record = MorphemeRecord::new();
    assert_eq!(record.surface, None);
    assert_eq!(record.part_of_speech, None);
    assert!(record.features().iter().all(|feature| feature.is_none()));
    assert_eq!(record.level, None);
}

#[test]
fn test_round_trip() {
    let lines = [
        HASHITTA,
        "今日\t名詞,副詞可能,*,*,*,*,今日,キョウ,キョー",
        "が\t助詞,格助詞,一般,*,*,*,が,ガ,ガ",
        "ｷｬｯﾄ\t名詞,固有名詞,組織,*,*,*,*,*,*",
        "\t記号,空白,*,*,*,*,,,",
        "、\t記号,読点,*,*,*,*,、,、,、",
    ];

    for line in lines {
        let record = MorphemeRecord::parse(line).unwrap();
        assert_eq!(record.to_line_format(), line);
        assert_eq!(record.to_string(), line);
    }
}

#[test]
fn test_line_without_tab_is_ignored() {
    for line in ["EOS", "走る 動詞,自立", "動詞,自立,*,*,*,*,走る,ハシル,ハシル"] {
        assert_eq!(MorphemeRecord::parse(line), None);
    }

    let parser = MorphemeParser::new();
    let mut record = MorphemeRecord::parse(HASHITTA).unwrap();
    let before = record.clone();
    assert!(!parser.parse_into(&mut record, Some("EOS")));
    assert_eq!(record, before);
}

#[test]
fn test_empty_line_is_ignored() {
    let parser = MorphemeParser::new();

    for line in ["", "   ", "\n", "\r\n", " \t "] {
        assert_eq!(parser.parse(line), None);

        let mut record = MorphemeRecord::new();
        assert!(!parser.parse_into(&mut record, Some(line)));
        assert!(is_blank(&record));
    }

    let mut record = MorphemeRecord::new();
    assert!(!parser.parse_into(&mut record, None));
    assert!(is_blank(&record));
}

#[test]
fn test_partial_features() {
    let record = MorphemeRecord::parse("走る\t動詞").unwrap();
    assert_eq!(record.surface.as_deref(), Some("走る"));
    assert_eq!(record.part_of_speech.as_deref(), Some("動詞"));
    assert!(record.features()[1..].iter().all(|feature| feature.is_none()));

    let record = MorphemeRecord::parse("走る\t動詞,自立,*").unwrap();
    assert_eq!(record.part_of_speech_detail1.as_deref(), Some("自立"));
    assert_eq!(record.part_of_speech_detail2, None);
    assert_eq!(record.base_form, None);
    assert_eq!(
        record.to_line_format(),
        "走る\t動詞,自立,*,*,*,*,,,"
    );
}

#[test]
fn test_empty_feature_segment() {
    let record = MorphemeRecord::parse("走る\t").unwrap();
    assert_eq!(record.surface.as_deref(), Some("走る"));
    assert_eq!(record.part_of_speech, None);

    let record = MorphemeRecord::parse("\t名詞").unwrap();
    assert_eq!(record.surface.as_deref(), Some(""));
    assert_eq!(record.part_of_speech.as_deref(), Some("名詞"));
}

#[test]
fn test_only_first_tab_delimits() {
    let record = MorphemeRecord::parse("a\tb\tc,d").unwrap();
    assert_eq!(record.surface.as_deref(), Some("a"));
    assert_eq!(record.part_of_speech.as_deref(), Some("b\tc"));
    assert_eq!(record.part_of_speech_detail1.as_deref(), Some("d"));
}

#[test]
fn test_sentinel_only_in_detail_and_inflection() {
    let record = MorphemeRecord::parse("x\t*,*,*,*,*,*,*,*,*").unwrap();
    assert_eq!(record.part_of_speech.as_deref(), Some("*"));
    assert_eq!(record.part_of_speech_detail1, None);
    assert_eq!(record.part_of_speech_detail2, None);
    assert_eq!(record.part_of_speech_detail3, None);
    assert_eq!(record.inflection_type, None);
    assert_eq!(record.inflection_form, None);
    assert_eq!(record.base_form.as_deref(), Some("*"));
    assert_eq!(record.reading.as_deref(), Some("*"));
    assert_eq!(record.pronunciation.as_deref(), Some("*"));

    // "*" 以外は空文字列もそのまま
    let record = MorphemeRecord::parse("x\t名詞,,**, *,*,*,x,y,z").unwrap();
    assert_eq!(record.part_of_speech_detail1.as_deref(), Some(""));
    assert_eq!(record.part_of_speech_detail2.as_deref(), Some("**"));
    assert_eq!(record.part_of_speech_detail3.as_deref(), Some(" *"));
}

#[test]
fn test_extra_features_are_ignored() {
    let record =
        MorphemeRecord::parse("走る\t動詞,自立,*,*,五段・ラ行,基本形,走る,ハシル,ハシル,extra,more")
            .unwrap();
    assert_eq!(record.pronunciation.as_deref(), Some("ハシル"));
    assert_eq!(
        record.to_line_format(),
        "走る\t動詞,自立,*,*,五段・ラ行,基本形,走る,ハシル,ハシル"
    );
}

#[test]
fn test_line_terminator_is_stripped() {
    let record = MorphemeRecord::parse("猫\t名詞,一般,*,*,*,*,猫,ネコ,ネコ\r\n").unwrap();
    assert_eq!(record.pronunciation.as_deref(), Some("ネコ"));
}

#[test]
fn test_reparse_resets_record() {
    let parser = MorphemeParser::new();

    let mut record = MorphemeRecord::new();
    assert!(parser.parse_into(&mut record, Some(HASHITTA)));
    assert!(parser.parse_into(&mut record, Some("猫\t名詞")));

    assert_eq!(record.surface.as_deref(), Some("猫"));
    assert_eq!(record.part_of_speech.as_deref(), Some("名詞"));
    assert_eq!(record.base_form, None);
    assert_eq!(record.inflection_type, None);
}

#[test]
fn test_mapping_keeps_order_and_nulls() {
    let record = MorphemeRecord::parse("走る\t動詞,自立").unwrap();
    let mapping = record.to_mapping();

    let keys: Vec<&str> = mapping.keys().filter_map(|key| key.as_str()).collect();
    assert_eq!(
        keys,
        [
            "surface",
            "partOfSpeech",
            "partOfSpeechDetail1",
            "partOfSpeechDetail2",
            "partOfSpeechDetail3",
            "inflectionType",
            "inflectionForm",
            "baseForm",
            "reading",
            "pronunciation",
        ]
    );

    assert_eq!(mapping["surface"].as_str(), Some("走る"));
    assert_eq!(mapping["partOfSpeechDetail1"].as_str(), Some("自立"));
    assert!(mapping["partOfSpeechDetail2"].is_null());
    assert!(mapping["pronunciation"].is_null());
}

#[test]
fn test_yaml_and_json() -> Result<()> {
    let record = MorphemeRecord::parse(HASHITTA).unwrap();

    let yaml = record.to_yaml()?;
    assert!(yaml.starts_with("surface: 走っ\n"));
    assert!(yaml.contains("partOfSpeechDetail2: null\n"));
    assert!(yaml.contains("baseForm: 走る\n"));
    assert!(!yaml.contains("level"));

    let json: serde_json::Value = serde_json::from_str(&record.to_json()?)?;
    assert_eq!(json["inflectionType"], "五段・ラ行");
    assert!(json["partOfSpeechDetail3"].is_null());

    Ok(())
}
