use super::*;

#[test]
fn test_parses_simple_analysis_name() {
    let name = parse_analysis_filename("augustine_01_kolb.json").unwrap();
    assert_eq!(name.preacher, "augustine");
    assert_eq!(name.sermon_id, "01");
    assert_eq!(name.raw_sermon_id, "01");
    assert_eq!(name.run, RunLabel::A);
    assert_eq!(name.framework.id, "kolb");
    assert_eq!(name.sermon_key(), "augustine_01");
}

#[test]
fn test_parses_multi_token_framework_suffix() {
    let name = parse_analysis_filename("augustine_01_schulz_von_thun.json").unwrap();
    assert_eq!(name.framework.id, "schulz_von_thun");
    assert_eq!(name.sermon_id, "01");

    let name = parse_analysis_filename("luther_12_speech_act.json").unwrap();
    assert_eq!(name.framework.id, "speech_act");
    assert_eq!(name.preacher, "luther");
}

#[test]
fn test_multi_token_sermon_id_is_joined() {
    let name = parse_analysis_filename("augustine_advent_03_aristoteles.json").unwrap();
    assert_eq!(name.preacher, "augustine");
    assert_eq!(name.sermon_id, "advent_03");
    assert_eq!(name.framework.id, "aristoteles");
}

#[test]
fn test_replicate_run_suffix_is_split_off() {
    let name = parse_analysis_filename("augustine_01_B_kolb.json").unwrap();
    assert_eq!(name.sermon_id, "01");
    assert_eq!(name.raw_sermon_id, "01_B");
    assert_eq!(name.run, RunLabel::B);
    assert_eq!(name.sermon_key(), "augustine_01_B");

    let name = parse_analysis_filename("augustine_01_A_kolb.json").unwrap();
    assert_eq!(name.sermon_id, "01");
    assert_eq!(name.raw_sermon_id, "01_A");
    assert_eq!(name.run, RunLabel::A);
}

#[test]
fn test_gzip_extension_is_accepted() {
    let name = parse_analysis_filename("augustine_01_dekker.json.gz").unwrap();
    assert_eq!(name.framework.id, "dekker");
    assert_eq!(name.sermon_id, "01");
}

#[test]
fn test_skip_patterns_and_non_json_are_rejected() {
    assert!(parse_analysis_filename("statistics.json").is_none());
    assert!(parse_analysis_filename("violin_data.json").is_none());
    assert!(parse_analysis_filename("augustine_01_kolb.raw.json").is_none());
    assert!(parse_analysis_filename("file_index.json").is_none());
    assert!(parse_analysis_filename("augustine_01_kolb.txt").is_none());
}

#[test]
fn test_short_or_unknown_names_are_rejected() {
    // fewer than three tokens cannot carry preacher, sermon and framework
    assert!(parse_analysis_filename("kolb.json").is_none());
    assert!(parse_analysis_filename("augustine_kolb.json").is_none());
    // unknown framework suffix
    assert!(parse_analysis_filename("augustine_01_mystery.json").is_none());
    // framework directly after the preacher leaves no sermon id
    assert!(parse_analysis_filename("augustine_schulz_von_thun.json").is_none());
}

#[test]
fn test_run_label_parse_and_as_str() {
    assert_eq!(RunLabel::parse("A"), Some(RunLabel::A));
    assert_eq!(RunLabel::parse("B"), Some(RunLabel::B));
    assert_eq!(RunLabel::parse("C"), None);
    assert_eq!(RunLabel::B.as_str(), "B");
}
