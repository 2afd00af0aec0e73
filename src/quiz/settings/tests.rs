use super::*;

#[test]
fn defaults_match_quiz_page() {
    let settings = Settings::default();
    assert_eq!(settings.time_limit, Duration::from_millis(20000));
    assert_eq!(settings.tick_period, Duration::from_millis(100));
    assert_eq!(settings.default_question_count, 5);
    assert_eq!(settings.max_question_count, 100);
    assert_eq!(settings.max_distractors, 3);
    assert_eq!(settings.min_same_category_pool, 3);
    assert_eq!(settings.default_source, PathBuf::from("terms.csv"));
}

#[test]
fn empty_file_yields_defaults() {
    assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
}

#[test]
fn overrides_some_fields() {
    let settings =
        Settings::from_json(r#"{ "time_limit_ms": 30000, "default_source": "bact.csv" }"#)
            .unwrap();
    assert_eq!(settings.time_limit, Duration::from_secs(30));
    assert_eq!(settings.default_source, PathBuf::from("bact.csv"));
    assert_eq!(settings.tick_period, Duration::from_millis(100));
}

#[test]
fn rejects_zero_time_limit() {
    assert!(Settings::from_json(r#"{ "time_limit_ms": 0 }"#).is_err());
}

#[test]
fn rejects_default_count_above_max() {
    let raw = RawSettings {
        default_question_count: Some(20),
        max_question_count: Some(10),
        ..Default::default()
    };
    match Settings::try_from(raw) {
        Err(QuizError::InvalidSettings(_)) => (),
        other => panic!("Unexpected result {:?}", other),
    }
}

#[test]
fn rejects_malformed_json() {
    assert!(Settings::from_json("time_limit_ms = 3").is_err());
}
