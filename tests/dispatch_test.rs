// End-to-end tests: config file → dispatcher → outcomes
use portfolio_voice_lib::actions::Action;
use portfolio_voice_lib::config::{default_config, load_config_from, ConfigError};
use portfolio_voice_lib::voice_commands::{CatalogError, DispatchOutcome};
use portfolio_voice_lib::{build_dispatcher, dispatch_all};
use std::fs;

fn lines(items: &[&str]) -> Vec<std::io::Result<String>> {
    items.iter().map(|s| Ok(s.to_string())).collect()
}

#[test]
fn test_default_catalog_dispatch() {
    let dispatcher = build_dispatcher(&default_config(), None).unwrap();
    let mut out = Vec::new();

    let outcomes = dispatch_all(
        &dispatcher,
        lines(&["Go too contact", "", "Dark  mode", "sing me a song please"]),
        false,
        &mut out,
    )
    .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0].action(), Some(&Action::Navigate("contact".to_string())));
    assert_eq!(outcomes[1].action(), Some(&Action::ToggleTheme));
    assert!(!outcomes[2].is_command());

    let text = String::from_utf8(out).unwrap();
    let printed: Vec<&str> = text.lines().collect();
    assert_eq!(
        printed,
        [
            "[command] go to contact → navigate:contact",
            "[command] dark mode → theme:toggle",
            "Command not recognized: \"sing me a song please\"",
        ]
    );
}

#[test]
fn test_json_output() {
    let dispatcher = build_dispatcher(&default_config(), None).unwrap();
    let mut out = Vec::new();
    dispatch_all(&dispatcher, lines(&["show projects"]), true, &mut out).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["outcome"], "command");
    assert_eq!(value["phrase"], "show projects");
    assert_eq!(value["action"], "navigate:projects");
}

#[test]
fn test_threshold_override() {
    let config = default_config();
    // "go to abut" vs "go to about": 10/11
    let strict = build_dispatcher(&config, Some(0.95)).unwrap();
    assert!(!strict.recognize("go to abut").is_command());

    let lenient = build_dispatcher(&config, None).unwrap();
    assert!(lenient.recognize("go to abut").is_command());

    assert!(matches!(
        build_dispatcher(&config, Some(-0.1)),
        Err(ConfigError::Threshold(_))
    ));
}

#[test]
fn test_config_file_with_bad_action() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[voice]
threshold = 0.7

[[voice_commands]]
phrase = "open blog"
action = "navigate:blog"

[[voice_commands]]
phrase = "launch rocket"
action = "rocket:launch"
"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.voice.threshold, 0.7);

    match build_dispatcher(&config, None) {
        Err(ConfigError::Catalog(CatalogError::InvalidAction { phrase, .. })) => {
            assert_eq!(phrase, "launch rocket");
        }
        other => panic!("expected invalid action, got {other:?}"),
    }
}

#[test]
fn test_custom_catalog_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
[[voice_commands]]
phrase = "Open Blog"
action = "navigate:blog"
"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    let dispatcher = build_dispatcher(&config, None).unwrap();
    assert_eq!(
        dispatcher.recognize("open blogs"),
        DispatchOutcome::Command {
            utterance: "open blogs".to_string(),
            phrase: "open blog".to_string(),
            action: Action::Navigate("blog".to_string()),
            score: 0.9,
        }
    );
}
