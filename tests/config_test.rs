use std::io::Write;

use gh_pr::config::loader::load_config;
use gh_pr::config::types::AppConfig;
use gh_pr::types::StateFilter;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn parse_minimal_config() {
    let toml = r#"
[github]
host = "github.example.com"
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.github.host, "github.example.com");
    assert_eq!(config.github.viewer, "@me");
    assert_eq!(config.github.token, None);
}

#[test]
fn parse_unknown_keys_ignored() {
    let toml = r#"
unknown_top_level = "should be ignored"

[defaults]
list_limit = 12
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.defaults.list_limit, 12);
}

#[test]
fn parse_defaults() {
    let toml = r#"
[defaults]
list_state = "merged"
list_limit = 50
status_limit = 5
"#;
    let config: AppConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.defaults.list_state, StateFilter::Merged);
    assert_eq!(config.defaults.list_limit, 50);
    assert_eq!(config.defaults.status_limit, 5);
}

#[test]
fn parse_invalid_state_fails() {
    let toml = r#"
[defaults]
list_state = "draft"
"#;
    let result: Result<AppConfig, _> = toml::from_str(toml);
    assert!(result.is_err());
}

#[test]
fn default_config_has_sane_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.github.host, "github.com");
    assert_eq!(config.github.viewer, "@me");
    assert_eq!(config.defaults.list_state, StateFilter::Open);
    assert_eq!(config.defaults.list_limit, 30);
    assert_eq!(config.defaults.status_limit, 10);
    assert_eq!(config.browser_command(), None);
}

#[test]
fn browser_command_is_split_on_whitespace() {
    let config: AppConfig = toml::from_str(r#"browser = "firefox --new-tab""#).unwrap();
    assert_eq!(
        config.browser_command(),
        Some(vec!["firefox".to_owned(), "--new-tab".to_owned()])
    );

    let config: AppConfig = toml::from_str(r#"browser = "   ""#).unwrap();
    assert_eq!(config.browser_command(), None);
}

#[test]
fn load_explicit_path() {
    let file = write_config(
        r#"
browser = "w3m"

[github]
viewer = "monalisa"
"#,
    );
    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.github.viewer, "monalisa");
    assert_eq!(config.browser.as_deref(), Some("w3m"));
}

#[test]
fn invalid_toml_produces_error() {
    let file = write_config("[github\nhost = ");
    let result = load_config(Some(file.path()));
    assert!(result.is_err());
    let err_msg = result.unwrap_err().to_string();
    let name = file.path().file_name().unwrap().to_string_lossy();
    // Error should reference the file path.
    assert!(err_msg.contains(name.as_ref()), "error should mention file: {err_msg}");
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_config(Some(&dir.path().join("nope.toml")));
    assert!(result.is_err());
}
