mod common;

use common::{run_meeting_mind, TestEnv};

#[test]
fn help_shows_usage() {
    let output = run_meeting_mind(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "--help should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("Commands:"));
    assert!(stdout.contains("serve"));
}

#[test]
fn version_shows_version() {
    let output = run_meeting_mind(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("meeting-mind "));
}

#[test]
fn completions_bash_outputs_script() {
    let output = run_meeting_mind(&["completions", "bash"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "completions bash should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(
        stdout.contains("meeting-mind"),
        "expected completion output to reference command name\nstdout:\n{}",
        stdout
    );
}

#[test]
fn themes_lists_catalog() {
    let output = run_meeting_mind(&["themes"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for id in [
        "equipment_investment",
        "hr_evaluation",
        "product_development",
        "budget_planning",
        "process_improvement",
        "general",
    ] {
        assert!(stdout.contains(id), "missing theme {}\nstdout:\n{}", id, stdout);
    }
}

#[test]
fn themes_json_is_parseable() {
    let output = run_meeting_mind(&["themes", "--json"]);
    assert!(output.status.success());

    let themes: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("themes --json should print JSON");
    let themes = themes.as_array().expect("themes should be an array");
    assert_eq!(themes.len(), 6);
    assert_eq!(themes[0]["dimensions"][4]["format"], "horizon");
}

#[test]
fn config_show_works() {
    let output = run_meeting_mind(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(
        output.status.success(),
        "config show should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        stderr
    );
    assert!(stdout.contains("[server]"));
    assert!(stdout.contains("port = 8080"));
    assert!(stdout.contains("json_extraction = \"legacy\""));
}

#[test]
fn port_env_overrides_config() {
    let env = TestEnv::new();
    let output = env.run_with_env(&["config", "show"], &[("PORT", "5050")]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("port = 5050"));
}

#[test]
fn invalid_port_env_fails() {
    let env = TestEnv::new();
    let output = env.run_with_env(&["config", "show"], &[("PORT", "abc")]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Invalid PORT value"),
        "expected PORT error, got:\n{}",
        stderr
    );
}

#[test]
fn config_path_returns_valid_path() {
    let output = run_meeting_mind(&["config", "path"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_init_refuses_to_overwrite() {
    let env = TestEnv::new();

    let first = env.run(&["config", "init"]);
    assert!(first.status.success());
    assert!(env.config_path().exists());

    let second = env.run(&["config", "init"]);
    assert!(!second.status.success());
    assert!(String::from_utf8_lossy(&second.stderr).contains("--force"));

    let forced = env.run(&["config", "init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn config_show_masks_api_key() {
    let env = TestEnv::new();
    env.write_config("[llm]\napi_key = \"super-secret\"\n\n[server]\nport = 9090\n");

    let output = env.run(&["config", "show"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("port = 9090"));
    assert!(!stdout.contains("super-secret"));
}

#[test]
fn analyze_requires_api_key() {
    let env = TestEnv::new();
    let transcript = env.home().join("transcript.txt");
    std::fs::write(&transcript, "新しい設備の導入コストが気になります").unwrap();

    let output = env.run(&["analyze", transcript.to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(
        stderr.contains("Gemini API key is missing"),
        "expected missing key error, got:\n{}",
        stderr
    );
}

#[test]
fn analyze_reports_missing_transcript() {
    let output = run_meeting_mind(&["analyze", "does-not-exist.txt"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("Failed to read transcript"));
}
