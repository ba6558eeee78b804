//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn kid_games() -> Command
{
    #[allow(deprecated)]
    Command::cargo_bin("kid-games").unwrap()
}

fn profiles_file(json: &str) -> NamedTempFile
{
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

const TWO_KIDS: &str = r#"[
    {
        "name": "Ada",
        "dob": "2019-03-04",
        "color": "green",
        "emoji": "🐢",
        "appConfig": {
            "coins-count": { "lowerBound": 5, "upperBound": 50 },
            "coins-math": { "visible": false },
            "analog-clock-guess": { "granularity": "15-minutes" }
        }
    },
    {
        "name": "Bo",
        "dob": "2017-11-20",
        "color": "purple",
        "emoji": "🦉"
    }
]"#;

#[test]
fn list_shows_every_game_for_default_profile()
{
    kid_games()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Games for Player"))
        .stdout(predicate::str::contains("coins-count"))
        .stdout(predicate::str::contains("coins-math"))
        .stdout(predicate::str::contains("clock"))
        .stdout(predicate::str::contains("(hidden)").not());
}

#[test]
fn list_marks_hidden_games()
{
    let file = profiles_file(TWO_KIDS);
    kid_games()
        .arg("list")
        .arg("--profiles")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Games for Ada"))
        .stdout(predicate::str::is_match(r"coins-math\s+- .*\(hidden\)").unwrap());
}

#[test]
fn config_prints_effective_settings()
{
    let file = profiles_file(TWO_KIDS);
    kid_games()
        .args(["config", "--profile", "Ada", "--profiles"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"granularity\": \"15-minutes\""))
        .stdout(predicate::str::contains("\"lowerBound\": 5"))
        .stdout(predicate::str::contains("\"visible\": false"));
}

#[test]
fn profile_without_app_config_gets_defaults()
{
    let file = profiles_file(TWO_KIDS);
    kid_games()
        .args(["config", "--profile", "Bo", "--profiles"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"preventOveruse\": true"))
        .stdout(predicate::str::contains("\"granularity\": \"hour\""));
}

#[test]
fn hidden_game_is_refused()
{
    let file = profiles_file(TWO_KIDS);
    kid_games()
        .args(["coins-math", "--profile", "Ada", "--profiles"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("coins-math is not available for profile 'Ada'"));
}

#[test]
fn unknown_profile_is_an_error()
{
    kid_games()
        .args(["list", "--profile", "Nobody"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("profile 'Nobody' not found"));
}

#[test]
fn malformed_profiles_file_is_an_error()
{
    let file = profiles_file("{ nope");
    kid_games()
        .arg("list")
        .arg("--profiles")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse profiles"));
}

#[test]
fn log_file_receives_output()
{
    let file = profiles_file(TWO_KIDS);
    let log = NamedTempFile::new().unwrap();
    kid_games()
        .env("RUST_LOG", "kid_games=info")
        .arg("list")
        .arg("--profiles")
        .arg(file.path())
        .arg("--log-file")
        .arg(log.path())
        .assert()
        .success();
    let written = std::fs::read_to_string(log.path()).unwrap();
    assert!(written.contains("profiles loaded"));
}
