use assert_cmd::Command;
use assert_cmd::cargo;
use mockito::{Matcher, Server};
use tempfile::tempdir;

fn ghapi(api_url: &str) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("ghapi"));
    cmd.env_remove("GITHUB_TOKEN").arg("--api-url").arg(api_url);
    cmd
}

#[test]
fn test_project_command() {
    let mut cmd = Command::new(cargo::cargo_bin!("ghapi"));
    cmd.arg("project")
        .arg("https://github.com/foo/bar/releases/tag/v1");

    cmd.assert().success().stdout("foo/bar\n");
}

#[test]
fn test_project_command_foreign_host() {
    let mut cmd = Command::new(cargo::cargo_bin!("ghapi"));
    cmd.arg("project").arg("https://gitlab.com/owner/project");

    cmd.assert().success().stdout("");
}

#[test]
fn test_repo_command() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/repos/owner/repo")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"description": "A test repo", "homepage": "https://example.com"}"#)
        .create();

    ghapi(&url)
        .arg("repo")
        .arg("owner/repo")
        .assert()
        .success()
        .stdout(predicates::str::contains("A test repo"))
        .stdout(predicates::str::contains("https://example.com"));

    mock.assert();
}

#[test]
fn test_token_from_environment() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .match_header("authorization", "Bearer env_token")
        .with_status(200)
        .with_body(r#"{"tag_name": "v1.0.0", "assets": []}"#)
        .create();

    ghapi(&url)
        .env("GITHUB_TOKEN", "env_token")
        .arg("latest")
        .arg("owner/repo")
        .assert()
        .success()
        .stdout(predicates::str::contains("v1.0.0"));

    mock.assert();
}

#[test]
fn test_releases_command_not_found() {
    let mut server = Server::new();
    let url = server.url();

    let mock = server
        .mock("GET", "/repos/owner/missing/releases")
        .with_status(404)
        .create();

    ghapi(&url)
        .arg("releases")
        .arg("owner/missing")
        .assert()
        .failure()
        .stderr(predicates::str::contains("Failed to fetch releases for owner/missing"))
        .stderr(predicates::str::contains("404 Not Found"));

    mock.assert();
}

#[test]
fn test_download_command() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_latest = server
        .mock("GET", "/repos/owner/repo/releases/latest")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{
                "tag_name": "v1.0.0",
                "assets": [
                    {{"name": "tool-linux.tar.gz", "url": "{}/repos/owner/repo/releases/assets/7"}}
                ]
            }}"#,
            url
        ))
        .create();

    let mock_asset = server
        .mock("GET", "/repos/owner/repo/releases/assets/7")
        .match_header("accept", "application/octet-stream")
        .with_status(200)
        .with_body(vec![1u8, 2, 3, 4, 5])
        .create();

    let dir = tempdir().unwrap();
    let target = dir.path().join("tool.tar.gz");

    ghapi(&url)
        .arg("download")
        .arg("owner/repo")
        .arg("tool-linux.tar.gz")
        .arg("--output")
        .arg(&target)
        .assert()
        .success();

    mock_asset.assert();
    assert_eq!(std::fs::read(&target).unwrap(), vec![1u8, 2, 3, 4, 5]);
}

#[test]
fn test_download_command_default_output() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_releases = server
        .mock("GET", "/repos/owner/repo/releases")
        .with_status(200)
        .with_body(format!(
            r#"[{{"tag_name": "v0.1.0", "assets": [{{"name": "tool.bin", "url": "{}/assets/1"}}]}}]"#,
            url
        ))
        .create();
    let _mock_asset = server
        .mock("GET", "/assets/1")
        .with_status(200)
        .with_body("binary")
        .create();

    let dir = tempdir().unwrap();

    ghapi(&url)
        .current_dir(dir.path())
        .arg("download")
        .arg("owner/repo")
        .arg("tool.bin")
        .arg("--tag")
        .arg("v0.1.0")
        .assert()
        .success()
        .stdout(predicates::str::contains("tool.bin"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("tool.bin")).unwrap(),
        "binary"
    );
}
