use predicates::prelude::*;
use std::fs;

use crate::common::SvnFixture;

const CORE_URL: &str = "http://core.svn.wordpress.org/tags/3.2.1";

#[test]
fn test_missing_target_directory() {
    let fixture = SvnFixture::new(CORE_URL).unwrap();
    let missing = fixture.home().join("no-such-blog");

    fixture
        .command()
        .unwrap()
        .arg(&missing)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("(exiting...)"))
        .stderr(predicate::str::contains("Cannot change to directory"));

    assert!(fixture.calls().is_empty());
}

#[test]
fn test_svn_not_installed() {
    let fixture = SvnFixture::new(CORE_URL).unwrap();

    fixture
        .command()
        .unwrap()
        .args(["--svn", "wp-svn-update-no-such-svn"])
        .arg(fixture.blog())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("wp-svn-update-no-such-svn"))
        .stderr(predicate::str::contains("not installed"));
}

#[test]
fn test_not_a_working_copy() {
    let fixture = SvnFixture::new(CORE_URL).and_then(SvnFixture::without_working_copy).unwrap();

    fixture
        .command()
        .unwrap()
        .arg("-f")
        .arg(fixture.blog())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Changes to be performed").not())
        .stdout(predicate::str::contains("(exiting...)"))
        .stderr(predicate::str::contains("Cannot parse svn repository info"))
        .stderr(predicate::str::contains("is not a working copy"));

    assert_eq!(fixture.calls(), vec!["info"]);
}

#[test]
fn test_unlistable_plugin_does_not_stop_the_run() {
    // no listing registered for the `gone` plugin
    let fixture = SvnFixture::new(CORE_URL)
        .and_then(|f| f.with_listing("http://core.svn.wordpress.org/tags/", "3.2.1/\n3.3/\n"))
        .and_then(|f| f.with_listing("http://plugins.svn.wordpress.org/akismet/tags/", "2.5.3/\n2.5.4/\n"))
        .and_then(|f| {
            f.with_externals(
                "gone http://plugins.svn.wordpress.org/gone/tags/1.0/\n\
                 akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.3/\n",
            )
        })
        .unwrap();

    fixture
        .command()
        .unwrap()
        .arg("-f")
        .arg(fixture.blog())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ERROR: Cannot determine newest version of current svn url: \
             http://plugins.svn.wordpress.org/gone/tags/1.0/",
        ))
        .stdout(predicate::str::contains("\t3.2.1 -> 3.3"))
        .stdout(predicate::str::contains("\takismet: 2.5.3 -> 2.5.4"));

    assert_eq!(
        fixture.written_externals().unwrap(),
        "gone http://plugins.svn.wordpress.org/gone/tags/1.0/\n\
         akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.4/\n"
    );
    assert!(fixture.calls().iter().any(|c| c == "switch http://core.svn.wordpress.org/tags/3.3/"));
}

#[test]
fn test_unrecognized_core_url_is_reported() {
    let fixture = SvnFixture::new("http://svn.example.com/blog/branches/3.2")
        .and_then(|f| f.with_listing("http://plugins.svn.wordpress.org/akismet/tags/", "2.5.3/\n"))
        .and_then(|f| f.with_externals("akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.3/\n"))
        .unwrap();

    fixture
        .command()
        .unwrap()
        .arg(fixture.blog())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "ERROR: Cannot determine newest version of current svn url: \
             http://svn.example.com/blog/branches/3.2",
        ))
        .stdout(predicate::str::contains("\tNo change (current version = unknown)"));
}

#[test]
fn test_invalid_config_file() {
    let fixture = SvnFixture::new(CORE_URL).unwrap();
    let config = fixture.home().join("config.toml");
    fs::write(&config, "svn = [\n").unwrap();

    fixture
        .command()
        .unwrap()
        .arg("--config")
        .arg(&config)
        .arg(fixture.blog())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid configuration file"));
}

#[test]
fn test_config_file_sets_plugins_dir() {
    let fixture = SvnFixture::new(CORE_URL)
        .and_then(|f| f.with_listing("http://core.svn.wordpress.org/tags/", "3.2.1/\n"))
        .unwrap();
    let config_dir = fixture.home().join(".wp-svn-update");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.toml"), "plugins_dir = \"content/plugins\"\n").unwrap();

    fixture.command().unwrap().arg(fixture.blog()).assert().success();

    assert!(fixture.calls().iter().any(|c| c == "propget svn:externals content/plugins"));
}

#[test]
fn test_no_progress_env_accepts_falsey_values() {
    let fixture = SvnFixture::new(CORE_URL)
        .and_then(|f| f.with_listing("http://core.svn.wordpress.org/tags/", "3.2.1/\n"))
        .unwrap();

    fixture
        .command()
        .unwrap()
        .env("WP_SVN_UPDATE_NO_PROGRESS", "0")
        .arg("-v")
        .arg(fixture.blog())
        .assert()
        .success()
        .stderr(predicate::str::contains("show_progress: true"));

    fixture
        .command()
        .unwrap()
        .arg("-v")
        .arg(fixture.blog())
        .assert()
        .success()
        .stderr(predicate::str::contains("show_progress: false"));
}
