use predicates::prelude::*;

use crate::common::SvnFixture;

const CORE_URL: &str = "http://core.svn.wordpress.org/tags/3.2.1";
const CORE_TAGS: &str = "http://core.svn.wordpress.org/tags/";
const AKISMET_TAGS: &str = "http://plugins.svn.wordpress.org/akismet/tags/";
const STATS_TAGS: &str = "http://plugins.svn.wordpress.org/stats/tags/";

const EXTERNALS: &str = "akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.3/\n\
                         stats -r 1234 http://plugins.svn.wordpress.org/stats/tags/1.8/\n";

fn blog() -> SvnFixture {
    SvnFixture::new(CORE_URL)
        .and_then(|f| f.with_listing(CORE_TAGS, "3.2/\n3.2.1/\n3.3/\n"))
        .and_then(|f| f.with_listing(AKISMET_TAGS, "2.5.3/\n2.5.4/\n"))
        .and_then(|f| f.with_listing(STATS_TAGS, "1.8/\n1.9/\n"))
        .and_then(|f| f.with_externals(EXTERNALS))
        .unwrap()
}

fn mutating(calls: &[String]) -> Vec<String> {
    calls
        .iter()
        .filter(|c| c.starts_with("propset") || c.starts_with("switch") || c.starts_with("update"))
        .cloned()
        .collect()
}

#[test]
fn test_force_applies_core_and_externals() {
    let fixture = blog();

    fixture
        .command()
        .unwrap()
        .arg("-f")
        .arg(fixture.blog())
        .assert()
        .success()
        .stdout(predicate::str::contains("Changes to be performed"))
        .stdout(predicate::str::contains("\t3.2.1 -> 3.3"))
        .stdout(predicate::str::contains("\takismet: 2.5.3 -> 2.5.4"))
        .stdout(predicate::str::contains("\tstats: No change (current version = 1.8 -r 1234)"))
        .stdout(predicate::str::contains("Type \"y\" to confirm").not())
        .stdout(predicate::str::ends_with("(exiting...)\n"));

    let calls = mutating(&fixture.calls());
    assert_eq!(calls.len(), 2, "{calls:?}");
    assert!(calls[0].starts_with("propset svn:externals wp-content/plugins -F "));
    assert_eq!(calls[1], "switch http://core.svn.wordpress.org/tags/3.3/");

    assert_eq!(
        fixture.written_externals().unwrap(),
        "akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.4/\n\
         stats -r 1234 http://plugins.svn.wordpress.org/stats/tags/1.9/\n"
    );
}

#[test]
fn test_confirmation_with_y() {
    let fixture = blog();

    fixture
        .command()
        .unwrap()
        .arg(fixture.blog())
        .write_stdin("n\nY\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Type \"y\" to confirm").count(2));

    assert_eq!(mutating(&fixture.calls()).len(), 2);
}

#[test]
fn test_closed_stdin_changes_nothing() {
    let fixture = blog();

    fixture
        .command()
        .unwrap()
        .arg(fixture.blog())
        .write_stdin("")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Type \"y\" to confirm"))
        .stdout(predicate::str::contains("(exiting...)"))
        .stderr(predicate::str::contains("No confirmation received"));

    assert!(mutating(&fixture.calls()).is_empty());
    assert!(fixture.written_externals().is_none());
}

#[test]
fn test_up_to_date_blog_runs_nothing() {
    let fixture = SvnFixture::new("http://core.svn.wordpress.org/tags/3.3")
        .and_then(|f| f.with_listing(CORE_TAGS, "3.2.1/\n3.3/\n"))
        .and_then(|f| f.with_listing(AKISMET_TAGS, "2.5.4/\n"))
        .and_then(|f| f.with_externals("akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.4\n"))
        .unwrap();

    fixture
        .command()
        .unwrap()
        .arg(fixture.blog())
        .assert()
        .success()
        .stdout(predicate::str::contains("\tNo change (current version = 3.3)"))
        .stdout(predicate::str::contains("\takismet: No change (current version = 2.5.4)"))
        .stdout(predicate::str::contains("Type \"y\" to confirm").not());

    assert!(mutating(&fixture.calls()).is_empty());
}

#[test]
fn test_trunk_core_is_switched_in_place() {
    let fixture = SvnFixture::new("http://core.svn.wordpress.org/trunk")
        .and_then(|f| f.with_listing(AKISMET_TAGS, "2.5.3/\n2.5.4/\n"))
        .and_then(|f| f.with_externals("akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.3/\n"))
        .unwrap();

    fixture
        .command()
        .unwrap()
        .arg("--force")
        .arg(fixture.blog())
        .assert()
        .success()
        .stdout(predicate::str::contains("\ttrunk -> trunk"));

    let calls = fixture.calls();
    assert!(!calls.iter().any(|c| c.starts_with("ls http://core.svn.wordpress.org/")));
    let mutating = mutating(&calls);
    assert_eq!(mutating.len(), 2, "{mutating:?}");
    assert_eq!(mutating[1], "switch http://core.svn.wordpress.org/trunk");
}

#[test]
fn test_externals_only_updates() {
    let fixture = SvnFixture::new(CORE_URL)
        .and_then(|f| f.with_listing(CORE_TAGS, "3.2/\n3.2.1/\n"))
        .and_then(|f| f.with_listing(AKISMET_TAGS, "2.5.3/\n2.5.4/\n"))
        .and_then(|f| f.with_externals("akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.3/\n"))
        .unwrap();

    fixture
        .command()
        .unwrap()
        .arg("-f")
        .arg(fixture.blog())
        .assert()
        .success()
        .stdout(predicate::str::contains("\tNo change (current version = 3.2.1)"));

    let mutating = mutating(&fixture.calls());
    assert_eq!(mutating.len(), 2, "{mutating:?}");
    assert_eq!(mutating[1], "update");
}

#[test]
fn test_missing_externals_property() {
    let fixture = SvnFixture::new(CORE_URL)
        .and_then(|f| f.with_listing(CORE_TAGS, "3.2.1/\n3.3/\n"))
        .unwrap();

    fixture
        .command()
        .unwrap()
        .arg("-f")
        .arg(fixture.blog())
        .assert()
        .success()
        .stdout(predicate::str::contains("Plugins (externals):"));

    assert_eq!(mutating(&fixture.calls()), vec!["switch http://core.svn.wordpress.org/tags/3.3/"]);
}

#[test]
fn test_plugins_dir_override() {
    let fixture = blog();

    fixture
        .command()
        .unwrap()
        .args(["-f", "--plugins-dir", "content/plugins"])
        .arg(fixture.blog())
        .assert()
        .success();

    let calls = fixture.calls();
    assert!(calls.iter().any(|c| c == "propget svn:externals content/plugins"), "{calls:?}");
}

#[test]
fn test_target_defaults_to_current_directory() {
    let fixture = blog();

    fixture
        .command()
        .unwrap()
        .current_dir(fixture.blog())
        .arg("-f")
        .assert()
        .success()
        .stdout(predicate::str::contains("\t3.2.1 -> 3.3"));
}

#[test]
fn test_unparsable_externals_line_is_reported_and_kept() {
    let fixture = SvnFixture::new(CORE_URL)
        .and_then(|f| f.with_listing(CORE_TAGS, "3.2.1/\n"))
        .and_then(|f| f.with_listing(AKISMET_TAGS, "2.5.3/\n2.5.4/\n"))
        .and_then(|f| {
            f.with_externals("akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.3/\nbroken\n")
        })
        .unwrap();

    fixture
        .command()
        .unwrap()
        .arg("-f")
        .arg(fixture.blog())
        .assert()
        .success()
        .stdout(predicate::str::contains("ERROR: Cannot parse externals definition: broken"));

    assert_eq!(
        fixture.written_externals().unwrap(),
        "akismet http://plugins.svn.wordpress.org/akismet/tags/2.5.4/\nbroken\n"
    );
}
