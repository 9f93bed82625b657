//! Common test utilities for wp-svn-update integration tests
//!
//! [`SvnFixture`] writes a small `sh` script that stands in for `svn`. It answers
//! `info`, `ls`, `propget` and `propset` from files in a fixture directory and
//! appends every invocation to `calls.log`, so tests can check exactly which
//! commands the binary ran.

// Not every test file uses every helper
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const FAKE_SVN: &str = r#"#!/bin/sh
FIXTURE="__FIXTURE__"
echo "$*" >> "$FIXTURE/calls.log"
case "$1" in
  info)
    if [ -f "$FIXTURE/info.txt" ]; then
      cat "$FIXTURE/info.txt"
    else
      echo "svn: E155007: '$PWD' is not a working copy" >&2
      exit 1
    fi
    ;;
  ls)
    key=$(printf '%s' "$2" | tr -c 'A-Za-z0-9' '_')
    if [ -f "$FIXTURE/ls/$key" ]; then
      cat "$FIXTURE/ls/$key"
    else
      echo "svn: E170000: URL '$2' doesn't exist" >&2
      exit 1
    fi
    ;;
  propget)
    if [ -f "$FIXTURE/externals.txt" ]; then
      cat "$FIXTURE/externals.txt"
    else
      echo "svn: E200017: Property 'svn:externals' not found on '$3'" >&2
      exit 1
    fi
    ;;
  propset)
    cp "$5" "$FIXTURE/propset.txt"
    echo "property 'svn:externals' set on '$3'"
    ;;
  switch|update)
    echo "At revision 1234."
    ;;
  *)
    echo "svn: unexpected command $1" >&2
    exit 1
    ;;
esac
"#;

/// A WordPress "working copy" plus a scripted svn answering for it.
pub struct SvnFixture {
    temp: TempDir,
    blog: PathBuf,
    fixture: PathBuf,
    svn: PathBuf,
}

impl SvnFixture {
    /// Working copy checked out from `url`.
    pub fn new(url: &str) -> Result<Self> {
        let temp = TempDir::new()?;
        let blog = temp.path().join("blog");
        let fixture = temp.path().join("svn-fixture");
        fs::create_dir_all(blog.join("wp-content/plugins"))?;
        fs::create_dir_all(fixture.join("ls"))?;

        fs::write(
            fixture.join("info.txt"),
            format!(
                "Path: .\nWorking Copy Root Path: {}\nURL: {url}\nRevision: 1234\nNode Kind: directory\n",
                blog.display()
            ),
        )?;

        let svn = temp.path().join("svn");
        fs::write(&svn, FAKE_SVN.replace("__FIXTURE__", &fixture.display().to_string()))?;
        make_executable(&svn)?;

        Ok(Self {
            temp,
            blog,
            fixture,
            svn,
        })
    }

    /// Answer `svn ls <url>` with `listing`.
    pub fn with_listing(self, url: &str, listing: &str) -> Result<Self> {
        let key: String =
            url.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
        fs::write(self.fixture.join("ls").join(key), listing)?;
        Ok(self)
    }

    /// Make `svn info` fail the way it does outside a working copy.
    pub fn without_working_copy(self) -> Result<Self> {
        fs::remove_file(self.fixture.join("info.txt"))?;
        Ok(self)
    }

    /// Answer `svn propget svn:externals` with `property`.
    pub fn with_externals(self, property: &str) -> Result<Self> {
        fs::write(self.fixture.join("externals.txt"), property)?;
        Ok(self)
    }

    pub fn blog(&self) -> &Path {
        &self.blog
    }

    pub fn home(&self) -> &Path {
        self.temp.path()
    }

    /// Invocations of the scripted svn, one line each, arguments space-joined.
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.fixture.join("calls.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Content handed to `svn propset -F`, if propset ran.
    pub fn written_externals(&self) -> Option<String> {
        fs::read_to_string(self.fixture.join("propset.txt")).ok()
    }

    /// The binary, isolated from the user's config and environment, using the
    /// scripted svn.
    pub fn command(&self) -> Result<Command> {
        let mut cmd = Command::cargo_bin("wp-svn-update").context("binary not built")?;
        cmd.env("HOME", self.home())
            .env_remove("WP_SVN_UPDATE_CONFIG")
            .env_remove("WP_SVN_UPDATE_PLUGINS_DIR")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .env("WP_SVN_UPDATE_SVN", &self.svn)
            .env("WP_SVN_UPDATE_NO_PROGRESS", "1");
        Ok(cmd)
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
