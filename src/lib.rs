//! wp-svn-update - keep a Subversion-managed WordPress install on its newest tags
//!
//! A WordPress checkout made with `svn checkout` of a release tag, with its plugins
//! pulled in through `svn:externals` on the plugins directory, is updated by
//! pointing each URL at a newer tag. This crate automates that:
//!
//! 1. `svn info` on the working copy yields the core URL
//! 2. `svn ls <base>/tags/` lists the candidate tags; the highest version wins
//! 3. `svn propget svn:externals <plugins-dir>` yields one definition per plugin,
//!    each of which goes through step 2
//! 4. the proposed changes are printed and, unless forced, confirmed on stdin
//! 5. `svn propset`, then `svn switch` (core changed) or `svn update`
//!    (only externals changed) apply them
//!
//! Working copies on `trunk` are left alone, as are externals pinned with `-r`.
//!
//! # Modules
//!
//! - [`cli`] - argument parsing, logging setup and wiring of the run
//! - [`config`] - optional `~/.wp-svn-update/config.toml` and precedence rules
//! - [`core`] - error types and user-facing error rendering
//! - [`svn`] - the `svn` command wrapper and the [`svn::SvnClient`] seam
//! - [`update`] - discovery, externals parsing, planning, confirmation, applying
//! - [`version`] - tag version ordering
//! - [`utils`] - platform helpers and the progress spinner
//!
//! # Example
//!
//! ```bash
//! $ wp-svn-update /var/www/blog
//! Changes to be performed
//! =======================
//! Wordpress:
//! 	3.2.1 -> 3.3
//! Plugins (externals):
//! 	akismet: 2.5.3 -> 2.5.4
//!
//! Type "y" to confirm
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod svn;
pub mod update;
pub mod utils;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
