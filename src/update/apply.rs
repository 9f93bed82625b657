//! Applying an [`UpdatePlan`] to the working copy.
//!
//! Order of operations:
//! 1. Externals changed: write the regenerated property to a temporary file and
//!    `svn propset svn:externals <plugins-dir> -F <file>`. The file is removed when
//!    the guard drops, whether or not propset succeeded.
//! 2. Core changed: `svn switch <new url>`, which also fetches the new externals.
//! 3. Otherwise, externals changed: `svn update` to fetch them.

use anyhow::{Context, Result};
use std::io::Write;

use super::UpdatePlan;
use crate::constants::EXTERNALS_TEMPFILE_PREFIX;
use crate::svn::SvnClient;

/// What the apply phase ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// `svn propset` was issued
    pub externals_written: bool,
    /// `svn switch` was issued
    pub switched: bool,
    /// `svn update` was issued
    pub updated: bool,
}

/// Apply `plan`. Issues no svn command at all when nothing changed.
pub async fn apply_plan<C: SvnClient>(
    client: &C,
    plan: &UpdatePlan,
    plugins_dir: &str,
) -> Result<ApplyReport> {
    let mut report = ApplyReport::default();
    let externals_changed = plan.externals_changed();

    if externals_changed {
        write_externals(client, plan, plugins_dir).await?;
        report.externals_written = true;
    }

    if plan.core_changed() {
        tracing::info!("Switching working copy to {}", plan.core.new_url);
        client.switch(&plan.core.new_url).await?;
        report.switched = true;
    } else if externals_changed {
        tracing::info!("Updating working copy to fetch new externals");
        client.update().await?;
        report.updated = true;
    }

    Ok(report)
}

async fn write_externals<C: SvnClient>(client: &C, plan: &UpdatePlan, plugins_dir: &str) -> Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix(EXTERNALS_TEMPFILE_PREFIX)
        .tempfile()
        .context("Failed to create temporary file for svn:externals")?;

    let path = file.path().to_path_buf();
    file.write_all(plan.externals_property().as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    file.flush().with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!("Wrote new svn:externals for {} to {}", plugins_dir, file.path().display());

    // `file` is deleted on drop, also when propset fails
    client.set_externals(plugins_dir, file.path()).await
}
