//! Interactive confirmation before anything is changed.

use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::constants::CONFIRM_PROMPT;

/// Ask until the user answers `y` (any case, surrounding whitespace ignored).
///
/// Every other answer, including an empty line, repeats the prompt. Returns
/// `Ok(false)` only when the input ends without a `y`.
pub async fn confirm<R, W>(input: &mut R, out: &mut W) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out)?;

    loop {
        writeln!(out, "{CONFIRM_PROMPT}")?;
        out.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer).await? == 0 {
            tracing::debug!("Input closed before confirmation");
            return Ok(false);
        }

        if answer.trim().eq_ignore_ascii_case("y") {
            return Ok(true);
        }
        tracing::trace!("Ignoring answer {:?}", answer.trim());
    }
}
