//! Best-effort copy to the system clipboard through a platform utility.

use std::io::Write;
use std::process::{Command, Stdio};

use color_eyre::eyre::{Result, WrapErr, bail, eyre};

/// Clipboard utilities tried in order, with the arguments that make them read stdin.
const CLIPBOARD_TOOLS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("clip", &[]),
];

/// Copy `text` with the first available clipboard utility.
///
/// Returns the name of the tool used.
pub fn copy(text: &str) -> Result<&'static str> {
    let &(tool, args) = CLIPBOARD_TOOLS
        .iter()
        .find(|(tool, _)| which::which(tool).is_ok())
        .ok_or_else(|| eyre!("no clipboard utility found (tried pbcopy, wl-copy, xclip, xsel, clip)"))?;

    let mut child = Command::new(tool)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .wrap_err_with(|| format!("failed to start {tool}"))?;

    child
        .stdin
        .take()
        .ok_or_else(|| eyre!("{tool} has no stdin"))?
        .write_all(text.as_bytes())
        .wrap_err_with(|| format!("failed to write to {tool}"))?;

    let status = child.wait().wrap_err_with(|| format!("failed to wait for {tool}"))?;
    if !status.success() {
        bail!("{tool} exited with {status}");
    }

    tracing::debug!(tool, bytes = text.len(), "copied to clipboard");
    Ok(tool)
}
