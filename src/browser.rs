//! Opening articles in the system browser.

use anyhow::{Context, Result};
use tracing::debug;

/// Open an article URL in the default browser.
///
/// # Arguments
/// * `url` - Article URL
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// The browser is launched as a detached process and gets no handle back
/// to this client, the terminal equivalent of `rel="noopener noreferrer"`.
pub fn open_article(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(anyhow::anyhow!("Article has no link"));
    }

    debug!(%url, "opening article");
    open::that_detached(url).with_context(|| format!("Failed to open browser for {}", url))?;

    Ok(())
}
