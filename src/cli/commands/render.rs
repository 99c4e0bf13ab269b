//! One-shot page rendering.

use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::cli::icons::{dim_arrow, error, info, success};
use crate::config::Settings;
use crate::render::{render_page, PageOptions};
use crate::session::ViewHandle;

/// Fetch both endpoints, wait for them to settle, and write the page.
///
/// A failed request still produces a page carrying its error message.
pub async fn cmd_render(settings: &Settings, output: Option<&Path>) -> anyhow::Result<()> {
    let session = settings.fetch_session()?;
    let view = ViewHandle::new();

    eprintln!("{} Fetching catalog data...", info());
    session.run(&view).await;

    let state = view.snapshot().await;
    match state.visible_error() {
        Some(message) => eprintln!("  {} {}", error(), message),
        None => eprintln!(
            "  {} {} catalogs, {} events",
            success(),
            state.catalogs.len(),
            state.earthquakes.len()
        ),
    }

    let html = render_page(&state, &PageOptions::default())?;
    write_page(&html, output).await?;

    if let Some(path) = output.filter(|p| !is_stdout(p)) {
        eprintln!("  {} Wrote {}", dim_arrow(), path.display());
    }
    Ok(())
}

/// Write `html` to `output`, or stdout when it is None or `-`.
pub async fn write_page(html: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output.filter(|p| !is_stdout(p)) {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, html).await?;
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(html.as_bytes()).await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_page_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out").join("board.html");
        write_page("<html></html>", Some(&path)).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<html></html>");
    }

    #[test]
    fn test_dash_means_stdout() {
        assert!(is_stdout(Path::new("-")));
        assert!(!is_stdout(Path::new("board.html")));
    }
}
