//! The `handout validate` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use handout_page::page::{parse_page, validate_page, PageSpec};

pub fn execute(page_path: PathBuf) -> Result<()> {
    let pages = if page_path.is_dir() {
        load_directory(&page_path)?
    } else {
        vec![(page_path.clone(), parse_page(&page_path)?)]
    };

    let mut total_warnings = 0;

    for (path, spec) in &pages {
        let title = if spec.page.title.is_empty() {
            path.display().to_string()
        } else {
            spec.page.title.clone()
        };
        println!("Page: {title} ({} exercises)", spec.exercises.len());

        let warnings = validate_page(spec);
        for w in &warnings {
            let prefix = w
                .slug
                .as_ref()
                .map(|slug| format!("  [{slug}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All pages valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

/// Every `.toml` page in `dir`, sorted by file name.
fn load_directory(dir: &Path) -> Result<Vec<(PathBuf, PageSpec)>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let spec = parse_page(&path)?;
            Ok((path, spec))
        })
        .collect()
}
