//! Copying theme and project assets into the output tree.
//!
//! Merge rules:
//!
//! | step | effect on `output/assets/` |
//! |---|---|
//! | theme assets | removed if present, then replaced by the theme's `assets/` tree |
//! | project assets, output exists | each top-level directory replaces the same-named directory; each top-level file overwrites |
//! | project assets, no output yet | the project's `assets/` tree is copied as is |
//!
//! Replacing a directory deletes it first, so files that only exist in the theme's
//! (or a previous run's) copy of that directory do not survive.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::builder::BuildError;

fn copy_error(path: &Path, source: io::Error) -> BuildError {
    BuildError::AssetCopy {
        path: path.display().to_string(),
        source,
    }
}

/// Recursively copy `src` into `dst`, creating directories as needed.
///
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize, BuildError> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(true) {
        let entry = entry.map_err(|e| copy_error(src, e.into()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| copy_error(entry.path(), io::Error::other(e)))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| copy_error(&target, e))?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| copy_error(&target, e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Remove whatever is at `path` (file or directory) if it exists.
fn remove_existing(path: &Path) -> Result<(), BuildError> {
    if path.is_dir() {
        fs::remove_dir_all(path).map_err(|e| copy_error(path, e))
    } else if path.exists() {
        fs::remove_file(path).map_err(|e| copy_error(path, e))
    } else {
        Ok(())
    }
}

/// Replace `output_assets` with the theme's asset tree.
pub fn copy_theme_assets(theme_assets: &Path, output_assets: &Path) -> Result<usize, BuildError> {
    remove_existing(output_assets)?;
    let copied = copy_tree(theme_assets, output_assets)?;

    tracing::info!(
        "Copied {} theme asset(s) to {}",
        copied,
        output_assets.display()
    );
    Ok(copied)
}

/// Merge the project's `assets/` directory over `output_assets`.
///
/// Returns `None` when the project has no assets directory.
pub fn copy_custom_assets(
    custom_assets: &Path,
    output_assets: &Path,
) -> Result<Option<usize>, BuildError> {
    if !custom_assets.is_dir() {
        tracing::info!("No custom assets directory found");
        return Ok(None);
    }

    if !output_assets.exists() {
        let copied = copy_tree(custom_assets, output_assets)?;
        tracing::info!(
            "Copied {} custom asset(s) to {}",
            copied,
            output_assets.display()
        );
        return Ok(Some(copied));
    }

    let mut copied = 0;
    let entries = fs::read_dir(custom_assets).map_err(|e| copy_error(custom_assets, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| copy_error(custom_assets, e))?;
        let source = entry.path();
        let target = output_assets.join(entry.file_name());

        if source.is_dir() {
            remove_existing(&target)?;
            copied += copy_tree(&source, &target)?;
        } else {
            if target.is_dir() {
                remove_existing(&target)?;
            }
            fs::copy(&source, &target).map_err(|e| copy_error(&target, e))?;
            copied += 1;
        }
    }

    tracing::info!(
        "Merged {} custom asset(s) into {}",
        copied,
        output_assets.display()
    );
    Ok(Some(copied))
}
