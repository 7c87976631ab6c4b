use std::path::Path;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use photoload_core::config::IngestConfig;
use photoload_core::{IngestProgress, Uploader};

fn folder_display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn run(source: &Path, destination: &Path, config: IngestConfig) -> Result<()> {
    // The database connection lives in `uploader` and is released when it drops,
    // including when the run fails.
    let mut uploader = Uploader::open(source, destination, config)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {pos} folders {msg}")?,
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = uploader.run(
        source,
        Some(&mut |progress| match progress {
            IngestProgress::FolderStart { path } => {
                pb.set_message(folder_display_name(&path));
            }
            IngestProgress::FolderFlushed { .. } => {
                pb.inc(1);
            }
            IngestProgress::Complete { stats } => {
                pb.finish_with_message(format!(
                    "loaded: {} albums, {} places, {} photos",
                    stats.albums, stats.places, stats.photos
                ));
            }
        }),
    );

    let stats = match result {
        Ok(stats) => stats,
        Err(err) => {
            pb.abandon_with_message("failed");
            return Err(err.into());
        }
    };

    println!(
        "Skipped {} unpublished photos, dropped {} with missing album or place, {} duplicate albums.",
        stats.unpublished_photos, stats.missing_references, stats.duplicate_albums
    );
    if stats.invalid_albums > 0 {
        println!("{} albums had an unreadable month or year.", stats.invalid_albums);
    }
    Ok(())
}
