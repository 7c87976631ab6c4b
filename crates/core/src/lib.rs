pub mod config;
pub mod date;
pub mod domain;
pub mod error;
pub mod escape;
pub mod fingerprint;
pub mod ingest;
pub mod registry;
pub mod sink;
pub mod source;
pub mod statement;

use std::path::{Path, PathBuf};

use tracing::info;

use config::IngestConfig;
use error::{Error, Result};
use ingest::{IngestState, IngestStats};
use sink::{SqliteSink, StatementSink, Table};
use source::{relative_folder, DirectorySource, JsonFolderSource};

/// Callback events for a load run.
pub enum IngestProgress {
    /// A folder is about to be read.
    FolderStart { path: PathBuf },
    /// A folder's statements were accepted by the sink.
    FolderFlushed { path: PathBuf, statements: usize },
    /// The walk finished.
    Complete { stats: IngestStats },
}

/// Walks a directory source and loads every folder into a statement sink.
///
/// Owns the registries for the whole run, so surrogate IDs depend only on the
/// records and the order folders are visited in.
pub struct Uploader<S, K> {
    source: S,
    sink: K,
    config: IngestConfig,
    state: IngestState,
}

impl Uploader<JsonFolderSource, SqliteSink> {
    /// Open the destination database and prepare to read `source_root`.
    pub fn open(source_root: &Path, destination: &Path, config: IngestConfig) -> Result<Self> {
        if !source_root.exists() {
            return Err(Error::SourceNotFound(source_root.to_path_buf()));
        }
        if !source_root.is_dir() {
            return Err(Error::SourceNotDirectory(source_root.to_path_buf()));
        }
        let sink = SqliteSink::open(destination, &config.database_file)?;
        let source = JsonFolderSource::new(config.metadata_file.clone());
        Ok(Self::new(source, sink, config))
    }
}

impl<S: DirectorySource, K: StatementSink> Uploader<S, K> {
    pub fn new(source: S, sink: K, config: IngestConfig) -> Self {
        Self {
            source,
            sink,
            config,
            state: IngestState::new(),
        }
    }

    /// Reset the target tables (unless disabled) and load the tree under `root`.
    /// The first sink failure aborts the run.
    pub fn run(
        &mut self,
        root: &Path,
        progress_cb: Option<&mut dyn FnMut(IngestProgress)>,
    ) -> Result<IngestStats> {
        let mut ignore = |_: IngestProgress| {};
        let progress: &mut dyn FnMut(IngestProgress) = match progress_cb {
            Some(cb) => cb,
            None => &mut ignore,
        };

        info!("Starting");
        if self.config.reset {
            info!("Deleting database");
            self.reset()?;
        }

        info!("Reading folder metadata and adding to the database");
        self.walk(root, root, progress)?;

        let stats = self.state.stats.clone();
        info!(
            folders = stats.folders,
            albums = stats.albums,
            places = stats.places,
            photos = stats.photos,
            skipped = stats.unpublished_photos + stats.missing_references,
            "Done."
        );
        progress(IngestProgress::Complete {
            stats: stats.clone(),
        });
        Ok(stats)
    }

    /// Delete every row, photos first so foreign keys stay valid, and start
    /// the registries over so IDs and inserts match the emptied tables.
    pub fn reset(&mut self) -> Result<()> {
        self.state = IngestState::new();
        for table in Table::RESET_ORDER {
            self.sink.delete_all(table)?;
        }
        Ok(())
    }

    /// Pre-order: a folder is flushed before any of its subfolders is read.
    fn walk(
        &mut self,
        root: &Path,
        folder: &Path,
        progress: &mut dyn FnMut(IngestProgress),
    ) -> Result<()> {
        progress(IngestProgress::FolderStart {
            path: folder.to_path_buf(),
        });

        let records = self.source.read_folder(folder)?;
        let relative = relative_folder(root, folder);
        let batch = self.state.ingest_folder(&relative, &records);

        self.sink.execute_batch(&batch.statements)?;
        self.state.stats.folders += 1;
        self.state.stats.statements += batch.len();
        progress(IngestProgress::FolderFlushed {
            path: folder.to_path_buf(),
            statements: batch.len(),
        });

        for sub in self.source.subfolders(folder)? {
            self.walk(root, &sub, progress)?;
        }
        Ok(())
    }

    pub fn state(&self) -> &IngestState {
        &self.state
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }
}
