use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::date::resolve_photo_date;
use crate::domain::{Album, AlbumRecord, FolderRecords, Place, PhotoRecord};
use crate::registry::{EntityId, Registry, FIRST_ID};
use crate::statement::{media_thumbnail_url, photo_insert, PhotoRow};

/// Counters for one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub folders: usize,
    pub albums: usize,
    pub duplicate_albums: usize,
    pub invalid_albums: usize,
    pub places: usize,
    pub photos: usize,
    pub unpublished_photos: usize,
    pub missing_references: usize,
    pub date_fallbacks: usize,
    pub statements: usize,
}

/// Registries and counters shared by every folder of a run.
pub struct IngestState {
    pub albums: Registry<Album>,
    pub places: Registry<Place>,
    pub stats: IngestStats,
    next_photo_id: u32,
}

impl Default for IngestState {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestState {
    pub fn new() -> Self {
        Self {
            albums: Registry::new("albums"),
            places: Registry::new("places"),
            stats: IngestStats::default(),
            next_photo_id: FIRST_ID,
        }
    }

    /// Ingest one folder and return its statements in flush order.
    pub fn ingest_folder(&mut self, folder: &str, records: &FolderRecords) -> FolderBatch {
        let mut ingestor = FolderIngestor::new(self, folder);
        for album in &records.albums {
            ingestor.add_album(album);
        }
        for photo in &records.photos {
            // Skips are already counted and logged.
            let _ = ingestor.add_photo(photo);
        }
        ingestor.finish()
    }
}

/// Statements produced by one folder: places first, then albums, then photos.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderBatch {
    pub folder: String,
    pub statements: Vec<String>,
}

impl FolderBatch {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }
}

/// Why a photo record produced no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoSkip {
    /// No hosted-media identifier yet.
    Unpublished,
    /// The album it names is not in this folder.
    MissingAlbum,
}

/// Per-folder pass over the raw records.
///
/// Album rows are held back until [`finish`](Self::finish) so photos seen
/// later in the folder can still fill in the representative photo and URL.
pub struct FolderIngestor<'a> {
    state: &'a mut IngestState,
    folder: &'a str,
    /// Album name as written in this folder -> surrogate ID.
    local_albums: HashMap<String, EntityId>,
    /// Every album registered from this folder, in record order.
    folder_albums: Vec<EntityId>,
    place_statements: Vec<String>,
    photo_statements: Vec<String>,
}

impl<'a> FolderIngestor<'a> {
    pub fn new(state: &'a mut IngestState, folder: &'a str) -> Self {
        Self {
            state,
            folder,
            local_albums: HashMap::new(),
            folder_albums: Vec::new(),
            place_statements: Vec::new(),
            photo_statements: Vec::new(),
        }
    }

    /// Register an album tuple. Returns `None` when month or year is not a number.
    pub fn add_album(&mut self, record: &AlbumRecord) -> Option<EntityId> {
        let (Ok(month), Ok(year)) = (
            record.month.trim().parse::<i32>(),
            record.year.trim().parse::<i32>(),
        ) else {
            warn!(
                folder = self.folder,
                album = %record.name,
                month = %record.month,
                year = %record.year,
                "skipping album with unparseable month or year"
            );
            self.state.stats.invalid_albums += 1;
            return None;
        };

        info!("Loading album {} in {}, {}", record.name, month, year);
        let album = Album::new(&record.name, month, year, &record.photo, &record.story);
        let registration = self.state.albums.add_or_get(album);
        if registration.is_new {
            self.state.stats.albums += 1;
        } else {
            self.state.stats.duplicate_albums += 1;
        }

        if !self.folder_albums.contains(&registration.id) {
            self.folder_albums.push(registration.id);
        }

        match self.local_albums.get(&record.name) {
            Some(&existing) if existing != registration.id => {
                warn!(
                    folder = self.folder,
                    album = %record.name,
                    kept = existing,
                    ignored = registration.id,
                    "album name already used in this folder, photos resolve to the first"
                );
            }
            Some(_) => {}
            None => {
                self.local_albums.insert(record.name.clone(), registration.id);
            }
        }

        Some(registration.id)
    }

    /// Turn a photo tuple into a row. Anomalies are counted and skipped.
    pub fn add_photo(&mut self, record: &PhotoRecord) -> Result<u32, PhotoSkip> {
        if record.media_id.is_empty() {
            self.state.stats.unpublished_photos += 1;
            debug!(folder = self.folder, file = %record.filename, "photo not published, skipping");
            return Err(PhotoSkip::Unpublished);
        }

        let place = self.state.places.add_or_get(Place::new(&record.place));
        if place.is_new {
            self.state.stats.places += 1;
        }
        if let Some(stmt) = self.state.places.take_insert(place.id) {
            self.place_statements.push(stmt);
        }

        let Some(album_id) = self.local_albums.get(&record.album).copied() else {
            warn!(
                folder = self.folder,
                file = %record.filename,
                album = %record.album,
                place = %record.place,
                "album or place not found, dropping photo"
            );
            self.state.stats.missing_references += 1;
            return Err(PhotoSkip::MissingAlbum);
        };
        let Some(album) = self.state.albums.get_mut(album_id) else {
            warn!(
                folder = self.folder,
                file = %record.filename,
                album = %record.album,
                id = album_id,
                "album id not registered, dropping photo"
            );
            self.state.stats.missing_references += 1;
            return Err(PhotoSkip::MissingAlbum);
        };

        if album.photo.is_empty() {
            album.photo = record.filename.clone();
        }
        if album.photo == record.filename && album.media_url.is_empty() {
            album.media_url = media_thumbnail_url(
                &record.media_farm,
                &record.media_server,
                &record.media_id,
                &record.media_secret,
            );
        }

        let (date, fell_back) = resolve_photo_date(&record.date, album.month, album.year);
        if fell_back {
            self.state.stats.date_fallbacks += 1;
        }

        let title = if record.title.is_empty() {
            record.album.as_str()
        } else {
            record.title.as_str()
        };

        let id = self.state.next_photo_id;
        self.state.next_photo_id += 1;
        self.state.stats.photos += 1;

        self.photo_statements.push(photo_insert(&PhotoRow {
            id,
            title,
            filename: &record.filename,
            path: self.folder,
            favorite: record.favorite,
            disabled: record.no_show,
            album_id,
            place_id: place.id,
            date,
            people: &record.people,
            media_id: &record.media_id,
            media_secret: &record.media_secret,
            media_original_secret: &record.media_original_secret,
            media_farm: &record.media_farm,
            media_server: &record.media_server,
            rectangles: &record.rectangles,
        }));
        Ok(id)
    }

    /// Emit pending album rows and assemble the folder batch.
    pub fn finish(self) -> FolderBatch {
        let mut statements = self.place_statements;
        for id in &self.folder_albums {
            if let Some(stmt) = self.state.albums.take_insert(*id) {
                statements.push(stmt);
            }
        }
        statements.extend(self.photo_statements);

        FolderBatch {
            folder: self.folder.to_string(),
            statements,
        }
    }
}
