use serde::{Deserialize, Serialize};

use crate::escape::escape_sql;
use crate::fingerprint::album_fingerprint;
use crate::registry::{Entity, EntityId};
use crate::statement;

/// Raw album tuple as it appears in a folder's metadata.
/// Month and year are kept as text until the album is constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlbumRecord {
    pub name: String,
    pub month: String,
    pub year: String,
    pub photo: String,
    pub story: String,
}

/// Raw photo tuple as it appears in a folder's metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PhotoRecord {
    pub date: String,
    pub filename: String,
    pub title: String,
    pub people: String,
    /// Name of the album this photo belongs to, resolved within the folder.
    pub album: String,
    pub place: String,
    pub no_show: bool,
    pub favorite: bool,
    /// Primary hosted-media identifier. Empty means the photo is not published yet.
    pub media_id: String,
    pub media_secret: String,
    pub media_original_secret: String,
    pub media_farm: String,
    pub media_server: String,
    pub rectangles: String,
}

/// Everything a single folder contributes to the load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderRecords {
    pub albums: Vec<AlbumRecord>,
    pub photos: Vec<PhotoRecord>,
}

impl FolderRecords {
    pub fn is_empty(&self) -> bool {
        self.albums.is_empty() && self.photos.is_empty()
    }
}

/// A deduplicated album. Name and story are stored escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub name: String,
    pub month: i32,
    pub year: i32,
    /// Filename of the representative photo; filled by the first photo if empty.
    pub photo: String,
    /// Hosted thumbnail URL of the representative photo.
    pub media_url: String,
    pub story: String,
}

impl Album {
    pub fn new(name: &str, month: i32, year: i32, photo: &str, story: &str) -> Self {
        Self {
            name: escape_sql(name).into_owned(),
            month,
            year,
            photo: photo.to_string(),
            media_url: String::new(),
            story: escape_sql(story).into_owned(),
        }
    }

    pub fn fingerprint(&self) -> String {
        album_fingerprint(&self.name, self.month, self.year)
    }
}

impl Entity for Album {
    /// Plain concatenation without a delimiter, so ("A1", 1, 999) and
    /// ("A", 11, 999) share a key.
    fn key(&self) -> String {
        format!("{}{}{}", self.name, self.month, self.year)
    }

    fn insert_statement(&self, id: EntityId) -> String {
        statement::album_insert(self, id)
    }
}

/// A deduplicated place. The name is stored escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub name: String,
}

impl Place {
    pub fn new(name: &str) -> Self {
        Self {
            name: escape_sql(name).into_owned(),
        }
    }
}

impl Entity for Place {
    fn key(&self) -> String {
        self.name.clone()
    }

    fn insert_statement(&self, id: EntityId) -> String {
        statement::place_insert(self, id)
    }
}
