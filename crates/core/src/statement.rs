use crate::date::PhotoDate;
use crate::domain::{Album, Place};
use crate::escape::escape_sql;
use crate::registry::EntityId;

/// Thumbnail URL template for hosted media: farm, server, id, secret.
pub fn media_thumbnail_url(farm: &str, server: &str, id: &str, secret: &str) -> String {
    format!("http://farm{farm}.static.flickr.com/{server}/{id}_{secret}_s.jpg")
}

pub fn album_insert(album: &Album, id: EntityId) -> String {
    format!(
        "INSERT INTO Albums (AlbumId, AlbumTitle, AlbumYear, AlbumMonth, AlbumPhoto, AlbumHash, AlbumStory) \
         VALUES ({id}, '{}', {}, {}, '{}', '{}', '{}')",
        album.name,
        album.year,
        album.month,
        escape_sql(&album.media_url),
        album.fingerprint(),
        album.story,
    )
}

pub fn place_insert(place: &Place, id: EntityId) -> String {
    format!(
        "INSERT INTO Places (PlaceId, PlaceName) VALUES ({id}, '{}')",
        place.name
    )
}

/// One resolved photo row. Text fields are raw; escaping happens here.
#[derive(Debug, Clone)]
pub struct PhotoRow<'a> {
    pub id: u32,
    pub title: &'a str,
    pub filename: &'a str,
    pub path: &'a str,
    pub favorite: bool,
    pub disabled: bool,
    pub album_id: EntityId,
    pub place_id: EntityId,
    pub date: PhotoDate,
    pub people: &'a str,
    pub media_id: &'a str,
    pub media_secret: &'a str,
    pub media_original_secret: &'a str,
    pub media_farm: &'a str,
    pub media_server: &'a str,
    pub rectangles: &'a str,
}

/// Media identifiers and the rectangles blob are opaque and written as-is.
pub fn photo_insert(row: &PhotoRow<'_>) -> String {
    format!(
        "INSERT INTO Photos (PhotoId, PhotoTitle, FileName, Path, Favorite, DisableIt, AlbumId, PlaceId, \
         Month_, Date_, Year_, People, FlickrId, FlickrSecret, FlickrOSecret, FlickrFarm, FlickrServer, Rects) \
         VALUES ({}, '{}', '{}', '{}', {}, {}, {}, {}, {}, {}, {}, '{}', '{}', '{}', '{}', '{}', '{}', '{}')",
        row.id,
        escape_sql(row.title),
        escape_sql(row.filename),
        escape_sql(row.path),
        sql_bool(row.favorite),
        sql_bool(row.disabled),
        row.album_id,
        row.place_id,
        row.date.month,
        row.date.day,
        row.date.year,
        escape_sql(row.people),
        row.media_id,
        row.media_secret,
        row.media_original_secret,
        row.media_farm,
        row.media_server,
        row.rectangles,
    )
}

fn sql_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
