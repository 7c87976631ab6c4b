use rusqlite::Connection;

use crate::error::Result;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS Albums (
            AlbumId     INTEGER PRIMARY KEY,
            AlbumTitle  TEXT NOT NULL,
            AlbumYear   INTEGER NOT NULL,
            AlbumMonth  INTEGER NOT NULL,
            AlbumPhoto  TEXT,
            AlbumHash   TEXT,
            AlbumStory  TEXT
        );

        CREATE TABLE IF NOT EXISTS Places (
            PlaceId     INTEGER PRIMARY KEY,
            PlaceName   TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS Photos (
            PhotoId       INTEGER PRIMARY KEY,
            PhotoTitle    TEXT,
            FileName      TEXT NOT NULL,
            Path          TEXT,
            Favorite      BOOLEAN NOT NULL,
            DisableIt     BOOLEAN NOT NULL,
            AlbumId       INTEGER NOT NULL REFERENCES Albums(AlbumId),
            PlaceId       INTEGER NOT NULL REFERENCES Places(PlaceId),
            Month_        INTEGER,
            Date_         INTEGER,
            Year_         INTEGER,
            People        TEXT,
            FlickrId      TEXT,
            FlickrSecret  TEXT,
            FlickrOSecret TEXT,
            FlickrFarm    TEXT,
            FlickrServer  TEXT,
            Rects         TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_photos_album ON Photos(AlbumId);
        CREATE INDEX IF NOT EXISTS idx_photos_place ON Photos(PlaceId);
        ",
    )?;
    Ok(())
}
