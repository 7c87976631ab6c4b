use std::fs;
use std::path::Path;

use photoload_core::config::IngestConfig;
use photoload_core::error::Error;
use photoload_core::fingerprint::album_fingerprint;
use photoload_core::sink::{SqliteSink, Table};
use photoload_core::Uploader;
use rusqlite::Connection;

/// Write a folder's metadata file, creating the folder if needed.
fn write_folder(dir: &Path, json: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join("photos.json"), json).unwrap();
}

fn summer_folder() -> &'static str {
    r#"{
        "albums": [
            {"name": "Summer", "month": "7", "year": "2012", "photo": "", "story": ""}
        ],
        "photos": [
            {
                "date": "2012:07:04 10:00:00",
                "filename": "img1.jpg",
                "title": "",
                "people": "",
                "album": "Summer",
                "place": "Beach",
                "noShow": false,
                "favorite": false,
                "mediaId": "123",
                "mediaSecret": "abc",
                "mediaOriginalSecret": "xyz",
                "mediaFarm": "5",
                "mediaServer": "2",
                "rectangles": ""
            }
        ]
    }"#
}

fn load(src: &Path, dest: &Path) -> photoload_core::ingest::IngestStats {
    let mut uploader = Uploader::open(src, dest, IngestConfig::default()).unwrap();
    uploader.run(src, None).unwrap()
}

fn open_db(dest: &Path) -> Connection {
    Connection::open(dest.join("Photos.db")).unwrap()
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .unwrap()
}

// ── Uploader::open ───────────────────────────────────────────────

#[test]
fn test_open_missing_source() {
    let tmp = tempfile::tempdir().unwrap();
    let err = Uploader::open(&tmp.path().join("nope"), tmp.path(), IngestConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, Error::SourceNotFound(_)));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_open_source_is_file() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("file.txt");
    fs::write(&file, b"x").unwrap();
    let err = Uploader::open(&file, tmp.path(), IngestConfig::default())
        .err()
        .unwrap();
    assert!(err.to_string().contains("not a directory"));
}

#[test]
fn test_open_missing_destination() {
    let tmp = tempfile::tempdir().unwrap();
    let err = Uploader::open(tmp.path(), &tmp.path().join("nope"), IngestConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, Error::DestinationNotFound(_)));
    assert!(!tmp.path().join("nope").exists());
}

// ── Single folder ────────────────────────────────────────────────

#[test]
fn test_single_folder_end_to_end() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("photos");
    let dest = tmp.path().join("db");
    fs::create_dir_all(&dest).unwrap();
    write_folder(&src, summer_folder());

    let stats = load(&src, &dest);
    assert_eq!(stats.albums, 1);
    assert_eq!(stats.places, 1);
    assert_eq!(stats.photos, 1);
    assert_eq!(stats.date_fallbacks, 0);

    let conn = open_db(&dest);
    let (album_id, title, year, month, url, hash): (i64, String, i64, i64, String, String) = conn
        .query_row(
            "SELECT AlbumId, AlbumTitle, AlbumYear, AlbumMonth, AlbumPhoto, AlbumHash FROM Albums",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?, row.get(5)?)),
        )
        .unwrap();
    assert_eq!(album_id, 1);
    assert_eq!(title, "Summer");
    assert_eq!((year, month), (2012, 7));
    assert_eq!(url, "http://farm5.static.flickr.com/2/123_abc_s.jpg");
    assert_eq!(hash, album_fingerprint("Summer", 7, 2012));

    let (place_id, place_name): (i64, String) = conn
        .query_row("SELECT PlaceId, PlaceName FROM Places", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(place_name, "Beach");

    let (photo_title, month, day, year, flickr_id, photo_album, photo_place): (
        String,
        i64,
        i64,
        i64,
        String,
        i64,
        i64,
    ) = conn
        .query_row(
            "SELECT PhotoTitle, Month_, Date_, Year_, FlickrId, AlbumId, PlaceId FROM Photos",
            [],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ))
            },
        )
        .unwrap();
    assert_eq!(photo_title, "Summer");
    assert_eq!((month, day, year), (7, 4, 2012));
    assert_eq!(flickr_id, "123");
    assert_eq!(photo_album, album_id);
    assert_eq!(photo_place, place_id);
}

#[test]
fn test_unpublished_and_undated_photos() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("photos");
    let dest = tmp.path().join("db");
    fs::create_dir_all(&dest).unwrap();
    write_folder(
        &src,
        r#"{
            "albums": [{"name": "Summer", "month": "7", "year": "2012"}],
            "photos": [
                {"filename": "draft.jpg", "album": "Summer", "place": "Attic", "mediaId": ""},
                {"filename": "old.jpg", "album": "Summer", "place": "Beach", "mediaId": "7", "date": ""}
            ]
        }"#,
    );

    let stats = load(&src, &dest);
    assert_eq!(stats.unpublished_photos, 1);
    assert_eq!(stats.date_fallbacks, 1);

    let conn = open_db(&dest);
    assert_eq!(count(&conn, "Places"), 1);
    let (month, day, year): (i64, i64, i64) = conn
        .query_row("SELECT Month_, Date_, Year_ FROM Photos", [], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })
        .unwrap();
    assert_eq!((month, day, year), (7, 1, 2012));
}

#[test]
fn test_apostrophes_survive_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("photos");
    let dest = tmp.path().join("db");
    fs::create_dir_all(&dest).unwrap();
    write_folder(
        &src,
        r#"{
            "albums": [{"name": "Bob's party", "month": "12", "year": "2010", "story": "It's late"}],
            "photos": [
                {"filename": "o'clock.jpg", "album": "Bob's party", "place": "Martha's Vineyard",
                 "people": "Ann, O'Neil", "mediaId": "1"}
            ]
        }"#,
    );

    load(&src, &dest);

    let conn = open_db(&dest);
    let (title, story): (String, String) = conn
        .query_row("SELECT AlbumTitle, AlbumStory FROM Albums", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(title, "Bob's party");
    assert_eq!(story, "It's late");
    let place: String = conn
        .query_row("SELECT PlaceName FROM Places", [], |row| row.get(0))
        .unwrap();
    assert_eq!(place, "Martha's Vineyard");
    let (file, people): (String, String) = conn
        .query_row("SELECT FileName, People FROM Photos", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(file, "o'clock.jpg");
    assert_eq!(people, "Ann, O'Neil");
}

// ── Trees ────────────────────────────────────────────────────────

#[test]
fn test_tree_dedups_across_folders() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("photos");
    let dest = tmp.path().join("db");
    fs::create_dir_all(&dest).unwrap();
    write_folder(&src, summer_folder());
    write_folder(&src.join("2012/beach-day"), summer_folder());
    write_folder(&src.join("2012/beach-day/extra"), summer_folder());
    fs::create_dir_all(src.join("empty")).unwrap();

    let stats = load(&src, &dest);
    assert_eq!(stats.folders, 5);
    assert_eq!(stats.albums, 1);
    assert_eq!(stats.duplicate_albums, 2);
    assert_eq!(stats.photos, 3);

    let conn = open_db(&dest);
    assert_eq!(count(&conn, "Albums"), 1);
    assert_eq!(count(&conn, "Places"), 1);
    assert_eq!(count(&conn, "Photos"), 3);

    let dangling: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM Photos p
             LEFT JOIN Albums a ON a.AlbumId = p.AlbumId
             LEFT JOIN Places l ON l.PlaceId = p.PlaceId
             WHERE a.AlbumId IS NULL OR l.PlaceId IS NULL",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(dangling, 0);

    let mut stmt = conn.prepare("SELECT Path FROM Photos ORDER BY PhotoId").unwrap();
    let paths: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(paths, vec!["", "2012/beach-day", "2012/beach-day/extra"]);
}

#[test]
fn test_rerun_replaces_previous_load() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("photos");
    let dest = tmp.path().join("db");
    fs::create_dir_all(&dest).unwrap();
    write_folder(&src, summer_folder());
    write_folder(&src.join("more"), summer_folder());

    let first = load(&src, &dest);
    let second = load(&src, &dest);
    assert_eq!(first, second);

    let conn = open_db(&dest);
    assert_eq!(count(&conn, "Photos"), 2);
    assert_eq!(count(&conn, "Albums"), 1);
}

#[test]
fn test_without_reset_second_load_conflicts() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("photos");
    let dest = tmp.path().join("db");
    fs::create_dir_all(&dest).unwrap();
    write_folder(&src, summer_folder());
    load(&src, &dest);

    let config = IngestConfig {
        reset: false,
        ..IngestConfig::default()
    };
    let mut uploader = Uploader::open(&src, &dest, config).unwrap();
    let err = uploader.run(&src, None).unwrap_err();
    assert!(matches!(err, Error::Database(_)));
    drop(uploader);

    let sink = SqliteSink::open(&dest, "Photos.db").unwrap();
    assert_eq!(sink.count_rows(Table::Photos).unwrap(), 1);
}

#[test]
fn test_invalid_metadata_aborts() {
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("photos");
    let dest = tmp.path().join("db");
    fs::create_dir_all(&dest).unwrap();
    write_folder(&src, summer_folder());
    write_folder(&src.join("broken"), "{ \"albums\": [");

    let mut uploader = Uploader::open(&src, &dest, IngestConfig::default()).unwrap();
    let err = uploader.run(&src, None).unwrap_err();
    assert!(matches!(err, Error::InvalidMetadata { .. }));
}
