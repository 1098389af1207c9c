//! SQL schema for the marquee SQLite store.
//!
//! The production schema is owned by an external migration tool. This DDL
//! mirrors it and is applied idempotently at connection startup so that a
//! fresh file (or an in-memory test database) is immediately usable.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS movie (
    uuid             TEXT PRIMARY KEY,
    title            TEXT NOT NULL,
    imdb_link        TEXT NOT NULL,
    imdb_id          TEXT NOT NULL,
    year             INTEGER NOT NULL,
    rated            TEXT,
    released         TEXT,             -- ISO date or NULL
    runtime_minutes  INTEGER,
    plot             TEXT,
    country          TEXT,
    language         TEXT,
    box_office       TEXT,
    production       TEXT,
    call_felissa     INTEGER NOT NULL DEFAULT 0,
    slasher          INTEGER NOT NULL DEFAULT 0,
    zombies          INTEGER NOT NULL DEFAULT 0,
    beast            INTEGER NOT NULL DEFAULT 0,
    godzilla         INTEGER NOT NULL DEFAULT 0,
    wallpaper_fu     INTEGER,
    created_datetime INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

-- One row per IMDb id.
CREATE UNIQUE INDEX IF NOT EXISTS movie_imdb_id_idx ON movie(imdb_id);

CREATE TABLE IF NOT EXISTS movie_genre (
    uuid             TEXT PRIMARY KEY,
    movie_uuid       TEXT REFERENCES movie(uuid),
    name             TEXT NOT NULL,
    created_datetime INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE TABLE IF NOT EXISTS movie_director (
    uuid             TEXT PRIMARY KEY,
    movie_uuid       TEXT REFERENCES movie(uuid),
    name             TEXT NOT NULL,
    created_datetime INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE TABLE IF NOT EXISTS movie_writer (
    uuid             TEXT PRIMARY KEY,
    movie_uuid       TEXT REFERENCES movie(uuid),
    name             TEXT NOT NULL,
    created_datetime INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE TABLE IF NOT EXISTS movie_actor (
    uuid             TEXT PRIMARY KEY,
    movie_uuid       TEXT REFERENCES movie(uuid),
    name             TEXT NOT NULL,
    created_datetime INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

CREATE TABLE IF NOT EXISTS movie_rating (
    uuid             TEXT PRIMARY KEY,
    movie_uuid       TEXT REFERENCES movie(uuid),
    source           TEXT NOT NULL,
    value            TEXT NOT NULL,
    created_datetime INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

-- movie_title and imdb_id are denormalised copies of the movie's fields.
-- Deleting a movie orphans its watches rather than removing them.
CREATE TABLE IF NOT EXISTS movie_watch (
    uuid             TEXT PRIMARY KEY,
    movie_uuid       TEXT REFERENCES movie(uuid) ON DELETE SET NULL,
    movie_title      TEXT NOT NULL,
    imdb_id          TEXT NOT NULL,
    watched          TEXT NOT NULL,    -- YYYY-MM-DD
    service          TEXT NOT NULL,
    first_time       INTEGER NOT NULL,
    joe_bob          INTEGER NOT NULL,
    notes            TEXT,
    created_datetime INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
);

-- (imdb_id, watched) is the natural key of a watch.
CREATE UNIQUE INDEX IF NOT EXISTS movie_watch_natural_key_idx
    ON movie_watch(imdb_id, watched);

CREATE TABLE IF NOT EXISTS review (
    uuid             TEXT PRIMARY KEY,
    movie_uuid       TEXT NOT NULL REFERENCES movie(uuid) ON DELETE CASCADE,
    movie_title      TEXT NOT NULL,
    review           TEXT NOT NULL,
    liked            INTEGER NOT NULL,
    created_datetime INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS movie_genre_movie_idx    ON movie_genre(movie_uuid);
CREATE INDEX IF NOT EXISTS movie_director_movie_idx ON movie_director(movie_uuid);
CREATE INDEX IF NOT EXISTS movie_writer_movie_idx   ON movie_writer(movie_uuid);
CREATE INDEX IF NOT EXISTS movie_actor_movie_idx    ON movie_actor(movie_uuid);
CREATE INDEX IF NOT EXISTS movie_rating_movie_idx   ON movie_rating(movie_uuid);
CREATE INDEX IF NOT EXISTS review_movie_idx         ON review(movie_uuid);
";
