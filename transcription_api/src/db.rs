//! Storage for transcription metadata and the segments produced for them.
//!
//! Segments are written by the external recogniser; this service only ever
//! reads them. Every operation opens its own connection and closes it before
//! returning.
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use thiserror::Error;
use types::{Segment, Transcription, UNKNOWN_LANGUAGE};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("segment {segment_id} has malformed `{column}` data: {source}")]
    Decode {
        segment_id: i64,
        column: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

pub trait TranscriptionStore: Send + Sync {
    /// Creates both tables if they are missing. Never alters existing ones.
    fn create_schema(&self) -> Result<(), StoreError>;

    /// Records a freshly uploaded file with empty text and an unknown
    /// language, returning the id assigned by the store.
    fn insert_transcription(&self, filename: &str) -> Result<i64, StoreError>;

    fn list_transcriptions(&self) -> Result<Vec<Transcription>, StoreError>;

    /// Lists the segments of one transcription. An id with no transcription
    /// behind it yields an empty list.
    fn list_segments(
        &self,
        transcription_id: i64,
    ) -> Result<Vec<Segment>, StoreError>;
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS transcriptions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    filename TEXT,
    text TEXT,
    language TEXT
);

CREATE TABLE IF NOT EXISTS segments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    transcription_id INTEGER,
    start REAL,
    "end" REAL,
    text TEXT,
    tokens TEXT,
    temperature REAL,
    avg_logprob REAL,
    compression_ratio REAL,
    no_speech_prob REAL,
    confidence REAL,
    words TEXT,
    FOREIGN KEY (transcription_id) REFERENCES transcriptions(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_segments_transcription_id
    ON segments(transcription_id);
"#;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection with foreign key enforcement switched on, which
    /// SQLite leaves off by default and the cascade on `segments` needs.
    pub fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;

        Ok(conn)
    }
}

/// A `segments` row before its JSON columns are decoded.
struct SegmentRow {
    id: i64,
    start: Option<f64>,
    end: Option<f64>,
    text: Option<String>,
    tokens: String,
    temperature: Option<f64>,
    avg_logprob: Option<f64>,
    compression_ratio: Option<f64>,
    no_speech_prob: Option<f64>,
    confidence: Option<f64>,
    words: String,
}

impl SegmentRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            start: row.get(1)?,
            end: row.get(2)?,
            text: row.get(3)?,
            tokens: row.get(4)?,
            temperature: row.get(5)?,
            avg_logprob: row.get(6)?,
            compression_ratio: row.get(7)?,
            no_speech_prob: row.get(8)?,
            confidence: row.get(9)?,
            words: row.get(10)?,
        })
    }

    fn decode(self) -> Result<Segment, StoreError> {
        let tokens = serde_json::from_str(&self.tokens).map_err(|source| {
            StoreError::Decode {
                segment_id: self.id,
                column: "tokens",
                source,
            }
        })?;

        let words = serde_json::from_str(&self.words).map_err(|source| {
            StoreError::Decode {
                segment_id: self.id,
                column: "words",
                source,
            }
        })?;

        Ok(Segment {
            id: self.id,
            start: self.start,
            end: self.end,
            text: self.text,
            tokens,
            temperature: self.temperature,
            avg_logprob: self.avg_logprob,
            compression_ratio: self.compression_ratio,
            no_speech_prob: self.no_speech_prob,
            confidence: self.confidence,
            words,
        })
    }
}

impl TranscriptionStore for SqliteStore {
    fn create_schema(&self) -> Result<(), StoreError> {
        self.connect()?.execute_batch(SCHEMA)?;

        Ok(())
    }

    fn insert_transcription(&self, filename: &str) -> Result<i64, StoreError> {
        let conn = self.connect()?;

        conn.execute(
            "INSERT INTO transcriptions (filename, text, language) VALUES (?1, ?2, ?3)",
            params![filename, "", UNKNOWN_LANGUAGE],
        )?;

        Ok(conn.last_insert_rowid())
    }

    fn list_transcriptions(&self) -> Result<Vec<Transcription>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT id, filename, text, language FROM transcriptions",
        )?;

        let transcriptions = stmt
            .query_map([], |row| {
                Ok(Transcription {
                    id: row.get(0)?,
                    filename: row.get(1)?,
                    text: row.get(2)?,
                    language: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(transcriptions)
    }

    fn list_segments(
        &self,
        transcription_id: i64,
    ) -> Result<Vec<Segment>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, start, "end", text, tokens, temperature, avg_logprob,
                   compression_ratio, no_speech_prob, confidence, words
            FROM segments
            WHERE transcription_id = ?1
            "#,
        )?;

        let rows = stmt
            .query_map(params![transcription_id], SegmentRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter().map(SegmentRow::decode).collect()
    }
}

/// Writes a segment row the way the external recogniser would.
#[cfg(test)]
pub fn insert_segment_row(
    store: &SqliteStore,
    transcription_id: i64,
    tokens: &str,
    words: &str,
) -> Result<i64, StoreError> {
    let conn = store.connect()?;

    conn.execute(
        r#"
        INSERT INTO segments (transcription_id, start, "end", text, tokens,
                              temperature, avg_logprob, compression_ratio,
                              no_speech_prob, confidence, words)
        VALUES (?1, 0.0, 2.5, ' hello there', ?2, 0.0, -0.25, 1.2, 0.01, 0.93, ?3)
        "#,
        params![transcription_id, tokens, words],
    )?;

    Ok(conn.last_insert_rowid())
}
