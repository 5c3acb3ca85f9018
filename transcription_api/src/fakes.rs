//! In-memory stand-ins for the storage and file system interfaces.
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use types::{Segment, Transcription, UNKNOWN_LANGUAGE};

use crate::db::{StoreError, TranscriptionStore};
use crate::files::FileStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    transcriptions: Mutex<Vec<Transcription>>,
    segments: Mutex<HashMap<i64, Vec<Segment>>>,
    broken: AtomicBool,
    corrupt: AtomicBool,
}

impl MemoryStore {
    /// Makes every following call fail as if the database were unreachable.
    pub fn break_connection(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    /// Makes segment listings fail as if a row held malformed tokens.
    pub fn corrupt_segments(&self) {
        self.corrupt.store(true, Ordering::SeqCst);
    }

    /// Adds a segment the way the external recogniser would.
    pub fn insert_segment(&self, transcription_id: i64, segment: Segment) {
        self.segments
            .lock()
            .unwrap()
            .entry(transcription_id)
            .or_default()
            .push(segment);
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.broken.load(Ordering::SeqCst) {
            return Err(StoreError::Sqlite(rusqlite::Error::InvalidPath(
                "unreachable".into(),
            )));
        }

        Ok(())
    }
}

impl TranscriptionStore for MemoryStore {
    fn create_schema(&self) -> Result<(), StoreError> {
        self.check()
    }

    fn insert_transcription(&self, filename: &str) -> Result<i64, StoreError> {
        self.check()?;

        let mut transcriptions = self.transcriptions.lock().unwrap();
        let id = transcriptions.last().map_or(1, |last| last.id + 1);
        transcriptions.push(Transcription {
            id,
            filename: Some(filename.to_string()),
            text: Some(String::new()),
            language: Some(UNKNOWN_LANGUAGE.to_string()),
        });

        Ok(id)
    }

    fn list_transcriptions(&self) -> Result<Vec<Transcription>, StoreError> {
        self.check()?;

        Ok(self.transcriptions.lock().unwrap().clone())
    }

    fn list_segments(
        &self,
        transcription_id: i64,
    ) -> Result<Vec<Segment>, StoreError> {
        self.check()?;

        if self.corrupt.load(Ordering::SeqCst) {
            let source = serde_json::from_str::<Vec<serde_json::Value>>("[1,").unwrap_err();
            return Err(StoreError::Decode {
                segment_id: 1,
                column: "tokens",
                source,
            });
        }

        Ok(self
            .segments
            .lock()
            .unwrap()
            .get(&transcription_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[derive(Debug, Default)]
pub struct MemoryFileStore {
    files: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryFileStore {
    pub fn insert(&self, name: &str, contents: &[u8]) {
        self.files
            .lock()
            .unwrap()
            .insert(name.to_string(), contents.to_vec());
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(name).cloned()
    }
}

impl FileStore for MemoryFileStore {
    fn write(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        self.insert(name, contents);

        Ok(())
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.get(name)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }
}
