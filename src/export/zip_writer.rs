//! Zip implementation of the archive writer

use super::{ArchiveEntry, ArchiveWriter};
use crate::config::Compression;
use crate::error::ExportError;
use chrono::{Datelike, Local, Timelike};
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Writes entries into an in-memory zip archive
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiveWriter {
    compression: Compression,
}

impl ZipArchiveWriter {
    pub fn new(compression: Compression) -> Self {
        Self { compression }
    }

    fn options(&self) -> FileOptions {
        let method = match self.compression {
            Compression::Deflated => CompressionMethod::Deflated,
            Compression::Stored => CompressionMethod::Stored,
        };
        FileOptions::default()
            .compression_method(method)
            .last_modified_time(now())
    }
}

/// Current local time as a zip timestamp; zip cannot encode years before 1980
fn now() -> zip::DateTime {
    let local = Local::now();
    u16::try_from(local.year())
        .ok()
        .and_then(|year| {
            zip::DateTime::from_date_and_time(
                year,
                local.month() as u8,
                local.day() as u8,
                local.hour() as u8,
                local.minute() as u8,
                local.second() as u8,
            )
            .ok()
        })
        .unwrap_or_default()
}

impl ArchiveWriter for ZipArchiveWriter {
    fn write_archive(&self, entries: &[ArchiveEntry]) -> Result<Vec<u8>, ExportError> {
        let options = self.options();
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        for entry in entries {
            if entry.is_directory {
                zip.add_directory(entry.path.as_str(), options)?;
            } else {
                zip.start_file(entry.path.as_str(), options)?;
                zip.write_all(&entry.content)?;
            }
        }

        Ok(zip.finish()?.into_inner())
    }
}
