#![forbid(unsafe_code)]

//! The storage collaborator seam.
//!
//! Records live elsewhere (one folder per patient in the shipped app). The
//! workbench only sees them through [`RecordStore`]: a filtered summary
//! list, a photo path lookup and the raw attachment listing.
//!
//! Attachment names follow the upload convention
//! `YYYY-MM-DD_HH-MM-SS_upload_name.ext`. [`Attachment::from_file_name`]
//! recovers the timestamp and a display name; [`split_attachments`] sorts a
//! folder listing into the documents table (every upload) and the
//! evaluations table (clinical-evaluation exports only).

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use naju_widgets::PhotoResolver;

/// File holding a record's profile; never listed as an attachment.
pub const PROFILE_FILE: &str = "profile.json";

/// Kind shown for clinical-evaluation exports.
pub const EVALUATION_KIND: &str = "Examen mental formal";

// ---------------------------------------------------------------------------
// Identifiers and summaries
// ---------------------------------------------------------------------------

/// Stable record identifier (the record's folder name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One row of the patient list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordSummary {
    /// Record identifier.
    pub id: RecordId,
    /// Full name as entered (may be empty).
    pub display_name: String,
    /// Document type and number, e.g. `"CC 1020"` (may be empty).
    pub document_label: String,
    /// Age in years, when the birth date is known.
    pub age: Option<u32>,
    /// City (may be empty).
    pub city: String,
    /// Occupation (may be empty).
    pub occupation: String,
    /// Profile photo file name inside the record, if any.
    pub photo_file_name: Option<String>,
}

impl RecordSummary {
    /// Summary with only an id and a name.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: RecordId::new(id),
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Whether the summary matches a search query: case-insensitive
    /// substring of name, document, city and occupation. An empty query
    /// matches everything.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        let hay = format!(
            "{} {} {} {}",
            self.display_name, self.document_label, self.city, self.occupation
        )
        .to_lowercase();
        hay.contains(&query)
    }
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// A file uploaded to a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// `YYYY-MM-DD HH:MM:SS` recovered from the file name.
    pub timestamp: Option<String>,
    /// Name shown in the table.
    pub display_name: String,
    /// File name on disk.
    pub raw_file_name: String,
}

impl Attachment {
    /// Classify a raw file name for the documents table. Returns `None` for
    /// the profile file and the profile photo.
    #[must_use]
    pub fn from_file_name(raw: &str) -> Option<Self> {
        if is_hidden(raw) {
            return None;
        }
        Some(match split_timestamp(raw) {
            Some((timestamp, rest)) => Self {
                timestamp: Some(timestamp),
                display_name: rest.replace('_', " "),
                raw_file_name: raw.to_string(),
            },
            None => Self {
                timestamp: None,
                display_name: raw.replace('_', " "),
                raw_file_name: raw.to_string(),
            },
        })
    }

    /// Classify a raw file name for the evaluations table. Returns `None`
    /// unless the file is a clinical-evaluation export. Evaluations show
    /// the whole file name.
    #[must_use]
    pub fn evaluation_from_file_name(raw: &str) -> Option<Self> {
        if is_hidden(raw) || !is_evaluation(raw) {
            return None;
        }
        Some(Self {
            timestamp: split_timestamp(raw).map(|(timestamp, _)| timestamp),
            display_name: raw.replace('_', " "),
            raw_file_name: raw.to_string(),
        })
    }

    /// Timestamp column text (`---` when unknown).
    #[must_use]
    pub fn timestamp_label(&self) -> &str {
        self.timestamp.as_deref().unwrap_or("---")
    }

    /// Whether this is a clinical-evaluation export.
    #[must_use]
    pub fn is_evaluation(&self) -> bool {
        is_evaluation(&self.raw_file_name)
    }
}

/// Whether `name` is a clinical-evaluation export.
#[must_use]
pub fn is_evaluation(name: &str) -> bool {
    let low = name.to_lowercase();
    low.contains("_mse_") || low.contains("examen_mental_formal")
}

fn is_hidden(name: &str) -> bool {
    let low = name.to_lowercase();
    low == PROFILE_FILE || low.starts_with("photo.")
}

/// Split `YYYY-MM-DD_HH-MM-SS_rest` into (`YYYY-MM-DD HH:MM:SS`, `rest`).
/// Only the field lengths are checked.
fn split_timestamp(raw: &str) -> Option<(String, &str)> {
    let mut parts = raw.splitn(3, '_');
    let date = parts.next()?;
    let time = parts.next()?;
    let rest = parts.next()?;
    if date.chars().count() != 10 || time.chars().count() != 8 {
        return None;
    }
    Some((format!("{date} {}", time.replace('-', ":")), rest))
}

/// The two attachment tables of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentTables {
    /// Every uploaded file.
    pub documents: Vec<Attachment>,
    /// Clinical-evaluation exports.
    pub evaluations: Vec<Attachment>,
}

/// Sort a folder listing into the documents and evaluations tables, each
/// ordered by raw file name, newest (largest) first.
#[must_use]
pub fn split_attachments<I, S>(names: I) -> AttachmentTables
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut names: Vec<String> = names.into_iter().map(|n| n.as_ref().to_string()).collect();
    names.sort_unstable_by(|a, b| b.cmp(a));
    AttachmentTables {
        documents: names.iter().filter_map(|n| Attachment::from_file_name(n)).collect(),
        evaluations: names
            .iter()
            .filter_map(|n| Attachment::evaluation_from_file_name(n))
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures reported by a [`RecordStore`].
#[derive(Debug)]
pub enum RecordError {
    /// Underlying storage I/O failed.
    Io(std::io::Error),
    /// No record with this id.
    Missing(RecordId),
    /// The record exists but its data could not be understood.
    Malformed {
        /// Offending record.
        record: RecordId,
        /// What was wrong.
        reason: String,
    },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "record storage error: {err}"),
            Self::Missing(id) => write!(f, "no record {id:?}"),
            Self::Malformed { record, reason } => write!(f, "record {record:?} is malformed: {reason}"),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Missing(_) | Self::Malformed { .. } => None,
        }
    }
}

impl From<std::io::Error> for RecordError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

// ---------------------------------------------------------------------------
// Collaborator trait
// ---------------------------------------------------------------------------

/// Read access to patient records.
pub trait RecordStore {
    /// Records matching `query`, ordered by id.
    fn list_records(&self, query: &str) -> Result<Vec<RecordSummary>, RecordError>;

    /// Path of `file` inside `id`'s storage, if it exists.
    fn resolve_photo_path(&self, id: &RecordId, file: &str) -> Option<PathBuf>;

    /// Raw file names stored with `id`.
    fn list_files(&self, id: &RecordId) -> Result<Vec<String>, RecordError>;

    /// Documents table of `id`: every upload, newest first.
    fn list_attachments(&self, id: &RecordId) -> Result<Vec<Attachment>, RecordError> {
        self.attachment_tables(id).map(|tables| tables.documents)
    }

    /// Both attachment tables of `id`.
    fn attachment_tables(&self, id: &RecordId) -> Result<AttachmentTables, RecordError> {
        self.list_files(id).map(split_attachments)
    }
}

/// Adapts any [`RecordStore`] to the thumbnail cache's resolver seam.
#[derive(Debug)]
pub struct StoreResolver<'a, S: ?Sized>(pub &'a S);

impl<S: RecordStore + ?Sized> PhotoResolver<RecordId> for StoreResolver<'_, S> {
    fn resolve_photo(&self, record: &RecordId, file: &str) -> Option<PathBuf> {
        self.0.resolve_photo_path(record, file)
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct StoredRecord {
    summary: RecordSummary,
    files: Vec<String>,
}

/// In-memory [`RecordStore`]. Photos are looked up under
/// `<photo_root>/<record id>/<file>` when a root is set.
#[derive(Debug, Clone, Default)]
pub struct MemoryRecordStore {
    records: BTreeMap<RecordId, StoredRecord>,
    photo_root: Option<PathBuf>,
    unavailable: bool,
}

impl MemoryRecordStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve photos under `root`.
    #[must_use]
    pub fn with_photo_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.photo_root = Some(root.into());
        self
    }

    /// Add or replace a record.
    pub fn insert(&mut self, summary: RecordSummary) {
        let files = self
            .records
            .get(&summary.id)
            .map(|r| r.files.clone())
            .unwrap_or_default();
        self.records.insert(summary.id.clone(), StoredRecord { summary, files });
    }

    /// Attach a file name to a record.
    pub fn add_file(&mut self, id: &RecordId, name: impl Into<String>) -> Result<(), RecordError> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| RecordError::Missing(id.clone()))?;
        record.files.push(name.into());
        Ok(())
    }

    /// Change a record's photo file name.
    pub fn set_photo(&mut self, id: &RecordId, file: Option<String>) -> Result<(), RecordError> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| RecordError::Missing(id.clone()))?;
        record.summary.photo_file_name = file;
        Ok(())
    }

    /// Remove a record.
    pub fn remove(&mut self, id: &RecordId) -> Option<RecordSummary> {
        self.records.remove(id).map(|r| r.summary)
    }

    /// Make every listing fail with an I/O error, simulating lost storage.
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    fn check_available(&self) -> Result<(), RecordError> {
        if self.unavailable {
            return Err(RecordError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "record storage unavailable",
            )));
        }
        Ok(())
    }
}

impl RecordStore for MemoryRecordStore {
    fn list_records(&self, query: &str) -> Result<Vec<RecordSummary>, RecordError> {
        self.check_available()?;
        Ok(self
            .records
            .values()
            .filter(|r| r.summary.matches(query))
            .map(|r| r.summary.clone())
            .collect())
    }

    fn resolve_photo_path(&self, id: &RecordId, file: &str) -> Option<PathBuf> {
        let root = self.photo_root.as_ref()?;
        let path = root.join(id.as_str()).join(file);
        path.is_file().then_some(path)
    }

    fn list_files(&self, id: &RecordId) -> Result<Vec<String>, RecordError> {
        self.check_available()?;
        self.records
            .get(id)
            .map(|r| r.files.clone())
            .ok_or_else(|| RecordError::Missing(id.clone()))
    }
}
