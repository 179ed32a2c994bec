//! Where assignments and conversations come from.
//!
//! Every fetch returns a complete snapshot; callers replace what they had
//! rather than merging.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::SourceError;
use crate::models::{Assignment, Conversation};

pub trait ConversationSource: Send + Sync {
    fn fetch_conversations(&self) -> Result<Vec<Conversation>, SourceError>;
}

pub trait AssignmentSource: Send + Sync {
    /// `Ok(None)` when the assignment hasn't been published yet.
    fn fetch_assignment(&self) -> Result<Option<Assignment>, SourceError>;
}

/// Accepts either a bare list or the `{ "contactsForAssignment": [...] }`
/// shape a query response uses.
#[derive(Deserialize)]
#[serde(untagged)]
enum ConversationsFile {
    List(Vec<Conversation>),
    #[serde(rename_all = "camelCase")]
    Wrapped { contacts_for_assignment: Vec<Conversation> },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AssignmentFile {
    Bare(Assignment),
    Wrapped { assignment: Option<Assignment> },
}

/// JSON files on disk, re-read on every fetch so external edits show up on
/// the next poll.
#[derive(Debug, Clone)]
pub struct FileSource {
    assignment_path: PathBuf,
    conversations_path: PathBuf,
}

impl FileSource {
    pub fn new(assignment_path: impl Into<PathBuf>, conversations_path: impl Into<PathBuf>) -> Self {
        Self {
            assignment_path: assignment_path.into(),
            conversations_path: conversations_path.into(),
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, SourceError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&contents).map_err(|source| SourceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

impl ConversationSource for FileSource {
    fn fetch_conversations(&self) -> Result<Vec<Conversation>, SourceError> {
        let conversations = match read_json(&self.conversations_path)? {
            Some(ConversationsFile::List(list)) => list,
            Some(ConversationsFile::Wrapped {
                contacts_for_assignment,
            }) => contacts_for_assignment,
            None => Vec::new(),
        };
        Ok(conversations)
    }
}

impl AssignmentSource for FileSource {
    fn fetch_assignment(&self) -> Result<Option<Assignment>, SourceError> {
        let assignment = match read_json(&self.assignment_path)? {
            Some(AssignmentFile::Wrapped { assignment }) => assignment,
            Some(AssignmentFile::Bare(assignment)) => Some(assignment),
            None => None,
        };
        Ok(assignment)
    }
}
