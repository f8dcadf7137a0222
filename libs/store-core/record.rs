use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

pub type RecordId = String;

/// Opaque reference handed back by the upload collaborator.
pub type AttachmentRef = String;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Protected,
    /// Most restrictive level, forced on annotations.
    #[default]
    Private,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Location {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Reference,
    Comment,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Relation {
    pub record_id: RecordId,
    pub kind: RelationKind,
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub creator_id: String,
    pub content: String,
    pub attachments: Vec<AttachmentRef>,
    pub visibility: Visibility,
    /// Set when this record is an annotation of another record.
    pub parent: Option<RecordId>,
    pub relations: Vec<Relation>,
    pub location: Option<Location>,
    /// Unix timestamps in seconds.
    pub created_at: u64,
    pub updated_at: u64,
    pub display_at: Option<u64>,
    /// Bumped by the store on every mutation; optimistic concurrency token.
    pub version: u64,
}

/// Creation request; identity and timestamps are assigned by the store
/// unless `created_at` is pinned explicitly.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct RecordDraft {
    pub creator_id: String,
    pub content: String,
    pub attachments: Vec<AttachmentRef>,
    pub visibility: Visibility,
    pub parent: Option<RecordId>,
    pub relations: Vec<Relation>,
    pub location: Option<Location>,
    pub created_at: Option<u64>,
}

/// Partial update. The fields of this struct ARE the field mask: anything
/// not representable here cannot be mutated through the update path.
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
pub struct RecordPatch {
    pub content: Option<String>,
    pub attachments: Option<Vec<AttachmentRef>>,
    pub updated_at: Option<u64>,
}

impl RecordPatch {
    pub fn set_content(mut self, content: String) -> Self {
        self.content = Some(content);
        self
    }

    pub fn set_attachments(mut self, attachments: Vec<AttachmentRef>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    pub fn set_updated_at(mut self, updated_at: u64) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    pub fn merge_with_record(self, record: &Record) -> Record {
        Record {
            content: self.content.unwrap_or(record.content.clone()),
            attachments: self.attachments.unwrap_or(record.attachments.clone()),
            updated_at: self.updated_at.unwrap_or(record.updated_at),
            version: record.version + 1,
            ..record.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        Record {
            id: "01H0000000000000000000000".to_owned(),
            creator_id: "alice".to_owned(),
            content: "# 2026-01-02\n\n- [ ] a".to_owned(),
            attachments: vec!["one.png".to_owned()],
            visibility: Visibility::Private,
            parent: None,
            relations: vec![],
            location: None,
            created_at: 100,
            updated_at: 100,
            display_at: Some(100),
            version: 1,
        }
    }

    #[test]
    fn merge_keeps_unset_fields_and_bumps_version() {
        let patch = RecordPatch::default().set_content("new".to_owned());
        let merged = patch.merge_with_record(&record());

        assert_eq!(merged.content, "new");
        assert_eq!(merged.attachments, vec!["one.png".to_owned()]);
        assert_eq!(merged.updated_at, 100);
        assert_eq!(merged.version, 2);
    }

    #[test]
    fn merge_replaces_attachment_list_whole() {
        let patch = RecordPatch::default()
            .set_attachments(vec!["one.png".to_owned(), "two.png".to_owned()])
            .set_updated_at(200);
        let merged = patch.merge_with_record(&record());

        assert_eq!(merged.attachments.len(), 2);
        assert_eq!(merged.updated_at, 200);
    }
}
