use daybook_store_core::{
    Record, RecordDraft, RecordPatch, RecordQuery, Relation, RelationKind, StoreError, Visibility,
};

use crate::{
    errors::{CoreError, CoreResult},
    utils, Core,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationList {
    pub items: Vec<Record>,
    pub total: usize,
}

/// Child notes attached to a parent record. No day logic here; every
/// operation rides on the identity-keyed atomicity of the record store.
impl Core {
    pub async fn add_annotation(
        &self,
        parent_id: &str,
        text: &str,
        creator_id: &str,
    ) -> CoreResult<Record> {
        if text.trim().is_empty() {
            return Err(CoreError::EmptyContent);
        }

        let parent = match self.store.get_record(parent_id.to_owned()).await {
            Ok(record) => record,
            Err(StoreError::NotFound(id)) => return Err(CoreError::AnnotationParentNotFound(id)),
            Err(err) => return Err(err.into()),
        };

        let draft = RecordDraft {
            creator_id: creator_id.to_owned(),
            // Annotations are free text, deliberately not checklist-normalized.
            content: text.to_owned(),
            visibility: Visibility::Private,
            parent: Some(parent.id.clone()),
            relations: vec![Relation {
                record_id: parent.id,
                kind: RelationKind::Comment,
            }],
            ..Default::default()
        };

        Ok(self.store.create_record(draft).await?)
    }

    pub async fn update_annotation(&self, annotation_id: &str, text: &str) -> CoreResult<()> {
        let patch = RecordPatch::default()
            .set_content(text.to_owned())
            .set_updated_at(utils::unix_now());

        match self
            .store
            .update_record(annotation_id.to_owned(), patch, None)
            .await
        {
            Ok(_) => Ok(()),
            Err(StoreError::NotFound(id)) => Err(CoreError::AnnotationNotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete_annotation(&self, annotation_id: &str) -> CoreResult<()> {
        match self.store.delete_record(annotation_id.to_owned()).await {
            Ok(()) => Ok(()),
            Err(StoreError::NotFound(id)) => Err(CoreError::AnnotationNotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    /// Annotations of a parent, ascending by creation time.
    pub async fn list_annotations(&self, parent_id: &str) -> CoreResult<AnnotationList> {
        let items = self
            .store
            .list_records(RecordQuery {
                parent: Some(parent_id.to_owned()),
                ..Default::default()
            })
            .await?;
        let total = items.len();
        Ok(AnnotationList { items, total })
    }
}
