use chrono::{Local, TimeZone};
use daybook_store_core::{Record, RecordQuery, StoreError};
use tracing::warn;

use crate::{day_key, errors::CoreResult, Core};

const LOCATE_ATTEMPTS: u32 = 3;
const LOCATE_PAGE_SIZE: u32 = 100;

impl Core {
    pub async fn find_container(
        &self,
        creator_id: &str,
        day_key: &str,
    ) -> CoreResult<Option<Record>> {
        self.find_container_in(creator_id, day_key, &Local).await
    }

    /// Looks up the creator's container for one calendar day. Absence is the
    /// signal to take the create path, not an error. The listing is
    /// read-only, so transient network failures are retried a few times.
    pub async fn find_container_in<Tz>(
        &self,
        creator_id: &str,
        day_key: &str,
        tz: &Tz,
    ) -> CoreResult<Option<Record>>
    where
        Tz: TimeZone + Sync,
    {
        let (start, end) = day_key::bounds_of(day_key, tz)?;
        let query = RecordQuery {
            creator_id: Some(creator_id.to_owned()),
            created_after: Some(start),
            created_before: Some(end),
            parent: None,
            limit: Some(LOCATE_PAGE_SIZE),
        };

        let mut attempt = 1;
        let records = loop {
            match self.store.list_records(query.clone()).await {
                Ok(records) => break records,
                Err(StoreError::Network(cause)) if attempt < LOCATE_ATTEMPTS => {
                    warn!(attempt, %cause, "container lookup failed, retrying");
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        };

        Ok(records
            .into_iter()
            .find(|record| day_key::is_container_for(record, day_key)))
    }
}
