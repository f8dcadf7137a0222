use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone};
use daybook_store_core::Record;
use lazy_regex::regex;

use crate::day_key;

/// Derived per-day aggregate; recomputed on every call, never cached here.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyGroup {
    pub day_key: String,
    pub records: Vec<Record>,
    pub incomplete_count: usize,
    pub complete_count: usize,
}

impl DailyGroup {
    pub fn label(&self, today: NaiveDate) -> String {
        day_key::label_of(&self.day_key, today)
    }
}

/// Buckets records by the calendar day of their display timestamp (falling
/// back to `now`), preserving input order inside each bucket. Buckets come
/// back in descending day order.
pub fn group_records<Tz: TimeZone>(records: Vec<Record>, tz: &Tz, now: u64) -> Vec<DailyGroup> {
    let mut buckets: BTreeMap<String, Vec<Record>> = BTreeMap::new();
    for record in records {
        let key = day_key::key_of(record.display_at.unwrap_or(now), tz);
        buckets.entry(key).or_default().push(record);
    }

    // ISO keys sort lexically in date order; reverse for newest first.
    buckets
        .into_iter()
        .rev()
        .map(|(day_key, records)| {
            let (incomplete_count, complete_count) = records
                .iter()
                .map(|record| count_checklist_items(&record.content))
                .fold((0, 0), |(i, c), (di, dc)| (i + di, c + dc));
            DailyGroup {
                day_key,
                records,
                incomplete_count,
                complete_count,
            }
        })
        .collect()
}

/// Counts `(incomplete, complete)` checklist-item lines in a content block.
pub fn count_checklist_items(content: &str) -> (usize, usize) {
    let incomplete = regex!(r"(?m)^[ \t]*- \[ \]").find_iter(content).count();
    let complete = regex!(r"(?mi)^[ \t]*- \[x\]").find_iter(content).count();
    (incomplete, complete)
}
