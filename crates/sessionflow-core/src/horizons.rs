//! Month-keyed buckets for far-future tasks.
//!
//! Buckets are keyed by a human month label ("August 2026") plus a
//! catch-all `later` bucket. A bucketed task can be promoted into the
//! plan board's backlog when its month arrives.

use std::collections::BTreeMap;

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{TaskRecord, DEFAULT_TASK_COLOR, DEFAULT_TASK_MIN};
use crate::plan::PlanBoard;

/// Key of the undated catch-all bucket.
pub const LATER_BUCKET: &str = "later";

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Bucket key for the month `offset` months from now, e.g. "August 2026".
pub fn month_key(offset: u32) -> String {
    let today = Local::now().date_naive();
    let total = today.year() * 12 + today.month0() as i32 + offset as i32;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as usize;
    format!("{} {}", MONTH_NAMES[month0], year)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonTask {
    pub id: String,
    pub title: String,
}

/// The month-keyed map persisted as a single opaque blob.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HorizonBoard {
    buckets: BTreeMap<String, Vec<HorizonTask>>,
}

impl HorizonBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three planning buckets: this month, next month, someday.
    pub fn bucket_keys() -> [(String, &'static str); 3] {
        [
            (month_key(0), "This Month"),
            (month_key(1), "Next Month"),
            (LATER_BUCKET.to_string(), "Someday / Later"),
        ]
    }

    pub fn tasks(&self, bucket: &str) -> &[HorizonTask] {
        self.buckets.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Add a task to a bucket. Blank titles are ignored.
    pub fn add(&mut self, bucket: &str, title: &str) -> Option<&HorizonTask> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let list = self.buckets.entry(bucket.to_string()).or_default();
        list.push(HorizonTask {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
        });
        list.last()
    }

    pub fn remove(&mut self, bucket: &str, task_id: &str) -> bool {
        let Some(list) = self.buckets.get_mut(bucket) else {
            return false;
        };
        let before = list.len();
        list.retain(|t| t.id != task_id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.buckets.remove(bucket);
        }
        removed
    }

    /// Move a bucketed task into the backlog with default duration and
    /// color. Unknown ids are a no-op.
    pub fn promote(&mut self, bucket: &str, task_id: &str, board: &mut PlanBoard) -> bool {
        let Some(list) = self.buckets.get_mut(bucket) else {
            return false;
        };
        let Some(pos) = list.iter().position(|t| t.id == task_id) else {
            return false;
        };
        let task = list.remove(pos);
        if list.is_empty() {
            self.buckets.remove(bucket);
        }
        board.backlog.push(TaskRecord::new(
            task.title,
            DEFAULT_TASK_MIN,
            DEFAULT_TASK_COLOR,
        ));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_remove_roundtrip() {
        let mut board = HorizonBoard::new();
        let id = board.add(LATER_BUCKET, "Learn sailing").unwrap().id.clone();
        assert_eq!(board.tasks(LATER_BUCKET).len(), 1);
        assert!(board.remove(LATER_BUCKET, &id));
        assert!(board.tasks(LATER_BUCKET).is_empty());
    }

    #[test]
    fn blank_titles_rejected() {
        let mut board = HorizonBoard::new();
        assert!(board.add(LATER_BUCKET, "   ").is_none());
    }

    #[test]
    fn promote_moves_task_into_backlog_with_defaults() {
        let mut horizons = HorizonBoard::new();
        let mut plan = PlanBoard::new();
        let key = month_key(0);
        let id = horizons.add(&key, "Ship v1").unwrap().id.clone();

        assert!(horizons.promote(&key, &id, &mut plan));
        assert!(horizons.tasks(&key).is_empty());
        assert_eq!(plan.backlog.len(), 1);
        assert_eq!(plan.backlog[0].title, "Ship v1");
        assert_eq!(plan.backlog[0].duration_min, DEFAULT_TASK_MIN);
    }

    #[test]
    fn month_key_wraps_across_years() {
        // Twelve months ahead lands in the same month next year.
        let this = month_key(0);
        let next_year = month_key(12);
        let (m1, y1) = this.rsplit_once(' ').unwrap();
        let (m2, y2) = next_year.rsplit_once(' ').unwrap();
        assert_eq!(m1, m2);
        assert_eq!(y1.parse::<i32>().unwrap() + 1, y2.parse::<i32>().unwrap());
    }

    #[test]
    fn blob_roundtrip() {
        let mut board = HorizonBoard::new();
        board.add(LATER_BUCKET, "A");
        board.add(&month_key(1), "B");
        let json = serde_json::to_string(&board).unwrap();
        let back: HorizonBoard = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tasks(LATER_BUCKET).len(), 1);
        assert_eq!(back.tasks(&month_key(1)).len(), 1);
    }
}
