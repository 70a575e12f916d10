//! Focus analytics derived from the history log.

use chrono::{DateTime, Duration, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::model::HistoryRecord;

/// Minutes of completed focus that earn a 100 score for the day.
const FULL_SCORE_MIN: u64 = 360;

/// One cell of the streak heatmap.
#[derive(Debug, Clone, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub minutes: u64,
    /// 0 (empty) .. 4 (5+ hours).
    pub intensity: u8,
}

fn local_date(at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&Local).date_naive()
}

fn minutes_on(history: &[HistoryRecord], date: NaiveDate) -> u64 {
    history
        .iter()
        .filter(|h| local_date(h.completed_at) == date)
        .map(|h| h.duration_min)
        .sum()
}

/// Total completed minutes on the local calendar day of `now`.
pub fn today_minutes(history: &[HistoryRecord], now: DateTime<Utc>) -> u64 {
    minutes_on(history, local_date(now))
}

/// Daily focus score: `min(100, round(minutes / 360 * 100))`.
pub fn focus_score(history: &[HistoryRecord], now: DateTime<Utc>) -> u8 {
    let minutes = today_minutes(history, now);
    ((minutes as f64 / FULL_SCORE_MIN as f64 * 100.0).round() as u64).min(100) as u8
}

fn intensity(minutes: u64) -> u8 {
    match minutes {
        0 => 0,
        m if m > 300 => 4,
        m if m > 180 => 3,
        m if m > 60 => 2,
        _ => 1,
    }
}

/// Per-day cells for the trailing `days` window, oldest first.
pub fn heatmap(history: &[HistoryRecord], now: DateTime<Utc>, days: u32) -> Vec<DayCell> {
    let today = local_date(now);
    (0..days)
        .rev()
        .map(|back| {
            let date = today - Duration::days(back as i64);
            let minutes = minutes_on(history, date);
            DayCell {
                date,
                minutes,
                intensity: intensity(minutes),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(minutes: u64, days_ago: i64, now: DateTime<Utc>) -> HistoryRecord {
        HistoryRecord {
            title: "T".into(),
            duration_min: minutes,
            color: "emerald".into(),
            completed_at: now - Duration::days(days_ago),
        }
    }

    #[test]
    fn score_saturates_at_hundred() {
        let now = Utc::now();
        let history = vec![record(200, 0, now), record(200, 0, now)];
        assert_eq!(focus_score(&history, now), 100);
    }

    #[test]
    fn score_rounds_partial_days() {
        let now = Utc::now();
        let history = vec![record(90, 0, now)];
        // 90 / 360 = 25%.
        assert_eq!(focus_score(&history, now), 25);
        assert_eq!(today_minutes(&history, now), 90);
    }

    #[test]
    fn yesterday_does_not_count_toward_today() {
        let now = Utc::now();
        let history = vec![record(120, 2, now)];
        assert_eq!(today_minutes(&history, now), 0);
    }

    #[test]
    fn heatmap_is_oldest_first_with_intensity_bands() {
        let now = Utc::now();
        let history = vec![
            record(30, 0, now),   // today: band 1
            record(100, 1, now),  // yesterday: band 2
            record(200, 3, now),  // band 3
            record(400, 5, now),  // band 4
        ];
        let cells = heatmap(&history, now, 14);
        assert_eq!(cells.len(), 14);
        assert_eq!(cells[13].intensity, 1);
        assert_eq!(cells[12].intensity, 2);
        assert_eq!(cells[10].intensity, 3);
        assert_eq!(cells[8].intensity, 4);
        assert_eq!(cells[0].intensity, 0);
        assert!(cells.windows(2).all(|w| w[0].date < w[1].date));
    }
}
