use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-match state as reported by the backend at poll time. Immutable;
/// the full set is replaced atomically on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    /// Stable identifier, used for action targeting
    pub match_id: i64,
    /// Transient per-run identifier, used only as a render key
    pub session_id: String,
    pub start_time: DateTime<Utc>,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_score: u32,
    pub away_score: u32,
    /// Simulation clock, in match minutes
    pub current_minute: u32,
    /// Sole lifecycle discriminator; the console never infers lifecycle
    /// from score or minute
    pub finished: bool,
}

/// Snapshots partitioned by lifecycle phase, input order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified {
    pub live: Vec<MatchSnapshot>,
    pub finished: Vec<MatchSnapshot>,
}

/// Partition snapshots on the `finished` flag. Pure and deterministic;
/// cheap enough to recompute on every render.
pub fn classify(snapshots: &[MatchSnapshot]) -> Classified {
    let (finished, live): (Vec<_>, Vec<_>) =
        snapshots.iter().cloned().partition(|m| m.finished);
    Classified { live, finished }
}

/// Immutable view of the monitor for rendering: the classified last-applied
/// snapshot set plus the error/loading surface.
#[derive(Debug, Clone, Serialize)]
pub struct MatchBoard {
    /// True only until the very first poll cycle resolves
    pub loading: bool,
    pub live: Vec<MatchSnapshot>,
    pub finished: Vec<MatchSnapshot>,
    /// Most recent fetch error; cleared by the next applied success
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn snapshot(match_id: i64, finished: bool) -> MatchSnapshot {
        MatchSnapshot {
            match_id,
            session_id: format!("session-{}", match_id),
            start_time: Utc.with_ymd_and_hms(2026, 3, 14, 15, 0, 0).unwrap(),
            home_team_name: "FC United".into(),
            away_team_name: "Athletic Rovers".into(),
            home_score: 2,
            away_score: 1,
            current_minute: 67,
            finished,
        }
    }

    #[test]
    fn test_classify_partitions_on_finished_flag() {
        let input = vec![snapshot(1, false), snapshot(2, true), snapshot(3, false)];
        let c = classify(&input);
        assert_eq!(c.live.len(), 2);
        assert_eq!(c.finished.len(), 1);
        assert!(c.live.iter().all(|m| !m.finished));
        assert!(c.finished.iter().all(|m| m.finished));
    }

    #[test]
    fn test_classify_drops_and_duplicates_nothing() {
        let input: Vec<_> = (0..10).map(|i| snapshot(i, i % 3 == 0)).collect();
        let c = classify(&input);
        assert_eq!(c.live.len() + c.finished.len(), input.len());
        let mut ids: Vec<i64> = c
            .live
            .iter()
            .chain(c.finished.iter())
            .map(|m| m.match_id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_classify_preserves_relative_order() {
        let input = vec![
            snapshot(5, false),
            snapshot(9, true),
            snapshot(2, false),
            snapshot(7, true),
        ];
        let c = classify(&input);
        let live_ids: Vec<i64> = c.live.iter().map(|m| m.match_id).collect();
        let finished_ids: Vec<i64> = c.finished.iter().map(|m| m.match_id).collect();
        assert_eq!(live_ids, vec![5, 2]);
        assert_eq!(finished_ids, vec![9, 7]);
    }

    #[test]
    fn test_classify_empty_set() {
        let c = classify(&[]);
        assert!(c.live.is_empty());
        assert!(c.finished.is_empty());
    }

    #[test]
    fn test_classify_is_idempotent() {
        let input = vec![snapshot(1, false), snapshot(2, true)];
        assert_eq!(classify(&input), classify(&input));
    }

    #[test]
    fn test_snapshot_deserializes_backend_json() {
        let raw = r#"{
            "matchId": 42,
            "sessionId": "a1b2c3",
            "startTime": "2026-03-14T15:00:00Z",
            "homeTeamName": "FC United",
            "awayTeamName": "Athletic Rovers",
            "homeScore": 2,
            "awayScore": 1,
            "currentMinute": 67,
            "finished": false
        }"#;
        let m: MatchSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(m.match_id, 42);
        assert_eq!(m.session_id, "a1b2c3");
        assert_eq!(m.home_team_name, "FC United");
        assert_eq!((m.home_score, m.away_score), (2, 1));
        assert_eq!(m.current_minute, 67);
        assert!(!m.finished);
    }
}
