//! Result batching: rank an agent snapshot and cut it into a page.
//!
//! A page always starts with the top `batch_size` papers. While the agent is
//! still searching, everything past the first batch is revealed as well, walked
//! in strides of two from `batch_size`. Once the agent reports `finish`, only
//! the first batch is returned.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::config::api;
use crate::error::{BatchError, BatchResult};
use crate::models::{PaperRecord, RawResults, ResultPage};

/// Width of each stride past the first batch.
const STRIDE: usize = 2;

/// Turns raw agent snapshots into result pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batcher {
    batch_size: usize,
}

impl Batcher {
    /// Create a batcher with the given first-batch size.
    ///
    /// `batch_size` should be non-zero: a zero batch makes every finished
    /// snapshot an empty page. [`Config::validate`](crate::config::Config::validate)
    /// enforces this for configured servers.
    #[must_use]
    pub const fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Build the page for a raw snapshot.
    ///
    /// A snapshot without papers yields an empty, unfinished page regardless
    /// of its `finish` flag.
    ///
    /// # Errors
    ///
    /// Returns error if the payload cannot be decoded, any paper lacks a
    /// usable score, or the snapshot has papers but no `finish` flag. No
    /// partial page is produced.
    pub fn batch(&self, raw: &RawResults) -> BatchResult<ResultPage> {
        let Some(payload) = raw.payload() else {
            return Ok(ResultPage::pending());
        };

        let ranked = rank(parse_papers(payload)?)?;
        let finish = raw.finish.ok_or(BatchError::MissingFinish)?;
        Ok(self.paginate(ranked, finish))
    }

    /// Cut an already ranked list into a page.
    #[must_use]
    pub fn paginate(&self, ranked: Vec<PaperRecord>, finish: bool) -> ResultPage {
        let total = ranked.len();
        let indices = self.revealed_indices(total, finish);
        let mut slots: Vec<Option<PaperRecord>> = ranked.into_iter().map(Some).collect();

        let mut papers = BTreeMap::new();
        for index in indices {
            if let Some(record) = slots.get_mut(index).and_then(Option::take) {
                papers.insert(index, record);
            }
        }

        ResultPage { papers, finish, total }
    }

    /// Positions of a ranked list of `total` papers that go into a page.
    #[must_use]
    pub fn revealed_indices(&self, total: usize, finish: bool) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.batch_size.min(total)).collect();

        if total > self.batch_size && !finish {
            for i in (self.batch_size..total).step_by(STRIDE) {
                if i + 1 < total {
                    indices.push(i);
                    indices.push(i + 1);
                } else {
                    indices.push(i);
                }
            }
        }

        indices
    }
}

impl Default for Batcher {
    fn default() -> Self {
        Self::new(api::BATCH_SIZE)
    }
}

/// Decode a papers payload into `(key, record)` pairs in upstream order.
///
/// # Errors
///
/// Returns error if the payload is not a string holding a JSON object whose
/// values are all objects.
pub fn parse_papers(payload: &Value) -> BatchResult<Vec<(String, PaperRecord)>> {
    let Value::String(encoded) = payload else {
        return Err(BatchError::NotEncoded(payload.to_string()));
    };

    let papers: serde_json::Map<String, Value> = serde_json::from_str(encoded)?;

    papers
        .into_iter()
        .map(|(key, value)| match value {
            Value::Object(record) => Ok((key, record)),
            _ => Err(BatchError::NotARecord { key }),
        })
        .collect()
}

/// Numeric score of a paper. Accepts a JSON number or a numeric string,
/// including `inf`, `-inf` and `nan`.
///
/// # Errors
///
/// Returns error if `score` is missing or not numeric.
pub fn score_of(key: &str, record: &PaperRecord) -> BatchResult<f64> {
    let value = record.get("score").ok_or_else(|| BatchError::missing_score(key))?;

    let score = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    score.ok_or_else(|| BatchError::invalid_score(key, value))
}

/// Sort papers by descending score, keeping upstream order among equal scores.
///
/// # Errors
///
/// Returns the first scoring error encountered.
pub fn rank(papers: Vec<(String, PaperRecord)>) -> BatchResult<Vec<PaperRecord>> {
    let mut scored = papers
        .into_iter()
        .map(|(key, record)| Ok((score_of(&key, &record)?, record)))
        .collect::<BatchResult<Vec<_>>>()?;

    // sort_by is stable; total_cmp puts NaN above +inf
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    Ok(scored.into_iter().map(|(_, record)| record).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> PaperRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_revealed_indices_finished() {
        let batcher = Batcher::new(4);
        assert_eq!(batcher.revealed_indices(7, true), vec![0, 1, 2, 3]);
        assert_eq!(batcher.revealed_indices(3, true), vec![0, 1, 2]);
    }

    #[test]
    fn test_revealed_indices_running_odd_tail() {
        let batcher = Batcher::new(4);
        assert_eq!(batcher.revealed_indices(9, false), vec![0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_revealed_indices_exactly_batch() {
        let batcher = Batcher::new(4);
        assert_eq!(batcher.revealed_indices(4, false), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_score_of_accepts_strings_and_numbers() {
        assert_eq!(score_of("a", &record(json!({"score": "0.75"}))).unwrap(), 0.75);
        assert_eq!(score_of("b", &record(json!({"score": 3}))).unwrap(), 3.0);
        assert_eq!(score_of("c", &record(json!({"score": " 1.5 "}))).unwrap(), 1.5);
    }

    #[test]
    fn test_score_of_rejects_garbage() {
        assert!(matches!(
            score_of("a", &record(json!({"title": "x"}))),
            Err(BatchError::MissingScore { .. })
        ));
        assert!(matches!(
            score_of("b", &record(json!({"score": "high"}))),
            Err(BatchError::InvalidScore { .. })
        ));
        assert!(matches!(
            score_of("d", &record(json!({"score": null}))),
            Err(BatchError::InvalidScore { .. })
        ));
    }

    #[test]
    fn test_score_of_accepts_infinities() {
        assert_eq!(score_of("a", &record(json!({"score": "inf"}))).unwrap(), f64::INFINITY);
        assert_eq!(score_of("b", &record(json!({"score": "-inf"}))).unwrap(), f64::NEG_INFINITY);
        assert!(score_of("c", &record(json!({"score": "NaN"}))).unwrap().is_nan());
    }

    #[test]
    fn test_rank_orders_infinities() {
        let papers = vec![
            ("a".to_string(), record(json!({"id": "a", "score": "1"}))),
            ("b".to_string(), record(json!({"id": "b", "score": "-inf"}))),
            ("c".to_string(), record(json!({"id": "c", "score": "inf"}))),
        ];
        let ranked = rank(papers).unwrap();
        let order: Vec<&str> = ranked.iter().map(|r| r["id"].as_str().unwrap()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_parse_papers_keeps_upstream_order() {
        let payload = json!(r#"{"10": {"score": 1}, "2": {"score": 2}, "1": {"score": 3}}"#);
        let keys: Vec<String> =
            parse_papers(&payload).unwrap().into_iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["10", "2", "1"]);
    }

    #[test]
    fn test_parse_papers_rejects_unencoded_payload() {
        let payload = json!({"0": {"score": 1}});
        assert!(matches!(parse_papers(&payload), Err(BatchError::NotEncoded(_))));
    }
}
