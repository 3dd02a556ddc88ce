//! Sliding-window tracker of empty-result searches.
//!
//! Every recorded request advances a logical clock by one tick; requests
//! older than the window fall off the front of the queue. The tracker is
//! plain per-instance state — two trackers over one engine count
//! independently.

use crate::config;
use crate::document::{DocumentId, DocumentStatus, ScoredDocument};
use crate::engine::SearchEngine;
use crate::error::SearchError;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy)]
struct Request {
    time: u64,
    results: usize,
}

/// Counts searches that returned no results within the last
/// [`REQUEST_WINDOW_TICKS`](crate::config::REQUEST_WINDOW_TICKS) requests.
#[derive(Debug)]
pub struct RequestTracker {
    requests: VecDeque<Request>,
    window: u64,
    current_time: u64,
    no_result_requests: usize,
}

impl Default for RequestTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestTracker {
    /// Creates a tracker with the default window.
    pub fn new() -> Self {
        Self::with_window(config::REQUEST_WINDOW_TICKS)
    }

    /// Creates a tracker with a custom window length in ticks.
    pub fn with_window(window: u64) -> Self {
        Self {
            requests: VecDeque::new(),
            window,
            current_time: 0,
            no_result_requests: 0,
        }
    }

    /// Runs the default-filtered search on `engine` and records the outcome.
    ///
    /// A query that fails to parse propagates its error without touching the
    /// window.
    pub fn add_find_request(
        &mut self,
        engine: &SearchEngine,
        raw_query: &str,
    ) -> Result<Vec<ScoredDocument>, SearchError> {
        let results = engine.find_top_documents(raw_query)?;
        self.record(results.len());
        Ok(results)
    }

    /// Status-filtered variant of [`add_find_request`](Self::add_find_request).
    pub fn add_find_request_with_status(
        &mut self,
        engine: &SearchEngine,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<ScoredDocument>, SearchError> {
        let results = engine.find_top_documents_with_status(raw_query, status)?;
        self.record(results.len());
        Ok(results)
    }

    /// Predicate-filtered variant of [`add_find_request`](Self::add_find_request).
    pub fn add_find_request_with<F>(
        &mut self,
        engine: &SearchEngine,
        raw_query: &str,
        filter: F,
    ) -> Result<Vec<ScoredDocument>, SearchError>
    where
        F: Fn(DocumentId, DocumentStatus, i32) -> bool,
    {
        let results = engine.find_top_documents_with(raw_query, filter)?;
        self.record(results.len());
        Ok(results)
    }

    /// Number of empty-result requests inside the window.
    pub fn no_result_requests(&self) -> usize {
        self.no_result_requests
    }

    fn record(&mut self, results: usize) {
        self.current_time += 1;
        while let Some(front) = self.requests.front() {
            if self.current_time - front.time < self.window {
                break;
            }
            if front.results == 0 {
                self.no_result_requests -= 1;
            }
            self.requests.pop_front();
        }
        self.requests.push_back(Request {
            time: self.current_time,
            results,
        });
        if results == 0 {
            self.no_result_requests += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_engine() -> SearchEngine {
        let mut engine = SearchEngine::new();
        engine
            .add_document(1, "curly hair curly dog", DocumentStatus::Actual, &[1])
            .unwrap();
        engine
            .add_document(2, "sparrow in a cage", DocumentStatus::Banned, &[2])
            .unwrap();
        engine
    }

    #[test]
    fn test_small_window_slides() {
        let engine = build_engine();
        let mut tracker = RequestTracker::with_window(3);

        tracker.add_find_request(&engine, "nothing here").unwrap();
        tracker.add_find_request(&engine, "missing too").unwrap();
        assert_eq!(tracker.no_result_requests(), 2);

        tracker.add_find_request(&engine, "curly dog").unwrap();
        assert_eq!(tracker.no_result_requests(), 2);

        // Tick 4 evicts the empty request from tick 1.
        tracker.add_find_request(&engine, "curly dog").unwrap();
        assert_eq!(tracker.no_result_requests(), 1);

        // Tick 5 evicts the empty request from tick 2.
        tracker.add_find_request(&engine, "still nothing").unwrap();
        assert_eq!(tracker.no_result_requests(), 1);
    }

    #[test]
    fn test_status_and_predicate_requests_recorded() {
        let engine = build_engine();
        let mut tracker = RequestTracker::with_window(3);

        let banned = tracker
            .add_find_request_with_status(&engine, "sparrow", DocumentStatus::Banned)
            .unwrap();
        assert_eq!(banned.len(), 1);
        let none = tracker
            .add_find_request_with(&engine, "sparrow", |_, _, rating| rating > 100)
            .unwrap();
        assert!(none.is_empty());
        assert_eq!(tracker.no_result_requests(), 1);
    }

    #[test]
    fn test_failed_query_not_recorded() {
        let engine = build_engine();
        let mut tracker = RequestTracker::with_window(3);
        assert!(tracker.add_find_request(&engine, "--bad").is_err());
        assert_eq!(tracker.no_result_requests(), 0);
        tracker.add_find_request(&engine, "absent").unwrap();
        assert_eq!(tracker.no_result_requests(), 1);
    }
}
