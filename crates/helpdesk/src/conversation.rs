//! Per-session conversation state machine.
//!
//! ```text
//! AwaitingQuery --submit_query--> AwaitingFeedback --confirm_resolved--> Resolved
//!       ^   (no results: stays)        |    ^
//!       |                              |    | reject_current (more candidates)
//!       |                              +----+
//!       |                              | reject_current (none left)
//!       +------------ reset -----------+--> Exhausted
//! ```
//!
//! Rejecting walks the already-ranked list; it never re-runs the matcher.
//! Calling a transition from the wrong state is a caller bug and panics.

use serde::{Deserialize, Serialize};

use crate::{
    knowledge::KnowledgeBase,
    matcher::{Candidate, Matcher, SystemFilter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Outcome {
    AwaitingQuery,
    AwaitingFeedback,
    Resolved,
    Exhausted,
}

/// What a transition asks the UI to show next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    NoResults,
    /// Present `candidates[index]`.
    Present { index: usize },
    Resolved,
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct ConversationState {
    system_filter: SystemFilter,
    candidates: Vec<Candidate>,
    cursor: usize,
    outcome: Outcome,
}

impl Default for ConversationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationState {
    pub fn new() -> Self {
        Self {
            system_filter: SystemFilter::Any,
            candidates: Vec::new(),
            cursor: 0,
            outcome: Outcome::AwaitingQuery,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn system_filter(&self) -> &SystemFilter {
        &self.system_filter
    }

    /// The candidate awaiting feedback, if any.
    pub fn current(&self) -> Option<&Candidate> {
        match self.outcome {
            Outcome::AwaitingFeedback => self.candidates.get(self.cursor),
            _ => None,
        }
    }

    pub fn is_awaiting_feedback(&self) -> bool {
        self.outcome == Outcome::AwaitingFeedback
    }

    /// Ranks `query` and, on any match, starts presenting the first candidate.
    pub fn submit_query(
        &mut self,
        query: &str,
        system_filter: SystemFilter,
        matcher: &Matcher,
        knowledge_base: &KnowledgeBase,
    ) -> Transition {
        assert_eq!(
            self.outcome,
            Outcome::AwaitingQuery,
            "submit_query called while {:?}",
            self.outcome
        );

        let candidates = matcher.rank(query, &system_filter, knowledge_base.entries());
        self.system_filter = system_filter;

        if candidates.is_empty() {
            self.candidates.clear();
            self.cursor = 0;
            return Transition::NoResults;
        }

        self.candidates = candidates;
        self.cursor = 0;
        self.outcome = Outcome::AwaitingFeedback;
        Transition::Present { index: 0 }
    }

    pub fn confirm_resolved(&mut self) -> Transition {
        assert_eq!(
            self.outcome,
            Outcome::AwaitingFeedback,
            "confirm_resolved called while {:?}",
            self.outcome
        );
        self.outcome = Outcome::Resolved;
        Transition::Resolved
    }

    pub fn reject_current(&mut self) -> Transition {
        assert_eq!(
            self.outcome,
            Outcome::AwaitingFeedback,
            "reject_current called while {:?}",
            self.outcome
        );

        self.cursor += 1;
        if self.cursor < self.candidates.len() {
            Transition::Present { index: self.cursor }
        } else {
            self.outcome = Outcome::Exhausted;
            Transition::Exhausted
        }
    }

    /// Back to `AwaitingQuery`; the system selection is kept.
    pub fn reset(&mut self) {
        self.candidates.clear();
        self.cursor = 0;
        self.outcome = Outcome::AwaitingQuery;
    }

    /// Changes the system selection. Returns `true` (after resetting) when it changed.
    pub fn select_system(&mut self, system_filter: SystemFilter) -> bool {
        if self.system_filter == system_filter {
            return false;
        }
        self.system_filter = system_filter;
        self.reset();
        true
    }
}
