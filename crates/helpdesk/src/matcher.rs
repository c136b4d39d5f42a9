//! Ranking of knowledge-base entries against a free-text problem description.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    fuzz,
    knowledge::{Entry, KnowledgeBase},
};

/// Number of candidates carried forward per query.
pub const DEFAULT_TOP_K: usize = 3;

/// Entries must score strictly above this to be kept.
pub const DEFAULT_THRESHOLD: u8 = 50;

/// Longest accepted query, in characters. Scoring cost grows with query length.
pub const DEFAULT_MAX_QUERY_CHARS: usize = 500;

pub const BEST_MATCH_SCORE: u8 = 80;
pub const GOOD_MATCH_SCORE: u8 = 60;

/// Label offered by the UI for "search every system".
pub const NOT_SURE_LABEL: &str = "I'm not sure";

/// Which systems a query searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum SystemFilter {
    #[default]
    Any,
    Only(String),
}

impl SystemFilter {
    /// Parses a UI selection. Blank input and the "not sure" family map to [`SystemFilter::Any`].
    pub fn parse(label: &str) -> Self {
        let trimmed = label.trim();
        let folded = trimmed.to_lowercase().replace('\u{2019}', "'");
        match folded.as_str() {
            "" | "i'm not sure" | "not sure" | "unsure" | "any" | "all" => SystemFilter::Any,
            _ => SystemFilter::Only(trimmed.to_string()),
        }
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            SystemFilter::Any => true,
            SystemFilter::Only(label) => entry
                .system
                .as_deref()
                .is_some_and(|system| system.eq_ignore_ascii_case(label)),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            SystemFilter::Any => None,
            SystemFilter::Only(label) => Some(label),
        }
    }
}

impl From<Option<String>> for SystemFilter {
    fn from(value: Option<String>) -> Self {
        value.as_deref().map(SystemFilter::parse).unwrap_or_default()
    }
}

impl From<SystemFilter> for Option<String> {
    fn from(value: SystemFilter) -> Self {
        match value {
            SystemFilter::Any => None,
            SystemFilter::Only(label) => Some(label),
        }
    }
}

/// A scored reference to a knowledge-base entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub score: u8,
    pub entry: Arc<Entry>,
}

impl Candidate {
    pub fn quality(&self) -> MatchQuality {
        MatchQuality::from_score(self.score)
    }
}

/// Display-only banding of a candidate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchQuality {
    Best,
    Good,
    Possible,
}

impl MatchQuality {
    pub fn from_score(score: u8) -> Self {
        if score >= BEST_MATCH_SCORE {
            MatchQuality::Best
        } else if score >= GOOD_MATCH_SCORE {
            MatchQuality::Good
        } else {
            MatchQuality::Possible
        }
    }

    /// Key into the UI string catalog.
    pub fn label_key(&self) -> &'static str {
        match self {
            MatchQuality::Best => "best_match",
            MatchQuality::Good => "good_match",
            MatchQuality::Possible => "possible_match",
        }
    }
}

/// Per-deployment matching constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub top_k: usize,
    pub threshold: u8,
    pub max_query_chars: usize,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            threshold: DEFAULT_THRESHOLD,
            max_query_chars: DEFAULT_MAX_QUERY_CHARS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Matcher {
    settings: MatchSettings,
}

impl Matcher {
    pub fn new(settings: MatchSettings) -> Self {
        Self { settings }
    }

    pub fn max_query_chars(&self) -> usize {
        self.settings.max_query_chars
    }

    /// Ranks `entries` against `query`.
    ///
    /// Each entry scores the best of its `problem` and `first_step` similarity.
    /// Output is descending by score, ties kept in knowledge-base order, and
    /// capped at `top_k`. An empty result means "no matches".
    pub fn rank(&self, query: &str, filter: &SystemFilter, entries: &[Arc<Entry>]) -> Vec<Candidate> {
        let query = fuzz::normalize(query);
        if query.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate> = entries
            .iter()
            .filter(|entry| entry.is_matchable() && filter.matches(entry))
            .filter_map(|entry| {
                let problem = fuzz::partial_ratio_chars(&query, &fuzz::normalize(&entry.problem));
                let first_step =
                    fuzz::partial_ratio_chars(&query, &fuzz::normalize(&entry.first_step));
                let score = problem.max(first_step);
                (score > self.settings.threshold).then(|| Candidate {
                    score,
                    entry: Arc::clone(entry),
                })
            })
            .collect();

        // sort_by is stable: equal scores keep knowledge-base order
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(self.settings.top_k);

        tracing::debug!(
            "Ranked {} candidate(s) for filter {:?}: {:?}",
            candidates.len(),
            filter.label(),
            candidates.iter().map(|c| c.score).collect::<Vec<_>>()
        );

        candidates
    }
}

/// Ranks with the default settings.
pub fn rank(query: &str, filter: &SystemFilter, knowledge_base: &KnowledgeBase) -> Vec<Candidate> {
    Matcher::default().rank(query, filter, knowledge_base.entries())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(problem: &str, first_step: &str) -> Entry {
        Entry::new(Some("POS"), problem, first_step, "call x123")
    }

    #[test]
    fn exact_problem_is_best_match() {
        let kb = KnowledgeBase::new(vec![pos("printer offline", "check cable")]);

        let ranked = rank("printer offline", &SystemFilter::parse("POS"), &kb);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 100);
        assert_eq!(ranked[0].quality(), MatchQuality::Best);
    }

    #[test]
    fn unrelated_query_returns_nothing() {
        let kb = KnowledgeBase::new(vec![pos("printer offline", "check cable")]);
        assert!(rank("screen frozen", &SystemFilter::parse("POS"), &kb).is_empty());
    }

    #[test]
    fn blank_query_matches_nothing() {
        let kb = KnowledgeBase::new(vec![pos("printer offline", "check cable")]);
        assert!(rank("   ", &SystemFilter::Any, &kb).is_empty());
    }

    #[test]
    fn empty_knowledge_base_returns_nothing() {
        assert!(rank("printer", &SystemFilter::Any, &KnowledgeBase::default()).is_empty());
    }

    #[test]
    fn first_step_text_can_carry_the_match() {
        let kb = KnowledgeBase::new(vec![pos("receipts missing", "reseat the card reader cable")]);
        let ranked = rank("card reader", &SystemFilter::Any, &kb);
        assert_eq!(ranked[0].score, 100);
    }

    #[test]
    fn filter_excludes_other_systems_and_unknown() {
        let kb = KnowledgeBase::new(vec![
            Entry::new(Some("KDS"), "printer offline", "", ""),
            Entry::new(None, "printer offline", "", ""),
            Entry::new(Some("pos"), "printer offline", "", ""),
        ]);

        let ranked = rank("printer offline", &SystemFilter::parse("POS"), &kb);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].entry.system.as_deref(), Some("pos"));

        let all = rank("printer offline", &SystemFilter::parse(NOT_SURE_LABEL), &kb);
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn empty_problem_entries_are_skipped() {
        let kb = KnowledgeBase::new(vec![pos("", "printer offline")]);
        assert!(rank("printer offline", &SystemFilter::Any, &kb).is_empty());
    }

    #[test]
    fn threshold_is_exclusive() {
        let kb = KnowledgeBase::new(vec![pos("printer battery low", "charge the battery")]);

        let at_threshold = Matcher::new(MatchSettings {
            top_k: 3,
            threshold: 70,
            ..MatchSettings::default()
        });
        assert!(at_threshold
            .rank("printer offline", &SystemFilter::Any, kb.entries())
            .is_empty());

        let below = Matcher::new(MatchSettings {
            top_k: 3,
            threshold: 69,
            ..MatchSettings::default()
        });
        assert_eq!(
            below.rank("printer offline", &SystemFilter::Any, kb.entries())[0].score,
            70
        );
    }

    #[test]
    fn ranking_is_sorted_truncated_and_stable() {
        let kb = KnowledgeBase::new(vec![
            pos("printer battery low", "charge the battery"),
            pos("printer offline", "check cable"),
            pos("printer password locked", "reseat the receipt paper"),
            pos("printer offline again", "check cable"),
            pos("screen frozen", "restart"),
        ]);
        let matcher = Matcher::new(MatchSettings {
            top_k: 3,
            threshold: DEFAULT_THRESHOLD,
            ..MatchSettings::default()
        });

        let first = matcher.rank("printer offline", &SystemFilter::Any, kb.entries());
        let problems: Vec<&str> = first.iter().map(|c| c.entry.problem.as_str()).collect();
        assert_eq!(
            problems,
            vec!["printer offline", "printer offline again", "printer battery low"]
        );

        for _ in 0..5 {
            assert_eq!(
                matcher.rank("printer offline", &SystemFilter::Any, kb.entries()),
                first
            );
        }
    }

    #[test]
    fn top_k_bounds_output() {
        let entries = (0..10)
            .map(|i| pos(&format!("printer offline {i}"), ""))
            .collect();
        let kb = KnowledgeBase::new(entries);

        for k in 1..=5 {
            let matcher = Matcher::new(MatchSettings {
                top_k: k,
                threshold: DEFAULT_THRESHOLD,
                ..MatchSettings::default()
            });
            assert!(matcher.rank("printer", &SystemFilter::Any, kb.entries()).len() <= k);
        }
    }

    #[test]
    fn quality_bands() {
        assert_eq!(MatchQuality::from_score(100), MatchQuality::Best);
        assert_eq!(MatchQuality::from_score(80), MatchQuality::Best);
        assert_eq!(MatchQuality::from_score(79), MatchQuality::Good);
        assert_eq!(MatchQuality::from_score(60), MatchQuality::Good);
        assert_eq!(MatchQuality::from_score(59), MatchQuality::Possible);
        assert_eq!(MatchQuality::from_score(51), MatchQuality::Possible);
    }

    #[test]
    fn system_filter_parsing() {
        assert_eq!(SystemFilter::parse(""), SystemFilter::Any);
        assert_eq!(SystemFilter::parse("I’m not sure"), SystemFilter::Any);
        assert_eq!(SystemFilter::parse("I'm Not Sure"), SystemFilter::Any);
        assert_eq!(
            SystemFilter::parse(" Kiosk Software "),
            SystemFilter::Only("Kiosk Software".to_string())
        );

        let json = serde_json::to_string(&SystemFilter::Only("KDS".into())).unwrap();
        assert_eq!(json, "\"KDS\"");
        let any: SystemFilter = serde_json::from_str("null").unwrap();
        assert_eq!(any, SystemFilter::Any);
    }
}
