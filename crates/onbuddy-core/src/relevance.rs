//! Keyword-overlap relevance scoring over knowledge entries.
//!
//! Given a free-text question and the knowledge entries scoped to one
//! profile, [`select_relevant`] ranks the entries most likely to answer it.
//! Scoring is a single pass: count how many question tokens appear as
//! substrings of the entry's `"title details"` haystack.

use crate::org::KnowledgeEntry;

/// What to return when no candidate scores above zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
  /// Return nothing; the caller substitutes a fallback reply.
  Strict,
  /// Return the first `limit` candidates in their original order as
  /// generic context.
  Fallback,
}

/// Lowercase `question`, replace everything that is not an ASCII letter,
/// digit, or whitespace with a space, and split on whitespace.
///
/// Duplicates are retained: scoring is over the token multiset, so a
/// question that repeats a word scores that word once per occurrence.
fn tokenize(question: &str) -> Vec<String> {
  question
    .to_lowercase()
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() || c.is_whitespace() { c } else { ' ' })
    .collect::<String>()
    .split_whitespace()
    .map(str::to_owned)
    .collect()
}

fn haystack(entry: &KnowledgeEntry) -> String {
  format!("{} {}", entry.title, entry.details).to_lowercase()
}

/// Number of question tokens found anywhere in the entry's haystack.
pub fn score_entry(question: &str, entry: &KnowledgeEntry) -> usize {
  let hay = haystack(entry);
  tokenize(question)
    .iter()
    .filter(|token| hay.contains(token.as_str()))
    .count()
}

/// Rank `candidates` against `question` and return at most `limit` entries.
///
/// Candidates are sorted by descending score; the sort is stable, so ties
/// keep their input order. When the top score is zero the `mode` governs
/// the result (see [`SelectionMode`]). Pure function over its inputs.
pub fn select_relevant(
  question:   &str,
  candidates: &[KnowledgeEntry],
  limit:      usize,
  mode:       SelectionMode,
) -> Vec<KnowledgeEntry> {
  let tokens = tokenize(question);

  let mut scored: Vec<(usize, &KnowledgeEntry)> = candidates
    .iter()
    .map(|entry| {
      let hay = haystack(entry);
      let score = tokens.iter().filter(|token| hay.contains(token.as_str())).count();
      (score, entry)
    })
    .collect();

  scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));

  if scored.first().is_none_or(|(top, _)| *top == 0) {
    return match mode {
      SelectionMode::Strict   => Vec::new(),
      SelectionMode::Fallback => candidates.iter().take(limit).cloned().collect(),
    };
  }

  scored
    .into_iter()
    .take(limit)
    .map(|(_, entry)| entry.clone())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn entry(id: &str, title: &str, details: &str) -> KnowledgeEntry {
    KnowledgeEntry {
      id:         id.to_owned(),
      profile_id: "profile-it-analyst".to_owned(),
      title:      title.to_owned(),
      details:    details.to_owned(),
    }
  }

  fn it_entries() -> Vec<KnowledgeEntry> {
    vec![
      entry(
        "kb-it-1",
        "Laptop provisioning",
        "Ship MacBook Air 16GB/512GB within 48h. Preload VPN, password manager, Slack, and MDM profiles.",
      ),
      entry(
        "kb-it-2",
        "Escalation rules",
        "For blockers over 24h, page the department head and log the incident.",
      ),
    ]
  }

  #[test]
  fn laptop_question_selects_laptop_entry() {
    let selected = select_relevant("laptop provisioning", &it_entries(), 1, SelectionMode::Strict);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, "kb-it-1");
    assert!(score_entry("laptop provisioning", &selected[0]) >= 2);
  }

  #[test]
  fn result_size_is_min_of_limit_and_candidates() {
    let entries = it_entries();
    let selected = select_relevant("laptop", &entries, 6, SelectionMode::Strict);
    assert_eq!(selected.len(), 2);

    let selected = select_relevant("laptop", &entries, 1, SelectionMode::Strict);
    assert_eq!(selected.len(), 1);
  }

  #[test]
  fn scores_are_non_increasing_across_the_result() {
    let entries = it_entries();
    let question = "how do I escalate a laptop issue";
    let selected = select_relevant(question, &entries, 6, SelectionMode::Strict);
    let scores: Vec<usize> = selected.iter().map(|e| score_entry(question, e)).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "scores: {scores:?}");
  }

  #[test]
  fn ties_preserve_input_order() {
    let entries = vec![
      entry("kb-a", "Badge access", "Request a badge from reception."),
      entry("kb-b", "Badge returns", "Return the badge on your last day."),
    ];
    let selected = select_relevant("badge", &entries, 2, SelectionMode::Strict);
    assert_eq!(selected[0].id, "kb-a");
    assert_eq!(selected[1].id, "kb-b");
  }

  #[test]
  fn repeated_question_word_counts_per_occurrence() {
    let candidate = entry("kb-vpn", "VPN setup", "Install the VPN client first.");
    assert_eq!(score_entry("vpn vpn vpn", &candidate), 3);
    assert_eq!(score_entry("vpn", &candidate), 1);
  }

  #[test]
  fn punctuation_and_case_are_normalised() {
    let candidate = entry("kb-vpn", "VPN setup", "Install the VPN client first.");
    assert_eq!(score_entry("V.P?N!", &candidate), 3); // "v", "p", "n" all match
    assert_eq!(score_entry("VPN, client.", &candidate), 2);
  }

  #[test]
  fn strict_mode_returns_empty_on_zero_scores() {
    let selected = select_relevant("zzzqqq", &it_entries(), 6, SelectionMode::Strict);
    assert!(selected.is_empty());
  }

  #[test]
  fn fallback_mode_returns_leading_candidates_on_zero_scores() {
    let entries = it_entries();
    let selected = select_relevant("zzzqqq", &entries, 1, SelectionMode::Fallback);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, entries[0].id);
  }

  #[test]
  fn empty_candidates_yield_empty_result_in_both_modes() {
    assert!(select_relevant("laptop", &[], 6, SelectionMode::Strict).is_empty());
    assert!(select_relevant("laptop", &[], 6, SelectionMode::Fallback).is_empty());
  }

  #[test]
  fn empty_question_is_governed_by_mode() {
    let entries = it_entries();
    assert!(select_relevant("", &entries, 6, SelectionMode::Strict).is_empty());
    let fallback = select_relevant("", &entries, 6, SelectionMode::Fallback);
    assert_eq!(fallback.len(), 2);
    assert_eq!(fallback[0].id, entries[0].id);
  }
}
