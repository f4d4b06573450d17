//! Poll extraction.

use serde::Serialize;

use super::first_line;
use crate::translation::{Language, Phrase, TranslationTable};

/// One poll option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollOption {
    /// Option text as exported, vote count included (`Red (3 votes)`)
    pub label: String,
    /// Votes parsed from the label, 0 when missing or malformed
    pub votes: u64,
    /// Share of all votes, 0-100. Zero for every option when nobody voted.
    pub vote_percentage: f64,
}

/// A poll found in a message body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollInfo {
    /// Question line following the poll marker
    pub title: String,
    /// Options in export order
    pub options: Vec<PollOption>,
}

impl PollInfo {
    /// Returns the sum of all votes, saturating at `u64::MAX`.
    pub fn total_votes(&self) -> u64 {
        sum_votes(self.options.iter().map(|o| o.votes))
    }
}

/// Returns `true` if `body` starts with the poll marker and has at least one option.
pub fn is_poll(body: &str, language: Language, table: &TranslationTable) -> bool {
    body.starts_with(table.get(Phrase::Poll, language))
        && body.contains(table.get(Phrase::PollOption, language))
}

/// Extracts title, options and vote shares.
///
/// The title is the line after the marker line. Options are the segments
/// following each option marker; a segment's vote count is the number
/// between its last `(` and the vote unit, 0 when missing or malformed.
pub fn parse_poll(body: &str, language: Language, table: &TranslationTable) -> PollInfo {
    let option_marker = table.get(Phrase::PollOption, language);
    let vote_marker = table.get(Phrase::Vote, language);

    let title = body.split_once('\n').map_or("", |(_, rest)| first_line(rest));

    let counted: Vec<(&str, u64)> = body
        .split(option_marker)
        .skip(1)
        .map(|segment| (segment, vote_count(segment, vote_marker)))
        .collect();

    let total = sum_votes(counted.iter().map(|(_, votes)| *votes));

    let options = counted
        .into_iter()
        .map(|(label, votes)| PollOption {
            label: label.to_string(),
            votes,
            vote_percentage: percentage(votes, total),
        })
        .collect();

    PollInfo {
        title: title.to_string(),
        options,
    }
}

// Counts come from untrusted text
fn sum_votes(votes: impl Iterator<Item = u64>) -> u64 {
    votes.fold(0, u64::saturating_add)
}

fn vote_count(segment: &str, vote_marker: &str) -> u64 {
    let Some(end) = segment.rfind(vote_marker) else {
        return 0;
    };
    let head = &segment[..end];
    let start = head.rfind('(').map_or(0, |idx| idx + 1);
    head[start..].trim().parse().unwrap_or(0)
}

fn percentage(votes: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    votes as f64 * 100.0 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str, lang: Language) -> PollInfo {
        parse_poll(body, lang, TranslationTable::builtin())
    }

    #[test]
    fn test_reference_poll() {
        let poll = parse(
            " POLL:\nColor?\nOPTION: Red (3 votes)\nOPTION: Blue (1 vote)",
            Language::En,
        );

        assert_eq!(poll.title, "Color?");
        assert_eq!(poll.options.len(), 2);
        assert_eq!(poll.options[0].label, "Red (3 votes)");
        assert_eq!(poll.options[0].votes, 3);
        assert_eq!(poll.options[0].vote_percentage, 75.0);
        assert_eq!(poll.options[1].label, "Blue (1 vote)");
        assert_eq!(poll.options[1].vote_percentage, 25.0);
        assert_eq!(poll.total_votes(), 4);
    }

    #[test]
    fn test_parenthesis_inside_label() {
        let poll = parse(
            " POLL:\nWhen?\nOPTION: Sat (morning) (2 votes)\nOPTION: Sun (2 votes)",
            Language::En,
        );
        assert_eq!(poll.options[0].votes, 2);
        assert_eq!(poll.options[0].vote_percentage, 50.0);
    }

    #[test]
    fn test_zero_votes() {
        let poll = parse(
            " POLL:\nAnyone?\nOPTION: Yes (0 votes)\nOPTION: No (0 votes)",
            Language::En,
        );
        assert_eq!(poll.total_votes(), 0);
        assert!(poll.options.iter().all(|o| o.vote_percentage == 0.0));
    }

    #[test]
    fn test_malformed_count_is_zero() {
        let poll = parse(
            " POLL:\nQ\nOPTION: A (many votes)\nOPTION: B\nOPTION: C (5 votes)",
            Language::En,
        );
        let votes: Vec<_> = poll.options.iter().map(|o| o.votes).collect();
        assert_eq!(votes, vec![0, 0, 5]);
        assert_eq!(poll.options[2].vote_percentage, 100.0);
    }

    #[test]
    fn test_italian_poll() {
        let poll = parse(
            " SONDAGGIO:\nPizza?\nOPZIONE: Sì (2 voti)\nOPZIONE: No (1 voto)\nOPZIONE: Forse (1 voto)",
            Language::It,
        );
        assert_eq!(poll.title, "Pizza?");
        assert_eq!(poll.options.len(), 3);
        assert_eq!(poll.options[0].vote_percentage, 50.0);
    }

    #[test]
    fn test_german_poll() {
        let poll = parse(
            " UMFRAGE:\nWann?\nOPTION: Heute (1 Stimme)\nOPTION: Morgen (3 Stimmen)",
            Language::De,
        );
        assert_eq!(poll.options[1].votes, 3);
        assert_eq!(poll.options[1].vote_percentage, 75.0);
    }

    #[test]
    fn test_title_without_question_line() {
        let poll = parse(" POLL:\nOPTION: A (1 vote)", Language::En);
        // The option line doubles as the title line here
        assert_eq!(poll.options.len(), 1);
        assert_eq!(poll.title, "OPTION: A (1 vote)");
    }

    #[test]
    fn test_vote_total_saturates() {
        let poll = parse(
            " POLL:\nQ\nOPTION: A (18446744073709551615 votes)\nOPTION: B (1 vote)",
            Language::En,
        );
        assert_eq!(poll.options[0].votes, u64::MAX);
        assert_eq!(poll.total_votes(), u64::MAX);
        assert_eq!(poll.options[0].vote_percentage, 100.0);
        assert!(poll.options[1].vote_percentage < 1e-9);
    }
}
