//! Play-by-play transcripts and quarter filtering.
//!
//! A transcript is newline-delimited text where each line conventionally starts
//! with a period label (`Q1`..`Q4`) and a single space:
//!
//! ```text
//! Q1 10:42 Smith makes 3-pt jump shot from 25 ft
//! Q1 10:15 Jones defensive rebound
//! Q2 11:48 Lee misses layup
//! ```
//!
//! [`filter_by_period`] extracts the lines of one quarter. [`load_transcript`]
//! and [`read_transcript_from`] read the raw text; [`preview`] renders the first
//! lines for a quick sanity check.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

use crate::error::Result;

/// Label of the reserved "whole transcript" selector.
pub const FULL_GAME_LABEL: &str = "Full Game";

/// Error type for transcript operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TranscriptError {
    /// The selector is neither a quarter label nor the full-game sentinel.
    #[error("unknown quarter selector '{0}' (expected Q1, Q2, Q3, Q4 or {FULL_GAME_LABEL})")]
    UnknownSelector(String),

    /// Filtering left no lines for the selector.
    #[error("No play\u{2010}by\u{2010}play lines found for {0}.")]
    NoLines(Selector),
}

/// One of the four scoring periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Period {
    /// First quarter.
    Q1,
    /// Second quarter.
    Q2,
    /// Third quarter.
    Q3,
    /// Fourth quarter.
    Q4,
}

impl Period {
    /// All periods in game order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// The line label for this period.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Q1 => "Q1",
            Self::Q2 => "Q2",
            Self::Q3 => "Q3",
            Self::Q4 => "Q4",
        }
    }

    /// The period that follows this one, if any.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Q1 => Some(Self::Q2),
            Self::Q2 => Some(Self::Q3),
            Self::Q3 => Some(Self::Q4),
            Self::Q4 => None,
        }
    }

    /// Whether `line` is labeled with this period.
    ///
    /// The label must be followed by exactly one space, so `Q10 ...` is not a
    /// `Q1` line.
    #[must_use]
    pub fn labels(self, line: &str) -> bool {
        line.strip_prefix(self.label())
            .is_some_and(|rest| rest.starts_with(' '))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which part of the transcript to analyze.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Selector {
    /// The whole transcript, unfiltered.
    #[default]
    FullGame,
    /// A single quarter.
    Period(Period),
}

impl Selector {
    /// The label callers use for this selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullGame => FULL_GAME_LABEL,
            Self::Period(period) => period.label(),
        }
    }
}

impl From<Period> for Selector {
    fn from(period: Period) -> Self {
        Self::Period(period)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Selector {
    type Err = TranscriptError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(FULL_GAME_LABEL) {
            return Ok(Self::FullGame);
        }
        Period::ALL
            .into_iter()
            .find(|period| trimmed.eq_ignore_ascii_case(period.label()))
            .map(Self::Period)
            .ok_or_else(|| TranscriptError::UnknownSelector(s.to_owned()))
    }
}

impl Serialize for Selector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Selector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Keep only the lines of the selected quarter.
///
/// [`Selector::FullGame`] returns `text` unchanged. For a quarter, lines
/// starting with its label and a space are collected in order, and scanning
/// stops at the first line labeled with the following quarter. Q4 has no
/// successor and scans to the end of input.
///
/// Quarters are assumed to appear in game order. A transcript that returns
/// to an earlier quarter after a later one has begun is truncated at the
/// first later-quarter line.
///
/// An empty result means the quarter has no lines.
#[must_use]
pub fn filter_by_period(text: &str, selector: Selector) -> String {
    let period = match selector {
        Selector::FullGame => return text.to_owned(),
        Selector::Period(period) => period,
    };
    let stop_at = period.successor();

    let mut kept = Vec::new();
    for line in text.lines() {
        if period.labels(line) {
            kept.push(line);
        } else if stop_at.is_some_and(|next| next.labels(line)) {
            break;
        }
    }

    kept.join("\n")
}

/// Like [`filter_by_period`], but a blank result is an error.
///
/// # Errors
///
/// Returns [`TranscriptError::NoLines`] when the selector has no lines.
pub fn select_period(
    text: &str,
    selector: Selector,
) -> std::result::Result<String, TranscriptError> {
    let filtered = filter_by_period(text, selector);
    if filtered.trim().is_empty() {
        return Err(TranscriptError::NoLines(selector));
    }
    Ok(filtered)
}

/// Read a UTF-8 transcript file.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or is not valid UTF-8.
pub async fn load_transcript(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path).await?;
    debug!(path = %path.display(), bytes = text.len(), "loaded transcript");
    Ok(text)
}

/// Read a whole transcript from an async reader such as stdin.
///
/// # Errors
///
/// Returns an I/O error if reading fails or the input is not valid UTF-8.
pub async fn read_transcript_from<R>(mut reader: R) -> Result<String>
where
    R: AsyncRead + Unpin,
{
    let mut text = String::new();
    reader.read_to_string(&mut text).await?;
    debug!(bytes = text.len(), "read transcript from stream");
    Ok(text)
}

/// The first `count` lines, numbered from 1 and right-aligned to two columns.
#[must_use]
pub fn preview(text: &str, count: usize) -> Vec<String> {
    text.lines()
        .take(count)
        .enumerate()
        .map(|(i, line)| format!("{:2}: {line}", i + 1))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    const GAME: &str = "Q1 12:00 Tip-off won by Adams\n\
                        Q1 10:42 Smith makes 3-pt shot\n\
                        Q2 11:30 Jones misses jumper\n\
                        Q2 09:02 Lee makes 3-pt shot\n\
                        Q3 08:15 Brown steals\n\
                        Q4 02:11 Smith makes 3-pt shot\n\
                        Q4 00:04 Final buzzer\n\
                        END of game";

    mod selector {
        use super::*;

        #[test]
        fn parses_all_labels() {
            assert_eq!("Full Game".parse::<Selector>().unwrap(), Selector::FullGame);
            assert_eq!("Q1".parse::<Selector>().unwrap(), Selector::Period(Period::Q1));
            assert_eq!("Q2".parse::<Selector>().unwrap(), Selector::Period(Period::Q2));
            assert_eq!("Q3".parse::<Selector>().unwrap(), Selector::Period(Period::Q3));
            assert_eq!("Q4".parse::<Selector>().unwrap(), Selector::Period(Period::Q4));
        }

        #[test]
        fn parsing_ignores_case_and_padding() {
            assert_eq!(" q3 ".parse::<Selector>().unwrap(), Selector::Period(Period::Q3));
            assert_eq!("full game".parse::<Selector>().unwrap(), Selector::FullGame);
        }

        #[test]
        fn rejects_unknown_labels() {
            for raw in ["Q5", "OT", "", "Q10", "Quarter 1"] {
                let err = raw.parse::<Selector>().unwrap_err();
                assert_eq!(err, TranscriptError::UnknownSelector(raw.to_owned()));
            }
        }

        #[test]
        fn display_round_trips_through_label() {
            for selector in [
                Selector::FullGame,
                Period::Q1.into(),
                Period::Q2.into(),
                Period::Q3.into(),
                Period::Q4.into(),
            ] {
                assert_eq!(selector.to_string().parse::<Selector>().unwrap(), selector);
            }
        }

        #[test]
        fn serde_uses_labels() {
            let json = serde_json::to_string(&Selector::Period(Period::Q2)).unwrap();
            assert_eq!(json, "\"Q2\"");
            let back: Selector = serde_json::from_str("\"Full Game\"").unwrap();
            assert_eq!(back, Selector::FullGame);
            assert!(serde_json::from_str::<Selector>("\"Q9\"").is_err());
        }

        #[test]
        fn default_is_full_game() {
            assert_eq!(Selector::default(), Selector::FullGame);
        }

        #[test]
        fn successors_chain_to_none() {
            assert_eq!(Period::Q1.successor(), Some(Period::Q2));
            assert_eq!(Period::Q2.successor(), Some(Period::Q3));
            assert_eq!(Period::Q3.successor(), Some(Period::Q4));
            assert_eq!(Period::Q4.successor(), None);
        }
    }

    mod filter {
        use super::*;

        #[test]
        fn full_game_is_identity() {
            for text in [GAME, "", "\n\n", "no labels at all\r\nsecond line"] {
                assert_eq!(filter_by_period(text, Selector::FullGame), text);
            }
        }

        #[test]
        fn first_quarter_only() {
            let out = filter_by_period(GAME, Period::Q1.into());
            assert_eq!(
                out,
                "Q1 12:00 Tip-off won by Adams\nQ1 10:42 Smith makes 3-pt shot"
            );
        }

        #[test]
        fn middle_quarters() {
            assert_eq!(
                filter_by_period(GAME, Period::Q2.into()),
                "Q2 11:30 Jones misses jumper\nQ2 09:02 Lee makes 3-pt shot"
            );
            assert_eq!(
                filter_by_period(GAME, Period::Q3.into()),
                "Q3 08:15 Brown steals"
            );
        }

        #[test]
        fn fourth_quarter_keeps_only_labeled_lines_to_end() {
            let text = "Q3 a\nQ4 b\nnoise\nQ4 c";
            assert_eq!(filter_by_period(text, Period::Q4.into()), "Q4 b\nQ4 c");
            assert_eq!(
                filter_by_period(GAME, Period::Q4.into()),
                "Q4 02:11 Smith makes 3-pt shot\nQ4 00:04 Final buzzer"
            );
        }

        #[test]
        fn missing_quarter_is_empty() {
            let text = "Q1 a\nQ2 b";
            assert_eq!(filter_by_period(text, Period::Q3.into()), "");
            assert_eq!(filter_by_period(text, Period::Q4.into()), "");
        }

        #[test]
        fn select_period_rejects_blank_result() {
            let text = "Q1 a\nQ2 b";
            assert_eq!(select_period(text, Period::Q2.into()).unwrap(), "Q2 b");

            let err = select_period(text, Period::Q3.into()).unwrap_err();
            assert_eq!(err, TranscriptError::NoLines(Selector::Period(Period::Q3)));
            assert_eq!(
                err.to_string(),
                "No play\u{2010}by\u{2010}play lines found for Q3."
            );
            assert!(select_period("   \n", Selector::FullGame).is_err());
        }

        #[test]
        fn empty_transcript_is_empty_for_every_period() {
            for period in Period::ALL {
                assert_eq!(filter_by_period("", period.into()), "");
            }
        }

        #[test]
        fn stops_at_successor_even_if_quarter_returns() {
            let text = "Q1 Smith makes 3\nQ2 Jones misses\nQ1 Lee steals";
            assert_eq!(filter_by_period(text, Period::Q1.into()), "Q1 Smith makes 3");
        }

        #[test]
        fn later_non_successor_does_not_stop_scan() {
            let text = "Q1 a\nQ3 out of order\nQ1 b";
            assert_eq!(filter_by_period(text, Period::Q1.into()), "Q1 a\nQ1 b");
        }

        #[test]
        fn requires_label_followed_by_space() {
            let text = "Q10 not a first quarter line\nQ1\tTabbed\nQ1 real\nxQ1 embedded";
            assert_eq!(filter_by_period(text, Period::Q1.into()), "Q1 real");
        }

        #[test]
        fn successor_without_space_does_not_stop() {
            let text = "Q1 a\nQ2: summary\nQ1 b";
            assert_eq!(filter_by_period(text, Period::Q1.into()), "Q1 a\nQ1 b");
        }

        #[test]
        fn preserves_interior_whitespace_and_strips_crlf() {
            let text = "Q2  double  spaced \r\nQ2 next\r\n";
            assert_eq!(
                filter_by_period(text, Period::Q2.into()),
                "Q2  double  spaced \nQ2 next"
            );
        }

        #[test]
        fn is_idempotent() {
            for period in Period::ALL {
                let once = filter_by_period(GAME, period.into());
                let twice = filter_by_period(&once, period.into());
                assert_eq!(once, twice);
            }
        }
    }

    mod loading {
        use super::*;
        use std::io::Write;

        #[tokio::test]
        async fn load_reads_file() {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            write!(file, "{GAME}").unwrap();

            let text = load_transcript(file.path()).await.unwrap();
            assert_eq!(text, GAME);
        }

        #[tokio::test]
        async fn load_missing_file_is_io_error() {
            let dir = tempfile::tempdir().unwrap();
            let err = load_transcript(dir.path().join("absent.txt"))
                .await
                .unwrap_err();
            assert!(matches!(err, crate::Error::Io(_)));
        }

        #[tokio::test]
        async fn reads_from_any_reader() {
            let text = read_transcript_from(GAME.as_bytes()).await.unwrap();
            assert_eq!(text, GAME);
        }

        #[test]
        fn preview_numbers_first_lines() {
            let lines = preview(GAME, 2);
            assert_eq!(
                lines,
                vec![
                    " 1: Q1 12:00 Tip-off won by Adams".to_owned(),
                    " 2: Q1 10:42 Smith makes 3-pt shot".to_owned(),
                ]
            );
        }

        #[test]
        fn preview_handles_short_input() {
            assert!(preview("", 10).is_empty());
            assert_eq!(preview("only", 10), vec![" 1: only".to_owned()]);
            let many: String = (1..=12).map(|i| format!("line {i}\n")).collect();
            assert_eq!(preview(&many, 10).last().unwrap(), "10: line 10");
        }
    }
}
