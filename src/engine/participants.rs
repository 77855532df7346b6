//! Speaker detection for meeting transcripts.
//!
//! Participants are read off speaker labels such as `Alice: ...`, found at the
//! start of a line or right after the end of a sentence. Labels may carry a
//! leading `[00:01:22]`/`10:04 -` timestamp, markdown emphasis, or a trailing
//! `(role)`. The matching is a heuristic: it never fails, it only finds fewer
//! or more names than a human would.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static SPEAKER_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)(?:^|[.!?;]\s+)[ \t]*(?:\[[^\]\n]{1,20}\][ \t]*|\(?\d{1,2}:\d{2}(?::\d{2})?\)?[ \t]*(?:-[ \t]*)?)?[*_]{0,2}(?P<name>\p{Lu}[\p{L}\p{M}'’\-]*(?:[ \t]+(?:\p{Lu}[\p{L}\p{M}'’\-]*|\d{1,3})){0,3})[*_]{0,2}(?:[ \t]*\([^)\n]{1,40}\))?[ \t]*:",
    )
    .expect("speaker label pattern is valid")
});

/// Labels that look like speakers but head sections of meeting notes.
const NOT_SPEAKERS: &[&str] = &[
    "a",
    "q",
    "action",
    "action item",
    "action items",
    "agenda",
    "attendees",
    "date",
    "decision",
    "decisions",
    "location",
    "meeting",
    "next steps",
    "note",
    "notes",
    "participants",
    "re",
    "subject",
    "summary",
    "time",
    "todo",
    "transcript",
];

/// Derives the participant list of a transcript.
pub trait ParticipantExtractor: Send + Sync {
    /// Deduplicated names in order of first mention; empty when no speaker
    /// labels are recognized.
    fn extract(&self, transcript: &str) -> Vec<String>;
}

/// Default extractor backed by [`extract_participants`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeakerLabelExtractor;

impl ParticipantExtractor for SpeakerLabelExtractor {
    fn extract(&self, transcript: &str) -> Vec<String> {
        extract_participants(transcript)
    }
}

pub fn extract_participants(transcript: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut participants = Vec::new();

    for captures in SPEAKER_LABEL.captures_iter(transcript) {
        let Some(name) = captures.name("name") else {
            continue;
        };
        let name = name.as_str().trim();

        if NOT_SPEAKERS.contains(&name.to_lowercase().as_str()) {
            continue;
        }

        if seen.insert(name.to_string()) {
            participants.push(name.to_string());
        }
    }

    participants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_speakers_in_order_of_first_mention() {
        let names = extract_participants("Alice: let's ship by Friday. Bob: agreed.");
        assert_eq!(names, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_line_speakers_are_deduplicated() {
        let transcript = "Bob: morning all\nAlice: hi Bob\nBob: shall we start?\nCarol Danvers: yes";
        assert_eq!(
            extract_participants(transcript),
            vec!["Bob", "Alice", "Carol Danvers"]
        );
    }

    #[test]
    fn test_timestamps_roles_and_emphasis() {
        let transcript = "[00:00:05] Frodo Baggins: hello\n\
                          10:04 - Sam (Gardener): I'm here\n\
                          **Gandalf**: you shall not pass\n\
                          Speaker 2: who said that?";
        assert_eq!(
            extract_participants(transcript),
            vec!["Frodo Baggins", "Sam", "Gandalf", "Speaker 2"]
        );
    }

    #[test]
    fn test_section_headings_are_not_speakers() {
        let transcript = "Agenda: pricing\nNotes: none\nAction items: send deck\nAragorn: let's go";
        assert_eq!(extract_participants(transcript), vec!["Aragorn"]);
    }

    #[test]
    fn test_free_text_yields_nothing() {
        assert!(extract_participants("").is_empty());
        assert!(extract_participants("we talked about pricing and renewal dates").is_empty());
        assert!(extract_participants("see https://example.com: it is 10:30 now").is_empty());
    }

    #[test]
    fn test_never_panics_on_odd_input() {
        let inputs = [
            ":::",
            "\u{0}\u{1}:",
            "É: ça va",
            "Ünïcödé Nàme: hi",
            "[: ]",
            "(((",
            "A\nB\nC:",
        ];
        for input in inputs {
            let _ = extract_participants(input);
        }
        assert_eq!(extract_participants("Ünïcödé Nàme: hi"), vec!["Ünïcödé Nàme"]);
    }
}
