//! Faction tags read from skill notes.
//!
//! `<targetFaction: 3, red>` only lets the skill hit characters whose tag 3
//! reads `red`; `<ignoreFaction: 3, red>` never hits them. A target tag wins
//! over an ignore tag. Malformed tags are skipped.

use crate::env::CharacterView;
use crate::state::TagId;

const TARGET_TAG: &str = "<targetFaction:";
const IGNORE_TAG: &str = "<ignoreFaction:";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case", tag = "kind"))]
pub enum FactionRule {
    /// Hit only characters whose tag equals `value`.
    Target { tag: TagId, value: String },
    /// Never hit characters whose tag equals `value`.
    Ignore { tag: TagId, value: String },
}

impl FactionRule {
    /// Extracts the governing rule from a skill note, if any.
    pub fn parse(note: &str) -> Option<Self> {
        if let Some((tag, value)) = find_tag(note, TARGET_TAG) {
            return Some(FactionRule::Target { tag, value });
        }
        find_tag(note, IGNORE_TAG).map(|(tag, value)| FactionRule::Ignore { tag, value })
    }

    /// Whether a skill governed by this rule may hit `target`.
    pub fn admits<C: CharacterView + ?Sized>(&self, target: &C) -> bool {
        match self {
            FactionRule::Target { tag, value } => tag_equals(target, *tag, value),
            FactionRule::Ignore { tag, value } => !tag_equals(target, *tag, value),
        }
    }
}

/// Tag values compare as text, so `"07"` does not match 7.
fn tag_equals<C: CharacterView + ?Sized>(target: &C, tag: TagId, value: &str) -> bool {
    target
        .tag(tag)
        .is_some_and(|actual| actual.to_string() == value)
}

fn find_tag(note: &str, opener: &str) -> Option<(TagId, String)> {
    let mut rest = note;
    while let Some(start) = rest.find(opener) {
        let body = &rest[start + opener.len()..];
        if let Some(parsed) = parse_body(body) {
            return Some(parsed);
        }
        rest = body;
    }
    None
}

fn parse_body(body: &str) -> Option<(TagId, String)> {
    let end = body.find('>')?;
    let (id, value) = body[..end].split_once(',')?;
    let id = id.trim();
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((id.parse().ok()?, value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CharacterId, CharacterState, Position};

    #[test]
    fn parses_target_and_ignore_tags() {
        assert_eq!(
            FactionRule::parse("<targetFaction: 3, red >"),
            Some(FactionRule::Target {
                tag: 3,
                value: "red".into()
            })
        );
        assert_eq!(
            FactionRule::parse("blah\n<ignoreFaction:12,2>"),
            Some(FactionRule::Ignore {
                tag: 12,
                value: "2".into()
            })
        );
    }

    #[test]
    fn target_tag_takes_precedence() {
        let note = "<ignoreFaction: 1, a><targetFaction: 2, b>";
        assert!(matches!(
            FactionRule::parse(note),
            Some(FactionRule::Target { tag: 2, .. })
        ));
    }

    #[test]
    fn malformed_tags_impose_nothing() {
        assert_eq!(FactionRule::parse("<targetFaction: x, red>"), None);
        assert_eq!(FactionRule::parse("<targetFaction: 3>"), None);
        assert_eq!(FactionRule::parse("<targetFaction: 3, >"), None);
        assert_eq!(FactionRule::parse("<targetFaction: 3, red"), None);
        assert_eq!(
            FactionRule::parse("<targetFaction: 3> <targetFaction: 4, 1>"),
            Some(FactionRule::Target {
                tag: 4,
                value: "1".into()
            })
        );
    }

    #[test]
    fn admits_compares_tag_text() {
        let goblin = CharacterState::new(CharacterId::Event(1), Position::ORIGIN).with_tag(5, 2);
        let player = CharacterState::new(CharacterId::Player, Position::ORIGIN);
        let only_twos = FactionRule::Target {
            tag: 5,
            value: "2".into(),
        };
        let spare_twos = FactionRule::Ignore {
            tag: 5,
            value: "2".into(),
        };
        assert!(only_twos.admits(&goblin));
        assert!(!only_twos.admits(&player), "no tag storage, no hit");
        assert!(!spare_twos.admits(&goblin));
        assert!(spare_twos.admits(&player));
    }
}
