//! Source badge lookup.
//!
//! Fixed table of known outlets with their badge label and colours.

use ratatui::style::{Color, Modifier, Style};

/// Display metadata for an outlet badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceBadge<'a> {
    /// Text shown inside the badge
    pub label: &'a str,
    /// Badge background
    pub bg: Color,
    /// Badge text colour
    pub fg: Color,
}

impl SourceBadge<'_> {
    /// Style for rendering the badge span.
    pub fn style(&self) -> Style {
        Style::default()
            .bg(self.bg)
            .fg(self.fg)
            .add_modifier(Modifier::BOLD)
    }
}

/// Background used for outlets missing from [`SOURCE_BADGES`].
pub const FALLBACK_BG: Color = Color::Rgb(63, 63, 70);
/// Text colour used for outlets missing from [`SOURCE_BADGES`].
pub const FALLBACK_FG: Color = Color::White;

/// Known outlets keyed by lowercase source code.
pub const SOURCE_BADGES: [(&str, SourceBadge<'static>); 6] = [
    (
        "bbc",
        SourceBadge {
            label: "BBC",
            bg: Color::Rgb(220, 38, 38),
            fg: Color::White,
        },
    ),
    (
        "guardian",
        SourceBadge {
            label: "Guardian",
            bg: Color::Rgb(37, 99, 235),
            fg: Color::White,
        },
    ),
    (
        "independent",
        SourceBadge {
            label: "Independent",
            bg: Color::Rgb(55, 65, 81),
            fg: Color::White,
        },
    ),
    (
        "sky",
        SourceBadge {
            label: "Sky",
            bg: Color::Rgb(2, 132, 199),
            fg: Color::White,
        },
    ),
    (
        "metro",
        SourceBadge {
            label: "Metro",
            bg: Color::Rgb(250, 204, 21),
            fg: Color::Black,
        },
    ),
    (
        "standard",
        SourceBadge {
            label: "Evening Standard",
            bg: Color::Rgb(147, 51, 234),
            fg: Color::White,
        },
    ),
];

/// Look up the badge for a source code.
///
/// # Arguments
/// * `source` - Source code from the article
///
/// # Returns
/// * `SourceBadge` - Configured badge, or a neutral badge labelled with the raw code
pub fn source_badge(source: &str) -> SourceBadge<'_> {
    match SOURCE_BADGES.iter().find(|(code, _)| *code == source) {
        Some((_, badge)) => *badge,
        None => SourceBadge {
            label: source,
            bg: FALLBACK_BG,
            fg: FALLBACK_FG,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sources() {
        assert_eq!(source_badge("bbc").label, "BBC");
        assert_eq!(source_badge("standard").label, "Evening Standard");
        let metro = source_badge("metro");
        assert_eq!(metro.fg, Color::Black);
    }

    #[test]
    fn test_unknown_source_falls_back() {
        let badge = source_badge("unknownwire");
        assert_eq!(badge.label, "unknownwire");
        assert_eq!(badge.bg, FALLBACK_BG);
        assert_eq!(badge.fg, FALLBACK_FG);
        assert!(SOURCE_BADGES.iter().all(|(_, known)| known.bg != badge.bg));
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(source_badge("BBC").label, "BBC");
        assert_eq!(source_badge("BBC").bg, FALLBACK_BG);
    }
}
