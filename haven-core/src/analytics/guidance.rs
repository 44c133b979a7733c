//! Guidance text shown with suggestions.
//!
//! Text generation sits behind [`GuidanceSource`] so a different content
//! provider can be swapped in. [`StaticGuidance`] returns fixed copy.

use super::ranker::SuggestionFocus;

/// Supplies human-readable guidance for a suggestion focus.
pub trait GuidanceSource: Send + Sync {
    /// One or two short messages for the given focus.
    fn guidance(&self, focus: SuggestionFocus) -> Vec<String>;
}

/// Fixed, hand-written guidance.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticGuidance;

impl GuidanceSource for StaticGuidance {
    fn guidance(&self, focus: SuggestionFocus) -> Vec<String> {
        let lines: &[&str] = match focus {
            SuggestionFocus::Crisis => &[
                "You seem to be going through a difficult time. These activities can provide immediate support.",
                "Remember: You're not alone. Consider reaching out to a mental health professional.",
            ],
            SuggestionFocus::StressRelief => &[
                "These activities are designed to help reduce stress and promote calm.",
                "Start with shorter sessions and gradually increase time as you feel more comfortable.",
            ],
            SuggestionFocus::Connection => &[
                "Connection with others can be healing. Try these social and mood-boosting activities.",
            ],
            SuggestionFocus::Uplift => &[
                "These activities can help lift your spirits and build positive momentum.",
            ],
            SuggestionFocus::Maintain => &[
                "You're in a good space! These activities can help maintain and enhance your wellbeing.",
            ],
        };
        lines.iter().map(|s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_focus_has_guidance() {
        for focus in [
            SuggestionFocus::Crisis,
            SuggestionFocus::StressRelief,
            SuggestionFocus::Connection,
            SuggestionFocus::Uplift,
            SuggestionFocus::Maintain,
        ] {
            let lines = StaticGuidance.guidance(focus);
            assert!((1..=2).contains(&lines.len()), "{:?}", focus);
        }
    }

    #[test]
    fn test_crisis_points_to_professional_help() {
        let lines = StaticGuidance.guidance(SuggestionFocus::Crisis);
        assert!(lines[1].contains("mental health professional"));
    }
}
