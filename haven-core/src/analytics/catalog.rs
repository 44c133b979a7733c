//! Activity catalog
//!
//! The hand-curated list of wellness activities the ranker chooses from.
//! A catalog is built once at startup, either the built-in one or a TOML
//! replacement, and is read-only afterwards.
//!
//! Catalog order matters: it is the final tie-break when ranking.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How demanding an activity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// The stress band an activity is designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StressLevel {
    Emergency,
    High,
    Moderate,
}

/// One suggestion template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub category: String,
    pub description: String,
    /// Expected lift, 1-5
    pub mood_boost: u8,
    pub difficulty: Difficulty,
    pub time_commitment: String,
    pub therapeutic_benefit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crisis_support: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<StressLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_support: Option<bool>,
}

impl CatalogEntry {
    fn new(
        name: &str,
        category: &str,
        description: &str,
        mood_boost: u8,
        difficulty: Difficulty,
        time_commitment: &str,
        therapeutic_benefit: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            mood_boost,
            difficulty,
            time_commitment: time_commitment.to_string(),
            therapeutic_benefit: therapeutic_benefit.to_string(),
            crisis_support: None,
            stress_level: None,
            social_support: None,
        }
    }

    fn crisis(mut self, level: StressLevel) -> Self {
        self.crisis_support = Some(true);
        self.stress_level = Some(level);
        self
    }

    fn stress(mut self, level: StressLevel) -> Self {
        self.stress_level = Some(level);
        self
    }

    fn social(mut self) -> Self {
        self.social_support = Some(true);
        self
    }

    pub fn is_crisis_support(&self) -> bool {
        self.crisis_support == Some(true)
    }

    pub fn is_social_support(&self) -> bool {
        self.social_support == Some(true)
    }

    /// Case-insensitive name match, used to drop already-adopted hobbies
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// On-disk shape of a replacement catalog.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(rename = "activity")]
    activities: Vec<CatalogEntry>,
}

/// An immutable, ordered set of catalog entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load a catalog from a TOML file of `[[activity]]` tables
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read catalog {:?}: {}", path, e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse catalog: {}", e)))?;

        if let Some(bad) = file
            .activities
            .iter()
            .find(|a| !(1..=5).contains(&a.mood_boost))
        {
            return Err(Error::Config(format!(
                "catalog entry {:?} has moodBoost {} outside 1-5",
                bad.name, bad.mood_boost
            )));
        }

        Ok(Self::new(file.activities))
    }

    /// The built-in catalog.
    pub fn builtin() -> Self {
        use Difficulty::*;
        use StressLevel::*;

        Self::new(vec![
            // Crisis & emergency coping
            CatalogEntry::new(
                "Breathing Focus",
                "Crisis Support",
                "5-minute breathing exercises to regain control in moments of distress",
                5,
                Easy,
                "5-10 minutes",
                "Immediate anxiety relief",
            )
            .crisis(Emergency),
            CatalogEntry::new(
                "Grounding Techniques",
                "Crisis Support",
                "5-4-3-2-1 sensory grounding and mindfulness exercises",
                5,
                Easy,
                "10-15 minutes",
                "Panic attack management",
            )
            .crisis(Emergency),
            CatalogEntry::new(
                "Gentle Movement",
                "Crisis Support",
                "Slow stretching or walking to release physical tension",
                4,
                Easy,
                "10-20 minutes",
                "Trauma release and grounding",
            )
            .crisis(High),
            // Stress relief
            CatalogEntry::new(
                "Art Therapy",
                "Creative Healing",
                "Express emotions through colors, shapes, and textures without judgment",
                4,
                Easy,
                "20-60 minutes",
                "Emotional processing and release",
            )
            .stress(High),
            CatalogEntry::new(
                "Nature Immersion",
                "Restorative",
                "Spend time outdoors, even just sitting by a window with plants",
                4,
                Easy,
                "15-30 minutes",
                "Reduced cortisol levels",
            )
            .stress(Moderate),
            CatalogEntry::new(
                "Comfort Crafting",
                "Mindful Creation",
                "Simple, repetitive crafts like knitting or origami for soothing focus",
                3,
                Easy,
                "30-90 minutes",
                "Meditative mindfulness",
            )
            .stress(Moderate),
            // Social connection
            CatalogEntry::new(
                "Video Call Check-in",
                "Connection",
                "Schedule a 15-minute call with a trusted friend or family member",
                4,
                Easy,
                "15-30 minutes",
                "Combat isolation",
            )
            .social(),
            CatalogEntry::new(
                "Community Volunteering",
                "Purpose",
                "Help others through local food banks, animal shelters, or online mentoring",
                5,
                Medium,
                "1-3 hours",
                "Sense of purpose and connection",
            )
            .social(),
            CatalogEntry::new(
                "Support Group Participation",
                "Healing Community",
                "Join online or local mental health support groups",
                4,
                Medium,
                "60-90 minutes",
                "Shared experience and validation",
            )
            .social(),
            // Body-mind
            CatalogEntry::new(
                "Trauma-Informed Yoga",
                "Body-Mind Healing",
                "Gentle yoga focused on body awareness and emotional release",
                5,
                Easy,
                "20-45 minutes",
                "Nervous system regulation",
            ),
            CatalogEntry::new(
                "Walking Meditation",
                "Moving Mindfulness",
                "Slow, intentional walking while focusing on each step and breath",
                4,
                Easy,
                "15-30 minutes",
                "Integration of movement and mindfulness",
            ),
            CatalogEntry::new(
                "Dance Therapy",
                "Expressive Movement",
                "Free movement to music for emotional expression and joy",
                5,
                Easy,
                "20-40 minutes",
                "Endorphin release and emotional expression",
            ),
            // Cognitive
            CatalogEntry::new(
                "Mindfulness Journaling",
                "Reflective Practice",
                "Guided prompts for processing emotions and thoughts",
                4,
                Easy,
                "15-30 minutes",
                "Emotional regulation and self-awareness",
            ),
            CatalogEntry::new(
                "Learning for Joy",
                "Mental Stimulation",
                "Learn something purely for pleasure - languages, music, or skills",
                3,
                Medium,
                "30-60 minutes",
                "Cognitive flexibility and achievement",
            ),
            CatalogEntry::new(
                "Puzzle Meditation",
                "Focused Calm",
                "Jigsaw puzzles, sudoku, or crosswords for present-moment focus",
                3,
                Easy,
                "30-90 minutes",
                "Anxiety reduction through focus",
            ),
            // Creative expression
            CatalogEntry::new(
                "Music Therapy",
                "Sound Healing",
                "Listen to, create, or play music for emotional processing",
                5,
                Easy,
                "20-60 minutes",
                "Mood regulation and emotional release",
            ),
            CatalogEntry::new(
                "Storytelling & Writing",
                "Narrative Therapy",
                "Write your story, poetry, or fictional narratives for perspective",
                4,
                Easy,
                "20-45 minutes",
                "Meaning-making and self-understanding",
            ),
            CatalogEntry::new(
                "Photography Mindfulness",
                "Visual Awareness",
                "Capture moments of beauty and meaning in everyday life",
                3,
                Easy,
                "15-60 minutes",
                "Present-moment awareness and gratitude",
            ),
        ])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// A crisis line surfaced alongside acute-state suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportResource {
    pub name: String,
    pub contact: String,
    pub description: String,
}

/// The fixed crisis lines.
pub fn support_resources() -> Vec<SupportResource> {
    [
        ("Crisis Text Line", "Text HOME to 741741", "24/7 crisis support"),
        (
            "National Suicide Prevention Lifeline",
            "988",
            "24/7 emotional support",
        ),
        (
            "SAMHSA Helpline",
            "1-800-662-4357",
            "Mental health and substance use support",
        ),
    ]
    .into_iter()
    .map(|(name, contact, description)| SupportResource {
        name: name.to_string(),
        contact: contact.to_string(),
        description: description.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_shape() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 18);
        assert_eq!(catalog.entries()[0].name, "Breathing Focus");

        let crisis: Vec<_> = catalog
            .entries()
            .iter()
            .filter(|e| e.is_crisis_support())
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(
            crisis,
            vec!["Breathing Focus", "Grounding Techniques", "Gentle Movement"]
        );
        assert!(catalog
            .entries()
            .iter()
            .all(|e| (1..=5).contains(&e.mood_boost)));
    }

    #[test]
    fn test_optional_flags_omitted_on_wire() {
        let catalog = Catalog::builtin();
        let yoga = catalog
            .entries()
            .iter()
            .find(|e| e.name == "Trauma-Informed Yoga")
            .unwrap();
        let json = serde_json::to_value(yoga).unwrap();
        assert_eq!(json["moodBoost"], 5);
        assert_eq!(json["difficulty"], "Easy");
        assert!(json.get("crisisSupport").is_none());
        assert!(json.get("socialSupport").is_none());

        let breathing = serde_json::to_value(&catalog.entries()[0]).unwrap();
        assert_eq!(breathing["crisisSupport"], true);
        assert_eq!(breathing["stressLevel"], "emergency");
    }

    #[test]
    fn test_matches_name_ignores_case() {
        let catalog = Catalog::builtin();
        let music = catalog
            .entries()
            .iter()
            .find(|e| e.name == "Music Therapy")
            .unwrap();
        assert!(music.matches_name("music therapy"));
        assert!(music.matches_name("MUSIC THERAPY"));
        assert!(!music.matches_name("Music"));
    }

    #[test]
    fn test_catalog_from_toml() {
        let toml = r#"
[[activity]]
name = "Cold Water Reset"
category = "Crisis Support"
description = "Splash cold water to slow the heart rate"
moodBoost = 4
difficulty = "Easy"
timeCommitment = "2 minutes"
therapeuticBenefit = "Vagal response"
crisisSupport = true
stressLevel = "emergency"

[[activity]]
name = "Book Club"
category = "Connection"
description = "Monthly reading circle"
moodBoost = 3
difficulty = "Medium"
timeCommitment = "2 hours"
therapeuticBenefit = "Belonging"
socialSupport = true
"#;
        let catalog = Catalog::from_toml(toml).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.entries()[0].is_crisis_support());
        assert_eq!(catalog.entries()[0].stress_level, Some(StressLevel::Emergency));
        assert!(catalog.entries()[1].is_social_support());
    }

    #[test]
    fn test_catalog_rejects_bad_mood_boost() {
        let toml = r#"
[[activity]]
name = "Too Good"
category = "Other"
description = "x"
moodBoost = 9
difficulty = "Easy"
timeCommitment = "1 minute"
therapeuticBenefit = "x"
"#;
        assert!(matches!(Catalog::from_toml(toml), Err(Error::Config(_))));
    }

    #[test]
    fn test_support_resources() {
        let resources = support_resources();
        assert_eq!(resources.len(), 3);
        assert_eq!(resources[1].contact, "988");
    }
}
