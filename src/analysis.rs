// src/analysis.rs
// Payloads for the conversation analysis and message suggestion endpoints

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the other person's interest is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    #[serde(rename = "Yükseliş")]
    Rising,
    #[serde(rename = "Düşüş")]
    Falling,
    #[serde(rename = "Stabil")]
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rising => f.write_str("Yükseliş"),
            Self::Falling => f.write_str("Düşüş"),
            Self::Stable => f.write_str("Stabil"),
        }
    }
}

/// Tone requested for a single next-message suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    #[serde(rename = "Dengeli")]
    Balanced,
    #[serde(rename = "Daha Mesafeli")]
    Distant,
    #[serde(rename = "Daha Net")]
    Clearer,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Balanced, Tone::Distant, Tone::Clearer];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Balanced => "Dengeli",
            Self::Distant => "Daha Mesafeli",
            Self::Clearer => "Daha Net",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub timing: String,
    pub next_step: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub green: Vec<String>,
    #[serde(default)]
    pub red: Vec<String>,
}

/// Reading of a pasted conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub interest_score: f64,
    pub trend: Trend,
    #[serde(default)]
    pub reasons: Vec<String>,
    pub detection: String,
    pub recommendation: Recommendation,
    #[serde(default)]
    pub flags: Flags,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSuggestion {
    pub tone: Tone,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AnalyzePayload<'a> {
    pub character: &'a str,
    pub conversation: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SuggestPayload<'a> {
    pub character: &'a str,
    pub tone: Tone,
    pub conversation: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_analysis_decodes_with_optional_lists_missing() {
        let analysis: AnalysisResult = serde_json::from_value(json!({
            "interestScore": 72,
            "trend": "Yükseliş",
            "detection": "Cevapları hızlanıyor.",
            "recommendation": {"timing": "Akşam", "nextStep": "Buluşma teklif et"}
        }))
        .unwrap();

        assert_eq!(analysis.trend, Trend::Rising);
        assert_eq!(analysis.interest_score, 72.0);
        assert!(analysis.reasons.is_empty());
        assert!(analysis.flags.green.is_empty());
        assert!(analysis.recommendation.alternatives.is_empty());
    }

    #[test]
    fn test_unknown_trend_is_rejected() {
        let result: Result<AnalysisResult, _> = serde_json::from_value(json!({
            "interestScore": 10,
            "trend": "Belirsiz",
            "detection": "",
            "recommendation": {"timing": "", "nextStep": ""}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_tone_labels_round_trip_through_serde() {
        for tone in Tone::ALL {
            let value = serde_json::to_value(tone).unwrap();
            assert_eq!(value, json!(tone.label()));
            assert_eq!(Tone::from_label(tone.label()), Some(tone));
        }
        assert_eq!(Tone::from_label("Sert"), None);
    }

    #[test]
    fn test_suggest_payload_shape() {
        let payload = SuggestPayload {
            character: "Net & Direkt",
            tone: Tone::Distant,
            conversation: "A: selam",
        };
        assert_eq!(
            serde_json::to_value(payload).unwrap(),
            json!({"character": "Net & Direkt", "tone": "Daha Mesafeli", "conversation": "A: selam"})
        );
    }
}
