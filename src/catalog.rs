// src/catalog.rs
// Option catalogs (styles, characters) injected at startup

use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_STYLES: &[&str] = &["Cool", "Komik", "Flörtöz", "Kibar", "Direkt"];
const DEFAULT_STYLE: &str = "Cool";

const DEFAULT_CHARACTERS: &[(&str, &str, &str)] = &[
    (
        "Dengeli & Düşünen",
        "Net ama sakin ilerler. Tempoyu dengede tutar.",
        "“Günün nasıl geçti, sakin bir akşamda konuşalım mı?”",
    ),
    (
        "Cool ama Kararsız",
        "Hafif mesafe koyar, netleşmeden sinyal verir.",
        "“Bugün yoğundu, sonra yazarım. Şimdi nasılsın?”",
    ),
    (
        "Fazla İlgili",
        "İlgi yüksek, bazen fazla görünür.",
        "“Gün boyu aklımdaydın, her şey yolunda mı?”",
    ),
    (
        "Yeni Ayrılmış",
        "Duygu karmaşası var, temkinli ve açık konuşur.",
        "“Biraz taze ayrıldım, acele etmeden ilerleyelim.”",
    ),
    (
        "Net & Direkt",
        "Kısa ve net yazar, hedefi bellidir.",
        "“Bu hafta kahve içelim. Perşembe müsün?”",
    ),
];

/// A reply style label ("Cool", "Komik", ...).
///
/// Only obtainable through a [`Catalog`], or explicitly via [`Style::new`]
/// when the caller already trusts the label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style(String);

impl Style {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persona the user identifies with during onboarding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub example: String,
}

/// The option lists every screen and command chooses from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    styles: Vec<Style>,
    default_style: Style,
    characters: Vec<CharacterProfile>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            styles: DEFAULT_STYLES.iter().map(|s| Style::new(*s)).collect(),
            default_style: Style::new(DEFAULT_STYLE),
            characters: DEFAULT_CHARACTERS
                .iter()
                .map(|(name, description, example)| CharacterProfile {
                    name: (*name).to_string(),
                    description: (*description).to_string(),
                    example: (*example).to_string(),
                })
                .collect(),
        }
    }
}

impl Catalog {
    /// Build a catalog from explicit lists.
    ///
    /// Empty lists fall back to the built-in ones. A default style that is not
    /// part of the style list is replaced by the first style.
    pub fn new(
        styles: Vec<String>,
        default_style: Option<String>,
        characters: Vec<CharacterProfile>,
    ) -> Self {
        let builtin = Self::default();

        let styles: Vec<Style> = {
            let mut seen = Vec::new();
            for label in styles {
                let label = label.trim();
                if !label.is_empty() && !seen.iter().any(|s: &Style| s.as_str() == label) {
                    seen.push(Style::new(label));
                }
            }
            if seen.is_empty() { builtin.styles } else { seen }
        };

        let default_style = default_style
            .and_then(|d| styles.iter().find(|s| s.as_str() == d.trim()).cloned())
            .or_else(|| {
                styles
                    .iter()
                    .find(|s| s.as_str() == DEFAULT_STYLE)
                    .cloned()
            })
            .unwrap_or_else(|| styles[0].clone());

        let characters = if characters.is_empty() {
            builtin.characters
        } else {
            characters
        };

        Self {
            styles,
            default_style,
            characters,
        }
    }

    pub fn styles(&self) -> &[Style] {
        &self.styles
    }

    pub fn default_style(&self) -> &Style {
        &self.default_style
    }

    /// Resolve a label into a known style (exact match, surrounding whitespace ignored)
    pub fn style(&self, label: &str) -> Option<Style> {
        let label = label.trim();
        self.styles.iter().find(|s| s.as_str() == label).cloned()
    }

    /// Resolve a label or fall back to the default style
    pub fn style_or_default(&self, label: Option<&str>) -> Style {
        label
            .and_then(|l| self.style(l))
            .unwrap_or_else(|| self.default_style.clone())
    }

    pub fn characters(&self) -> &[CharacterProfile] {
        &self.characters
    }

    pub fn character(&self, name: &str) -> Option<&CharacterProfile> {
        let name = name.trim();
        self.characters.iter().find(|c| c.name == name)
    }
}
