pub mod blocks;
pub mod frontmatter;
pub mod inline;
pub mod splitter;

use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

/// The deck that ships inside the binary.
pub const BUILTIN_DECK: &str = include_str!("../../decks/ai-attacks.md");

#[derive(Debug, Clone)]
pub struct Deck {
    pub meta: DeckMeta,
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    /// Logo image, relative to the deck file.
    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Slide {
    /// 1-based position in the deck.
    pub id: usize,
    pub kind: SlideKind,
    pub eyebrow: Option<String>,
    pub badge: Option<String>,
    pub title: Vec<Inline>,
    pub blocks: Vec<Block>,
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideKind {
    Title,
    Content,
    Case,
    Summary,
    Final,
}

impl SlideKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "title" => Some(Self::Title),
            "content" => Some(Self::Content),
            "case" => Some(Self::Case),
            "summary" => Some(Self::Summary),
            "final" => Some(Self::Final),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Case => "case",
            Self::Summary => "summary",
            Self::Final => "final",
        }
    }

    /// Title and final slides are centred; everything else is top-aligned.
    pub fn is_centered(self) -> bool {
        matches!(self, Self::Title | Self::Final)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Subheading {
        inlines: Vec<Inline>,
        note: Option<usize>,
    },
    Paragraph {
        inlines: Vec<Inline>,
        note: Option<usize>,
    },
    Callout {
        inlines: Vec<Inline>,
        note: Option<usize>,
    },
    List {
        ordered: bool,
        items: Vec<ListItem>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListItem {
    pub inlines: Vec<Inline>,
    pub note: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
}

/// A speaker note attached to an annotated element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("invalid front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    #[error("front matter is not closed with `---`")]
    UnclosedFrontMatter,

    #[error("slide {slide}, line {line}: `@note` has no element to annotate")]
    OrphanNote { slide: usize, line: usize },

    #[error("slide {slide}, line {line}: element already has a note")]
    DuplicateNote { slide: usize, line: usize },

    #[error("slide {slide}, line {line}: expected `@note <title> | <body>`")]
    MalformedNote { slide: usize, line: usize },

    #[error("slide {slide}, line {line}: unknown slide kind `{kind}`")]
    UnknownKind {
        slide: usize,
        line: usize,
        kind: String,
    },

    #[error("deck contains no slides")]
    Empty,
}

impl Deck {
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn note(&self, slide: usize, note: usize) -> Option<&Note> {
        self.slides.get(slide)?.notes.get(note)
    }

    pub fn note_count(&self) -> usize {
        self.slides.iter().map(|s| s.notes.len()).sum()
    }
}

impl Slide {
    /// The title without inline styling.
    pub fn title_text(&self) -> String {
        inline::plain_text(&self.title)
    }
}

pub fn parse(content: &str) -> Result<Deck, DeckError> {
    let (meta, body) = frontmatter::extract(content)?;
    let slides = splitter::split(&body)
        .into_iter()
        .enumerate()
        .map(|(i, raw)| blocks::parse_slide(i + 1, &raw))
        .collect::<Result<Vec<_>, _>>()?;

    if slides.is_empty() {
        return Err(DeckError::Empty);
    }
    Ok(Deck { meta, slides })
}

pub fn builtin() -> Result<Deck, DeckError> {
    parse(BUILTIN_DECK)
}

pub fn load(path: &Path) -> anyhow::Result<Deck> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
}
