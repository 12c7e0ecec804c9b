use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::deck::{self, Deck};

#[derive(Debug, Serialize)]
pub struct Outline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    pub slides: Vec<OutlineSlide>,
}

#[derive(Debug, Serialize)]
pub struct OutlineSlide {
    pub number: usize,
    pub kind: &'static str,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<OutlineNote>,
}

#[derive(Debug, Serialize)]
pub struct OutlineNote {
    pub title: String,
    pub body: String,
}

impl Outline {
    pub fn build(deck: &Deck, with_notes: bool) -> Self {
        let slides = deck
            .slides
            .iter()
            .map(|slide| OutlineSlide {
                number: slide.id,
                kind: slide.kind.name(),
                title: slide.title_text(),
                badge: slide.badge.clone(),
                notes: if with_notes {
                    slide
                        .notes
                        .iter()
                        .map(|n| OutlineNote {
                            title: n.title.clone(),
                            body: n.body.clone(),
                        })
                        .collect()
                } else {
                    Vec::new()
                },
            })
            .collect();
        Self {
            title: deck.meta.title.clone(),
            author: deck.meta.author.clone(),
            slides,
        }
    }
}

pub fn run(file: Option<&Path>, with_notes: bool, json: bool) -> Result<()> {
    let deck = match file {
        Some(path) => deck::load(path)?,
        None => deck::builtin()?,
    };
    let outline = Outline::build(&deck, with_notes);

    if json {
        println!("{}", serde_json::to_string_pretty(&outline)?);
        return Ok(());
    }

    if let Some(title) = &outline.title {
        println!("{}", title.bold());
    }
    if let Some(author) = &outline.author {
        println!("{}", author.dimmed());
    }
    if outline.title.is_some() || outline.author.is_some() {
        println!();
    }

    let width = outline.slides.len().to_string().len().max(2);
    for slide in &outline.slides {
        let badge = slide
            .badge
            .as_deref()
            .map(|b| format!(" [{b}]").red().to_string())
            .unwrap_or_default();
        println!(
            "{:>width$}  {:<8} {}{badge}",
            slide.number.to_string().yellow(),
            slide.kind.dimmed(),
            slide.title
        );
        for note in &slide.notes {
            println!("{:>width$}    {} {}", "", "▸".yellow(), note.title.bold());
            println!("{:>width$}      {}", "", note.body.dimmed());
        }
    }

    println!();
    println!(
        "{} slides, {} speaker notes",
        deck.slide_count(),
        deck.note_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builtin() -> Deck {
        deck::builtin().expect("builtin deck parses")
    }

    #[test]
    fn outline_lists_every_slide() {
        let outline = Outline::build(&builtin(), false);
        assert_eq!(outline.slides.len(), 24);
        assert_eq!(outline.slides[0].number, 1);
        assert_eq!(outline.slides[0].kind, "title");
        assert_eq!(outline.slides[23].kind, "final");
        assert!(outline.slides.iter().all(|s| s.notes.is_empty()));
    }

    #[test]
    fn outline_with_notes() {
        let outline = Outline::build(&builtin(), true);
        let total: usize = outline.slides.iter().map(|s| s.notes.len()).sum();
        assert_eq!(total, 22);
        assert_eq!(outline.slides[2].notes[3].title, "Key Warning");
    }

    #[test]
    fn json_shape() {
        let outline = Outline::build(&builtin(), true);
        let value = serde_json::to_value(&outline).expect("json");
        assert_eq!(value["slides"][1]["title"], "Session Objectives");
        assert_eq!(value["slides"][1]["notes"][0]["title"], "Understand AI Attacks");
        assert_eq!(value["slides"][6]["badge"], "CASE STUDY");
        assert!(value["slides"][0].get("notes").is_none());
    }
}
