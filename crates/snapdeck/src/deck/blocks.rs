use std::sync::LazyLock;

use regex::Regex;

use super::{Block, DeckError, Inline, ListItem, Note, Slide, SlideKind, inline};

static ORDERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[.)]\s+(.*)$").expect("valid regex"));

/// The most recent element a following `@note` would annotate.
#[derive(Debug, Clone, Copy)]
enum Anchor {
    Block(usize),
    Item(usize, usize),
}

struct SlideBuilder<'a> {
    id: usize,
    kind: Option<SlideKind>,
    eyebrow: Option<String>,
    badge: Option<String>,
    title: Option<(u8, Vec<Inline>)>,
    blocks: Vec<Block>,
    notes: Vec<Note>,
    paragraph: Vec<&'a str>,
    anchor: Option<Anchor>,
    in_callout: bool,
    callout_text: String,
}

/// Parse one raw slide into its title, directives and blocks.
pub fn parse_slide(id: usize, raw: &str) -> Result<Slide, DeckError> {
    let mut builder = SlideBuilder::new(id);

    for (n, line) in raw.lines().enumerate() {
        let line_no = n + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            builder.flush_paragraph();
            builder.in_callout = false;
            continue;
        }

        if let Some(directive) = trimmed.strip_prefix('@') {
            builder.flush_paragraph();
            builder.in_callout = false;
            builder.directive(directive, line_no)?;
            continue;
        }

        if let Some(text) = trimmed.strip_prefix('>') {
            builder.flush_paragraph();
            builder.callout_line(text.trim());
            continue;
        }
        builder.in_callout = false;

        if let Some((level, text)) = heading(trimmed) {
            builder.flush_paragraph();
            builder.heading(level, text);
        } else if let Some(text) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            builder.flush_paragraph();
            builder.list_item(false, text.trim());
        } else if let Some(caps) = ORDERED_RE.captures(trimmed) {
            builder.flush_paragraph();
            let text = caps.get(1).map_or("", |m| m.as_str());
            builder.list_item(true, text.trim());
        } else {
            builder.paragraph.push(trimmed);
        }
    }
    builder.flush_paragraph();

    Ok(builder.finish())
}

/// `#` to `######` followed by a space.
fn heading(line: &str) -> Option<(u8, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let text = line[level..].strip_prefix(' ')?;
    Some((level as u8, text.trim()))
}

impl<'a> SlideBuilder<'a> {
    fn new(id: usize) -> Self {
        Self {
            id,
            kind: None,
            eyebrow: None,
            badge: None,
            title: None,
            blocks: Vec::new(),
            notes: Vec::new(),
            paragraph: Vec::new(),
            anchor: None,
            in_callout: false,
            callout_text: String::new(),
        }
    }

    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let text = self.paragraph.join(" ");
        self.paragraph.clear();
        self.push_block(Block::Paragraph {
            inlines: inline::parse(&text),
            note: None,
        });
    }

    fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
        self.anchor = Some(Anchor::Block(self.blocks.len() - 1));
    }

    fn heading(&mut self, level: u8, text: &str) {
        if level <= 2 && self.title.is_none() {
            self.title = Some((level, inline::parse(text)));
            self.anchor = None;
        } else {
            self.push_block(Block::Subheading {
                inlines: inline::parse(text),
                note: None,
            });
        }
    }

    fn list_item(&mut self, ordered: bool, text: &str) {
        let item = ListItem {
            inlines: inline::parse(text),
            note: None,
        };
        let last_index = self.blocks.len().saturating_sub(1);
        if let Some(Block::List {
            ordered: last_ordered,
            items,
        }) = self.blocks.last_mut()
        {
            if *last_ordered == ordered {
                items.push(item);
                self.anchor = Some(Anchor::Item(last_index, items.len() - 1));
                return;
            }
        }
        self.blocks.push(Block::List {
            ordered,
            items: vec![item],
        });
        self.anchor = Some(Anchor::Item(self.blocks.len() - 1, 0));
    }

    fn callout_line(&mut self, text: &str) {
        if self.in_callout {
            if let Some(Block::Callout { inlines, .. }) = self.blocks.last_mut() {
                self.callout_text.push(' ');
                self.callout_text.push_str(text);
                *inlines = inline::parse(&self.callout_text);
                return;
            }
        }
        self.callout_text = text.to_string();
        self.push_block(Block::Callout {
            inlines: inline::parse(text),
            note: None,
        });
        self.in_callout = true;
    }

    fn directive(&mut self, directive: &str, line: usize) -> Result<(), DeckError> {
        let (name, value) = directive
            .split_once(char::is_whitespace)
            .map_or((directive, ""), |(n, v)| (n, v.trim()));

        match name {
            "note" => self.note(value, line)?,
            "kind" => {
                let kind = SlideKind::from_name(value).ok_or_else(|| DeckError::UnknownKind {
                    slide: self.id,
                    line,
                    kind: value.to_string(),
                })?;
                self.kind = Some(kind);
            }
            "eyebrow" if !value.is_empty() => self.eyebrow = Some(value.to_string()),
            "badge" if !value.is_empty() => self.badge = Some(value.to_string()),
            _ => tracing::warn!(
                slide = self.id,
                line,
                directive = name,
                "ignoring unknown or empty directive"
            ),
        }
        Ok(())
    }

    fn note(&mut self, value: &str, line: usize) -> Result<(), DeckError> {
        let slide = self.id;
        let (title, body) = value
            .split_once('|')
            .map(|(t, b)| (t.trim(), b.trim()))
            .filter(|(t, b)| !t.is_empty() && !b.is_empty())
            .ok_or(DeckError::MalformedNote { slide, line })?;

        let anchor = self.anchor.ok_or(DeckError::OrphanNote { slide, line })?;
        let index = self.notes.len();
        let slot = self
            .note_slot(anchor)
            .ok_or(DeckError::OrphanNote { slide, line })?;
        if slot.is_some() {
            return Err(DeckError::DuplicateNote { slide, line });
        }
        *slot = Some(index);

        self.notes.push(Note {
            title: title.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }

    fn note_slot(&mut self, anchor: Anchor) -> Option<&mut Option<usize>> {
        match anchor {
            Anchor::Block(b) => match self.blocks.get_mut(b)? {
                Block::Subheading { note, .. }
                | Block::Paragraph { note, .. }
                | Block::Callout { note, .. } => Some(note),
                Block::List { .. } => None,
            },
            Anchor::Item(b, i) => match self.blocks.get_mut(b)? {
                Block::List { items, .. } => items.get_mut(i).map(|item| &mut item.note),
                _ => None,
            },
        }
    }

    fn finish(self) -> Slide {
        let (title_level, title) = self.title.unwrap_or((2, Vec::new()));
        let kind = self.kind.unwrap_or(if title_level == 1 {
            SlideKind::Title
        } else {
            SlideKind::Content
        });
        Slide {
            id: self.id,
            kind,
            eyebrow: self.eyebrow,
            badge: self.badge,
            title,
            blocks: self.blocks,
            notes: self.notes,
        }
    }
}
