/// Speaker-note overlay state. A session owns exactly one; annotated elements
/// open it through the session, and the modal reads it back each frame.
///
/// `Closed --show--> Open`, `Open --show--> Open` (content replaced),
/// `Open --hide--> Closed`, `Closed --hide--> Closed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NoteOverlay {
    #[default]
    Closed,
    Open {
        title: String,
        body: String,
    },
}

impl NoteOverlay {
    pub fn show(&mut self, title: impl Into<String>, body: impl Into<String>) {
        let title = title.into();
        tracing::debug!(%title, "showing speaker note");
        *self = Self::Open {
            title,
            body: body.into(),
        };
    }

    pub fn hide(&mut self) {
        if self.is_open() {
            tracing::debug!("hiding speaker note");
        }
        *self = Self::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Open { title, .. } => Some(title),
            Self::Closed => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Open { body, .. } => Some(body),
            Self::Closed => None,
        }
    }
}
