use std::cell::{Ref, RefCell};

use crate::text_layout::wrap_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    Info,
    Error,
}

impl Role {
    pub fn label(self) -> Option<&'static str> {
        match self {
            Role::User => Some("You:"),
            Role::Assistant => Some("AI:"),
            Role::Error => Some("Error:"),
            Role::Info => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
}

/// One display row produced by [`Transcript::lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub role: Role,
    pub label: Option<&'static str>,
    pub body: String,
    pub is_spacer: bool,
}

/// Append-only message log.
///
/// Wrapped rows are cached per width. Appending only wraps the new messages.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    wrapped: RefCell<WrapCache>,
}

#[derive(Debug, Clone, Default)]
struct WrapCache {
    width: u16,
    wrapped_messages: usize,
    lines: Vec<TranscriptLine>,
}

impl Transcript {
    pub fn append(&mut self, role: Role, text: impl Into<String>) {
        self.messages.push(Message {
            role,
            text: text.into(),
        });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Display rows for `width` columns, with a spacer row between messages.
    pub fn lines(&self, width: u16) -> Ref<'_, [TranscriptLine]> {
        let width = width.max(1);
        {
            let mut cache = self.wrapped.borrow_mut();
            if cache.width != width {
                *cache = WrapCache {
                    width,
                    ..WrapCache::default()
                };
            }
            let cache = &mut *cache;
            for (idx, message) in self
                .messages
                .iter()
                .enumerate()
                .skip(cache.wrapped_messages)
            {
                if idx > 0 {
                    cache.lines.push(TranscriptLine {
                        role: message.role,
                        label: None,
                        body: String::new(),
                        is_spacer: true,
                    });
                }
                wrap_message(message, width, &mut cache.lines);
            }
            cache.wrapped_messages = self.messages.len();
        }
        Ref::map(self.wrapped.borrow(), |cache| cache.lines.as_slice())
    }
}

fn wrap_message(message: &Message, width: u16, out: &mut Vec<TranscriptLine>) {
    let label = message.role.label();
    let indent = label.map(|l| l.chars().count() + 1).unwrap_or(0);
    let body_width = (usize::from(width).saturating_sub(indent)).max(1) as u16;
    for (line_idx, body) in wrap_text(&message.text, body_width)
        .into_iter()
        .enumerate()
    {
        out.push(TranscriptLine {
            role: message.role,
            label: if line_idx == 0 { label } else { None },
            body: if line_idx == 0 || indent == 0 {
                body
            } else {
                format!("{}{body}", " ".repeat(indent))
            },
            is_spacer: false,
        });
    }
}
