//! Structural events and the listener registry that delivers them.
//!
//! The parser does not retain anything it recognizes. Each construct is
//! reported once, synchronously, to every listener registered for its kind.

use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::selector::Selector;
use crate::values::{ExprPart, MediaList};

/// The kind tag of a [`ParseEvent`], used to register listeners.
///
/// Displays and parses as the lowercase event name, e.g. `startrule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Parsing began.
    StartStylesheet,
    /// An `@charset` rule.
    Charset,
    /// An `@import` rule.
    Import,
    /// Opening of an `@media` block.
    StartMedia,
    /// Closing of an `@media` block.
    EndMedia,
    /// Opening of an `@page` block.
    StartPage,
    /// Closing of an `@page` block.
    EndPage,
    /// Opening of a rule set.
    StartRule,
    /// Closing of a rule set.
    EndRule,
    /// A declaration.
    Property,
    /// The whole input was consumed.
    EndStylesheet,
}

/// A structural notification fired while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParseEvent {
    /// Parsing began.
    StartStylesheet,
    /// `@charset "<charset>";`
    Charset {
        /// The declared encoding, without quotes.
        charset: String,
    },
    /// `@import <uri> <media>?;`
    Import {
        /// The imported URI, unwrapped from `url(...)` and quotes.
        uri: String,
        /// Media the import is restricted to, if any were written.
        media: Option<MediaList>,
    },
    /// `@media <media> {`
    StartMedia {
        /// The media list of the block.
        media: MediaList,
    },
    /// The `}` closing an `@media` block.
    EndMedia {
        /// Same media list as the matching [`ParseEvent::StartMedia`].
        media: MediaList,
    },
    /// `@page :<pseudo>? {`
    StartPage {
        /// The pseudo page name, e.g. `first`.
        pseudo: Option<String>,
    },
    /// The `}` closing an `@page` block.
    EndPage {
        /// Same pseudo page as the matching [`ParseEvent::StartPage`].
        pseudo: Option<String>,
    },
    /// `<selectors> {`
    StartRule {
        /// The comma-separated selectors of the rule set.
        selectors: Vec<Selector>,
    },
    /// The `}` closing a rule set.
    EndRule {
        /// Same selectors as the matching [`ParseEvent::StartRule`].
        selectors: Vec<Selector>,
    },
    /// `<property>: <value> !important?`
    Property {
        /// The property name as written.
        property: String,
        /// Terms and operators of the value, never empty.
        value: Vec<ExprPart>,
        /// Whether `!important` was present.
        important: bool,
    },
    /// The whole input was consumed.
    EndStylesheet,
}

impl ParseEvent {
    /// The kind tag of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::StartStylesheet => EventKind::StartStylesheet,
            Self::Charset { .. } => EventKind::Charset,
            Self::Import { .. } => EventKind::Import,
            Self::StartMedia { .. } => EventKind::StartMedia,
            Self::EndMedia { .. } => EventKind::EndMedia,
            Self::StartPage { .. } => EventKind::StartPage,
            Self::EndPage { .. } => EventKind::EndPage,
            Self::StartRule { .. } => EventKind::StartRule,
            Self::EndRule { .. } => EventKind::EndRule,
            Self::Property { .. } => EventKind::Property,
            Self::EndStylesheet => EventKind::EndStylesheet,
        }
    }
}

type Callback<'h> = Box<dyn FnMut(&ParseEvent) + 'h>;

/// Registered callbacks, invoked in registration order.
///
/// A callback registered with `None` receives every event.
#[derive(Default)]
pub struct Listeners<'h> {
    entries: Vec<(Option<EventKind>, Callback<'h>)>,
}

impl<'h> Listeners<'h> {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register `callback` for events of `kind`.
    pub fn on(&mut self, kind: EventKind, callback: impl FnMut(&ParseEvent) + 'h) {
        self.entries.push((Some(kind), Box::new(callback)));
    }

    /// Register `callback` for every event.
    pub fn on_any(&mut self, callback: impl FnMut(&ParseEvent) + 'h) {
        self.entries.push((None, Box::new(callback)));
    }

    /// Deliver `event` to every matching callback.
    pub fn fire(&mut self, event: &ParseEvent) {
        let kind = event.kind();
        for (filter, callback) in &mut self.entries {
            if filter.is_none_or(|wanted| wanted == kind) {
                callback(event);
            }
        }
    }

    /// Number of registered callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no callback is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_names_round_trip_through_strum() {
        assert_eq!(EventKind::StartRule.to_string(), "startrule");
        assert_eq!("endstylesheet".parse::<EventKind>(), Ok(EventKind::EndStylesheet));
        assert!("start-rule".parse::<EventKind>().is_err());
    }

    #[test]
    fn test_fire_filters_by_kind() {
        let mut seen = Vec::new();
        let mut everything = 0;
        {
            let mut listeners = Listeners::new();
            listeners.on(EventKind::Charset, |event| seen.push(event.clone()));
            listeners.on_any(|_| everything += 1);
            listeners.fire(&ParseEvent::StartStylesheet);
            listeners.fire(&ParseEvent::Charset {
                charset: "UTF-8".to_string(),
            });
            assert_eq!(listeners.len(), 2);
        }
        assert_eq!(
            seen,
            vec![ParseEvent::Charset {
                charset: "UTF-8".to_string()
            }]
        );
        assert_eq!(everything, 2);
    }
}
