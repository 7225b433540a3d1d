//! Selector values produced by the grammar.
//!
//! These are plain data: the parser builds them once per recognized selector
//! and hands them to listeners inside rule events. Nothing here matches
//! selectors against a document.

use core::fmt;

use serde::Serialize;

/// [CSS 2.1 § 5.3 Type selectors](https://www.w3.org/TR/CSS2/selector.html#type-selectors)
///
/// The element part of a simple selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ElementName {
    /// A named element type, e.g. `div`.
    Named(String),
    /// [§ 5.3 Universal selector](https://www.w3.org/TR/CSS2/selector.html#universal-selector) `*`.
    Universal,
}

impl ElementName {
    /// Source text of the element name.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Universal => "*",
        }
    }
}

/// One modifier of a simple selector, holding its rendered source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Modifier {
    /// [§ 5.9 ID selectors](https://www.w3.org/TR/CSS2/selector.html#id-selectors), e.g. `#main`.
    Id(String),
    /// [§ 5.8.3 Class selectors](https://www.w3.org/TR/CSS2/selector.html#class-html), e.g. `.note`.
    Class(String),
    /// [§ 5.8 Attribute selectors](https://www.w3.org/TR/CSS2/selector.html#attribute-selectors),
    /// e.g. `[lang|="en"]`.
    Attribute(String),
    /// [§ 5.10 Pseudo-elements and pseudo-classes](https://www.w3.org/TR/CSS2/selector.html#pseudo-elements),
    /// e.g. `:hover` or `:lang(fr)`.
    Pseudo(String),
}

impl Modifier {
    /// Rendered text of the modifier, including its leading punctuation.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Id(text) | Self::Class(text) | Self::Attribute(text) | Self::Pseudo(text) => {
                text
            }
        }
    }
}

/// [§ 5.2 Selector syntax](https://www.w3.org/TR/CSS2/selector.html#selector-syntax)
///
/// "A simple selector is either a type selector or universal selector followed
/// immediately by zero or more attribute selectors, ID selectors, or
/// pseudo-classes, in any order."
///
/// The canonical text is computed at construction and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorUnit {
    element_name: Option<ElementName>,
    modifiers: Vec<Modifier>,
    text: String,
}

impl SelectorUnit {
    /// Build a unit. Returns `None` when there is neither an element name nor
    /// a modifier, since such a unit cannot be written in CSS.
    #[must_use]
    pub fn new(element_name: Option<ElementName>, modifiers: Vec<Modifier>) -> Option<Self> {
        if element_name.is_none() && modifiers.is_empty() {
            return None;
        }
        let mut text = element_name
            .as_ref()
            .map(ElementName::text)
            .unwrap_or_default()
            .to_string();
        for modifier in &modifiers {
            text.push_str(modifier.text());
        }
        Some(Self {
            element_name,
            modifiers,
            text,
        })
    }

    /// The element name, if one was written.
    #[must_use]
    pub const fn element_name(&self) -> Option<&ElementName> {
        self.element_name.as_ref()
    }

    /// The modifiers in source order.
    #[must_use]
    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    /// Element name followed by every modifier, e.g. `a.external:hover`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for SelectorUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// [§ 5.2 Selector syntax](https://www.w3.org/TR/CSS2/selector.html#selector-syntax)
///
/// "Combinators are: white space, 'greater-than sign' (U+003E, >), and 'plus
/// sign' (U+002B, +)."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Combinator {
    /// [§ 5.5 Descendant selectors](https://www.w3.org/TR/CSS2/selector.html#descendant-selectors): whitespace.
    Descendant,
    /// [§ 5.6 Child selectors](https://www.w3.org/TR/CSS2/selector.html#child-selectors): `>`.
    Child,
    /// [§ 5.7 Adjacent sibling selectors](https://www.w3.org/TR/CSS2/selector.html#adjacent-selectors): `+`.
    AdjacentSibling,
}

impl Combinator {
    /// Map the source text of an explicit combinator token.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            ">" => Some(Self::Child),
            "+" => Some(Self::AdjacentSibling),
            _ => None,
        }
    }

    /// The combinator as it is written between two units.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Descendant => " ",
            Self::Child => ">",
            Self::AdjacentSibling => "+",
        }
    }
}

/// An element of a selector chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SelectorPart {
    /// A simple selector.
    Unit(SelectorUnit),
    /// A combinator joining the units on either side.
    Combinator(Combinator),
}

/// "A selector is a chain of one or more simple selectors separated by combinators."
///
/// Always starts with a unit and alternates unit, combinator, unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selector {
    parts: Vec<SelectorPart>,
}

impl Selector {
    /// A selector consisting of a single simple selector.
    #[must_use]
    pub fn new(first: SelectorUnit) -> Self {
        Self {
            parts: vec![SelectorPart::Unit(first)],
        }
    }

    /// Extend the chain with `combinator` and the unit it leads to.
    pub fn push(&mut self, combinator: Combinator, unit: SelectorUnit) {
        self.parts.push(SelectorPart::Combinator(combinator));
        self.parts.push(SelectorPart::Unit(unit));
    }

    /// The chain in source order.
    #[must_use]
    pub fn parts(&self) -> &[SelectorPart] {
        &self.parts
    }

    /// Number of parts, units and combinators together.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always false: a selector holds at least one unit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterate over the simple selectors, skipping combinators.
    pub fn units(&self) -> impl Iterator<Item = &SelectorUnit> {
        self.parts.iter().filter_map(|part| match part {
            SelectorPart::Unit(unit) => Some(unit),
            SelectorPart::Combinator(_) => None,
        })
    }

    /// Iterate over the combinators in source order.
    pub fn combinators(&self) -> impl Iterator<Item = Combinator> + '_ {
        self.parts.iter().filter_map(|part| match part {
            SelectorPart::Combinator(combinator) => Some(*combinator),
            SelectorPart::Unit(_) => None,
        })
    }
}

impl fmt::Display for Selector {
    /// Renders with single spaces around explicit combinators, e.g. `ul > li a`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                SelectorPart::Unit(unit) => f.write_str(unit.text())?,
                SelectorPart::Combinator(Combinator::Descendant) => f.write_str(" ")?,
                SelectorPart::Combinator(combinator) => write!(f, " {} ", combinator.symbol())?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(name: &str) -> SelectorUnit {
        SelectorUnit::new(Some(ElementName::Named(name.to_string())), Vec::new()).unwrap()
    }

    #[test]
    fn test_unit_text_concatenates_in_source_order() {
        let unit = SelectorUnit::new(
            Some(ElementName::Named("a".to_string())),
            vec![
                Modifier::Class(".ext".to_string()),
                Modifier::Attribute("[href]".to_string()),
                Modifier::Pseudo(":hover".to_string()),
            ],
        )
        .unwrap();
        assert_eq!(unit.text(), "a.ext[href]:hover");
    }

    #[test]
    fn test_unit_without_element_name() {
        let unit = SelectorUnit::new(None, vec![Modifier::Id("#nav".to_string())]).unwrap();
        assert_eq!(unit.text(), "#nav");
        assert!(unit.element_name().is_none());
    }

    #[test]
    fn test_empty_unit_is_rejected() {
        assert!(SelectorUnit::new(None, Vec::new()).is_none());
    }

    #[test]
    fn test_push_extends_chain_in_order() {
        let mut selector = Selector::new(unit("ul"));
        selector.push(Combinator::Child, unit("li"));
        selector.push(Combinator::Descendant, unit("a"));

        assert_eq!(selector.len(), 5);
        assert_eq!(selector.to_string(), "ul > li a");
        assert_eq!(
            selector.combinators().collect::<Vec<_>>(),
            vec![Combinator::Child, Combinator::Descendant]
        );
    }
}
