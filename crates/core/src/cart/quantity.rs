//! Parsing of free-text quantity fields.
//!
//! A quantity input may hold anything while the guest is typing ("", "1",
//! "12a"). The UI keeps the raw text and only hands it to
//! [`Cart::commit_quantity_input`](super::Cart::commit_quantity_input) when
//! the field loses focus, so intermediate text never touches the cart.

/// Classified contents of a quantity text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityInput {
    /// A positive quantity.
    Positive(u32),
    /// Zero or a negative number.
    NonPositive,
    /// Empty or non-numeric text.
    Invalid,
}

impl QuantityInput {
    /// Classify raw field text. Surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::Invalid;
        }
        match text.parse::<i64>() {
            Ok(value) if value > 0 => Self::Positive(u32::try_from(value).unwrap_or(u32::MAX)),
            Ok(_) => Self::NonPositive,
            Err(_) => Self::Invalid,
        }
    }

    /// The quantity to keep, or `None` when committing removes the line.
    #[must_use]
    pub const fn quantity(self) -> Option<u32> {
        match self {
            Self::Positive(value) => Some(value),
            Self::NonPositive | Self::Invalid => None,
        }
    }

    /// Whether the field currently holds a usable quantity.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Positive(_))
    }
}
