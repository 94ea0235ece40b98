//! crates/logging/src/domain.rs
//! Bounded prefix written in front of every default-emitter message.

use std::fmt;

/// Text prefix written verbatim before each message.
///
/// The prefix carries its own separator, so the default `"hw: "` produces
/// lines such as `hw: device opened`. Input longer than
/// [`LogDomain::MAX_CHARS`] characters is truncated without error.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LogDomain(String);

impl LogDomain {
    /// Maximum number of characters retained.
    pub const MAX_CHARS: usize = 30;

    /// Domain used until a host overrides it.
    pub const DEFAULT: &'static str = "hw: ";

    /// Copies at most [`MAX_CHARS`](Self::MAX_CHARS) characters of `text`.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let end = text
            .char_indices()
            .nth(Self::MAX_CHARS)
            .map_or(text.len(), |(index, _)| index);
        Self(text[..end].to_owned())
    }

    /// Borrows the stored prefix.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reports whether no prefix is written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for LogDomain {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Debug for LogDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LogDomain").field(&self.0).finish()
    }
}

impl fmt::Display for LogDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogDomain {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Values accepted by [`Logger::set_domain`](crate::Logger::set_domain).
///
/// Borrowed or owned text becomes a domain; `None` means no domain was given
/// and is rejected by the setter.
pub trait IntoDomain {
    /// Converts into a domain, or `None` when the caller supplied none.
    fn into_domain(self) -> Option<LogDomain>;
}

impl<T: AsRef<str> + ?Sized> IntoDomain for &T {
    fn into_domain(self) -> Option<LogDomain> {
        Some(LogDomain::new(self.as_ref()))
    }
}

impl IntoDomain for String {
    fn into_domain(self) -> Option<LogDomain> {
        Some(LogDomain::new(&self))
    }
}

impl IntoDomain for LogDomain {
    fn into_domain(self) -> Option<LogDomain> {
        Some(self)
    }
}

impl<T: IntoDomain> IntoDomain for Option<T> {
    fn into_domain(self) -> Option<LogDomain> {
        self.and_then(IntoDomain::into_domain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_domain_is_short_tag() {
        assert_eq!(LogDomain::default().as_str(), "hw: ");
    }

    #[test]
    fn long_input_is_truncated_to_bound() {
        let text = "0123456789".repeat(4);
        let domain = LogDomain::new(&text);
        assert_eq!(domain.as_str(), &text[..30]);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let text = "é".repeat(40);
        let domain = LogDomain::new(&text);
        assert_eq!(domain.as_str().chars().count(), LogDomain::MAX_CHARS);
    }

    #[test]
    fn empty_domain_is_allowed() {
        assert!(LogDomain::new("").is_empty());
    }

    #[test]
    fn borrowed_and_owned_text_convert() {
        let owned = String::from("fx2: ");
        assert_eq!((&owned).into_domain(), Some(LogDomain::new("fx2: ")));
        assert_eq!("la8: ".into_domain(), Some(LogDomain::new("la8: ")));
        assert_eq!(owned.into_domain(), Some(LogDomain::new("fx2: ")));
        assert_eq!(Some("x: ").into_domain(), Some(LogDomain::new("x: ")));
        assert_eq!(None::<String>.into_domain(), None);
    }

    proptest! {
        #[test]
        fn stored_text_is_a_bounded_prefix(text in ".{0,64}") {
            let domain = LogDomain::new(&text);
            let expected: String = text.chars().take(LogDomain::MAX_CHARS).collect();
            prop_assert_eq!(domain.as_str(), expected.as_str());
        }
    }
}
