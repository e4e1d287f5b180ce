use alloc::{borrow::Cow, string::String};
use core::fmt::{self, Display, Formatter};

/// Name under which a provider is registered and its value is cached.
///
/// Identities are plain names, not types: two providers constructing the
/// same Rust type under different names are distinct, and replacing the
/// provider for a name leaves every other name untouched.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identity(Cow<'static, str>);

impl Identity {
    #[inline]
    #[must_use]
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for Identity {
    #[inline]
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for Identity {
    #[inline]
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl From<&Identity> for Identity {
    #[inline]
    fn from(id: &Identity) -> Self {
        id.clone()
    }
}

impl AsRef<str> for Identity {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Identity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Identity;

    use alloc::string::ToString as _;

    #[test]
    fn test_borrowed_and_owned_compare_equal() {
        let borrowed = Identity::from("db");
        let owned = Identity::from("db".to_string());

        assert_eq!(borrowed, owned);
        assert_eq!(borrowed.as_str(), "db");
    }

    #[test]
    fn test_ordering_is_by_name() {
        let mut ids = [Identity::from("svc"), Identity::from("db"), Identity::from("email")];
        ids.sort();

        assert_eq!(ids[0].as_str(), "db");
        assert_eq!(ids[1].as_str(), "email");
        assert_eq!(ids[2].as_str(), "svc");
    }
}
