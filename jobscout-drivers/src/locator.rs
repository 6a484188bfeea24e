use std::fmt;

/// How to find an element on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
    Id(String),
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css(selector.into())
    }

    pub fn xpath(path: impl Into<String>) -> Self {
        Locator::XPath(path.into())
    }

    pub fn id(id: impl Into<String>) -> Self {
        Locator::Id(id.into())
    }

    /// Match elements carrying the given class name.
    pub fn class(name: &str) -> Self {
        Locator::Css(format!(".{name}"))
    }

    pub(crate) fn as_fantoccini(&self) -> fantoccini::Locator<'_> {
        match self {
            Locator::Css(s) => fantoccini::Locator::Css(s),
            Locator::XPath(s) => fantoccini::Locator::XPath(s),
            Locator::Id(s) => fantoccini::Locator::Id(s),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(s) => write!(f, "css `{s}`"),
            Locator::XPath(s) => write!(f, "xpath `{s}`"),
            Locator::Id(s) => write!(f, "id `{s}`"),
        }
    }
}
