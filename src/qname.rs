use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

pub const XS_NS: &str = "http://www.w3.org/2001/XMLSchema";
pub const XDT_NS: &str = "http://www.w3.org/2003/11/xpath-datatypes";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// A qualified name. Identity is the pair (namespace URI, local part); the
/// prefix is carried only for display.
#[derive(Debug, Clone)]
pub struct QName {
    pub prefix: Option<String>,
    pub uri: String,
    pub local: String,
}

impl QName {
    pub fn new(prefix: Option<&str>, uri: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            uri: uri.into(),
            local: local.into(),
        }
    }

    /// A name in no namespace.
    pub fn local(local: impl Into<String>) -> Self {
        Self::new(None, "", local)
    }

    pub fn xs(local: impl Into<String>) -> Self {
        Self::new(Some("xs"), XS_NS, local)
    }

    pub fn xdt(local: impl Into<String>) -> Self {
        Self::new(Some("xdt"), XDT_NS, local)
    }

    fn key(&self) -> (&str, &str) {
        (&self.uri, &self.local)
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for QName {}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for QName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => write!(f, "{prefix}:{}", self.local),
            _ => write!(f, "{}", self.local),
        }
    }
}

/// Name test of an element or attribute type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NameTest {
    Wildcard,
    Name(QName),
}

impl NameTest {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, NameTest::Wildcard)
    }

    pub fn name(&self) -> Option<&QName> {
        match self {
            NameTest::Wildcard => None,
            NameTest::Name(qn) => Some(qn),
        }
    }
}

impl From<QName> for NameTest {
    fn from(qn: QName) -> Self {
        NameTest::Name(qn)
    }
}

/// Prefix to namespace URI bindings used when reading qualified names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespaces {
    bindings: BTreeMap<String, String>,
}

impl Default for Namespaces {
    fn default() -> Self {
        let mut bindings = BTreeMap::new();
        bindings.insert("xs".to_string(), XS_NS.to_string());
        bindings.insert("xdt".to_string(), XDT_NS.to_string());
        bindings.insert("xml".to_string(), XML_NS.to_string());
        Self { bindings }
    }
}

impl Namespaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, prefix: impl Into<String>, uri: impl Into<String>) {
        self.bindings.insert(prefix.into(), uri.into());
    }

    pub fn uri(&self, prefix: &str) -> Option<&str> {
        self.bindings.get(prefix).map(String::as_str)
    }

    /// Resolves `prefix:local` or an unprefixed `local` (no namespace).
    /// Returns `None` when the prefix is unbound.
    pub fn resolve(&self, lexical: &str) -> Option<QName> {
        match lexical.split_once(':') {
            Some((prefix, local)) => {
                let uri = self.uri(prefix)?;
                Some(QName::new(Some(prefix), uri, local))
            }
            None => Some(QName::local(lexical)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}
