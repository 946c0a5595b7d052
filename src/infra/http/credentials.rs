use std::fmt;

use reqwest::header::HeaderValue;

use super::fetch::FetchError;

/// Request-scoped session cookies forwarded to the posts API.
///
/// Passed explicitly into every write so the session dependency is visible in
/// the call signature.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// `(name, value)`; `None` for a bare segment sent without `=`.
    cookies: Vec<(String, Option<String>)>,
}

impl Credentials {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cookies: pairs
                .into_iter()
                .map(|(name, value)| (name.into(), Some(value.into())))
                .collect(),
        }
    }

    /// Parse a raw `Cookie` header (`a=1; b=2`).
    ///
    /// Segments with an empty name are skipped. A bare segment such as `flag`
    /// is kept as-is and rendered back without `=`.
    pub fn parse_cookie_header(raw: &str) -> Self {
        let cookies = raw
            .split(';')
            .filter_map(|segment| {
                let segment = segment.trim();
                let (name, value) = match segment.split_once('=') {
                    Some((name, value)) => (name.trim(), Some(value.trim().to_string())),
                    None => (segment, None),
                };
                (!name.is_empty()).then(|| (name.to_string(), value))
            })
            .collect();
        Self { cookies }
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.iter().map(|(name, _)| name.as_str())
    }

    /// Render as a `Cookie` header value, or `None` when there is nothing to send.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let rendered = self
            .cookies
            .iter()
            .map(|(name, value)| match value {
                Some(value) => format!("{name}={value}"),
                None => name.clone(),
            })
            .collect::<Vec<_>>()
            .join("; ");
        Some(rendered)
    }

    pub fn header_value(&self) -> Result<Option<HeaderValue>, FetchError> {
        let Some(raw) = self.cookie_header() else {
            return Ok(None);
        };
        let mut value = HeaderValue::from_str(&raw)?;
        value.set_sensitive(true);
        Ok(Some(value))
    }
}

// Cookie values are session secrets; only names are printed.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("cookies", &self.names().collect::<Vec<_>>())
            .finish()
    }
}
