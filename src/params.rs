/// Attribute names and their external values. A value of `None` is an explicit null.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryParams(Vec<(String, Option<String>)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: Option<String>) {
        self.0.push((name.into(), value));
    }

    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Encode as `key[name]=value` pairs, a null value is encoded as the bare key.
    pub fn to_query_string(&self, param_key: &str) -> String {
        let mut result = String::new();
        for (name, value) in &self.0 {
            if !result.is_empty() {
                result.push('&');
            }
            result.push_str(&urlencoding::encode(&format!("{param_key}[{name}]")));
            if let Some(value) = value {
                result.push('=');
                result.push_str(&urlencoding::encode(value));
            }
        }
        result
    }

    /// Parse the `key[name]=value` pairs of a query string, ignoring all other keys.
    ///
    /// Parsing never fails. Pairs which can't be decoded are dropped, so that their attributes
    /// end up missing while the rest of the search still applies.
    pub fn parse(param_key: &str, query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        let mut result = Self::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, Some(value)),
                None => (pair, None),
            };

            let Some(key) = decode(key) else {
                log::trace!("Ignoring undecodable query parameter '{key}'");
                continue;
            };
            let Some(name) = key
                .strip_prefix(param_key)
                .and_then(|key| key.strip_prefix('['))
                .and_then(|key| key.strip_suffix(']'))
                .filter(|name| !name.is_empty())
            else {
                log::trace!("Ignoring query parameter '{key}'");
                continue;
            };

            let value = match value {
                Some(value) => match decode(value) {
                    Some(value) => Some(value),
                    None => {
                        log::debug!("Unable to decode value of '{name}', treating as missing");
                        continue;
                    }
                },
                None => None,
            };
            result.push(name, value);
        }

        result
    }
}

fn decode(value: &str) -> Option<String> {
    urlencoding::decode(&value.replace('+', " "))
        .map(|value| value.into_owned())
        .ok()
}

impl IntoIterator for QueryParams {
    type Item = (String, Option<String>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, Option<V>)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.map(Into::into)))
                .collect(),
        )
    }
}
