//! Multi-valued query parameter encoding.

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How a parameter with several values is written into the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum QueryParamStyle {
    /// `k=a&k=b`
    #[default]
    MultiPairs,
    /// `k=a,b`
    CommaSeparated,
    /// `k[]=a&k[]=b`
    ArrayPairs,
}

impl QueryParamStyle {
    /// Flatten named multi-valued parameters into key/value pairs.
    ///
    /// Parameter order is preserved; a parameter without values is dropped.
    pub fn encode(&self, params: &[(String, Vec<String>)]) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        for (name, values) in params {
            if values.is_empty() {
                continue;
            }

            match self {
                Self::MultiPairs => {
                    pairs.extend(values.iter().map(|v| (name.clone(), v.clone())));
                }
                Self::CommaSeparated => {
                    pairs.push((name.clone(), values.join(",")));
                }
                Self::ArrayPairs => {
                    let key = format!("{}[]", name);
                    pairs.extend(values.iter().map(|v| (key.clone(), v.clone())));
                }
            }
        }

        pairs
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MultiPairs => "multi-pairs",
            Self::CommaSeparated => "comma-separated",
            Self::ArrayPairs => "array-pairs",
        }
    }
}

impl fmt::Display for QueryParamStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryParamStyle {
    type Err = String;

    /// Accepts `multi-pairs`, `MULTI_PAIRS` and `multi_pairs` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "multi-pairs" => Ok(Self::MultiPairs),
            "comma-separated" => Ok(Self::CommaSeparated),
            "array-pairs" => Ok(Self::ArrayPairs),
            other => Err(format!("unknown query param style '{}'", other)),
        }
    }
}

impl TryFrom<String> for QueryParamStyle {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Vec<(String, Vec<String>)> {
        vec![
            ("tag".to_string(), vec!["a".to_string(), "b".to_string()]),
            ("empty".to_string(), vec![]),
            ("one".to_string(), vec!["x".to_string()]),
        ]
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_multi_pairs() {
        assert_eq!(
            QueryParamStyle::MultiPairs.encode(&params()),
            pairs(&[("tag", "a"), ("tag", "b"), ("one", "x")])
        );
    }

    #[test]
    fn test_comma_separated() {
        assert_eq!(
            QueryParamStyle::CommaSeparated.encode(&params()),
            pairs(&[("tag", "a,b"), ("one", "x")])
        );
    }

    #[test]
    fn test_array_pairs() {
        assert_eq!(
            QueryParamStyle::ArrayPairs.encode(&params()),
            pairs(&[("tag[]", "a"), ("tag[]", "b"), ("one[]", "x")])
        );
    }

    #[test]
    fn test_parse_spellings() {
        assert_eq!("MULTI_PAIRS".parse(), Ok(QueryParamStyle::MultiPairs));
        assert_eq!("comma-separated".parse(), Ok(QueryParamStyle::CommaSeparated));
        assert_eq!(" array_pairs ".parse(), Ok(QueryParamStyle::ArrayPairs));
        assert!("pairs".parse::<QueryParamStyle>().is_err());
    }

    #[test]
    fn test_deserialize() {
        let style: QueryParamStyle = serde_json::from_str("\"COMMA_SEPARATED\"").unwrap();
        assert_eq!(style, QueryParamStyle::CommaSeparated);
        assert!(serde_json::from_str::<QueryParamStyle>("\"nope\"").is_err());
    }
}
