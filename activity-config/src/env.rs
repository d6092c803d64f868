// Environment variable loading

use std::collections::HashMap;
use std::env;

/// Environment variable loader
///
/// With a prefix, only `PREFIX_*` variables are loaded and the prefix is
/// stripped: `ACTIVITY_SERVER_PORT` becomes `server_port`.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load all matching environment variables, keys lowercased
    pub fn load(&self) -> HashMap<String, String> {
        self.collect(env::vars())
    }

    fn collect(&self, vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
        let mut config = HashMap::new();

        for (key, value) in vars {
            match &self.prefix {
                Some(prefix) => {
                    if let Some(rest) = key
                        .strip_prefix(prefix.as_str())
                        .and_then(|r| r.strip_prefix('_'))
                        && !rest.is_empty()
                    {
                        config.insert(rest.to_lowercase(), value);
                    }
                }
                None => {
                    config.insert(key.to_lowercase(), value);
                }
            }
        }

        config
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Iterator<Item = (String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_prefix_is_stripped_and_lowercased() {
        let loader = EnvLoader::new(Some("ACTIVITY".to_string()));
        let config = loader.collect(vars(&[
            ("ACTIVITY_SERVER_PORT", "9090"),
            ("ACTIVITY_REST_CLIENT_ACTIVITIES_SIMPLE_URL", "http://x"),
            ("ACTIVITYX_OTHER", "no"),
            ("PATH", "/bin"),
        ]));

        assert_eq!(config.len(), 2);
        assert_eq!(config["server_port"], "9090");
        assert_eq!(config["rest_client_activities_simple_url"], "http://x");
    }

    #[test]
    fn test_no_prefix_loads_everything() {
        let loader = EnvLoader::default();
        let config = loader.collect(vars(&[("HOME", "/root"), ("Path", "/bin")]));
        assert_eq!(config["home"], "/root");
        assert_eq!(config["path"], "/bin");
    }
}
