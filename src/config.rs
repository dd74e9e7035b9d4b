use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;
use serde::Serialize;
use strum_macros::{Display, EnumString};
use thiserror::Error;

pub const HTTP_BASIC_AUTH_USERNAME: &str = "httpBasicAuthUsername";
pub const HTTP_BASIC_AUTH_PASSWORD: &str = "httpBasicAuthPassword";
pub const DATA_MODE: &str = "dataMode";
pub const DATA_TYPE: &str = "dataType";
pub const BASE_URL: &str = "baseURL";
pub const CLASSIFICATION_MARKING: &str = "classificationMarking";
pub const REQUEST_TIMEOUT: &str = "requestTimeout";

pub const DATA_MODE_VALUES: &[&str] = &["TEST", "REAL", "SIMULATED", "EXERCISE"];
pub const DATA_TYPE_VALUES: &[&str] = &["AIS", "ELSET", "EPHEMERIS"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing or invalid credentials")]
    MissingCredentials,
    #[error("unsupported data mode ({0})")]
    UnsupportedDataMode(String),
    #[error("unsupported data type ({0})")]
    UnsupportedDataType(String),
    #[error("invalid base URL ({url}); err: {message}")]
    InvalidBaseUrl { url: String, message: String },
    #[error("invalid request timeout ({value}): {message}")]
    InvalidTimeout { value: String, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("config file must be a mapping of keys to scalar values")]
    NotAMapping,
}

/// UDL data mode attached to every submitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum DataMode {
    Test,
    Real,
    Simulated,
    Exercise,
}

/// Kind of Spire record flowing through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum DataType {
    Ais,
    Elset,
    Ephemeris,
}

impl DataType {
    /// Resolve a configured data type, rejecting anything outside [`DATA_TYPE_VALUES`].
    pub fn from_config(value: &str) -> Result<Self, ConfigError> {
        if !supported_string_values(value, DATA_TYPE_VALUES) {
            return Err(ConfigError::UnsupportedDataType(value.to_string()));
        }
        DataType::from_str(value.trim())
            .map_err(|_| ConfigError::UnsupportedDataType(value.to_string()))
    }
}

/// Case-insensitive, whitespace-trimming membership check against upper-case values.
pub fn supported_string_values(check: &str, supported: &[&str]) -> bool {
    let check = check.trim().to_uppercase();
    supported.iter().any(|s| *s == check)
}

#[derive(Debug, Clone, Serialize)]
pub struct Parameter {
    pub name: &'static str,
    pub default: Option<&'static str>,
    pub required: bool,
    pub description: &'static str,
}

const PARAMETERS: &[Parameter] = &[
    Parameter {
        name: HTTP_BASIC_AUTH_USERNAME,
        default: None,
        required: true,
        description: "The HTTP Basic Auth Username to use when accessing the UDL.",
    },
    Parameter {
        name: HTTP_BASIC_AUTH_PASSWORD,
        default: None,
        required: true,
        description: "The HTTP Basic Auth Password to use when accessing the UDL.",
    },
    Parameter {
        name: DATA_MODE,
        default: Some("TEST"),
        required: false,
        description: "The Data Mode to use when submitting requests to the UDL. Acceptable values are REAL, TEST, SIMULATED and EXERCISE.",
    },
    Parameter {
        name: DATA_TYPE,
        default: Some("AIS"),
        required: false,
        description: "The Data Type that is being submitted to the UDL. Acceptable values are AIS, ELSET and EPHEMERIS.",
    },
    Parameter {
        name: BASE_URL,
        default: Some("https://unifieddatalibrary.com"),
        required: false,
        description: "The Base URL to use to access the UDL.",
    },
    Parameter {
        name: CLASSIFICATION_MARKING,
        default: Some("U"),
        required: false,
        description: "Classification marking of the data in IC/CAPCO Portion-marked format.",
    },
    Parameter {
        name: REQUEST_TIMEOUT,
        default: Some("3s"),
        required: false,
        description: "Timeout applied to each UDL request, e.g. 3s or 1m 30s.",
    },
];

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub http_basic_auth_username: String,
    pub http_basic_auth_password: String,
    pub data_mode: DataMode,
    /// Kept as configured; resolved through [`DataType::from_config`] on every write.
    pub data_type: String,
    pub base_url: String,
    pub classification_marking: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn parameters() -> &'static [Parameter] {
        PARAMETERS
    }

    fn default_for(name: &str) -> &'static str {
        PARAMETERS
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.default)
            .unwrap_or_default()
    }

    /// Validate a raw key/value configuration, filling in defaults for absent keys.
    pub fn parse(cfg: &HashMap<String, String>) -> Result<Self, ConfigError> {
        for key in cfg.keys() {
            if !PARAMETERS.iter().any(|p| p.name == key) {
                log::warn!("Ignoring unknown configuration key: {}", key);
            }
        }

        let username = cfg
            .get(HTTP_BASIC_AUTH_USERNAME)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingCredentials)?;
        let password = cfg
            .get(HTTP_BASIC_AUTH_PASSWORD)
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::MissingCredentials)?;

        let value = |name: &str| -> String {
            cfg.get(name)
                .cloned()
                .unwrap_or_else(|| Self::default_for(name).to_string())
        };

        let dm = value(DATA_MODE);
        if !supported_string_values(&dm, DATA_MODE_VALUES) {
            return Err(ConfigError::UnsupportedDataMode(dm));
        }
        let data_mode =
            DataMode::from_str(dm.trim()).map_err(|_| ConfigError::UnsupportedDataMode(dm))?;

        let dt = value(DATA_TYPE);
        let data_type = DataType::from_config(&dt)?.to_string();

        let base_url = value(BASE_URL);
        Url::parse(&base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            message: e.to_string(),
        })?;

        let timeout = value(REQUEST_TIMEOUT);
        let request_timeout =
            humantime::parse_duration(timeout.trim()).map_err(|e| ConfigError::InvalidTimeout {
                value: timeout.clone(),
                message: e.to_string(),
            })?;

        Ok(Config {
            http_basic_auth_username: username.clone(),
            http_basic_auth_password: password.clone(),
            data_mode,
            data_type,
            base_url,
            classification_marking: value(CLASSIFICATION_MARKING),
            request_timeout,
        })
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&parse_yaml_map(&content)?)
    }
}

fn parse_yaml_map(content: &str) -> Result<HashMap<String, String>, ConfigError> {
    let root: serde_yaml::Value = serde_yaml::from_str(content)?;
    let mapping = root.as_mapping().ok_or(ConfigError::NotAMapping)?;

    let mut map = HashMap::new();
    for (key, value) in mapping {
        let key = yaml_scalar_to_str(key).ok_or(ConfigError::NotAMapping)?;
        let value = yaml_scalar_to_str(value).ok_or(ConfigError::NotAMapping)?;
        map.insert(key, value);
    }
    Ok(map)
}

/// Scalars only; `null` becomes an empty string so required keys still fail validation.
fn yaml_scalar_to_str(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => Some(String::new()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_str(&tagged.value),
        serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_config() -> HashMap<String, String> {
        [
            (BASE_URL, "https://example.com"),
            (HTTP_BASIC_AUTH_USERNAME, "user"),
            (HTTP_BASIC_AUTH_PASSWORD, "pass"),
            (DATA_TYPE, "AIS"),
            (DATA_MODE, "TEST"),
            (CLASSIFICATION_MARKING, "U"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_parse_config() {
        let got = Config::parse(&example_config()).unwrap();
        let want = Config {
            http_basic_auth_username: "user".into(),
            http_basic_auth_password: "pass".into(),
            data_mode: DataMode::Test,
            data_type: "AIS".into(),
            base_url: "https://example.com".into(),
            classification_marking: "U".into(),
            request_timeout: Duration::from_secs(3),
        };
        assert_eq!(got, want);
    }

    #[test]
    fn test_parse_config_with_spire_classification_marking() {
        let mut cfg = example_config();
        cfg.insert(CLASSIFICATION_MARKING.into(), "U//PR-SPIRE-AIS".into());
        let got = Config::parse(&cfg).unwrap();
        assert_eq!(got.classification_marking, "U//PR-SPIRE-AIS");
    }

    #[test]
    fn test_defaults_applied() {
        let cfg: HashMap<String, String> = [
            (HTTP_BASIC_AUTH_USERNAME.to_string(), "user".to_string()),
            (HTTP_BASIC_AUTH_PASSWORD.to_string(), "pass".to_string()),
        ]
        .into_iter()
        .collect();
        let got = Config::parse(&cfg).unwrap();
        assert_eq!(got.data_mode, DataMode::Test);
        assert_eq!(got.data_type, "AIS");
        assert_eq!(got.base_url, "https://unifieddatalibrary.com");
        assert_eq!(got.classification_marking, "U");
        assert_eq!(got.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_data_mode_normalized() {
        let mut cfg = example_config();
        cfg.insert(DATA_MODE.into(), " exercise ".into());
        cfg.insert(DATA_TYPE.into(), "ephemeris".into());
        let got = Config::parse(&cfg).unwrap();
        assert_eq!(got.data_mode, DataMode::Exercise);
        assert_eq!(got.data_type, "EPHEMERIS");
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let mut cfg = example_config();
        cfg.remove(HTTP_BASIC_AUTH_PASSWORD);
        assert!(matches!(
            Config::parse(&cfg),
            Err(ConfigError::MissingCredentials)
        ));

        let mut cfg = example_config();
        cfg.insert(HTTP_BASIC_AUTH_USERNAME.into(), String::new());
        assert!(matches!(
            Config::parse(&cfg),
            Err(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn test_missing_credentials_rejected_before_other_fields() {
        let cfg: HashMap<String, String> = [
            (DATA_MODE.to_string(), "BOGUS".to_string()),
            (BASE_URL.to_string(), "not a url".to_string()),
        ]
        .into_iter()
        .collect();
        assert!(matches!(
            Config::parse(&cfg),
            Err(ConfigError::MissingCredentials)
        ));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut cfg = example_config();
        cfg.insert(DATA_MODE.into(), "LIVE".into());
        assert!(matches!(
            Config::parse(&cfg),
            Err(ConfigError::UnsupportedDataMode(_))
        ));

        let mut cfg = example_config();
        cfg.insert(DATA_TYPE.into(), "XML".into());
        assert!(matches!(
            Config::parse(&cfg),
            Err(ConfigError::UnsupportedDataType(_))
        ));

        let mut cfg = example_config();
        cfg.insert(BASE_URL.into(), "not a url".into());
        assert!(matches!(
            Config::parse(&cfg),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        let mut cfg = example_config();
        cfg.insert(REQUEST_TIMEOUT.into(), "soon".into());
        assert!(matches!(
            Config::parse(&cfg),
            Err(ConfigError::InvalidTimeout { .. })
        ));
    }

    #[test]
    fn test_enums_from_str() {
        assert_eq!(DataMode::from_str("simulated").unwrap(), DataMode::Simulated);
        assert_eq!(DataMode::Real.to_string(), "REAL");
        assert_eq!(DataType::from_str("Elset").unwrap(), DataType::Elset);
        assert!(DataType::from_str("XML").is_err());
        assert!(matches!(
            DataType::from_config(" ephemeris "),
            Ok(DataType::Ephemeris)
        ));
    }

    #[test]
    fn test_supported_string_values() {
        let cases = [
            ("TEST", true),
            ("test", true),
            (" TEST ", true),
            (" test ", true),
            ("UNKNOWN", false),
            ("", false),
        ];
        for (check, want) in cases {
            assert_eq!(
                supported_string_values(check, DATA_MODE_VALUES),
                want,
                "check {:?}",
                check
            );
        }
    }

    #[test]
    fn test_parameters_table() {
        let params = Config::parameters();
        assert_eq!(params.len(), 7);
        let required: Vec<_> = params.iter().filter(|p| p.required).map(|p| p.name).collect();
        assert_eq!(required, vec![HTTP_BASIC_AUTH_USERNAME, HTTP_BASIC_AUTH_PASSWORD]);
    }

    #[test]
    fn test_from_yaml_mapping() {
        let yaml = "httpBasicAuthUsername: user\nhttpBasicAuthPassword: pass\ndataType: elset\nrequestTimeout: 10s\n";
        let map = parse_yaml_map(yaml).unwrap();
        let cfg = Config::parse(&map).unwrap();
        assert_eq!(cfg.data_type, "ELSET");
        assert_eq!(cfg.request_timeout, Duration::from_secs(10));

        assert!(matches!(
            parse_yaml_map("- a\n- b\n"),
            Err(ConfigError::NotAMapping)
        ));
    }
}
