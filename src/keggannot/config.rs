use std::fs::File;
use std::io::BufReader;

use crate::constants::{DEFAULT_TIMEOUT_SECS, GLOBAL_PATHWAYS, KEGG_REST_URL, KEGG_WEB_URL};
use crate::errors::{AnnotationError, Result};
use crate::types::PathwayId;

fn default_kegg_rest_url() -> String {
    KEGG_REST_URL.to_owned()
}

fn default_kegg_web_url() -> String {
    KEGG_WEB_URL.to_owned()
}

fn default_global_pathways() -> Vec<PathwayId> {
    GLOBAL_PATHWAYS.iter().map(|s| PathwayId::from(*s)).collect()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

// Optional settings for mark-kegg-pathway, read from a JSON file.  Any
// field missing from the file gets the built-in value.
#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    #[serde(default = "default_kegg_rest_url")]
    pub kegg_rest_url: String,
    #[serde(default = "default_kegg_web_url")]
    pub kegg_web_url: String,
    // pathways removed from the results unless --allpath is used
    #[serde(default = "default_global_pathways")]
    pub global_pathways: Vec<PathwayId>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            kegg_rest_url: default_kegg_rest_url(),
            kegg_web_url: default_kegg_web_url(),
            global_pathways: default_global_pathways(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn read(config_file_name: &str) -> Result<Config> {
        let file = match File::open(config_file_name) {
            Ok(file) => file,
            Err(source) => {
                return Err(AnnotationError::InputUnavailable {
                    path: config_file_name.to_owned(),
                    source,
                });
            }
        };
        let reader = BufReader::new(file);

        match serde_json::from_reader(reader) {
            Ok(config) => Ok(config),
            Err(err) => {
                Err(AnnotationError::Configuration(
                    format!("failed to parse {}: {}", config_file_name, err)))
            },
        }
    }
}

#[test]
fn test_partial_config() {
    let config: Config =
        serde_json::from_str(r#"{ "global_pathways": ["path:map01100"] }"#).unwrap();

    assert_eq!(config.global_pathways.len(), 1);
    assert_eq!(config.global_pathways[0].to_string(), "path:map01100");
    assert_eq!(config.kegg_rest_url, KEGG_REST_URL);
    assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);

    let default_config = Config::default();
    assert_eq!(default_config.global_pathways.len(), 3);
}
