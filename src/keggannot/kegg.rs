use std::time::Duration;

use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use regex::Regex;
use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::config::Config;
use crate::constants::REFERENCE_PATHWAY_PREFIX;
use crate::enzyme_set::EnzymeListKind;
use crate::errors::{AnnotationError, Result};
use crate::types::{EnzymeId, PathwayId};

/// Finds the pathways that an enzyme or ortholog belongs to.
pub trait PathwayLookup {
    fn pathways_by_enzyme(&self, ec_number: &str) -> Result<Vec<PathwayId>>;

    fn pathways_by_ortholog(&self, ko_number: &str) -> Result<Vec<PathwayId>>;

    fn pathways_for(&self, list_kind: EnzymeListKind, id: &str) -> Result<Vec<PathwayId>> {
        match list_kind {
            EnzymeListKind::EcNumbers => self.pathways_by_enzyme(id),
            EnzymeListKind::KoNumbers => self.pathways_by_ortholog(id),
        }
    }
}

/// Returns an image of a pathway map with the given objects highlighted.
pub trait PathwayRenderer {
    fn mark_pathway(&self, pathway_id: &str, objects: &[EnzymeId]) -> Result<Bytes>;
}

// characters that can't appear unescaped in a URL path segment, plus '+'
// which separates the objects in a marked pathway URL
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ').add(b'"').add(b'#').add(b'%').add(b'+')
    .add(b'/').add(b'<').add(b'>').add(b'?').add(b'`')
    .add(b'{').add(b'}');

lazy_static! {
    static ref MARKED_IMAGE_RE: Regex =
        Regex::new(r#"src="([^"]*mark_pathway[^"]*)""#).unwrap();
}

// input files may say "EC:1.1.1.1" or "KO:K00844"
fn strip_db_prefix<'a>(id: &'a str, prefix: &str) -> Option<&'a str> {
    match id.get(..prefix.len()) {
        Some(head) if head.eq_ignore_ascii_case(prefix) => Some(&id[prefix.len()..]),
        _ => None,
    }
}

fn with_prefix(id: &str, prefix: &str) -> String {
    format!("{}{}", prefix, strip_db_prefix(id, prefix).unwrap_or(id))
}

// the object names used in a marked pathway URL don't have a database prefix
fn object_name(id: &str) -> &str {
    strip_db_prefix(id, "ec:")
        .or_else(|| strip_db_prefix(id, "ko:"))
        .unwrap_or(id)
}

/// Parse the tab separated output of a KEGG "link" request, eg.
/// `ec:2.7.1.1\tpath:map00010`, returning only the reference pathways.
pub fn parse_link_response(body: &str) -> Vec<PathwayId> {
    body.lines()
        .filter_map(|line| line.split('\t').nth(1))
        .map(str::trim)
        .filter(|target| target.starts_with(REFERENCE_PATHWAY_PREFIX))
        .map(PathwayId::from)
        .collect()
}

pub fn parse_marked_image_url(web_url: &str, page: &str) -> Option<String> {
    let src = MARKED_IMAGE_RE.captures(page)?.get(1)?.as_str();

    if src.starts_with("http://") || src.starts_with("https://") {
        Some(src.to_owned())
    } else if src.starts_with('/') {
        Some(format!("{}{}", web_url.trim_end_matches('/'), src))
    } else {
        Some(format!("{}/{}", web_url.trim_end_matches('/'), src))
    }
}

pub struct KeggClient {
    client: Client,
    rest_url: String,
    web_url: String,
}

impl KeggClient {
    pub fn new(config: &Config) -> Result<KeggClient> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| AnnotationError::Configuration(
                format!("failed to create HTTP client: {}", err)))?;

        Ok(KeggClient {
            client,
            rest_url: config.kegg_rest_url.trim_end_matches('/').to_owned(),
            web_url: config.kegg_web_url.trim_end_matches('/').to_owned(),
        })
    }

    fn get(&self, id: &str, url: &str) -> Result<reqwest::blocking::Response> {
        tracing::debug!("GET {}", url);

        match self.client.get(url).send() {
            Ok(res) => Ok(res),
            Err(err) => Err(AnnotationError::remote(id, format!("{} for {}", err, url))),
        }
    }

    fn link_pathways(&self, id: &str, query_id: &str) -> Result<Vec<PathwayId>> {
        if id.trim().is_empty() {
            return Err(AnnotationError::remote(id, "empty identifier"));
        }

        let url = format!("{}/link/pathway/{}", self.rest_url,
                          utf8_percent_encode(query_id, PATH_SEGMENT));
        let res = self.get(id, &url)?;

        let status = res.status();

        // KEGG answers 404 when an identifier isn't linked to anything
        if status == StatusCode::NOT_FOUND {
            return Ok(vec![]);
        }

        if !status.is_success() {
            let message =
                if let Some(reason) = status.canonical_reason() {
                    format!("HTTP request to KEGG failed: {} - {}", status, reason)
                } else {
                    format!("HTTP request to KEGG failed with status code: {}", status)
                };
            return Err(AnnotationError::remote(id, message));
        }

        match res.text() {
            Ok(body) => Ok(parse_link_response(&body)),
            Err(err) => Err(AnnotationError::remote(id, format!("failed to read response: {}", err))),
        }
    }

    fn marked_pathway_url(&self, pathway_id: &str, objects: &[EnzymeId]) -> String {
        let map_id = pathway_id.strip_prefix("path:").unwrap_or(pathway_id);

        let mut url = format!("{}/pathway/{}", self.web_url,
                              utf8_percent_encode(map_id, PATH_SEGMENT));
        for object in objects {
            url.push('+');
            url.push_str(&utf8_percent_encode(object_name(object), PATH_SEGMENT).to_string());
        }

        url
    }
}

impl PathwayLookup for KeggClient {
    fn pathways_by_enzyme(&self, ec_number: &str) -> Result<Vec<PathwayId>> {
        self.link_pathways(ec_number, &with_prefix(ec_number, "ec:"))
    }

    fn pathways_by_ortholog(&self, ko_number: &str) -> Result<Vec<PathwayId>> {
        self.link_pathways(ko_number, &with_prefix(ko_number, "ko:"))
    }
}

impl PathwayRenderer for KeggClient {
    fn mark_pathway(&self, pathway_id: &str, objects: &[EnzymeId]) -> Result<Bytes> {
        let page_url = self.marked_pathway_url(pathway_id, objects);
        let page_res = self.get(pathway_id, &page_url)?;

        if !page_res.status().is_success() {
            return Err(AnnotationError::remote(pathway_id,
                                               format!("HTTP request to KEGG failed: {}",
                                                       page_res.status())));
        }

        let page = page_res.text()
            .map_err(|err| AnnotationError::remote(pathway_id, err))?;

        let Some(image_url) = parse_marked_image_url(&self.web_url, &page) else {
            return Err(AnnotationError::remote(pathway_id,
                                               format!("no pathway image found in {}", page_url)));
        };

        let image_res = self.get(pathway_id, &image_url)?;

        if !image_res.status().is_success() {
            return Err(AnnotationError::remote(pathway_id,
                                               format!("failed to download {}: {}",
                                                       image_url, image_res.status())));
        }

        image_res.bytes()
            .map_err(|err| AnnotationError::remote(pathway_id, err))
    }
}

#[test]
fn test_parse_link_response() {
    let body = "ec:2.7.1.1\tpath:ec00010\nec:2.7.1.1\tpath:map00010\n\
                ec:2.7.1.1\tpath:map01100\n\nnot a link line\n";
    let pathways: Vec<String> =
        parse_link_response(body).iter().map(|p| p.to_string()).collect();
    assert_eq!(pathways, vec!["path:map00010", "path:map01100"]);

    assert!(parse_link_response("").is_empty());
}

#[test]
fn test_parse_marked_image_url() {
    let page = r##"<div><img src="/tmp/mark_pathway1700000000123456/map00010.png" name="pathwayimage" usemap="#mapdata"></div>"##;
    assert_eq!(parse_marked_image_url("https://www.kegg.jp", page),
               Some("https://www.kegg.jp/tmp/mark_pathway1700000000123456/map00010.png".to_owned()));
    assert_eq!(parse_marked_image_url("https://www.kegg.jp", "<html></html>"), None);
}

#[test]
fn test_marked_pathway_url() {
    let client = KeggClient::new(&Config::default()).unwrap();
    let objects: Vec<EnzymeId> = vec!["ec:1.1.1.1".into(), "2.7.1.-".into(), "ko:K00844".into()];
    assert_eq!(client.marked_pathway_url("path:map00010", &objects),
               "https://www.kegg.jp/pathway/map00010+1.1.1.1+2.7.1.-+K00844");
}

#[test]
fn test_with_prefix() {
    assert_eq!(with_prefix("1.1.1.1", "ec:"), "ec:1.1.1.1");
    assert_eq!(with_prefix("ec:1.1.1.1", "ec:"), "ec:1.1.1.1");
    assert_eq!(with_prefix("K00844", "ko:"), "ko:K00844");
    assert_eq!(with_prefix("EC:1.1.1.1", "ec:"), "ec:1.1.1.1");
    assert_eq!(with_prefix("Ko:K00844", "ko:"), "ko:K00844");
    assert_eq!(with_prefix("", "ec:"), "ec:");

    assert_eq!(object_name("EC:2.7.1.1"), "2.7.1.1");
    assert_eq!(object_name("ko:K00844"), "K00844");
    assert_eq!(object_name("1.1.1.-"), "1.1.1.-");
}

#[test]
fn test_blank_identifier_is_not_requested() {
    // nothing listens on the discard port, so any request would fail with a
    // connection error rather than the blank identifier error
    let config = Config {
        kegg_rest_url: "http://127.0.0.1:9".to_owned(),
        timeout_secs: 1,
        ..Config::default()
    };
    let client = KeggClient::new(&config).unwrap();

    for blank_id in ["", "  ", "\t"] {
        match client.pathways_by_enzyme(blank_id) {
            Err(AnnotationError::RemoteService { message, .. }) =>
                assert_eq!(message, "empty identifier"),
            other => panic!("unexpected result for {:?}: {:?}", blank_id, other),
        }
    }

    assert!(matches!(client.pathways_by_ortholog(""),
                     Err(AnnotationError::RemoteService { message, .. })
                         if message == "empty identifier"));
}
