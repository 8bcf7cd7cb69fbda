use std::fmt::{self, Display};
use std::io::BufRead;

use regex::Regex;

use crate::errors::{AnnotationError, Result};
use crate::tally::FrequencyTally;
use crate::types::Annotation;
use crate::utils::for_each_line;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    EcNumber,
    KoNumber,
    GeneId,
    TaxonId,
}

impl IdentifierKind {
    // Exactly one of the flags must be set.  The option parsing in the
    // binaries passes the raw flag values straight through to here.
    pub fn from_flags(ec: bool, ko: bool, gene: bool, taxon: bool)
                      -> Result<IdentifierKind>
    {
        let selected: Vec<IdentifierKind> =
            [(ec, IdentifierKind::EcNumber), (ko, IdentifierKind::KoNumber),
             (gene, IdentifierKind::GeneId), (taxon, IdentifierKind::TaxonId)]
            .into_iter()
            .filter_map(|(flag, kind)| if flag { Some(kind) } else { None })
            .collect();

        match selected.as_slice() {
            [kind] => Ok(*kind),
            [] => Err(AnnotationError::Configuration(
                "one of the options -k -e -g -t is required".into())),
            _ => Err(AnnotationError::Configuration(
                "options -k -e -g -t are mutually exclusive".into())),
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Self::EcNumber => &*EC_NUMBER_RE,
            Self::KoNumber => &*KO_NUMBER_RE,
            Self::GeneId => &*GENE_ID_RE,
            Self::TaxonId => &*TAXON_ID_RE,
        }
    }
}

impl Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::EcNumber => "EC number",
            Self::KoNumber => "KO number",
            Self::GeneId => "KEGG gene",
            Self::TaxonId => "taxon",
        };

        f.write_str(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractionResult {
    Matched(Annotation),
    NoMatch,
}

impl ExtractionResult {
    pub fn matched(&self) -> Option<&Annotation> {
        match self {
            Self::Matched(annotation) => Some(annotation),
            Self::NoMatch => None,
        }
    }
}

// Each pattern has exactly one capture group holding the token to return.
lazy_static! {
    static ref EC_NUMBER_RE: Regex =
        Regex::new(r"EC.*?(\d+\.(?:\d+|-)\.(?:\d+|-)\.(?:\d+|-))").unwrap();
    static ref KO_NUMBER_RE: Regex = Regex::new(r"(ko:K\d+)").unwrap();
    static ref GENE_ID_RE: Regex =
        Regex::new(r"([a-zA-Z]{3}:(?-u:\w)+_(?-u:\w)+)").unwrap();
    static ref TAXON_ID_RE: Regex = Regex::new(r"taxon:\s*(\d+);").unwrap();
}

/// Return the first identifier of the given kind found in `line`.
pub fn extract(line: &str, kind: IdentifierKind) -> ExtractionResult {
    kind.pattern().captures(line)
        .and_then(|cap| cap.get(1))
        .map(|m| ExtractionResult::Matched(m.as_str().into()))
        .unwrap_or(ExtractionResult::NoMatch)
}

/// Extract from every line of `reader` and record the matches in `tally`.
/// Lines that don't match are skipped.
pub fn tally_lines<R: BufRead>(reader: R, kind: IdentifierKind,
                               tally: &mut FrequencyTally)
                               -> Result<()>
{
    let mut line_count = 0;

    for_each_line(reader, |line| {
        line_count += 1;

        if let ExtractionResult::Matched(annotation) = extract(line, kind) {
            tally.record(annotation);
        }
    })?;

    tracing::debug!("read {} lines, {} distinct {}s so far",
                    line_count, tally.len(), kind);

    Ok(())
}

#[test]
fn test_extract_ec() {
    assert_eq!(extract("EC 1.2.3.4", IdentifierKind::EcNumber),
               ExtractionResult::Matched("1.2.3.4".into()));
    assert_eq!(extract("product=hydrolase;EC=3.1.-.-;note=x", IdentifierKind::EcNumber),
               ExtractionResult::Matched("3.1.-.-".into()));
    assert_eq!(extract("EC 12.34.56.78 and EC 2.2.2.2", IdentifierKind::EcNumber),
               ExtractionResult::Matched("12.34.56.78".into()));
    // the marker has to come first
    assert_eq!(extract("1.2.3.4 EC", IdentifierKind::EcNumber),
               ExtractionResult::NoMatch);
    assert_eq!(extract("EC 1.2.3", IdentifierKind::EcNumber),
               ExtractionResult::NoMatch);
}

#[test]
fn test_extract_ko() {
    assert_eq!(extract("ko:K00001", IdentifierKind::KoNumber),
               ExtractionResult::Matched("ko:K00001".into()));
    assert_eq!(extract("hit\tko:K12345\tko:K00002", IdentifierKind::KoNumber),
               ExtractionResult::Matched("ko:K12345".into()));
    assert_eq!(extract("ko:k00001", IdentifierKind::KoNumber),
               ExtractionResult::NoMatch);
}

#[test]
fn test_extract_gene_and_taxon() {
    assert_eq!(extract("abc:def_ghi", IdentifierKind::GeneId),
               ExtractionResult::Matched("abc:def_ghi".into()));
    assert_eq!(extract("best hit eco:b0001_thrL", IdentifierKind::GeneId),
               ExtractionResult::Matched("eco:b0001_thrL".into()));
    assert_eq!(extract("eco:b0001", IdentifierKind::GeneId),
               ExtractionResult::NoMatch);
    // only ASCII word characters belong to a gene ID
    assert_eq!(extract("eco:b0001_thré", IdentifierKind::GeneId),
               ExtractionResult::Matched("eco:b0001_thr".into()));
    assert_eq!(extract("abc:déf_ghi", IdentifierKind::GeneId),
               ExtractionResult::NoMatch);

    assert_eq!(extract("taxon:123;", IdentifierKind::TaxonId),
               ExtractionResult::Matched("123".into()));
    assert_eq!(extract("db_xref=taxon: 4896;", IdentifierKind::TaxonId),
               ExtractionResult::Matched("4896".into()));
    assert_eq!(extract("taxon:123", IdentifierKind::TaxonId),
               ExtractionResult::NoMatch);
}

#[test]
fn test_tally_lines_invalid_utf8() {
    let input: &[u8] = b"EC 1.1.1.1\nproduct=caf\xe9 oxidase\nEC 2.2.2.2\n";
    let mut tally = FrequencyTally::new();
    tally_lines(input, IdentifierKind::EcNumber, &mut tally).unwrap();

    let annotations: Vec<String> = tally.entries().map(|(a, _)| a.to_string()).collect();
    assert_eq!(annotations, vec!["1.1.1.1", "2.2.2.2"]);
}

#[test]
fn test_from_flags() {
    assert_eq!(IdentifierKind::from_flags(false, true, false, false).unwrap(),
               IdentifierKind::KoNumber);
    assert_eq!(IdentifierKind::from_flags(false, false, false, true).unwrap(),
               IdentifierKind::TaxonId);
    assert!(IdentifierKind::from_flags(false, false, false, false).is_err());
    assert!(IdentifierKind::from_flags(true, false, true, false).is_err());
    assert!(IdentifierKind::from_flags(true, true, true, true).is_err());
}
