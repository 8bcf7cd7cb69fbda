use std::fmt::{self, Display};
use std::io::BufRead;

use indexmap::IndexSet;

use crate::errors::Result;
use crate::types::EnzymeId;
use crate::utils::{chomp, for_each_line};

// the type of identifiers in a pathway tool input file
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnzymeListKind {
    EcNumbers,
    KoNumbers,
}

impl Display for EnzymeListKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::EcNumbers => "EC numbers",
            Self::KoNumbers => "KO numbers",
        };

        f.write_str(s)
    }
}

/// The unique lines of an input file, in the order they first appear.
/// Blank lines are kept (once).
#[derive(Debug, Default, Clone)]
pub struct EnzymeSet {
    enzymes: IndexSet<EnzymeId>,
}

impl EnzymeSet {
    pub fn build<I, S>(lines: I) -> EnzymeSet
        where I: IntoIterator<Item = S>,
              S: AsRef<str>
    {
        let enzymes = lines.into_iter()
            .map(|line| EnzymeId::from(chomp(line.as_ref())))
            .collect();

        EnzymeSet {
            enzymes,
        }
    }

    pub fn read<R: BufRead>(reader: R) -> Result<EnzymeSet> {
        let mut enzymes = IndexSet::new();
        for_each_line(reader, |line| {
            enzymes.insert(EnzymeId::from(line));
        })?;

        Ok(EnzymeSet {
            enzymes,
        })
    }

    pub fn to_ordered_sequence(&self) -> Vec<EnzymeId> {
        self.enzymes.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnzymeId> {
        self.enzymes.iter()
    }

    pub fn len(&self) -> usize {
        self.enzymes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enzymes.is_empty()
    }
}

#[test]
fn test_build() {
    let enzyme_set = EnzymeSet::build(["E1", "E2", "E1", ""]);
    let expected: Vec<EnzymeId> = vec!["E1".into(), "E2".into(), "".into()];
    assert_eq!(enzyme_set.to_ordered_sequence(), expected);

    let enzyme_set = EnzymeSet::build(["ec:1.1.1.1\r\n", "ec:1.1.1.1\n", "ec:2.7.1.1", "\n", ""]);
    let expected: Vec<EnzymeId> = vec!["ec:1.1.1.1".into(), "ec:2.7.1.1".into(), "".into()];
    assert_eq!(enzyme_set.to_ordered_sequence(), expected);
    assert_eq!(enzyme_set.len(), 3);
}

#[test]
fn test_read() {
    let input = "ko:K00844\nko:K00845\r\nko:K00844\n";
    let enzyme_set = EnzymeSet::read(input.as_bytes()).unwrap();
    let ids: Vec<String> = enzyme_set.iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["ko:K00844", "ko:K00845"]);
}

#[test]
fn test_read_invalid_utf8() {
    let input: &[u8] = b"ec:1.1.1.1\n\xff\nec:1.1.1.1\nec:2.7.1.1";
    let enzyme_set = EnzymeSet::read(input).unwrap();
    assert_eq!(enzyme_set.len(), 3);
    let ids: Vec<String> = enzyme_set.iter().map(|id| id.to_string()).collect();
    assert_eq!(ids, vec!["ec:1.1.1.1", "\u{FFFD}", "ec:2.7.1.1"]);
}
