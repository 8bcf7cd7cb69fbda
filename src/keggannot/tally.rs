use std::io::Write;

use indexmap::IndexMap;

use crate::types::{Annotation, Count};

/// Counts of each annotation, kept in the order the annotations were first
/// seen.
#[derive(Debug, Default, Clone)]
pub struct FrequencyTally {
    counts: IndexMap<Annotation, Count>,
}

impl FrequencyTally {
    pub fn new() -> FrequencyTally {
        FrequencyTally {
            counts: IndexMap::new(),
        }
    }

    pub fn record(&mut self, annotation: impl Into<Annotation>) {
        *self.counts.entry(annotation.into()).or_insert(0) += 1;
    }

    pub fn count(&self, annotation: &str) -> Count {
        self.counts.get(annotation).copied().unwrap_or(0)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Annotation, Count)> + '_ {
        self.counts.iter().map(|(annotation, count)| (annotation, *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<A: Into<Annotation>> FromIterator<A> for FrequencyTally {
    fn from_iter<I: IntoIterator<Item = A>>(iter: I) -> Self {
        let mut tally = FrequencyTally::new();
        for annotation in iter {
            tally.record(annotation);
        }
        tally
    }
}

/// Write one line per distinct annotation.  With `with_counts` each line is
/// prefixed by the count and a tab.
pub fn write_tally(tally: &FrequencyTally, with_counts: bool,
                   out: &mut dyn Write)
                   -> std::io::Result<()>
{
    for (annotation, count) in tally.entries() {
        if with_counts {
            writeln!(out, "{}\t{}", count, annotation)?;
        } else {
            writeln!(out, "{}", annotation)?;
        }
    }

    Ok(())
}

#[test]
fn test_record() {
    let tally: FrequencyTally = ["a", "b", "a", "c", "a"].into_iter().collect();

    let entries: Vec<(String, Count)> =
        tally.entries().map(|(a, c)| (a.to_string(), c)).collect();
    assert_eq!(entries, vec![("a".to_owned(), 3), ("b".to_owned(), 1),
                             ("c".to_owned(), 1)]);

    // iterating again gives the same sequence
    assert_eq!(tally.entries().count(), 3);
    assert_eq!(tally.entries().next().map(|(a, c)| (a.to_string(), c)),
               Some(("a".to_owned(), 3)));

    assert_eq!(tally.count("b"), 1);
    assert_eq!(tally.count("B"), 0);
    assert_eq!(tally.len(), 3);
}

#[test]
fn test_write_tally() {
    let tally: FrequencyTally = ["ko:K00002", "ko:K00001", "ko:K00002"].into_iter().collect();

    let mut out = vec![];
    write_tally(&tally, false, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "ko:K00002\nko:K00001\n");

    let mut out = vec![];
    write_tally(&tally, true, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "2\tko:K00002\n1\tko:K00001\n");
}
