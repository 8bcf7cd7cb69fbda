use std::io::Write;

use indexmap::{IndexMap, IndexSet};

use crate::errors::Result;
use crate::types::{EnzymeId, PathwayId};

/// The enzymes (or orthologs) found in each pathway.  Pathways and the
/// enzymes of each pathway are kept in insertion order.
#[derive(Debug, Default, Clone)]
pub struct PathwayAggregate {
    pathways: IndexMap<PathwayId, IndexSet<EnzymeId>>,
}

impl PathwayAggregate {
    pub fn new() -> PathwayAggregate {
        PathwayAggregate {
            pathways: IndexMap::new(),
        }
    }

    fn get_or_create(&mut self, pathway_id: &PathwayId) -> &mut IndexSet<EnzymeId> {
        self.pathways.entry(pathway_id.clone()).or_default()
    }

    pub fn add_association(&mut self, pathway_id: &PathwayId, enzyme_id: &EnzymeId) {
        self.get_or_create(pathway_id).insert(enzyme_id.clone());
    }

    /// Remove the pathways in `denylist`, and with them their enzymes.
    /// Returns the number of pathways removed.
    pub fn remove_global_pathways<S: AsRef<str>>(&mut self, denylist: &[S]) -> usize {
        let before = self.pathways.len();

        for pathway_id in denylist {
            if self.pathways.shift_remove(pathway_id.as_ref()).is_some() {
                tracing::debug!("removed global pathway {}", pathway_id.as_ref());
            }
        }

        before - self.pathways.len()
    }

    pub fn contains_pathway(&self, pathway_id: &str) -> bool {
        self.pathways.contains_key(pathway_id)
    }

    pub fn enzymes_for(&self, pathway_id: &str) -> Option<&IndexSet<EnzymeId>> {
        self.pathways.get(pathway_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathwayId, &IndexSet<EnzymeId>)> {
        self.pathways.iter()
    }

    pub fn len(&self) -> usize {
        self.pathways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pathways.is_empty()
    }

    // pathway_id,enzyme_count,enzyme_1,enzyme_2,...
    fn csv_fields(pathway_id: &PathwayId, enzymes: &IndexSet<EnzymeId>) -> Vec<String>
    {
        let mut fields = Vec::with_capacity(enzymes.len() + 2);
        fields.push(pathway_id.to_string());
        fields.push(enzymes.len().to_string());
        fields.extend(enzymes.iter().map(|enzyme_id| enzyme_id.to_string()));
        fields
    }

    pub fn to_csv(&self) -> Vec<String> {
        self.iter()
            .map(|(pathway_id, enzymes)| {
                itertools::join(Self::csv_fields(pathway_id, enzymes), ",")
            })
            .collect()
    }

    /// Write the same rows as `to_csv()`.  Identifiers are never quoted.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        for (pathway_id, enzymes) in self.iter() {
            csv_writer.write_record(Self::csv_fields(pathway_id, enzymes))?;
        }

        csv_writer.flush()?;

        Ok(())
    }
}

#[allow(dead_code)]
fn make_test_aggregate(associations: &[(&str, &str)]) -> PathwayAggregate {
    let mut aggregate = PathwayAggregate::new();
    for (pathway_id, enzyme_id) in associations {
        aggregate.add_association(&(*pathway_id).into(), &(*enzyme_id).into());
    }
    aggregate
}

#[test]
fn test_add_association() {
    let aggregate = make_test_aggregate(&[("path:map1", "E1"), ("path:map1", "E1")]);
    assert_eq!(aggregate.len(), 1);
    assert_eq!(aggregate.enzymes_for("path:map1").unwrap().len(), 1);

    let aggregate = make_test_aggregate(&[("path:map2", "E1"), ("path:map1", "E1"),
                                          ("path:map2", "E2"), ("path:map1", "E3")]);
    let pathway_ids: Vec<String> = aggregate.iter().map(|(p, _)| p.to_string()).collect();
    assert_eq!(pathway_ids, vec!["path:map2", "path:map1"]);
    let enzymes: Vec<String> =
        aggregate.enzymes_for("path:map2").unwrap().iter().map(|e| e.to_string()).collect();
    assert_eq!(enzymes, vec!["E1", "E2"]);
    assert!(aggregate.enzymes_for("path:map3").is_none());
    assert!(!aggregate.contains_pathway("path:map3"));
}

#[test]
fn test_remove_global_pathways() {
    use crate::constants::GLOBAL_PATHWAYS;

    let mut aggregate = make_test_aggregate(&[("path:map01100", "E1"), ("path:map00010", "E1"),
                                              ("path:map01100", "E2")]);
    assert_eq!(aggregate.remove_global_pathways(GLOBAL_PATHWAYS), 1);
    assert_eq!(aggregate.len(), 1);
    assert!(aggregate.contains_pathway("path:map00010"));
    assert!(!aggregate.contains_pathway("path:map01100"));

    assert_eq!(aggregate.remove_global_pathways(GLOBAL_PATHWAYS), 0);
    assert_eq!(aggregate.len(), 1);
}

#[test]
fn test_to_csv() {
    let aggregate = make_test_aggregate(&[("path:X", "E1"), ("path:X", "E2")]);
    assert_eq!(aggregate.to_csv(), vec!["path:X,2,E1,E2"]);

    let aggregate = make_test_aggregate(&[("path:map00010", "ec:1.1.1.1"),
                                          ("path:map00020", "ec:1.1.1.-"),
                                          ("path:map00010", "ec:2.7.1.1")]);
    let mut out = vec![];
    aggregate.write_csv(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(),
               "path:map00010,2,ec:1.1.1.1,ec:2.7.1.1\npath:map00020,1,ec:1.1.1.-\n");
    assert_eq!(aggregate.to_csv().join("\n") + "\n",
               "path:map00010,2,ec:1.1.1.1,ec:2.7.1.1\npath:map00020,1,ec:1.1.1.-\n");
}
