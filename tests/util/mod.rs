use std::cell::RefCell;
use std::collections::HashMap;

use bytes::Bytes;

use keggannot::enzyme_set::EnzymeSet;
use keggannot::errors::{AnnotationError, Result};
use keggannot::kegg::{PathwayLookup, PathwayRenderer};
use keggannot::types::{EnzymeId, PathwayId};

// An in-memory stand in for the KEGG service.  Identifiers in `failing`
// return an error, anything else not in the maps has no pathways.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeKegg {
    pub enzyme_pathways: HashMap<String, Vec<String>>,
    pub ortholog_pathways: HashMap<String, Vec<String>>,
    pub failing: Vec<String>,
    pub lookups: RefCell<Vec<String>>,
    pub marked: RefCell<Vec<(String, Vec<String>)>>,
}

#[allow(dead_code)]
impl FakeKegg {
    fn lookup(&self, map: &HashMap<String, Vec<String>>, id: &str) -> Result<Vec<PathwayId>> {
        self.lookups.borrow_mut().push(id.to_owned());

        if self.failing.iter().any(|failing_id| failing_id == id) {
            return Err(AnnotationError::remote(id, "service unavailable"));
        }

        Ok(map.get(id)
           .map(|pathways| pathways.iter().map(|p| PathwayId::from(p.as_str())).collect())
           .unwrap_or_default())
    }
}

impl PathwayLookup for FakeKegg {
    fn pathways_by_enzyme(&self, ec_number: &str) -> Result<Vec<PathwayId>> {
        self.lookup(&self.enzyme_pathways, ec_number)
    }

    fn pathways_by_ortholog(&self, ko_number: &str) -> Result<Vec<PathwayId>> {
        self.lookup(&self.ortholog_pathways, ko_number)
    }
}

impl PathwayRenderer for FakeKegg {
    fn mark_pathway(&self, pathway_id: &str, objects: &[EnzymeId]) -> Result<Bytes> {
        if self.failing.iter().any(|failing_id| failing_id == pathway_id) {
            return Err(AnnotationError::remote(pathway_id, "image unavailable"));
        }

        let objects: Vec<String> = objects.iter().map(|o| o.to_string()).collect();
        let image = format!("GIF {} {}", pathway_id, objects.join("+"));
        self.marked.borrow_mut().push((pathway_id.to_owned(), objects));
        Ok(Bytes::from(image))
    }
}

#[allow(dead_code)]
pub fn make_pathway_map(entries: Vec<(&str, Vec<&str>)>) -> HashMap<String, Vec<String>> {
    entries.into_iter()
        .map(|(id, pathways)| {
            (id.to_owned(), pathways.into_iter().map(|p| p.to_owned()).collect())
        })
        .collect()
}

#[allow(dead_code)]
pub fn get_test_kegg() -> FakeKegg {
    FakeKegg {
        enzyme_pathways: make_pathway_map(vec![
            ("ec:2.7.1.1", vec!["path:map00010", "path:map00051", "path:map01100"]),
            ("ec:1.1.1.1", vec!["path:map00010", "path:map00071", "path:map01100", "path:map01120"]),
            ("ec:4.1.2.13", vec!["path:map00010", "path:map00051", "path:map01110"]),
        ]),
        ortholog_pathways: make_pathway_map(vec![
            ("ko:K00844", vec!["path:map00010", "path:map00500", "path:map01100"]),
            ("ko:K00845", vec!["path:map00010", "path:map00500"]),
        ]),
        ..FakeKegg::default()
    }
}

#[allow(dead_code)]
pub fn get_test_enzymes() -> EnzymeSet {
    EnzymeSet::build(["ec:2.7.1.1", "ec:1.1.1.1", "ec:2.7.1.1", "ec:4.1.2.13"])
}

#[allow(dead_code)]
pub fn ids<'a, I>(iter: I) -> Vec<String>
    where I: IntoIterator<Item = &'a EnzymeId>
{
    iter.into_iter().map(|id| id.to_string()).collect()
}
