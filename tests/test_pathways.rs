extern crate keggannot;

mod util;

use std::fs;

use keggannot::constants::GLOBAL_PATHWAYS;
use keggannot::enzyme_set::{EnzymeListKind, EnzymeSet};
use keggannot::errors::AnnotationError;
use keggannot::pathways::{aggregate_pathways, image_file_name, mark_pathways,
                          report_file_name, write_report};

use util::{get_test_enzymes, get_test_kegg, ids};

#[test]
fn test_aggregate_ec_numbers() {
    let kegg = get_test_kegg();
    let enzymes = get_test_enzymes();

    let result = aggregate_pathways(&enzymes, EnzymeListKind::EcNumbers, &kegg);

    // each unique enzyme is looked up once, in input order
    assert_eq!(*kegg.lookups.borrow(), vec!["ec:2.7.1.1", "ec:1.1.1.1", "ec:4.1.2.13"]);
    assert!(result.failures.is_empty());

    let aggregate = result.aggregate;
    assert_eq!(aggregate.len(), 6);
    assert_eq!(ids(aggregate.enzymes_for("path:map00010").unwrap()),
               vec!["ec:2.7.1.1", "ec:1.1.1.1", "ec:4.1.2.13"]);
    assert_eq!(ids(aggregate.enzymes_for("path:map00051").unwrap()),
               vec!["ec:2.7.1.1", "ec:4.1.2.13"]);
    assert_eq!(aggregate.to_csv(),
               vec!["path:map00010,3,ec:2.7.1.1,ec:1.1.1.1,ec:4.1.2.13",
                    "path:map00051,2,ec:2.7.1.1,ec:4.1.2.13",
                    "path:map01100,2,ec:2.7.1.1,ec:1.1.1.1",
                    "path:map00071,1,ec:1.1.1.1",
                    "path:map01120,1,ec:1.1.1.1",
                    "path:map01110,1,ec:4.1.2.13"]);
}

#[test]
fn test_remove_global_after_aggregation() {
    let kegg = get_test_kegg();
    let enzymes = get_test_enzymes();

    let mut aggregate = aggregate_pathways(&enzymes, EnzymeListKind::EcNumbers, &kegg).aggregate;
    assert_eq!(aggregate.remove_global_pathways(GLOBAL_PATHWAYS), 3);

    let pathway_ids: Vec<String> = aggregate.iter().map(|(p, _)| p.to_string()).collect();
    assert_eq!(pathway_ids, vec!["path:map00010", "path:map00051", "path:map00071"]);
    for global_pathway in GLOBAL_PATHWAYS {
        assert!(!aggregate.contains_pathway(global_pathway));
    }
}

#[test]
fn test_aggregate_ko_numbers() {
    let kegg = get_test_kegg();
    let enzymes = EnzymeSet::build(["ko:K00845", "ko:K00844", "ko:K99999"]);

    let result = aggregate_pathways(&enzymes, EnzymeListKind::KoNumbers, &kegg);

    assert!(result.failures.is_empty());
    assert_eq!(result.aggregate.to_csv(),
               vec!["path:map00010,2,ko:K00845,ko:K00844",
                    "path:map00500,2,ko:K00845,ko:K00844",
                    "path:map01100,1,ko:K00844"]);
}

#[test]
fn test_lookup_failure_keeps_other_enzymes() {
    let mut kegg = get_test_kegg();
    kegg.failing.push("ec:1.1.1.1".to_owned());
    let enzymes = get_test_enzymes();

    let result = aggregate_pathways(&enzymes, EnzymeListKind::EcNumbers, &kegg);

    assert_eq!(kegg.lookups.borrow().len(), 3);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].id, "ec:1.1.1.1");
    assert!(matches!(result.failures[0].error, AnnotationError::RemoteService { .. }));

    let aggregate = result.aggregate;
    assert!(!aggregate.contains_pathway("path:map00071"));
    assert_eq!(ids(aggregate.enzymes_for("path:map00010").unwrap()),
               vec!["ec:2.7.1.1", "ec:4.1.2.13"]);
}

#[test]
fn test_write_report() {
    let kegg = get_test_kegg();
    let enzymes = EnzymeSet::build(["ko:K00844", "ko:K00845"]);
    let mut aggregate = aggregate_pathways(&enzymes, EnzymeListKind::KoNumbers, &kegg).aggregate;
    aggregate.remove_global_pathways(GLOBAL_PATHWAYS);

    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("orthologs.txt");
    let report_path = report_file_name(input_path.to_str().unwrap());
    assert!(report_path.ends_with("orthologs.txt.csv"));

    write_report(&aggregate, report_path.as_ref()).unwrap();

    assert_eq!(fs::read_to_string(&report_path).unwrap(),
               "path:map00010,2,ko:K00844,ko:K00845\npath:map00500,2,ko:K00844,ko:K00845\n");
}

#[test]
fn test_mark_pathways() {
    let mut kegg = get_test_kegg();
    let enzymes = get_test_enzymes();
    let mut aggregate = aggregate_pathways(&enzymes, EnzymeListKind::EcNumbers, &kegg).aggregate;
    aggregate.remove_global_pathways(GLOBAL_PATHWAYS);

    kegg.failing.push("path:map00051".to_owned());

    let dir = tempfile::tempdir().unwrap();
    let (saved, failures) = mark_pathways(&aggregate, &kegg, dir.path());

    assert_eq!(saved, vec![dir.path().join(image_file_name("path:map00010")),
                           dir.path().join(image_file_name("path:map00071"))]);
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].id, "path:map00051");

    let marked = kegg.marked.borrow();
    assert_eq!(marked[0], ("path:map00010".to_owned(),
                           vec!["ec:2.7.1.1".to_owned(), "ec:1.1.1.1".to_owned(),
                                "ec:4.1.2.13".to_owned()]));

    assert_eq!(fs::read_to_string(dir.path().join("path:map00071.gif")).unwrap(),
               "GIF path:map00071 ec:1.1.1.1");
}
