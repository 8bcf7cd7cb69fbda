extern crate keggannot;

use std::io::Write;

use keggannot::errors::AnnotationError;
use keggannot::extract::{ExtractionResult, IdentifierKind, extract, tally_lines};
use keggannot::tally::{FrequencyTally, write_tally};
use keggannot::utils::for_each_input;

fn run_extraction(input: &str, kind: IdentifierKind, with_counts: bool) -> String {
    let mut tally = FrequencyTally::new();
    tally_lines(input.as_bytes(), kind, &mut tally).unwrap();

    let mut out = vec![];
    write_tally(&tally, with_counts, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_ec_end_to_end() {
    let input = "random text\nEC 1.1.1.-\nmore EC 2.3.4.5 text\n";
    assert_eq!(run_extraction(input, IdentifierKind::EcNumber, false),
               "1.1.1.-\n2.3.4.5\n");
}

#[test]
fn test_gff_counts() {
    let gff = "\
contig_1\tprokka\tCDS\t1\t900\t.\t+\t0\tID=g1;product=hexokinase;eC_number=2.7.1.1;note=ko:K00844 EC 2.7.1.1
contig_1\tprokka\tCDS\t950\t1400\t.\t-\t0\tID=g2;product=hypothetical protein
contig_2\tprokka\tCDS\t10\t800\t.\t+\t0\tID=g3;note=ko:K00845;EC:2.7.1.2
contig_2\tprokka\tCDS\t900\t1900\t.\t+\t0\tID=g4;note=ko:K00844 EC 2.7.1.1
";

    assert_eq!(run_extraction(gff, IdentifierKind::KoNumber, true),
               "2\tko:K00844\n1\tko:K00845\n");
    assert_eq!(run_extraction(gff, IdentifierKind::EcNumber, true),
               "2\t2.7.1.1\n1\t2.7.1.2\n");
    assert_eq!(run_extraction(gff, IdentifierKind::TaxonId, true), "");
}

#[test]
fn test_gene_and_taxon_lines() {
    let input = "\
Q1\tsce:YCL040W_GLK1\t98.1
Q2\tsce:YFR053C_HXK1\t95.0
Q3\tno hit
Q4\tsce:YCL040W_GLK1\t90.2
";
    assert_eq!(run_extraction(input, IdentifierKind::GeneId, false),
               "sce:YCL040W_GLK1\nsce:YFR053C_HXK1\n");

    let input = "db_xref=taxon:4896;\ndb_xref=taxon: 562;\ndb_xref=taxon:4896;\n";
    assert_eq!(run_extraction(input, IdentifierKind::TaxonId, true),
               "2\t4896\n1\t562\n");
}

#[test]
fn test_extract_is_deterministic() {
    let line = "gene=abc:def_ghi EC 3.1.-.- ko:K00001 taxon:123;";
    for kind in [IdentifierKind::EcNumber, IdentifierKind::KoNumber,
                 IdentifierKind::GeneId, IdentifierKind::TaxonId] {
        let first = extract(line, kind);
        assert!(first.matched().is_some());
        assert_eq!(first, extract(line, kind));
    }

    assert_eq!(extract("", IdentifierKind::EcNumber), ExtractionResult::NoMatch);
}

#[test]
fn test_multiple_input_files() {
    let mut file1 = tempfile::NamedTempFile::new().unwrap();
    writeln!(file1, "ko:K00001\nko:K00002").unwrap();
    let mut file2 = tempfile::NamedTempFile::new().unwrap();
    writeln!(file2, "ko:K00002\nko:K00003").unwrap();

    let file_names = vec![file1.path().to_str().unwrap().to_owned(),
                          file2.path().to_str().unwrap().to_owned()];

    let mut tally = FrequencyTally::new();
    for_each_input(&file_names, |reader| {
        tally_lines(reader, IdentifierKind::KoNumber, &mut tally)
    }).unwrap();

    let entries: Vec<(String, usize)> =
        tally.entries().map(|(a, c)| (a.to_string(), c)).collect();
    assert_eq!(entries, vec![("ko:K00001".to_owned(), 1), ("ko:K00002".to_owned(), 2),
                             ("ko:K00003".to_owned(), 1)]);
}

#[test]
fn test_missing_input_file() {
    let file_names = vec!["/nonexistent/annotations.gff".to_owned()];
    let mut tally = FrequencyTally::new();

    let result = for_each_input(&file_names, |reader| {
        tally_lines(reader, IdentifierKind::EcNumber, &mut tally)
    });

    assert!(matches!(result, Err(AnnotationError::InputUnavailable { .. })));
    assert!(tally.is_empty());
}
