use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::constants::{CSV_REPORT_EXTENSION, PATHWAY_IMAGE_EXTENSION};
use crate::enzyme_set::{EnzymeListKind, EnzymeSet};
use crate::errors::{AnnotationError, Result};
use crate::kegg::{PathwayLookup, PathwayRenderer};
use crate::pathway_aggregate::PathwayAggregate;
use crate::types::{EnzymeId, PathwayId};

#[derive(Debug)]
pub struct LookupFailure {
    pub id: String,
    pub error: AnnotationError,
}

#[derive(Debug, Default)]
pub struct AggregationResult {
    pub aggregate: PathwayAggregate,
    pub failures: Vec<LookupFailure>,
}

/// Look up each enzyme once, in order, and collect the pathways.  An enzyme
/// whose lookup fails is logged and recorded in `failures`; the other
/// enzymes are still processed.
pub fn aggregate_pathways(enzymes: &EnzymeSet, list_kind: EnzymeListKind,
                          lookup: &dyn PathwayLookup)
                          -> AggregationResult
{
    let mut result = AggregationResult::default();

    for enzyme_id in enzymes.iter() {
        match lookup.pathways_for(list_kind, enzyme_id) {
            Ok(pathway_ids) => {
                tracing::info!("{} is a member of {} pathway(s)",
                               enzyme_id, pathway_ids.len());
                for pathway_id in &pathway_ids {
                    result.aggregate.add_association(pathway_id, enzyme_id);
                }
            },
            Err(error) => {
                tracing::warn!("pathway lookup failed for {}: {}", enzyme_id, error);
                result.failures.push(LookupFailure {
                    id: enzyme_id.to_string(),
                    error,
                });
            }
        }
    }

    result
}

// eg. "enzymes.txt" -> "enzymes.txt.csv"
pub fn report_file_name(input_file_name: &str) -> String {
    format!("{}.{}", input_file_name, CSV_REPORT_EXTENSION)
}

// eg. "path:map00010" -> "path:map00010.gif"
pub fn image_file_name(pathway_id: &str) -> String {
    format!("{}.{}", pathway_id, PATHWAY_IMAGE_EXTENSION)
}

pub fn write_report(aggregate: &PathwayAggregate, report_path: &Path) -> Result<()> {
    let file = File::create(report_path)?;
    let mut writer = BufWriter::new(file);
    aggregate.write_csv(&mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Request a marked image of each pathway, highlighting its enzymes, and
/// save it in `output_dir`.  Returns the saved files and the pathways that
/// couldn't be marked.
pub fn mark_pathways(aggregate: &PathwayAggregate, renderer: &dyn PathwayRenderer,
                     output_dir: &Path)
                     -> (Vec<PathBuf>, Vec<LookupFailure>)
{
    let mut saved = vec![];
    let mut failures = vec![];

    for (pathway_id, enzymes) in aggregate.iter() {
        tracing::info!("marking enzymes in {}", pathway_id);

        let objects: Vec<EnzymeId> = enzymes.iter().cloned().collect();

        match save_marked_pathway(renderer, pathway_id, &objects, output_dir) {
            Ok(path) => saved.push(path),
            Err(error) => {
                tracing::warn!("failed to mark {}: {}", pathway_id, error);
                failures.push(LookupFailure {
                    id: pathway_id.to_string(),
                    error,
                });
            }
        }
    }

    (saved, failures)
}

fn save_marked_pathway(renderer: &dyn PathwayRenderer, pathway_id: &PathwayId,
                       objects: &[EnzymeId], output_dir: &Path)
                       -> Result<PathBuf>
{
    let image = renderer.mark_pathway(pathway_id, objects)?;
    let path = output_dir.join(image_file_name(pathway_id));
    std::fs::write(&path, &image)?;
    Ok(path)
}

#[test]
fn test_file_names() {
    assert_eq!(report_file_name("data/enzymes.txt"), "data/enzymes.txt.csv");
    assert_eq!(image_file_name("path:map00010"), "path:map00010.gif");
}
