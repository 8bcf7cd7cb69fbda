pub const KEGG_REST_URL: &str = "https://rest.kegg.jp";
pub const KEGG_WEB_URL: &str = "https://www.kegg.jp";

// the global pathways are overview maps, eg. map01100 is 'Metabolic pathways'.
// They are very big and not worth annotating
pub const GLOBAL_PATHWAYS: &[&str; 3] =
    &["path:map01100", "path:map01110", "path:map01120"];

pub const REFERENCE_PATHWAY_PREFIX: &str = "path:map";

pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const CSV_REPORT_EXTENSION: &str = "csv";
pub const PATHWAY_IMAGE_EXTENSION: &str = "gif";
