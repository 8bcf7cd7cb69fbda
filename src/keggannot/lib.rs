#[macro_use] extern crate lazy_static;
#[macro_use] extern crate serde_derive;

pub mod constants;
pub mod types;
pub mod errors;
pub mod config;
pub mod utils;
pub mod extract;
pub mod tally;
pub mod enzyme_set;
pub mod pathway_aggregate;
pub mod kegg;
pub mod pathways;
