//! Extraction process configuration

use crate::{terms::TermSet, Args};
use std::{path::PathBuf, sync::Arc};

/// Final process configuration
///
/// This is the result of digesting validated [`Args`] into the immutable
/// values that the scan actually consumes. Please refer to [`Args`] to know
/// more about common fields.
#[derive(Clone, Debug)]
pub struct Config {
    /// Location of the concatenated 1-gram data file
    pub input_path: PathBuf,

    /// Location of the results file, opened for appending
    pub output_path: PathBuf,

    /// Ngrams whose records should be extracted
    pub terms: TermSet,
}
//
impl Config {
    /// Determine process configuration from decoded CLI arguments
    pub(crate) fn new(args: Args) -> Arc<Self> {
        let Args {
            input,
            output,
            terms,
        } = args;
        Arc::new(Self {
            input_path: input,
            output_path: output,
            terms: TermSet::new(terms),
        })
    }
}
