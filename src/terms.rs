//! Target ngram set

/// Set of ngrams whose records should be extracted from the data file
///
/// Each target ngram is stored as the byte prefix that a matching record must
/// start with, which is the ngram itself followed by the tab field separator.
/// This anchors matching on the full first field of a record: the target
/// "1910" matches a "1910<TAB>..." record but not a "19100<TAB>..." one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TermSet {
    /// Byte prefixes that a matching record must start with
    prefixes: Box<[Box<[u8]>]>,
}
//
impl TermSet {
    /// Build the prefix set from a list of target ngrams
    ///
    /// Targets must have been validated beforehand: the list is non-empty and
    /// no ngram contains the tab separator, so at most one prefix can match a
    /// given record.
    pub fn new(terms: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            prefixes: terms
                .into_iter()
                .map(|term| {
                    let mut prefix = term.into().into_bytes();
                    prefix.push(b'\t');
                    prefix.into_boxed_slice()
                })
                .collect(),
        }
    }

    /// Truth that a record's first field is one of the target ngrams
    ///
    /// The comparison only looks at the leading bytes of the record, so a
    /// record with fewer fields than the dataset normally carries is handled
    /// like any other text. The first match is a sufficient answer.
    pub fn matches(&self, record: &[u8]) -> bool {
        self.prefixes.iter().any(|prefix| record.starts_with(prefix))
    }
}
