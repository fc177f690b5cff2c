use crate::artifacts::index::index_entry::IndexEntry;
use std::path::Path;

/// Reverse walk over the index yielding the versions of a single path.
///
/// `skip` counts how many matching entries must be passed over before one is
/// returned: 0 gives the latest version, 1 the previous one.
pub struct VersionScan<'i, 'p> {
    entries: std::iter::Rev<std::iter::Enumerate<std::slice::Iter<'i, IndexEntry>>>,
    path: &'p Path,
    skip: usize,
}

impl<'i, 'p> VersionScan<'i, 'p> {
    pub fn new(entries: &'i [IndexEntry], path: &'p Path, skip: usize) -> Self {
        VersionScan {
            entries: entries.iter().enumerate().rev(),
            path,
            skip,
        }
    }

    /// The first match left after skipping, with its position in the log
    pub fn find(mut self) -> Option<(usize, &'i IndexEntry)> {
        self.next()
    }
}

impl<'i> Iterator for VersionScan<'i, '_> {
    type Item = (usize, &'i IndexEntry);

    fn next(&mut self) -> Option<Self::Item> {
        for (position, entry) in self.entries.by_ref() {
            if entry.path != self.path {
                continue;
            }

            if self.skip == 0 {
                return Some((position, entry));
            }
            self.skip -= 1;
        }

        None
    }
}
