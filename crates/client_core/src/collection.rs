use std::collections::HashSet;

use shared::{domain::FileRef, error::ContractError};

/// Files picked for the next ingestion request, in the order they were added.
///
/// Names are unique: adding a file whose name is already present is a no-op.
/// Every operation returns a new collection and leaves `self` untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCollection {
    files: Vec<FileRef>,
}

impl FileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, new_files: impl IntoIterator<Item = FileRef>) -> Self {
        let mut seen: HashSet<String> = self.files.iter().map(|file| file.name.clone()).collect();
        let mut files = self.files.clone();
        // `insert` is false for names already in the collection and for repeats
        // inside `new_files`; the first occurrence wins in both cases.
        files.extend(
            new_files
                .into_iter()
                .filter(|file| seen.insert(file.name.clone())),
        );
        Self { files }
    }

    pub fn remove(&self, index: usize) -> Result<Self, ContractError> {
        if index >= self.files.len() {
            return Err(ContractError::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        let mut files = self.files.clone();
        files.remove(index);
        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FileRef> {
        self.files.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileRef> {
        self.files.iter()
    }

    pub fn as_slice(&self) -> &[FileRef] {
        &self.files
    }

    pub fn names(&self) -> Vec<String> {
        self.files.iter().map(|file| file.name.clone()).collect()
    }

    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(FileRef::size_bytes).sum()
    }
}

#[cfg(test)]
#[path = "tests/collection_tests.rs"]
mod tests;
