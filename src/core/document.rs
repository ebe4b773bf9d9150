use std::{fs, path::Path};

use log::error;

use crate::error::RhError;

/// An uploaded XML buffer together with the name used to report problems about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    name: String,
    content: Vec<u8>,
}

impl Document {
    pub fn new<N: Into<String>, C: Into<Vec<u8>>>(name: N, content: C) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Loads a document from disk, named after the file name of `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, RhError> {
        let path = path.as_ref();
        let content = fs::read(path).map_err(|e| {
            error!("Failed to open XML file {}: {}", path.display(), e);
            RhError::ItemReader(format!(
                "Failed to open XML file {}: {}",
                path.display(),
                e
            ))
        })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self::new(name, content))
    }

    /// Loads every readable file of `paths`, in order. A file that cannot be read is
    /// reported in the returned errors and does not stop the others.
    pub fn load_all<I, P>(paths: I) -> (Vec<Self>, Vec<RhError>)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut documents = Vec::new();
        let mut errors = Vec::new();

        for path in paths {
            match Self::from_path(path) {
                Ok(document) => documents.push(document),
                Err(error) => errors.push(error),
            }
        }

        (documents, errors)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}
