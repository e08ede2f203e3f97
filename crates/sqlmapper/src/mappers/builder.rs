use super::Mappers;
use crate::{Flavor, Settings};

use sqlmapper_core::{template::EmptyCollection, Result};
use std::path::PathBuf;

/// Configures and loads a [`Mappers`] registry.
///
/// Mapper sources are loaded in the order they were added, so a document
/// including fragments of another namespace must come after it.
#[derive(Debug, Default)]
pub struct Builder {
    settings: Settings,
    sources: Vec<Source>,
}

#[derive(Debug)]
enum Source {
    Str(String),
    File(PathBuf),
    Dir(PathBuf),
}

impl Builder {
    /// Replaces all settings at once.
    pub fn settings(&mut self, settings: Settings) -> &mut Self {
        self.settings = settings;
        self
    }

    pub fn flavor(&mut self, flavor: Flavor) -> &mut Self {
        self.settings.flavor = flavor;
        self
    }

    pub fn empty_collection(&mut self, policy: EmptyCollection) -> &mut Self {
        self.settings.empty_collection = policy;
        self
    }

    pub fn shrink_whitespace(&mut self, enabled: bool) -> &mut Self {
        self.settings.shrink_whitespace = enabled;
        self
    }

    pub fn map_underscore_to_camel_case(&mut self, enabled: bool) -> &mut Self {
        self.settings.map_underscore_to_camel_case = enabled;
        self
    }

    /// Adds a mapper document held in memory.
    pub fn mapper_str(&mut self, src: impl Into<String>) -> &mut Self {
        self.sources.push(Source::Str(src.into()));
        self
    }

    /// Adds a mapper document file.
    pub fn mapper_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.sources.push(Source::File(path.into()));
        self
    }

    /// Adds every `*.xml` file in a directory.
    pub fn mapper_dir(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.sources.push(Source::Dir(path.into()));
        self
    }

    pub fn build(&self) -> Result<Mappers> {
        let mappers = Mappers::new(self.settings.clone());

        for source in &self.sources {
            match source {
                Source::Str(src) => {
                    mappers.load_str(src)?;
                }
                Source::File(path) => {
                    mappers.load_file(path)?;
                }
                Source::Dir(path) => {
                    mappers.load_dir(path)?;
                }
            }
        }

        Ok(mappers)
    }
}
