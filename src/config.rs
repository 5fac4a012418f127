//! Generation run configuration
//!
//! [`GeneratorConfig`] is built with `with_*` methods and checked by [`GeneratorConfig::validate`] before a run
//! spawns anything.

use std::env;
use std::fs;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::error::GenerateError;
use crate::render::TestFramework;

/// Configuration for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory the numbered test units are written to. Must already exist.
    pub output_dir: PathBuf,
    /// Maximum concurrent loads (read + decode + parse)
    pub load_parallelism: usize,
    /// Maximum concurrent descriptor syntheses
    pub synth_parallelism: usize,
    /// Maximum concurrent file writes
    pub write_parallelism: usize,
    /// Test framework the units are rendered for
    pub framework: TestFramework,
    /// Relative inputs that do not exist as given are retried under this directory
    pub search_root: PathBuf,
}

impl GeneratorConfig {
    /// Create a config with default settings: every stage at [`default_parallelism`], NUnit output, and the
    /// current working directory as search root.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        let parallelism = default_parallelism();
        Self {
            output_dir: output_dir.into(),
            load_parallelism: parallelism,
            synth_parallelism: parallelism,
            write_parallelism: parallelism,
            framework: TestFramework::default(),
            search_root: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Set all three stage parallelisms at once
    pub fn with_parallelism(mut self, load: usize, synth: usize, write: usize) -> Self {
        self.load_parallelism = load;
        self.synth_parallelism = synth;
        self.write_parallelism = write;
        self
    }

    pub fn with_load_parallelism(mut self, parallelism: usize) -> Self {
        self.load_parallelism = parallelism;
        self
    }

    pub fn with_synth_parallelism(mut self, parallelism: usize) -> Self {
        self.synth_parallelism = parallelism;
        self
    }

    pub fn with_write_parallelism(mut self, parallelism: usize) -> Self {
        self.write_parallelism = parallelism;
        self
    }

    /// Set the test framework
    pub fn with_framework(mut self, framework: TestFramework) -> Self {
        self.framework = framework;
        self
    }

    /// Set the directory relative inputs are resolved against
    pub fn with_search_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.search_root = root.into();
        self
    }

    /// Check the run preconditions.
    ///
    /// ## Errors
    /// Returns [`GenerateError::Configuration`] for the first violated precondition:
    /// - a stage parallelism of zero
    /// - an output directory that does not exist or is not a directory
    pub fn validate(&self) -> Result<(), GenerateError> {
        for (stage, value) in [
            ("load", self.load_parallelism),
            ("synth", self.synth_parallelism),
            ("write", self.write_parallelism),
        ] {
            if value == 0 {
                return Err(GenerateError::Configuration(format!(
                    "{} parallelism must be at least 1",
                    stage
                )));
            }
        }

        match fs::metadata(&self.output_dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(GenerateError::Configuration(format!(
                "output path {} is not a directory",
                self.output_dir.display()
            ))),
            Err(e) => Err(GenerateError::Configuration(format!(
                "output directory {} is not accessible: {}",
                self.output_dir.display(),
                e
            ))),
        }
    }
}

/// Default per-stage parallelism: the number of available CPUs, at least 1.
pub fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::new("out");
        assert!(config.load_parallelism >= 1);
        assert_eq!(config.load_parallelism, config.write_parallelism);
        assert_eq!(config.framework, TestFramework::NUnit);
        assert_eq!(config.search_root, env::current_dir().unwrap());
    }

    #[test]
    fn test_builder_overrides() {
        let config = GeneratorConfig::new("out")
            .with_parallelism(1, 2, 3)
            .with_synth_parallelism(5)
            .with_framework(TestFramework::XUnit)
            .with_search_root("/src");
        assert_eq!(
            (config.load_parallelism, config.synth_parallelism, config.write_parallelism),
            (1, 5, 3)
        );
        assert_eq!(config.framework, TestFramework::XUnit);
        assert_eq!(config.search_root, PathBuf::from("/src"));
    }

    #[test]
    fn test_zero_parallelism_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::new(dir.path()).with_write_parallelism(0);
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid configuration: write parallelism must be at least 1"
        );
    }

    #[test]
    fn test_output_dir_must_exist_and_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GeneratorConfig::new(dir.path()).validate().is_ok());

        let missing = GeneratorConfig::new(dir.path().join("nope"));
        assert!(matches!(missing.validate(), Err(GenerateError::Configuration(_))));

        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = GeneratorConfig::new(&file).validate().unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }
}
