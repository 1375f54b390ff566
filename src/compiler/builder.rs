// src/compiler/builder.rs
use super::Compiler;
use crate::config::{CompileOptions, RuleSet};
use crate::convert::standard_registry;
use crate::error::FolioError;
use crate::traverse::{ConverterRegistry, ElementConverter};
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// A builder for creating a `Compiler`.
pub struct CompilerBuilder {
    options: CompileOptions,
    registry: ConverterRegistry,
}

impl Default for CompilerBuilder {
    fn default() -> Self {
        Self {
            options: CompileOptions::default(),
            registry: standard_registry(),
        }
    }
}

impl CompilerBuilder {
    /// Creates a builder with the default options, rule sets and converters.
    pub fn new() -> Self {
        Default::default()
    }

    /// Replaces all options, including the rule set.
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the cascade rule set.
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.options.rules = rules;
        self
    }

    /// Appends rules after the configured ones.
    pub fn add_rules(mut self, rules: RuleSet) -> Self {
        let current = std::mem::take(&mut self.options.rules);
        self.options.rules = current.merge(rules);
        self
    }

    /// Appends rules loaded from a JSON file.
    pub fn add_rules_file<P: AsRef<Path>>(self, path: P) -> Result<Self, FolioError> {
        let path_ref = path.as_ref();
        let json = fs::read_to_string(path_ref).map_err(|e| {
            FolioError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read rules from '{}': {}", path_ref.display(), e),
            ))
        })?;
        Ok(self.add_rules(RuleSet::from_json(&json)?))
    }

    /// Registers or replaces the converter for `tag`.
    pub fn with_converter(mut self, tag: &str, converter: Arc<dyn ElementConverter>) -> Self {
        self.registry.register(tag, converter);
        self
    }

    /// Removes the converter for `tag`. Structural elements with that tag are then
    /// skipped; any other tag passes its content through.
    pub fn without_converter(mut self, tag: &str) -> Self {
        self.registry.unregister(tag);
        self
    }

    /// Drops elements with `tag` and their subtrees.
    pub fn skip_tag(mut self, tag: &str) -> Self {
        self.registry.skip(tag);
        self
    }

    /// Consumes the builder and validates the configuration.
    pub fn build(self) -> Result<Compiler, FolioError> {
        if let Some(rule) = self.options.rules.rules.iter().find(|r| r.tag.trim().is_empty()) {
            return Err(FolioError::Config(format!(
                "Cascade rule with inheriters {:?} has no owner tag",
                rule.inheriters
            )));
        }
        if self.options.base_font_size <= 0.0 || self.options.line_height_base <= 0.0 {
            return Err(FolioError::Config(
                "Font size bases must be positive".to_string(),
            ));
        }
        if self.options.default_table_width <= 0.0 {
            return Err(FolioError::Config(format!(
                "Default table width must be a positive percentage, got {}",
                self.options.default_table_width
            )));
        }
        log::debug!(
            "Building compiler with {} cascade rule(s)",
            self.options.rules.rules.len()
        );
        Ok(Compiler {
            options: self.options,
            registry: self.registry,
        })
    }
}
