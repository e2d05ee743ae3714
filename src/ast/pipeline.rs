//! Pipeline configuration parsing structures

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::ast::module::ModuleSpec;
use crate::error::Result;

/// Pipeline configuration parsed from YAML (document root)
#[derive(Debug, Deserialize)]
pub struct PipelineSpec {
    #[serde(default)]
    pub global_context: Option<GlobalContext>,
    #[serde(default)]
    pub pipeline_modules: ModuleMap,
}

impl PipelineSpec {
    /// Parse a pipeline configuration document.
    ///
    /// A document without a `pipeline_modules` mapping parses as an empty
    /// module set; only malformed YAML or mistyped fields are errors.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Document-wide settings shared by every module
#[derive(Debug, Default, Deserialize)]
pub struct GlobalContext {
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub default_device: Option<String>,
    #[serde(default)]
    pub enable_shared_memory: Option<bool>,
}

/// Module name -> spec mapping that preserves YAML declaration order.
///
/// Declaration order drives node order in the rendered graph, so a plain
/// `HashMap` would scramble the layout. A duplicate key replaces the
/// earlier value but keeps the earlier position, matching plain YAML
/// mapping semantics.
#[derive(Debug, Default)]
pub struct ModuleMap(Vec<(String, ModuleSpec)>);

impl ModuleMap {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleSpec)> {
        self.0.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ModuleSpec> {
        self.0
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, spec)| spec)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n.as_str() == name)
    }
}

impl<'de> Deserialize<'de> for ModuleMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ModuleMapVisitor;

        impl<'de> Visitor<'de> for ModuleMapVisitor {
            type Value = ModuleMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping of module name to module spec")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<(String, ModuleSpec)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, spec)) = access.next_entry::<String, ModuleSpec>()? {
                    match entries.iter_mut().find(|(n, _)| *n == name) {
                        Some(entry) => entry.1 = spec,
                        None => entries.push((name, spec)),
                    }
                }
                Ok(ModuleMap(entries))
            }
        }

        deserializer.deserialize_map(ModuleMapVisitor)
    }
}
