//! Module descriptor structures

use serde::Deserialize;

/// Placeholder label for modules that declare no type
pub const UNTYPED_LABEL: &str = "Unknown";

/// Placeholder label for modules that declare no device
pub const NO_DEVICE_LABEL: &str = "N/A";

/// A single processing module in the pipeline.
///
/// Every field is optional: an empty mapping is a valid module. Unknown
/// keys are ignored so configs written for newer engines still parse.
#[derive(Debug, Default, Deserialize)]
pub struct ModuleSpec {
    /// Module kind, e.g. "LLMInferenceModule". Free-form for display;
    /// only strict validation checks it against the registry.
    #[serde(default, rename = "type")]
    pub module_type: Option<String>,
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub inputs: Vec<InputPort>,
    #[serde(default)]
    pub outputs: Vec<OutputPort>,
    /// Free-form module parameters, kept as raw YAML
    #[serde(default)]
    pub params: Option<serde_yaml::Value>,
}

/// An input port, optionally wired to an upstream `module.output` pair
#[derive(Debug, Default, Deserialize)]
pub struct InputPort {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub port_type: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// An output port other modules may reference as `<module>.<name>`
#[derive(Debug, Default, Deserialize)]
pub struct OutputPort {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub port_type: Option<String>,
}

impl ModuleSpec {
    /// Type string for display, with the placeholder for untyped modules.
    pub fn type_label(&self) -> &str {
        self.module_type.as_deref().unwrap_or(UNTYPED_LABEL)
    }

    /// Device string for display, with the placeholder for unplaced modules.
    pub fn device_label(&self) -> &str {
        self.device.as_deref().unwrap_or(NO_DEVICE_LABEL)
    }

    /// Multi-line descriptor dump used by `inspect`.
    ///
    /// Scalar params print their value; anything nested prints a
    /// `[Complex Value]` placeholder instead of a YAML dump.
    pub fn describe(&self, name: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("-- {} [{}]\n", self.type_label(), name));
        out.push_str(&format!("   Device: {}\n", self.device_label()));
        if let Some(description) = &self.description {
            out.push_str(&format!("   Description: {description}\n"));
        }

        out.push_str(&format!("   Inputs ({}):\n", self.inputs.len()));
        for input in &self.inputs {
            let name = input.name.as_deref().unwrap_or("?");
            let port_type = input.port_type.as_deref().unwrap_or("?");
            match input.source.as_deref().filter(|s| !s.is_empty()) {
                Some(source) => out.push_str(&format!(
                    "     - {name}: {port_type}  (source: {source})\n"
                )),
                None => out.push_str(&format!("     - {name}: {port_type}\n")),
            }
        }

        out.push_str(&format!("   Outputs ({}):\n", self.outputs.len()));
        for output in &self.outputs {
            let name = output.name.as_deref().unwrap_or("?");
            let port_type = output.port_type.as_deref().unwrap_or("?");
            out.push_str(&format!("     - {name}: {port_type}\n"));
        }

        let params = self.param_entries();
        out.push_str(&format!("   Params ({}):\n", params.len()));
        for (key, value) in params {
            out.push_str(&format!("     - {key}: {value}\n"));
        }
        out
    }

    /// Param mapping flattened to display pairs; non-mapping params are empty.
    fn param_entries(&self) -> Vec<(String, String)> {
        let Some(serde_yaml::Value::Mapping(map)) = &self.params else {
            return Vec::new();
        };
        map.iter()
            .map(|(key, value)| {
                let key = scalar_text(key).unwrap_or_else(|| "[Complex Value]".to_string());
                let value = scalar_text(value).unwrap_or_else(|| "[Complex Value]".to_string());
                (key, value)
            })
            .collect()
    }
}

fn scalar_text(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Null => Some("null".to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        _ => None,
    }
}
