//! Registry of the module kinds the pipeline engine ships

use std::fmt;

/// Known module kinds, by canonical configuration string.
///
/// The visualizer treats `type` as a display label, so an unrecognized
/// string is never an error here; strict validation uses this registry
/// for warnings and did-you-mean suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleType {
    Parameter,
    ImagePreprocess,
    TextTokenizer,
    VisionEncoder,
    TextEncoder,
    TextEmbedding,
    FeaturePruner,
    FeatureFusion,
    LlmInference,
    Result,
}

impl ModuleType {
    pub const ALL: [ModuleType; 10] = [
        ModuleType::Parameter,
        ModuleType::ImagePreprocess,
        ModuleType::TextTokenizer,
        ModuleType::VisionEncoder,
        ModuleType::TextEncoder,
        ModuleType::TextEmbedding,
        ModuleType::FeaturePruner,
        ModuleType::FeatureFusion,
        ModuleType::LlmInference,
        ModuleType::Result,
    ];

    /// Canonical configuration string, e.g. `LLMInferenceModule`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleType::Parameter => "ParameterModule",
            ModuleType::ImagePreprocess => "ImagePreprocessModule",
            ModuleType::TextTokenizer => "TextTokenizerModule",
            ModuleType::VisionEncoder => "VisionEncoderModule",
            ModuleType::TextEncoder => "TextEncoderModule",
            ModuleType::TextEmbedding => "TextEmbeddingModule",
            ModuleType::FeaturePruner => "FeaturePrunerModule",
            ModuleType::FeatureFusion => "FeatureFusionModule",
            ModuleType::LlmInference => "LLMInferenceModule",
            ModuleType::Result => "ResultModule",
        }
    }

    /// Exact-match lookup from a configuration string.
    pub fn parse(s: &str) -> Option<ModuleType> {
        Self::ALL.iter().copied().find(|t| t.as_str() == s)
    }

    /// Registry names loosely matching `query`, for "did you mean" hints.
    ///
    /// Matching ignores case and the `Module` suffix, so "ParamModule"
    /// still finds "ParameterModule".
    pub fn find_similar(query: &str, max_results: usize) -> Vec<&'static str> {
        let stem = |name: &str| name.to_lowercase().trim_end_matches("module").to_string();
        let query_stem = stem(query);
        if query_stem.is_empty() {
            return Vec::new();
        }
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .filter(|candidate| {
                let candidate_stem = stem(candidate);
                candidate_stem.contains(&query_stem) || query_stem.contains(&candidate_stem)
            })
            .take(max_results)
            .collect()
    }
}

impl fmt::Display for ModuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
