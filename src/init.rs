//! Pipeline scaffolding
//!
//! Creates a commented starter configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipevizError, Result};

/// File name the scaffold creates
pub const SAMPLE_FILE_NAME: &str = "pipeline.yaml";

/// Write a starter pipeline config into `dir`, creating it if needed.
///
/// Refuses to overwrite an existing config.
pub fn init_pipeline(dir: &Path) -> Result<PathBuf> {
    let target = dir.join(SAMPLE_FILE_NAME);
    if target.exists() {
        return Err(PipevizError::AlreadyExists {
            path: target.display().to_string(),
        });
    }

    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&target, SAMPLE_PIPELINE_TEMPLATE)?;

    Ok(target)
}

const SAMPLE_PIPELINE_TEMPLATE: &str = r#"# Pipeline configuration
# Render with: pipeviz render pipeline.yaml

global_context:
  model_type: qwen2_5_vl
  default_device: CPU
  enable_shared_memory: false

pipeline_modules:
  pipeline_params:
    type: ParameterModule
    description: Entry point exposing pipeline inputs.
    outputs:
      - name: img1
        type: OVTensor
      - name: prompt
        type: String

  image_preprocessor:
    type: ImagePreprocessModule
    device: CPU
    description: Resizes and normalizes input images.
    inputs:
      - name: img_in
        type: OVTensor
        source: pipeline_params.img1
    outputs:
      - name: img_out
        type: OVTensor

  pipeline_results:
    type: ResultModule
    description: Collects final pipeline outputs.
    inputs:
      - name: result_in
        type: OVTensor
        source: image_preprocessor.img_out
"#;
