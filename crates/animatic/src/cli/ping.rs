//! Model connectivity check.

use animatic::{
    AnimaticDriver, AnimaticResult, GenerateRequest, Message, ModelFactory, ModelsError,
    ModelsErrorKind, PipelineConfig, StageKind,
};
use std::collections::BTreeSet;
use std::path::Path;
use strum::IntoEnumIterator;

/// Send `prompt` once to each distinct configured model and report the outcome.
///
/// Failures are reported per model and do not stop the remaining checks.
pub async fn ping_models(
    config_path: Option<&Path>,
    prompt: &str,
    max_tokens: Option<u32>,
) -> AnimaticResult<()> {
    let config = PipelineConfig::load_with(config_path)?;
    let factory = ModelFactory::new(config.provider().clone())?;

    let models: BTreeSet<String> = StageKind::iter()
        .filter_map(|stage| config.stage(stage))
        .filter(|stage| stage.prompt_file().is_some())
        .map(|stage| stage.model_or_default().to_string())
        .collect();

    let request = GenerateRequest::builder()
        .messages(vec![Message::user(prompt)])
        .max_tokens(max_tokens)
        .build()
        .map_err(|e| ModelsError::new(ModelsErrorKind::Builder(e.to_string())))?;

    let mut failures = 0;
    for model in &models {
        let driver = factory.create(model);
        match driver.generate(&request).await {
            Ok(response) => {
                tracing::info!(model = %model, "Model responded");
                println!("[ok]   {} ({}): {}", model, driver.provider_name(), response.text().trim());
            }
            Err(e) => {
                failures += 1;
                tracing::error!(model = %model, error = %e, "Model check failed");
                println!("[fail] {} ({}): {}", model, driver.provider_name(), e);
            }
        }
    }

    println!("\n{} of {} models responded", models.len() - failures, models.len());
    Ok(())
}
