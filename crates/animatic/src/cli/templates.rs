//! Template listing command handler.

use animatic::{AnimaticResult, PipelineConfig, TemplateKind, TemplateLibrary};
use std::path::Path;
use strum::IntoEnumIterator;

/// Print available templates, optionally for one family.
pub fn list_templates(config_path: Option<&Path>, kind: Option<TemplateKind>) -> AnimaticResult<()> {
    let config = PipelineConfig::load_with(config_path)?;
    let library = TemplateLibrary::new(config.templates_dir())?;

    let kinds: Vec<TemplateKind> = match kind {
        Some(kind) => vec![kind],
        None => TemplateKind::iter().collect(),
    };

    for kind in kinds {
        let names = library.list(kind)?;
        println!("{} templates ({}):", kind, library.dir(kind).display());
        if names.is_empty() {
            println!("  (none)");
        }
        for name in names {
            println!("  {}", name);
        }
    }
    Ok(())
}
