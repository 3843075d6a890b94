use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use dockgen_core::{ConfigStore, RenderContext};
use dockgen_render::TemplateEngine;

pub struct GenerateArgs {
    pub config: PathBuf,
    pub template_dir: PathBuf,
    pub template: String,
    pub target: Target,
}

pub enum Target {
    File(PathBuf),
    Stdout,
}

/// Load the project document, render the template, and write the result.
///
/// Every stage completes before anything is written, so a failure leaves the
/// output untouched.
pub fn generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let store = ConfigStore::open(&args.config).with_context(|| {
        format!(
            "failed to load project document {}",
            args.config.display()
        )
    })?;

    let context = RenderContext::from_config(&store).with_context(|| {
        format!(
            "failed to read template values from {}",
            store.path().display()
        )
    })?;

    let engine = TemplateEngine::new(&args.template_dir, &args.template).with_context(|| {
        format!(
            "failed to load template {}",
            args.template_dir.join(&args.template).display()
        )
    })?;

    let dockerfile = engine
        .render(&context)
        .with_context(|| format!("failed to render template {}", engine.template_name()))?;

    match &args.target {
        Target::File(path) => {
            dockgen_render::write_atomic(path, &dockerfile)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "dockerfile rendered");
            println!("Dockerfile created at: {}", path.display());
        }
        Target::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(dockerfile.as_bytes())
                .context("failed to write to stdout")?;
            stdout.flush().context("failed to write to stdout")?;
        }
    }

    Ok(())
}
