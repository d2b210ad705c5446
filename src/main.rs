//! varfield command-line front end

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use varfield::cli::{CliArgs, Command};
use varfield::config::EditorConfig;
use varfield::editable::EditContext;
use varfield::model::TemplateModel;
use varfield::replay::{parse_script, replay};
use varfield::template::{render, suggest, Segment, VariableCatalog};
use varfield::util::read_template;

fn main() -> Result<ExitCode> {
    varfield::tracing::init();

    let args = CliArgs::parse();
    let config = EditorConfig::load();
    let catalog = config
        .load_catalog(args.catalog.as_deref())
        .context("Failed to load variable catalog")?;
    tracing::debug!(variables = catalog.len(), "Catalog ready");

    let json = args.command.json();
    match args.command {
        Command::Render { file, .. } => render_template(&file, &catalog, json),
        Command::Check { file, .. } => check_template(&file, &catalog, json),
        Command::Suggest { query, .. } => list_suggestions(query.as_deref(), &catalog, json),
        Command::Replay {
            file,
            script,
            context,
            ..
        } => {
            let context = context.unwrap_or(config.default_context);
            replay_script(&file, &script, context, &config, catalog, json)
        }
    }
}

fn load(file: &Path) -> Result<String> {
    read_template(file).with_context(|| format!("Failed to read template {}", file.display()))
}

fn render_template(file: &Path, catalog: &VariableCatalog, json: bool) -> Result<ExitCode> {
    let segments = render::render(&load(file)?);

    if json {
        println!("{}", serde_json::to_string_pretty(&segments)?);
        return Ok(ExitCode::SUCCESS);
    }
    for segment in &segments {
        match segment {
            Segment::Text { content } => println!("text   {:?}", content),
            Segment::Token { identifier } => match render::describe(catalog, identifier) {
                Some(description) => println!("token  {}  ({})", segment.literal(), description),
                None => println!("token  {}", segment.literal()),
            },
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn check_template(file: &Path, catalog: &VariableCatalog, json: bool) -> Result<ExitCode> {
    let text = load(file)?;
    let total = render::render(&text).iter().filter(|s| s.is_token()).count();
    let unknown = render::unknown_tokens(&text, catalog);

    if json {
        let report = json!({ "tokens": total, "unknown": unknown });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for span in &unknown {
            println!(
                "{}: unknown variable {} at {}..{}",
                file.display(),
                span.literal(),
                span.start,
                span.end
            );
        }
        println!(
            "{} placeholder(s), {} unknown",
            total,
            unknown.len()
        );
    }

    Ok(if unknown.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn list_suggestions(query: Option<&str>, catalog: &VariableCatalog, json: bool) -> Result<ExitCode> {
    let matches = suggest::suggest(catalog, query.unwrap_or_default());

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
    } else {
        for entry in &matches {
            if entry.description.is_empty() {
                println!("{}", entry.name);
            } else {
                println!("{}\t{}", entry.name, entry.description);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn replay_script(
    file: &Path,
    script: &Path,
    context: EditContext,
    config: &EditorConfig,
    catalog: VariableCatalog,
    json: bool,
) -> Result<ExitCode> {
    let text = load(file)?;
    let source = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let messages = parse_script(&source)
        .with_context(|| format!("Failed to parse script {}", script.display()))?;

    let mut model = TemplateModel::with_config(config, Arc::new(catalog));
    model.set_text(context, &text);
    let report = replay(&mut model, context, &messages);
    tracing::info!(
        field = context.label(),
        steps = messages.len(),
        applied = report.applied,
        changes = report.changes,
        "Replay finished"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.text);
    }
    Ok(ExitCode::SUCCESS)
}
