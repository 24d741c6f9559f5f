use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mosaic_blocks::{catalog, describe, Category, InputKind};

#[derive(Debug, Args)]
pub struct KindsArgs {
    /// Show the fields of one kind
    pub kind: Option<String>,

    /// Print descriptors as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn kinds(args: KindsArgs) -> Result<()> {
    let descriptors = match &args.kind {
        Some(kind) => vec![describe(kind)?],
        None => catalog(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&descriptors)?);
        return Ok(());
    }

    let mut current: Option<Category> = None;
    for descriptor in &descriptors {
        if current != Some(descriptor.category) {
            current = Some(descriptor.category);
            println!("{}", descriptor.category.to_string().bright_blue().bold());
        }
        println!(
            "  {:<16} {}",
            descriptor.kind.as_str().bright_white(),
            descriptor.description.dimmed()
        );

        if args.kind.is_some() {
            for field in descriptor.fields {
                let optional = if field.optional { " (optional)" } else { "" };
                println!(
                    "    {:<14} {}{}",
                    field.name,
                    input_label(&field.input),
                    optional.dimmed()
                );
            }
        }
    }

    Ok(())
}

fn input_label(input: &InputKind) -> String {
    match input {
        InputKind::Text => "text".to_string(),
        InputKind::Multiline => "multiline text".to_string(),
        InputKind::Html => "html".to_string(),
        InputKind::Url => "url".to_string(),
        InputKind::Number { min, max } => format!("number {}..={}", min, max),
        InputKind::Toggle => "true | false".to_string(),
        InputKind::Choice { options } => options.join(" | "),
        InputKind::Images => "JSON image list".to_string(),
    }
}
