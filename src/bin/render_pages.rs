use clap::Parser;
use std::path::Path;
use wapi_fixtures::core::render::page_output_path;
use wapi_fixtures::core::render::page_title;
use wapi_fixtures::utils::{logger, validation::Validate};
use wapi_fixtures::{load_page_definitions, LocalStorage, PageRenderer, PagesSettings, WapiError};

#[derive(Parser)]
#[command(name = "render-pages")]
#[command(about = "Render static fixture pages from a single template")]
struct Args {
    /// Path to TOML configuration file with an optional [pages] section
    #[arg(short, long)]
    config: Option<String>,

    /// Override pages.template
    #[arg(long)]
    template: Option<String>,

    /// Override pages.content (TOML or JSON)
    #[arg(long)]
    content: Option<String>,

    /// Override pages.output_dir
    #[arg(long)]
    output_dir: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - list the pages that would be written
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    if let Err(e) = run(&args).await {
        tracing::error!("❌ Rendering failed: {} (Severity: {:?})", e, e.severity());
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(e.severity().exit_code());
    }
}

async fn run(args: &Args) -> Result<(), WapiError> {
    let mut settings = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            PagesSettings::from_file(path)?
        }
        None => PagesSettings::default(),
    };

    // 套用命令列覆蓋設定
    if let Some(template) = &args.template {
        settings.template = Some(template.clone());
    }
    if let Some(content) = &args.content {
        settings.content = Some(content.clone());
    }
    if let Some(output_dir) = &args.output_dir {
        settings.output_dir = Some(output_dir.clone());
    }

    settings.validate()?;

    let pages = load_page_definitions(settings.content_path())?;
    tracing::info!(
        "📋 {} pages from {}, template {}, output {}",
        pages.len(),
        settings.content_path(),
        settings.template_path(),
        settings.output_dir()
    );

    if args.dry_run {
        perform_dry_run(&settings, &pages)?;
        return Ok(());
    }

    let storage = LocalStorage::new(settings.output_dir());
    let renderer = PageRenderer::new(storage, settings.template_path());
    let written = renderer.render_all(&pages).await?;

    for path in &written {
        println!("📁 {}", Path::new(settings.output_dir()).join(path).display());
    }
    println!("✅ Rendered {} pages", written.len());

    Ok(())
}

fn perform_dry_run(
    settings: &PagesSettings,
    pages: &wapi_fixtures::core::PageDefinitions,
) -> Result<(), WapiError> {
    println!("🔍 Dry Run Analysis:");
    println!("  Template: {}", settings.template_path());
    println!("  Output: {}", settings.output_dir());
    println!();

    for (page, vars) in pages {
        let title = page_title(page, vars)?;
        println!(
            "  {} -> {}",
            page,
            Path::new(settings.output_dir()).join(page_output_path(&title)).display()
        );
    }

    println!();
    println!("✅ Dry run analysis complete. {} pages would be written.", pages.len());
    Ok(())
}
