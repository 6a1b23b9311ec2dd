//! CLI command handlers
//!
//! Each handler writes its result to `out` so commands can be exercised
//! against any store and any writer.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Subcommand};
use label_engine::{Editor, JsonLinesSink, PrintJob, PrintSink, Viewport, catalog, mm_to_px};
use label_store::TemplateStore;
use rust_decimal::Decimal;
use shared::models::{LabelTemplate, PREDEFINED_ID_LIMIT, PrintContext, Product, TemplateId};
use tracing::info;

use crate::config::Config;

/// Printer density used for the pixel summary of `render`
const PRINT_DPI: f32 = 203.0;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the predefined templates
    Catalog,

    /// List the tenant's custom templates
    List,

    /// Show one template as JSON
    Show {
        id: TemplateId,
    },

    /// Create a custom template, empty or copied from another one
    Create {
        #[arg(long)]
        name: String,

        /// Width in mm (ignored with --from)
        #[arg(long, default_value_t = 40.0)]
        width: f32,

        /// Height in mm (ignored with --from)
        #[arg(long, default_value_t = 30.0)]
        height: f32,

        /// Copy elements and size from this template id
        #[arg(long)]
        from: Option<TemplateId>,
    },

    /// Delete a custom template
    Delete {
        id: TemplateId,
    },

    /// Resolve a template for a product and emit print pages as JSON lines
    Render {
        id: TemplateId,

        #[command(flatten)]
        product: ProductArgs,

        #[arg(long, default_value_t = 1)]
        copies: u32,

        /// Rotate every page by 180°
        #[arg(long)]
        reversed: bool,

        /// Write pages to this file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Resolve a template and print its pixel-space preview as JSON
    Preview {
        id: TemplateId,

        #[command(flatten)]
        product: ProductArgs,

        /// Screen density (defaults to PREVIEW_DPI)
        #[arg(long)]
        dpi: Option<f32>,
    },
}

/// Product to print for: a JSON file, or individual fields
#[derive(Args, Debug, Clone)]
pub struct ProductArgs {
    /// JSON product record; overrides the field flags
    #[arg(long, value_name = "FILE")]
    pub product: Option<PathBuf>,

    #[arg(long, default_value = "Sample product")]
    pub name: String,

    #[arg(long, default_value = "0")]
    pub price: Decimal,

    #[arg(long, default_value = "")]
    pub barcode: String,
}

impl ProductArgs {
    fn load(&self) -> anyhow::Result<Product> {
        match &self.product {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
            }
            None => Ok(Product::new(self.name.clone(), self.price, self.barcode.clone())),
        }
    }
}

/// Predefined ids come from the catalog, everything else from the store
async fn find_template<S: TemplateStore>(
    store: &S,
    tenant_id: &str,
    id: TemplateId,
) -> anyhow::Result<LabelTemplate> {
    let template = if id < PREDEFINED_ID_LIMIT {
        catalog::get(id)
    } else {
        store.get(tenant_id, id).await?
    };
    template.with_context(|| format!("label template {id} not found"))
}

pub async fn run<S: TemplateStore>(
    command: Command,
    store: &S,
    config: &Config,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let tenant = config.tenant_id.as_str();

    match command {
        Command::Catalog => {
            for t in catalog::predefined() {
                writeln!(out, "{:>4}  {:<20} {}x{} mm", t.id, t.name, t.width, t.height)?;
            }
        }
        Command::List => {
            for t in store.list(tenant).await? {
                writeln!(
                    out,
                    "{:>20}  {:<20} {}x{} mm  {} elements",
                    t.id,
                    t.name,
                    t.width,
                    t.height,
                    t.elements.len()
                )?;
            }
        }
        Command::Show { id } => {
            let template = find_template(store, tenant, id).await?;
            serde_json::to_writer_pretty(&mut *out, &template)?;
            writeln!(out)?;
        }
        Command::Create {
            name,
            width,
            height,
            from,
        } => {
            let mut editor = match from {
                Some(source) => {
                    let source = find_template(store, tenant, source).await?;
                    Editor::duplicate(&source, &name)?
                }
                None => Editor::new_custom(&name, width, height)?,
            };
            let saved = editor.save(store, tenant).await?;
            writeln!(out, "{}", saved.id)?;
        }
        Command::Delete { id } => {
            if store.delete(tenant, id).await? {
                writeln!(out, "deleted {id}")?;
            } else {
                writeln!(out, "label template {id} not found")?;
            }
        }
        Command::Render {
            id,
            product,
            copies,
            reversed,
            out: path,
        } => {
            let template = find_template(store, tenant, id).await?;
            let ctx = PrintContext::now(product.load()?, config.timezone);
            let doc = label_engine::resolve(&template, &ctx);
            let job = PrintJob::new(&doc, copies, reversed);

            info!(
                template_id = id,
                pages = job.copies(),
                width_px = mm_to_px(doc.width, PRINT_DPI),
                height_px = mm_to_px(doc.height, PRINT_DPI),
                "Rendering label"
            );

            match path {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("creating {}", path.display()))?;
                    JsonLinesSink::new(std::io::BufWriter::new(file))
                        .print(&job)
                        .await?;
                }
                None => JsonLinesSink::new(&mut *out).print(&job).await?,
            }
        }
        Command::Preview { id, product, dpi } => {
            let template = find_template(store, tenant, id).await?;
            let ctx = PrintContext::now(product.load()?, config.timezone);
            let viewport = Viewport::from_dpi(dpi.unwrap_or(config.preview_dpi));
            let scene = viewport.project(&label_engine::resolve(&template, &ctx));
            serde_json::to_writer_pretty(&mut *out, &scene)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
