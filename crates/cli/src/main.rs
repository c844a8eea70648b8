use crate::error::CliError;
use clap::Parser;
use commands::{Commands, ScanArgs};
use engine_processing::{driver::PageDriver, hook::hook_fn};
use futures::{StreamExt, pin_mut};
use model::records::row::RowData;
use planner::query::{
    ast::common::TableRef,
    builder::select::SelectBuilder,
    dialect,
    offsets::{KeysetOffset, OffsetStrategy},
    renderer::{Render, Renderer},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;
mod scan;

#[derive(Parser)]
#[command(name = "keyset", version = "0.1.0", about = "Keyset pagination toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Page { scan, max_pages } => run_pages(&scan, max_pages).await?,
        Commands::Sql {
            scan,
            dialect,
            table,
            schema,
        } => print_sql(&scan, &dialect, &table, schema).await?,
        Commands::Params { scan } => {
            let source = scan::load_source(&scan).await?;
            let request = scan::build_request(&scan, source.schema()).await?;
            output::print_params(&request.as_params())?;
        }
    }

    Ok(())
}

async fn run_pages(scan: &ScanArgs, max_pages: Option<usize>) -> Result<(), CliError> {
    let source = scan::load_source(scan).await?;
    let request = scan::build_request(scan, source.schema()).await?;

    info!(
        entity = %source.schema().entity,
        rows = source.rows().len(),
        page_size = request.page_size,
        direction = %request.sort_direction,
        "Starting keyset scan"
    );

    let mut seen = 0usize;
    let limit = max_pages.unwrap_or(usize::MAX);
    let driver = PageDriver::new(source).with_hook(hook_fn(move |_rows: Vec<RowData>| {
        seen += 1;
        std::future::ready(Ok::<_, connectors::error::SourceError>(seen >= limit))
    }));

    let pages = driver.into_stream(request);
    pin_mut!(pages);

    let mut index = 0;
    while let Some(page) = pages.next().await {
        output::print_page(index, &page?)?;
        index += 1;
    }

    info!(pages = index, "Keyset scan finished");
    Ok(())
}

async fn print_sql(
    scan: &ScanArgs,
    dialect_name: &str,
    table: &str,
    schema: Option<String>,
) -> Result<(), CliError> {
    let dialect = dialect::from_name(dialect_name)
        .ok_or_else(|| CliError::UnsupportedDialect(dialect_name.to_string()))?;

    let source = scan::load_source(scan).await?;
    let request = scan::build_request(scan, source.schema()).await?;

    let offset = KeysetOffset::new(
        source.schema().clone(),
        request.sort_direction,
        request.key_set_token.clone(),
    );

    let mut table_ref = TableRef::new(table);
    table_ref.schema = schema;

    let select = offset
        .apply_to_builder(
            SelectBuilder::new(&[]).from(table_ref, None),
            &request.key_set_token,
            request.page_size,
        )?
        .build();

    let mut renderer = Renderer::new(dialect.as_ref());
    select.render(&mut renderer);
    let (sql, params) = renderer.finish();

    info!(dialect = %dialect.name(), "Rendered keyset query");
    output::print_sql(&sql, &params);
    Ok(())
}
