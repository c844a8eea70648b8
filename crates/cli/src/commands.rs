use clap::{Args, Subcommand};

#[derive(Subcommand)]
pub enum Commands {
    /// Page through a JSON dataset and print every row, one page at a time
    Page {
        #[command(flatten)]
        scan: ScanArgs,

        #[arg(long, help = "Stop after this many non-empty pages")]
        max_pages: Option<usize>,
    },
    /// Print the SQL query fetching one keyset page
    Sql {
        #[command(flatten)]
        scan: ScanArgs,

        /// SQL dialect: "pg" or "mysql"
        #[arg(long, default_value = "pg")]
        dialect: String,

        #[arg(long, help = "Table to select from")]
        table: String,

        #[arg(long, help = "Schema (namespace) of the table")]
        schema: Option<String>,
    },
    /// Print the flattened request parameters
    Params {
        #[command(flatten)]
        scan: ScanArgs,
    },
}

#[derive(Args)]
pub struct ScanArgs {
    #[arg(long, help = "Dataset file: {entity, columns, rows}")]
    pub data: String,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Default sort fields, comma separated (defaults to the first column)"
    )]
    pub fields: Vec<String>,

    #[arg(long, help = "Resume after a key, as FIELD=VALUE (repeatable, VALUE may be null)")]
    pub after: Vec<String>,

    #[arg(long, help = "Page size (1..=10000)")]
    pub page_size: Option<usize>,

    #[arg(long, help = "Sort direction: asc or desc")]
    pub direction: Option<String>,

    #[arg(long, help = "JSON paging settings file, overridden by explicit flags")]
    pub config: Option<String>,
}
