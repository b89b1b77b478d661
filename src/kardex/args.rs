use clap::{Parser, Subcommand, ValueEnum};
use kardex::model::SortMode;

/// Returns the version string, with the git hash appended for non-release
/// builds: "0.3.1" or "0.3.1+abc1234".
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}+{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "kardex", bin_name = "kardex", version = get_version())]
#[command(about = "Cache-aware product catalog manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Catalog API endpoint (overrides the configured one)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum SortArg {
    /// Cheapest first
    PriceAsc,
    /// Most expensive first
    PriceDesc,
    /// Most recently added first
    Newest,
    /// Oldest first
    Oldest,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::PriceAsc => SortMode::PriceAsc,
            SortArg::PriceDesc => SortMode::PriceDesc,
            SortArg::Newest => SortMode::Newest,
            SortArg::Oldest => SortMode::Oldest,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List products
    #[command(alias = "ls")]
    List {
        /// Only this category (exact match)
        #[arg(short, long)]
        category: Option<String>,

        /// Search term, matched case-insensitively against title and description
        #[arg(short, long)]
        search: Option<String>,

        /// Sort order
        #[arg(long, value_enum)]
        sort: Option<SortArg>,

        /// Page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Products per page (overrides the configured size)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Create a product
    #[command(alias = "new")]
    Add {
        #[arg(long)]
        title: String,

        #[arg(long, short = 'd')]
        description: String,

        #[arg(long)]
        price: String,

        /// Discount percentage (0.1-100)
        #[arg(long)]
        discount: String,

        #[arg(long)]
        category: String,

        /// Image URL
        #[arg(long)]
        image: String,
    },

    /// Edit a product; omitted fields keep their current values
    #[command(alias = "e")]
    Edit {
        /// Product id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long, short = 'd')]
        description: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        discount: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        image: Option<String>,
    },

    /// Delete a product
    #[command(alias = "rm")]
    Remove {
        /// Product id
        id: String,

        /// Skip confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Show one product in full
    Show {
        /// Product id
        id: String,
    },

    /// Refetch the catalog from the API, bypassing the cache
    Refresh,

    /// Get or set configuration
    Config {
        /// Configuration key (api-url, page-size, timeout-secs, cache-max-age-secs)
        key: Option<String>,

        /// Value to set (if omitted, prints the current value)
        value: Option<String>,
    },
}
