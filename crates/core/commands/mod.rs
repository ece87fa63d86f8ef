use crate::app::{self, QueryArgs};

use hathi::ClientOptions;

use clap::Subcommand;
use eyre::WrapErr;
use log::trace;

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// Print the request URL for the identifiers without contacting the catalog
    #[clap(arg_required_else_help = true)]
    Url {
        #[clap(flatten)]
        query: QueryArgs,
    },

    /// Fetch the matching records and items and print the JSON response
    #[clap(arg_required_else_help = true)]
    Get {
        #[clap(flatten)]
        query: QueryArgs,

        /// Print the JSON on a single line
        #[clap(long)]
        compact: bool,
    },

    /// Fetch the matching items and print one line per item
    ///
    /// Each line holds the volume id, rights code, enumeration/chronology and the title of the
    /// owning record, separated by tabs.
    #[clap(arg_required_else_help = true)]
    Items {
        #[clap(flatten)]
        query: QueryArgs,
    },
}

impl Commands {
    pub fn execute(
        self,
        options: &ClientOptions,
        base_url: Option<String>,
    ) -> eyre::Result<String> {
        match self {
            Commands::Url { query } => {
                trace!("url subcommand called");
                let query = query.into_query(base_url)?;
                query.url().wrap_err("Unable to build the request URL")
            }
            Commands::Get { query, compact } => {
                trace!("get subcommand called");
                let query = query.into_query(base_url)?;
                let volumes = hathi::volumes_with(&query, options)
                    .wrap_err("Unable to fetch volumes from the catalog")?;

                let json = if compact {
                    serde_json::to_string(&volumes)?
                } else {
                    serde_json::to_string_pretty(&volumes)?
                };
                Ok(json)
            }
            Commands::Items { query } => {
                trace!("items subcommand called");
                let query = query.into_query(base_url)?;
                let volumes = hathi::volumes_typed(&query, options)
                    .wrap_err("Unable to fetch volumes from the catalog")?;

                if volumes.items.is_empty() {
                    Ok("No items found".to_owned())
                } else {
                    Ok(app::item_lines(&volumes))
                }
            }
        }
    }
}
