use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(name = "song-finder")]
#[command(about = "Find songs by fuzzy search or by browsing artists alphabetically")]
#[command(arg_required_else_help = true)]
pub struct RootArgs {
    #[arg(
        long,
        value_name = "PATH|URL",
        help = "Catalog JSON (artist -> song titles); overrides SONG_FINDER_CATALOG"
    )]
    pub catalog: Option<String>,

    #[arg(
        long,
        value_name = "PX",
        help = "Viewport width used to size the artist grid; overrides SONG_FINDER_VIEWPORT_WIDTH"
    )]
    pub width: Option<u32>,

    #[arg(
        long,
        value_name = "0..1",
        help = "Highest accepted per-token match cost; overrides SONG_FINDER_MAX_COST"
    )]
    pub max_cost: Option<f64>,

    #[arg(
        long,
        value_name = "N",
        help = "Maximum number of search results shown; overrides SONG_FINDER_RESULT_CAP"
    )]
    pub result_cap: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Fuzzy-search songs by artist and title")]
    Search {
        #[arg(required = true, value_name = "QUERY", help = "Search words")]
        query: Vec<String>,
    },
    #[command(about = "List artists filed under a letter (# for digits and symbols)")]
    Browse {
        #[arg(value_name = "LETTER")]
        bucket: models::Bucket,
        #[arg(long, default_value_t = 1, value_name = "N", help = "Page to show (clamped)")]
        page: usize,
    },
    #[command(about = "List the songs of one artist")]
    Songs {
        #[arg(value_name = "ARTIST", help = "Artist name, authored or normalized")]
        artist: String,
    },
    #[command(about = "Pick random songs")]
    Lucky {
        #[arg(long, default_value_t = 3, value_name = "N")]
        count: usize,
    },
    #[command(about = "Show artist counts per letter")]
    Buckets,
    #[command(about = "Start an interactive browse/search shell")]
    Shell {
        #[arg(
            long,
            value_name = "LETTER",
            help = "Letter to open on start (e.g. A); overrides SONG_FINDER_DEFAULT_LETTER"
        )]
        start: Option<models::Bucket>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::Bucket;

    #[test]
    fn parses_browse_with_symbol_bucket() {
        let args = RootArgs::try_parse_from(["song-finder", "browse", "#", "--page", "2"]).unwrap();
        match args.command {
            Command::Browse { bucket, page } => {
                assert_eq!(bucket, Bucket::Symbol);
                assert_eq!(page, 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn search_joins_multiple_words() {
        let args = RootArgs::try_parse_from([
            "song-finder",
            "--format",
            "json",
            "search",
            "john",
            "lemon",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        match args.command {
            Command::Search { query } => assert_eq!(query, vec!["john", "lemon"]),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_bucket() {
        assert!(RootArgs::try_parse_from(["song-finder", "browse", "AB"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        RootArgs::command().debug_assert();
    }
}
