//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Bulvds feed CLI
#[derive(Parser, Debug)]
#[command(name = "bulvds-feed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every listings page and print the merged items
    Listings {
        /// Listings endpoint (overrides config)
        #[arg(long)]
        url: Option<String>,

        /// Items per page (overrides config)
        #[arg(long)]
        per_page: Option<u32>,

        /// Deadline for the whole run in milliseconds (overrides config)
        #[arg(long)]
        deadline_ms: Option<u64>,

        /// Print a report with failed pages and counters instead of bare items
        #[arg(long)]
        report: bool,
    },

    /// Fetch a single listings page
    Page {
        /// 1-based page number
        #[arg(default_value = "1")]
        page: u32,

        /// Listings endpoint (overrides config)
        #[arg(long)]
        url: Option<String>,

        /// Items per page (overrides config)
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Load a site content document
    Content {
        /// Which document
        document: ContentKind,

        /// Site base URL (overrides config)
        #[arg(long)]
        site_url: Option<String>,
    },

    /// Print the effective configuration
    Config,

    /// Print the current clock stamps
    Stamp,
}

/// Site content documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ContentKind {
    /// Client testimonials (client.json)
    Testimonials,
    /// Frequently asked questions (faq.json)
    Faq,
    /// Footer links (footer.json)
    Footer,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one item per line)
    Json,
    /// Human-readable output
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_listings() {
        let cli = Cli::parse_from([
            "bulvds-feed",
            "listings",
            "--per-page",
            "15",
            "--deadline-ms",
            "500",
            "--report",
        ]);

        match cli.command {
            Commands::Listings {
                per_page,
                deadline_ms,
                report,
                url,
            } => {
                assert_eq!(per_page, Some(15));
                assert_eq!(deadline_ms, Some(500));
                assert!(report);
                assert!(url.is_none());
            }
            other => panic!("Expected Listings, got {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "bulvds-feed",
            "content",
            "faq",
            "--format",
            "pretty",
            "-C",
            "feed.yaml",
            "-v",
        ]);

        assert!(matches!(
            cli.command,
            Commands::Content {
                document: ContentKind::Faq,
                ..
            }
        ));
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert_eq!(cli.config, Some(PathBuf::from("feed.yaml")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_parse_page_default() {
        let cli = Cli::parse_from(["bulvds-feed", "page"]);
        assert!(matches!(cli.command, Commands::Page { page: 1, .. }));
    }
}
