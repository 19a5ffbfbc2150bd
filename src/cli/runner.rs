//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, ContentKind, OutputFormat};
use crate::config::FeedConfig;
use crate::content::stamp::{date_stamp, display_stamp, time_stamp, year_stamp};
use crate::content::{faq_number, ContentClient};
use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::{Aggregate, HttpPageSource, PagedFetcher};
use crate::types::Listing;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing to stdout
    pub async fn run(&self) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute(&mut out).await
    }

    /// Run the CLI command, writing to `out`
    pub async fn execute(&self, out: &mut impl Write) -> Result<()> {
        let config = self.load_config()?;

        match &self.cli.command {
            Commands::Listings {
                url,
                per_page,
                deadline_ms,
                report,
            } => {
                let mut config = config;
                if let Some(url) = url {
                    config.listings_url.clone_from(url);
                }
                if let Some(per_page) = per_page {
                    config.per_page = *per_page;
                }
                if deadline_ms.is_some() {
                    config.deadline_ms = *deadline_ms;
                }
                config.validate()?;
                self.listings(&config, *report, out).await
            }
            Commands::Page {
                page,
                url,
                per_page,
            } => {
                let mut config = config;
                if let Some(url) = url {
                    config.listings_url.clone_from(url);
                }
                if let Some(per_page) = per_page {
                    config.per_page = *per_page;
                }
                config.validate()?;
                self.page(&config, *page, out).await
            }
            Commands::Content { document, site_url } => {
                let mut config = config;
                if site_url.is_some() {
                    config.site_url.clone_from(site_url);
                }
                config.validate()?;
                self.content(&config, *document, out).await
            }
            Commands::Config => self.print_config(&config, out),
            Commands::Stamp => self.stamp(out),
        }
    }

    /// Load the config file, or defaults when none was given
    fn load_config(&self) -> Result<FeedConfig> {
        match &self.cli.config {
            Some(path) => FeedConfig::load(path),
            None => Ok(FeedConfig::default()),
        }
    }

    fn fetcher(&self, config: &FeedConfig) -> Result<PagedFetcher<HttpPageSource<Listing>>> {
        let client = HttpClient::with_config(config.http_client_config())?;
        let source = HttpPageSource::new(client, config.listings_url.clone());
        Ok(PagedFetcher::new(source).with_config(config.fetcher_config()))
    }

    /// Fetch all listings
    async fn listings(
        &self,
        config: &FeedConfig,
        report: bool,
        out: &mut impl Write,
    ) -> Result<()> {
        info!(
            "Fetching listings from {} ({} per page)",
            config.listings_url, config.per_page
        );
        let aggregate = self
            .fetcher(config)?
            .fetch_all_report(config.per_page)
            .await?;

        if report {
            return self.write_value(out, &report_json(&aggregate));
        }

        self.write_items(out, &aggregate.items)
    }

    /// Fetch one listings page
    async fn page(&self, config: &FeedConfig, page: u32, out: &mut impl Write) -> Result<()> {
        let fetched = self.fetcher(config)?.fetch_page(page, config.per_page).await?;

        if self.cli.format == OutputFormat::Pretty {
            writeln!(
                out,
                "Page {} of {} ({} items)",
                fetched.number,
                fetched.effective_total(),
                fetched.items.len()
            )?;
        }
        self.write_items(out, &fetched.items)
    }

    /// Load a content document
    async fn content(
        &self,
        config: &FeedConfig,
        document: ContentKind,
        out: &mut impl Write,
    ) -> Result<()> {
        let client = HttpClient::with_config(config.http_client_config())?;
        let loader = ContentClient::new(client, config.require_site_url()?);

        match document {
            ContentKind::Testimonials => {
                let testimonials = loader.testimonials().await?;
                if self.cli.format == OutputFormat::Pretty {
                    for t in &testimonials {
                        writeln!(out, "{} {} ({} {})", t.name, t.handle(), t.date, t.time)?;
                        writeln!(out, "  {}", t.desc)?;
                    }
                    return Ok(());
                }
                self.write_items(out, &testimonials)
            }
            ContentKind::Faq => {
                let faqs = loader.faqs().await?;
                if self.cli.format == OutputFormat::Pretty {
                    for (idx, faq) in faqs.iter().enumerate() {
                        writeln!(out, "{} {}", faq_number(idx), faq.question)?;
                        writeln!(out, "   {}", faq.answer)?;
                    }
                    return Ok(());
                }
                self.write_items(out, &faqs)
            }
            ContentKind::Footer => {
                let footer = loader.footer().await?;
                self.write_value(out, &footer)
            }
        }
    }

    /// Print the effective config as YAML
    fn print_config(&self, config: &FeedConfig, out: &mut impl Write) -> Result<()> {
        let yaml = serde_yaml::to_string(config)?;
        write!(out, "{yaml}")?;
        Ok(())
    }

    /// Print the current clock stamps
    fn stamp(&self, out: &mut impl Write) -> Result<()> {
        let now = chrono::Local::now();
        match self.cli.format {
            OutputFormat::Pretty => writeln!(out, "{}", display_stamp(&now))?,
            OutputFormat::Json => writeln!(
                out,
                "{}",
                json!({
                    "date": date_stamp(&now),
                    "time": time_stamp(&now),
                    "year": year_stamp(&now),
                })
            )?,
        }
        Ok(())
    }

    /// Write items one JSON document per line, or as one pretty array
    fn write_items<T: Serialize>(&self, out: &mut impl Write, items: &[T]) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => {
                for item in items {
                    writeln!(out, "{}", serde_json::to_string(item)?)?;
                }
            }
            OutputFormat::Pretty => {
                writeln!(out, "{}", serde_json::to_string_pretty(items)?)?;
            }
        }
        Ok(())
    }

    fn write_value<T: Serialize>(&self, out: &mut impl Write, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        writeln!(out, "{text}").map_err(Error::from)
    }
}

/// JSON report for a listings run
pub fn report_json(aggregate: &Aggregate<Listing>) -> Value {
    let failed: serde_json::Map<String, Value> = aggregate
        .failed_pages
        .iter()
        .map(|(page, error)| {
            (
                page.to_string(),
                json!({ "kind": error.kind(), "error": error.to_string() }),
            )
        })
        .collect();

    let skipped = aggregate
        .skipped_pages
        .as_ref()
        .map(|pages| json!({ "from": pages.start(), "to": pages.end() }));

    json!({
        "items": aggregate.items,
        "failed_pages": failed,
        "skipped_pages": skipped,
        "timed_out": aggregate.timed_out,
        "stats": {
            "pages_reported": aggregate.stats.pages_reported,
            "pages_requested": aggregate.stats.pages_requested,
            "pages_fetched": aggregate.stats.pages_fetched,
            "items": aggregate.stats.items,
            "duration_ms": aggregate.stats.duration_ms,
        },
    })
}
