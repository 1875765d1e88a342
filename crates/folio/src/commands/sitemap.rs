//! `folio sitemap` command implementation.
//!
//! Writes the same documents the server answers on its sitemap routes, with
//! page sitemaps stored as `sitemap_pages_<n>.xml` files.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Args;
use folio_config::{CliSettings, Config};
use folio_site::Site;
use folio_site::sitemap::{render_sitemap_index, render_urlset};
use folio_site::urls::static_pages_sitemap_file;

use crate::commands::site_from_config;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sitemap command.
#[derive(Args)]
pub(crate) struct SitemapArgs {
    /// Output directory for the sitemap files.
    #[arg(short, long)]
    out: PathBuf,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Catalog data directory (overrides config).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Base URL for sitemap locations (overrides config).
    #[arg(long, env = "FOLIO_BASE_URL")]
    base_url: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SitemapArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            data_dir: self.data_dir,
            base_url: self.base_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.catalog_settings(&config);

        let site = site_from_config(&config);
        let written = write_sitemaps(&site, &self.out, Local::now().date_naive())?;

        output.sitemaps_written(&written, &self.out);
        Ok(())
    }
}

/// Write the sitemap index, the category sitemap and every page sitemap
/// into `out`. Returns the written paths.
///
/// Search engines only accept absolute locations, so a base URL is required.
fn write_sitemaps(site: &Site, out: &Path, today: NaiveDate) -> Result<Vec<PathBuf>, CliError> {
    if !site.has_base_url() {
        return Err(CliError::Validation(
            "sitemap generation requires a base URL (--base-url, [site].base_url or site.baseUrl in the index)"
                .to_owned(),
        ));
    }

    std::fs::create_dir_all(out)?;
    let mut written = Vec::new();
    let mut write = |name: String, xml: String| -> Result<(), CliError> {
        let path = out.join(name);
        std::fs::write(&path, xml)?;
        tracing::info!(path = %path.display(), "Wrote sitemap");
        written.push(path);
        Ok(())
    };

    write(
        "sitemap.xml".to_owned(),
        render_sitemap_index(&site.static_sitemap_index(today))?,
    )?;
    write(
        "sitemap_categories.xml".to_owned(),
        render_urlset(&site.categories_sitemap(today))?,
    )?;
    for n in 1..=site.page_sitemap_count() {
        write(
            static_pages_sitemap_file(n),
            render_urlset(&site.pages_sitemap_at(n, today))?,
        )?;
    }

    Ok(written)
}
