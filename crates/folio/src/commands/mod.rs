//! CLI command implementations.

pub(crate) mod serve;
pub(crate) mod sitemap;

use std::sync::Arc;

use folio_config::Config;
use folio_server::site_options_from_config;
use folio_site::Site;
use folio_storage::{FsStorage, Storage};

pub(crate) use serve::ServeArgs;
pub(crate) use sitemap::SitemapArgs;

/// Build a site over the configured data directory.
pub(crate) fn site_from_config(config: &Config) -> Site {
    let data = &config.data_resolved;
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::with_layout(
        data.dir.clone(),
        data.index_file.as_str(),
        data.categories_dir.as_str(),
    ));
    Site::new(storage, site_options_from_config(config))
}
