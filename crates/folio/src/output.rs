//! Terminal summaries for the CLI commands.
//!
//! Everything goes to stderr so sitemap XML and logs never mix with it.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use console::{Style, Term};
use folio_config::Config;

/// Colored stderr writer for command summaries.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Describe where the catalog is read from and how links are built.
    pub(crate) fn catalog_settings(&self, config: &Config) {
        self.line(&data_dir_line(config));
        if !config.data_resolved.dir.is_dir() {
            self.warning("Data directory does not exist, the catalog will be empty");
        }
        self.line(&base_url_line(config));
    }

    /// Announce the address the server is about to bind.
    pub(crate) fn listening(&self, config: &Config) {
        self.line(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
    }

    /// Report the sitemap files written into `out`.
    pub(crate) fn sitemaps_written(&self, written: &[PathBuf], out: &Path) {
        for path in written {
            self.line(&format!("  {}", path.display()));
        }
        let summary = written_summary(written.len(), out);
        let _ = self.term.write_line(&self.green.apply_to(summary).to_string());
    }

    /// Report a failed command.
    pub(crate) fn failed(&self, err: &dyn Display) {
        let _ = self
            .term
            .write_line(&self.red.apply_to(format!("Error: {err}")).to_string());
    }

    fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }
}

fn data_dir_line(config: &Config) -> String {
    format!(
        "Data directory: {} (index {})",
        config.data_resolved.dir.display(),
        config.data_resolved.index_file
    )
}

fn base_url_line(config: &Config) -> String {
    match &config.site.base_url {
        Some(base_url) => format!("Base URL: {base_url}"),
        None => "Base URL: from site index (relative links if unset)".to_owned(),
    }
}

fn written_summary(count: usize, out: &Path) -> String {
    let noun = if count == 1 { "file" } else { "files" };
    format!("Wrote {count} sitemap {noun} to {}", out.display())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_base_url_line() {
        let mut config = Config::default();
        assert_eq!(
            base_url_line(&config),
            "Base URL: from site index (relative links if unset)"
        );

        config.site.base_url = Some("https://print.example".to_owned());
        assert_eq!(base_url_line(&config), "Base URL: https://print.example");
    }

    #[test]
    fn test_data_dir_line_names_index_file() {
        let config = Config::default();

        let line = data_dir_line(&config);

        assert!(line.starts_with("Data directory: "), "{line}");
        assert!(line.ends_with("(index pages.json)"), "{line}");
    }

    #[test]
    fn test_written_summary() {
        assert_eq!(
            written_summary(1, Path::new("out")),
            "Wrote 1 sitemap file to out"
        );
        assert_eq!(
            written_summary(4, Path::new("out")),
            "Wrote 4 sitemap files to out"
        );
    }
}
