use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::models::page::Page;
use crate::render::Locale;
use crate::site::render_public_page;
use crate::store::Store;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub files: Vec<PathBuf>,
}

fn flatten(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '-' } else { c })
        .collect();
    stem.trim_matches('.').to_string()
}

/// File name for a page: the slug with path separators flattened, or the id if that is empty.
fn file_stem(slug: &str, id: &str) -> String {
    let stem = flatten(slug);
    if stem.is_empty() {
        flatten(id)
    } else {
        stem
    }
}

/// One distinct stem per page, in page order. A stem that is `index` or already taken
/// falls back to the page id, then to the id with a counter.
fn unique_stems(pages: &[Page]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::from(["index".to_string()]);
    pages
        .iter()
        .map(|page| {
            let mut stem = file_stem(&page.slug, &page.id);
            if taken.contains(&stem) {
                let by_id = file_stem(&page.id, "page");
                warn!(
                    "Page {} would be written as {}.html, which is taken; using {}",
                    page.id, stem, by_id
                );
                stem = by_id;
                let mut n = 2;
                while taken.contains(&stem) {
                    stem = format!("{}-{}", file_stem(&page.id, "page"), n);
                    n += 1;
                }
            }
            taken.insert(stem.clone());
            stem
        })
        .collect()
}

/// Write every page as a static document (`<slug>.html`) and the first public page
/// again as `index.html`. Rendering is done as an anonymous visitor, with active ads.
pub fn export_site(store: &dyn Store, dir: &Path, locale: Locale) -> Result<ExportReport, String> {
    fs::create_dir_all(dir).map_err(|e| format!("{}: {}", dir.display(), e))?;

    let config = store.site_config();
    let pages = store.page_list_all();
    let ads = store.ad_list_active();
    if config.maintenance_mode {
        warn!("Maintenance mode is on; exported pages show the maintenance screen");
    }

    let mut files = Vec::new();
    for (page, stem) in pages.iter().zip(unique_stems(&pages)) {
        let html = render_public_page(&config, &pages, &ads, Some(&page.slug), None, locale);
        let path = dir.join(format!("{}.html", stem));
        fs::write(&path, html).map_err(|e| format!("{}: {}", path.display(), e))?;
        files.push(path);
    }

    let index_html = render_public_page(&config, &pages, &ads, None, None, locale);
    let index = dir.join("index.html");
    fs::write(&index, index_html).map_err(|e| format!("{}: {}", index.display(), e))?;
    files.push(index);

    info!("Exported {} page(s) to {}", pages.len(), dir.display());
    Ok(ExportReport { files })
}
