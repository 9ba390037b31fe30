//! Track naming from embedded tags

use lofty::file::TaggedFileExt;
use lofty::prelude::Accessor;
use lofty::probe::Probe;
use std::path::Path;

/// Display name for a track: tag title when present, otherwise the file name
pub fn track_name(path: &Path) -> String {
    match read_title(path) {
        Some(title) => title,
        None => file_name(path),
    }
}

fn read_title(path: &Path) -> Option<String> {
    let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
        Ok(f) => f,
        Err(e) => {
            log::debug!("No readable tags in {:?}: {}", path, e);
            return None;
        }
    };

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())?;
    let title = tag.title()?.trim().to_string();

    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
