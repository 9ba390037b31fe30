//! Batch analysis over files and directories

use super::decode::decode_file;
use super::metadata::track_name;
use super::traits::AudioAnalyzer;
use crate::error::AnalysisError;
use crate::model::AudioFeatures;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions picked up when scanning directories
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "aac", "flac", "wav", "ogg", "oga"];

/// Decode and analyze one file
pub fn analyze_file<A: AudioAnalyzer>(
    analyzer: &A,
    path: &Path,
) -> Result<AudioFeatures, AnalysisError> {
    let audio = decode_file(path)?;
    let name = track_name(path);
    let features = analyzer.analyze(&audio, &name);

    log::info!(
        "Analyzed {}: {} BPM, {:.1}s, mean energy {:.1}",
        features.name,
        features.bpm,
        features.duration,
        features.mean_energy()
    );
    Ok(features)
}

/// Expand the given paths into audio files
///
/// Files are taken as given; directories are walked recursively and only
/// files with a known audio extension are kept. Output is sorted.
pub fn collect_audio_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for entry in WalkDir::new(path).follow_links(true) {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && is_audio_file(entry.path()) => {
                        files.push(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(e) => log::warn!("Skipping unreadable entry under {:?}: {}", path, e),
                }
            }
        } else {
            files.push(path.clone());
        }
    }

    files.sort();
    files.dedup();
    files
}

/// Analyze files in parallel; one result per input, in input order
pub fn analyze_files<A: AudioAnalyzer + Sync>(
    analyzer: &A,
    files: &[PathBuf],
) -> Vec<(PathBuf, Result<AudioFeatures, AnalysisError>)> {
    log::info!("Analyzing {} file(s)", files.len());

    files
        .par_iter()
        .map(|path| {
            let result = analyze_file(analyzer, path);
            if let Err(e) = &result {
                log::warn!("{}", e);
            }
            (path.clone(), result)
        })
        .collect()
}

fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PeakAnalyzer;
    use std::fs;

    #[test]
    fn test_collect_audio_files_filters_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("a.MP3"), b"x").unwrap();
        fs::write(nested.join("b.flac"), b"x").unwrap();
        fs::write(nested.join("cover.jpg"), b"x").unwrap();

        let files = collect_audio_files(&[dir.path().to_path_buf()]);
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| is_audio_file(f)));
    }

    #[test]
    fn test_explicit_files_are_kept() {
        let files = collect_audio_files(&[PathBuf::from("/tmp/notes.txt")]);
        assert_eq!(files, vec![PathBuf::from("/tmp/notes.txt")]);
    }

    #[test]
    fn test_undecodable_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let bogus = dir.path().join("bogus.mp3");
        fs::write(&bogus, b"definitely not audio").unwrap();

        let results = analyze_files(&PeakAnalyzer::new(), &[bogus.clone()]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].0, bogus);
        assert!(matches!(results[0].1, Err(AnalysisError::Decode { .. })));
    }
}
