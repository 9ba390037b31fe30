use anyhow::Result;
use clap::{Parser, Subcommand};
use gendance::analysis::{
    analyze_file, analyze_files, collect_audio_files, AudioAnalyzer, FixedTempoAnalyzer,
    OnsetConfig, PeakAnalyzer,
};
use gendance::choreography::{BeatGridSource, ChoreographySource, JsonFileSource};
use gendance::model::{AudioFeatures, PoseLibrary};
use gendance::playback::{run_ticks, PlaybackClock, SimulatedClock, WallClock};
use gendance::validation::validate_timeline;
use gendance::{load_timeline, ChoreographyRequest, PlaybackConfig, PlaybackSession};
use std::ops::ControlFlow;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gendance")]
#[command(about = "Analyze a track and dance to it", long_about = None)]
struct Args {
    /// Verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// Tempo detection options shared by every subcommand
#[derive(clap::Args, Debug)]
struct TempoArgs {
    /// Skip tempo detection and use this BPM
    #[arg(long)]
    bpm: Option<f64>,

    /// Onset amplitude threshold on a [-1, 1] scale
    #[arg(long, default_value = "0.8")]
    threshold: f32,

    /// Scan every Nth sample for onsets
    #[arg(long, default_value = "200")]
    stride: usize,

    /// Samples to skip after each onset
    #[arg(long, default_value = "10000")]
    refractory: usize,
}

impl TempoArgs {
    fn peak_analyzer(&self) -> PeakAnalyzer {
        PeakAnalyzer::new().with_onset_config(
            OnsetConfig::default()
                .with_threshold(self.threshold)
                .with_stride(self.stride)
                .with_refractory(self.refractory),
        )
    }

    fn analyze(&self, path: &std::path::Path) -> Result<AudioFeatures> {
        let features = match self.bpm {
            Some(bpm) => analyze_file(&FixedTempoAnalyzer::new(bpm), path),
            None => analyze_file(&self.peak_analyzer(), path),
        };
        features.map_err(|e| {
            log::error!("Failed to process audio. Please try another file.");
            anyhow::Error::from(e)
        })
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print tempo, energy envelope and duration for audio files or directories
    Analyze {
        /// Audio files or directories (scanned recursively)
        #[arg(required = true)]
        paths: Vec<String>,

        /// Print the feature summary as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tempo: TempoArgs,
    },

    /// Generate an offline beat-grid timeline for a track
    Choreograph {
        /// Audio file
        audio: String,

        /// Beats between pose changes
        #[arg(long, default_value = "2")]
        beats_per_move: u32,

        /// Write the timeline here instead of stdout
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        tempo: TempoArgs,
    },

    /// Run the playback loop for a track and print the moves as they happen
    Play {
        /// Audio file
        audio: String,

        /// Timeline JSON from a choreography generator (default: beat grid)
        #[arg(short = 't', long)]
        timeline: Option<String>,

        /// Pose library JSON (default: built-in poses)
        #[arg(long)]
        poses: Option<String>,

        /// Ticks per second
        #[arg(long, default_value = "30")]
        fps: f64,

        /// Transition speed multiplier
        #[arg(long, default_value = "5")]
        speed: f64,

        /// Follow the wall clock instead of simulating ticks as fast as possible
        #[arg(long)]
        realtime: bool,

        #[command(flatten)]
        tempo: TempoArgs,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Analyze { paths, json, tempo } => {
            let paths: Vec<PathBuf> = paths.iter().map(|p| expand(p)).collect();
            let files = collect_audio_files(&paths);
            if files.is_empty() {
                anyhow::bail!("No audio files found in {:?}", paths);
            }

            match tempo.bpm {
                Some(bpm) => print_analysis(&FixedTempoAnalyzer::new(bpm), &files, json),
                None => print_analysis(&tempo.peak_analyzer(), &files, json),
            }
        }

        Command::Choreograph {
            audio,
            beats_per_move,
            output,
            tempo,
        } => {
            let features = tempo.analyze(&expand(&audio))?;
            let poses = PoseLibrary::builtin();
            let request = ChoreographyRequest::new(&features, &poses);
            let loaded = load_timeline(&BeatGridSource::new(beats_per_move), &request);

            let json = serde_json::to_string_pretty(&loaded.timeline)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    log::info!("Timeline written to {:?}", path);
                }
                None => println!("{}", json),
            }
            Ok(())
        }

        Command::Play {
            audio,
            timeline,
            poses,
            fps,
            speed,
            realtime,
            tempo,
        } => {
            let features = tempo.analyze(&expand(&audio))?;
            let library = match poses {
                Some(path) => PoseLibrary::load(&expand(&path))?,
                None => PoseLibrary::builtin(),
            };

            let source: Box<dyn ChoreographySource> = match timeline {
                Some(path) => Box::new(JsonFileSource::new(expand(&path))),
                None => Box::new(BeatGridSource::new(2)),
            };
            let request = ChoreographyRequest::new(&features, &library);
            let loaded = load_timeline(source.as_ref(), &request);
            validate_timeline(&loaded.timeline, &library, features.duration);

            let config = PlaybackConfig::new()
                .with_frame_rate(fps)
                .with_speed_multiplier(speed);
            let interval = config.frame_interval();
            let duration = features.duration;
            let session = PlaybackSession::new(features, loaded.timeline, library).with_config(config);

            log::info!(
                "Dancing to {} at {} BPM ({} moves)",
                session.features().name,
                session.features().bpm,
                session.timeline().len()
            );

            let mut clock: Box<dyn PlaybackClock> = if realtime {
                Box::new(WallClock::new(interval, duration))
            } else {
                Box::new(SimulatedClock::new(0.0, interval, duration))
            };

            let frames = run_ticks(&session, clock.as_mut(), |frame| {
                println!(
                    "{:>2}:{:05.2}  {:<14} next: {:<14} blend {:.2}  pulse {:.2}",
                    (frame.time / 60.0).floor() as u64,
                    frame.time % 60.0,
                    frame.current_move.as_str(),
                    frame.next_move.as_str(),
                    frame.cursor.blend_factor,
                    frame.pulse
                );
                ControlFlow::Continue(())
            });

            log::info!("Playback finished after {} frames", frames);
            Ok(())
        }
    }
}

fn print_analysis<A: AudioAnalyzer + Sync>(analyzer: &A, files: &[PathBuf], json: bool) -> Result<()> {
    let results = analyze_files(analyzer, files);
    let mut failures = 0;

    for (path, result) in &results {
        match result {
            Ok(features) if json => println!("{}", serde_json::to_string_pretty(features)?),
            Ok(features) => println!(
                "{}  {} BPM  {:.1}s  energy {:.1}  ({})",
                features.name,
                features.bpm,
                features.duration,
                features.mean_energy(),
                path.display()
            ),
            Err(_) => failures += 1,
        }
    }

    if failures == results.len() {
        anyhow::bail!("Failed to process audio: none of {} file(s) could be decoded", failures);
    }
    if failures > 0 {
        log::warn!("{} of {} file(s) could not be decoded", failures, results.len());
    }
    Ok(())
}

/// Expand ~ in a user-supplied path
fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}
