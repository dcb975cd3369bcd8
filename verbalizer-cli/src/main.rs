//! Verbalizer command line entry point.
//!
//! The shell around the core pipeline: reads a finished transcription run
//! (Whisper-style JSON), groups it into topic blocks, renders the meeting
//! PDF, and optionally copies the captured audio beside it under the same
//! sanitized stem.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use verbalizer_core::{
    group_segments, sanitize_stem, transcript::parse_segments, DocumentRenderer, GroupingConfig,
    RenderOptions,
};

const USAGE: &str = "Usage: verbalizer --input <transcription.json> [options]

Options:
  --input <file>            Transcription JSON (Whisper result envelope or bare segment array)
  --name <title>            Meeting title; also used for the output filename stem
  --out-dir <dir>           Output directory (default: current directory)
  --audio <file>            Copy this audio file beside the document as {stem}.<ext>
  --gap-threshold <secs>    Silence gap that starts a new topic block (default: 1.5)
  --length-threshold <n>    Block length in chars that starts a new block (default: 400)
  --json                    Print grouped topic blocks as JSON instead of rendering
  --help                    Show this help";

#[derive(Debug)]
struct Args {
    input: PathBuf,
    name: Option<String>,
    out_dir: PathBuf,
    audio: Option<PathBuf>,
    grouping: GroupingConfig,
    json: bool,
}

fn parse_args_from(mut it: impl Iterator<Item = String>) -> Result<Args, String> {
    let mut input: Option<PathBuf> = None;
    let mut name: Option<String> = None;
    let mut out_dir = PathBuf::from(".");
    let mut audio: Option<PathBuf> = None;
    let mut grouping = GroupingConfig::default();
    let mut json = false;

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--input" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --input".into());
                };
                input = Some(PathBuf::from(v));
            }
            "--name" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --name".into());
                };
                name = Some(v);
            }
            "--out-dir" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --out-dir".into());
                };
                out_dir = PathBuf::from(v);
            }
            "--audio" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --audio".into());
                };
                audio = Some(PathBuf::from(v));
            }
            "--gap-threshold" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --gap-threshold".into());
                };
                grouping.gap_threshold = v
                    .parse::<f64>()
                    .map_err(|_| "invalid value for --gap-threshold".to_string())?;
            }
            "--length-threshold" => {
                let Some(v) = it.next() else {
                    return Err("missing value for --length-threshold".into());
                };
                grouping.length_threshold = v
                    .parse::<usize>()
                    .map_err(|_| "invalid value for --length-threshold".to_string())?;
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => {
                return Err(format!("unknown argument: {other}"));
            }
        }
    }

    let Some(input) = input else {
        return Err("--input is required".into());
    };
    Ok(Args {
        input,
        name,
        out_dir,
        audio,
        grouping,
        json,
    })
}

/// Timestamp-based fallback when no usable title was supplied.
fn fallback_stem() -> String {
    format!("Meeting_{}", chrono::Local::now().format("%Y-%m-%d_%H-%M-%S"))
}

/// Derive the document title and the filesystem stem from the `--name` flag.
///
/// An absent or empty name falls back to `Meeting_{timestamp}` for both; a
/// name that sanitizes away entirely keeps its title but gets the fallback
/// stem.
fn resolve_naming(name: Option<&str>) -> (String, String) {
    let title = match name.map(str::trim) {
        Some(n) if !n.is_empty() => n.to_string(),
        _ => fallback_stem(),
    };
    let stem = sanitize_stem(&title);
    if stem.is_empty() {
        (title, fallback_stem())
    } else {
        (title, stem)
    }
}

fn audio_copy_path(out_dir: &Path, stem: &str, source: &Path) -> PathBuf {
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("wav");
    out_dir.join(format!("{stem}.{ext}"))
}

fn run(args: Args) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.input)
        .with_context(|| format!("reading transcription {:?}", args.input))?;
    let segments = parse_segments(&raw)
        .with_context(|| format!("parsing transcription {:?}", args.input))?;
    info!(segments = segments.len(), "transcription loaded");

    let blocks = group_segments(&segments, &args.grouping);
    info!(blocks = blocks.len(), "grouping complete");

    if args.json {
        let out = serde_json::to_string_pretty(&blocks).context("serializing topic blocks")?;
        println!("{out}");
        return Ok(());
    }

    let (title, stem) = resolve_naming(args.name.as_deref());
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating output directory {:?}", args.out_dir))?;
    let pdf_path = args.out_dir.join(format!("{stem}.pdf"));

    DocumentRenderer::new(RenderOptions::default())
        .render_to_file(&title, &blocks, &pdf_path)
        .with_context(|| format!("writing document {pdf_path:?}"))?;
    info!(path = ?pdf_path, "rendering complete");

    if let Some(audio) = &args.audio {
        let dest = audio_copy_path(&args.out_dir, &stem, audio);
        std::fs::copy(audio, &dest)
            .with_context(|| format!("copying audio {audio:?} to {dest:?}"))?;
        info!(path = ?dest, "audio copied");
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "verbalizer=info".parse().unwrap()),
        )
        .init();

    let args = match parse_args_from(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("verbalizer failed: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, String> {
        parse_args_from(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn input_flag_is_required() {
        assert!(args(&[]).is_err());
        assert!(args(&["--name", "Sync"]).is_err());
    }

    #[test]
    fn thresholds_parse_into_grouping_config() {
        let parsed = args(&[
            "--input", "t.json",
            "--gap-threshold", "2.5",
            "--length-threshold", "120",
        ])
        .expect("parse");
        assert_eq!(parsed.grouping.gap_threshold, 2.5);
        assert_eq!(parsed.grouping.length_threshold, 120);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(args(&["--input", "t.json", "--frobnicate"]).is_err());
        assert!(args(&["--input"]).is_err());
    }

    #[test]
    fn naming_uses_sanitized_title() {
        let (title, stem) = resolve_naming(Some("Q1 Review: Final!!"));
        assert_eq!(title, "Q1 Review: Final!!");
        assert_eq!(stem, "Q1 Review Final");
    }

    #[test]
    fn empty_name_falls_back_to_timestamp_stem() {
        let (title, stem) = resolve_naming(None);
        assert!(title.starts_with("Meeting_"));
        assert_eq!(title, stem);

        let (_, stem) = resolve_naming(Some("???"));
        assert!(stem.starts_with("Meeting_"));
    }

    #[test]
    fn audio_copy_keeps_source_extension() {
        let dest = audio_copy_path(Path::new("out"), "Sync", Path::new("/tmp/rec.flac"));
        assert_eq!(dest, Path::new("out/Sync.flac"));

        let dest = audio_copy_path(Path::new("out"), "Sync", Path::new("/tmp/rec"));
        assert_eq!(dest, Path::new("out/Sync.wav"));
    }

    #[test]
    fn missing_out_dir_is_created_before_writing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("transcription.json");
        std::fs::write(&input, r#"{"segments": []}"#).expect("write input");
        let out_dir = dir.path().join("recordings").join("2026");

        run(Args {
            input,
            name: Some("Sync".into()),
            out_dir: out_dir.clone(),
            audio: None,
            grouping: GroupingConfig::default(),
            json: false,
        })
        .expect("run with missing out dir");

        let pdf = std::fs::read(out_dir.join("Sync.pdf")).expect("pdf written");
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn end_to_end_writes_pdf_and_audio_copy() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("transcription.json");
        std::fs::write(
            &input,
            r#"{"segments": [
                {"start": 0.0, "end": 1.0, "text": "Hello"},
                {"start": 1.2, "end": 2.0, "text": "world"},
                {"start": 5.0, "end": 6.0, "text": "New topic"}
            ]}"#,
        )
        .expect("write input");
        let audio = dir.path().join("capture.wav");
        std::fs::write(&audio, b"RIFF....WAVE").expect("write audio");

        run(Args {
            input,
            name: Some("Project Kickoff!".into()),
            out_dir: dir.path().to_path_buf(),
            audio: Some(audio),
            grouping: GroupingConfig::default(),
            json: false,
        })
        .expect("run");

        let pdf = std::fs::read(dir.path().join("Project Kickoff.pdf")).expect("pdf written");
        assert!(pdf.starts_with(b"%PDF"));
        let wav = std::fs::read(dir.path().join("Project Kickoff.wav")).expect("audio copied");
        assert_eq!(wav, b"RIFF....WAVE");
    }
}
