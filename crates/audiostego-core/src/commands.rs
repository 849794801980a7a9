use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::capacity::{self, CapacityReport};
use crate::media::{is_wav_file, AudioBuffer};
use crate::pipeline::Concealment;
use crate::quality::{self, SpectrumBin, StatisticsReport};
use crate::{AudioStegoError, Embedding, Result};

/// prefix of every carrier written by [`hide_batch`]
pub const BATCH_OUTPUT_PREFIX: &str = "encoded_";

/// Outcome for one file of a batch, a failing file does not stop the batch
#[derive(Debug)]
pub struct BatchEntry<T> {
    pub source: PathBuf,
    pub outcome: Result<T>,
}

pub fn hide(
    media: &Path,
    write_to_file: &Path,
    message: &str,
    embedding: Embedding,
    trace_limit: usize,
) -> Result<Concealment> {
    crate::api::hide::prepare()
        .with_embedding(embedding)
        .with_audio(media)
        .with_output(write_to_file)
        .with_message(message)
        .with_trace_limit(trace_limit)
        .execute()
}

/// Hides `message` in every WAV file of `input_dir`. Each carrier is written
/// as `encoded_<name>` into `output_dir`, other files are skipped.
pub fn hide_batch(
    input_dir: &Path,
    output_dir: &Path,
    message: &str,
    embedding: Embedding,
) -> Result<Vec<BatchEntry<StatisticsReport>>> {
    fs::create_dir_all(output_dir).map_err(|source| AudioStegoError::WriteError { source })?;

    let entries = wav_files(input_dir)?
        .into_iter()
        .map(|source| {
            let outcome = batch_target(&source, output_dir).and_then(|target| {
                hide(&source, &target, message, embedding.clone(), 0).map(|c| c.report)
            });
            if let Err(e) = &outcome {
                warn!("Skipping {}: {e}", source.display());
            }
            BatchEntry { source, outcome }
        })
        .collect::<Vec<_>>();
    info!(
        "Hid the message in {} of {} files",
        entries.iter().filter(|e| e.outcome.is_ok()).count(),
        entries.len()
    );

    Ok(entries)
}

/// Unveils the message, optionally saving it into `destination`
pub fn unveil(
    secret_media: &Path,
    destination: Option<&Path>,
    embedding: Embedding,
) -> Result<String> {
    let api = crate::api::unveil::prepare()
        .with_secret_audio(secret_media)
        .with_embedding(embedding);

    match destination {
        Some(folder) => api.into_output_folder(folder).execute(),
        None => api.execute(),
    }
}

/// Unveils the message of every WAV file in `input_dir`
pub fn unveil_batch(input_dir: &Path, embedding: Embedding) -> Result<Vec<BatchEntry<String>>> {
    Ok(wav_files(input_dir)?
        .into_iter()
        .map(|source| {
            let outcome = unveil(&source, None, embedding.clone());
            BatchEntry { source, outcome }
        })
        .collect())
}

/// unveil all raw data, no sentinel interpretation is happening.
/// Just a raw binary dump of the bits the strategy decodes.
pub fn unveil_raw(
    secret_media: &Path,
    destination_file: &Path,
    embedding: Embedding,
) -> Result<()> {
    crate::api::unveil_raw::prepare()
        .with_secret_audio(secret_media)
        .with_embedding(embedding)
        .into_raw_file(destination_file)
        .execute()
}

/// Compares a carrier with its secret counterpart
pub fn analyze(
    original: &Path,
    modified: &Path,
    embedding: &Embedding,
) -> Result<StatisticsReport> {
    let original = AudioBuffer::from_file(original)?;
    let modified = AudioBuffer::from_file(modified)?;

    quality::analyze(&original, &modified, embedding)
}

pub fn capacity(media: &Path, embedding: &Embedding) -> Result<CapacityReport> {
    let carrier = AudioBuffer::from_file(media)?;

    capacity::report(&carrier, embedding)
}

/// Writes the amplitude spectrum of `media` as CSV, returns the number of bins
pub fn spectrum(media: &Path, destination_file: &Path) -> Result<usize> {
    let carrier = AudioBuffer::from_file(media)?;
    let bins = quality::amplitude_spectrum(&carrier);

    let file = File::create(destination_file)
        .map_err(|source| AudioStegoError::WriteError { source })?;
    write_spectrum_csv(&bins, BufWriter::new(file))
        .map_err(|source| AudioStegoError::WriteError { source })?;
    info!(
        "Wrote {} spectrum bins to {}",
        bins.len(),
        destination_file.display()
    );

    Ok(bins.len())
}

fn write_spectrum_csv(bins: &[SpectrumBin], mut out: impl Write) -> std::io::Result<()> {
    writeln!(out, "frequency_hz,amplitude")?;
    for bin in bins {
        writeln!(out, "{},{}", bin.frequency, bin.amplitude)?;
    }
    out.flush()
}

/// WAV files of a directory, sorted by name
fn wav_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|source| AudioStegoError::ReadError { source })? {
        let path = entry
            .map_err(|source| AudioStegoError::ReadError { source })?
            .path();
        if path.is_file() && is_wav_file(&path) {
            files.push(path);
        }
    }
    files.sort();

    Ok(files)
}

fn batch_target(source: &Path, output_dir: &Path) -> Result<PathBuf> {
    let name = source
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or(AudioStegoError::UnsupportedMedia)?;

    Ok(output_dir.join(format!("{BATCH_OUTPUT_PREFIX}{name}")))
}
