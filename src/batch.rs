//! JSON-lines batch jobs.
//!
//! A job file holds one JSON object per line:
//!
//! ```text
//! {"symbology": "ean13", "payload": "400638133393"}
//! {"symbology": "code93", "payload": "abc", "options": {"auto_promote_full_ascii": true}}
//! ```
//!
//! Every job is encoded on its own; a failing job is recorded in the report
//! and never stops the rest of the batch.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::core::options::EncodeOptions;
use crate::symbology::{BarcodeEncoding, Symbology};

const REPORT_VERSION: u8 = 1;

/// One barcode to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    pub symbology: Symbology,
    pub payload: String,
    #[serde(default)]
    pub options: EncodeOptions,
}

/// Successful job output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedJob {
    pub text: String,
    pub pattern: String,
    pub rle: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOutcome {
    Ok(EncodedJob),
    Error(String),
}

impl JobOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, JobOutcome::Ok(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResult {
    /// Line of the job in its source file (1-based).
    pub line: usize,
    pub symbology: Symbology,
    pub payload: String,
    #[serde(flatten)]
    pub outcome: JobOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub version: u8,
    pub generated_at: DateTime<Utc>,
    pub results: Vec<JobResult>,
    /// SHA-256 over the serialized results; independent of `generated_at`.
    pub digest: String,
}

/// Parse job lines, skipping blank lines and `#` comments.
pub fn parse_jobs(text: &str, source: &str) -> Result<Vec<(usize, Job)>> {
    let mut jobs = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let job: Job = serde_json::from_str(trimmed)
            .with_context(|| format!("failed to parse job at line {} in {source}", idx + 1))?;
        jobs.push((idx + 1, job));
    }
    Ok(jobs)
}

pub fn load_jobs(path: &Path) -> Result<Vec<(usize, Job)>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to open job file {}", path.display()))?;
    let jobs = parse_jobs(&text, &path.display().to_string())?;
    if jobs.is_empty() {
        return Err(anyhow!("job file {} contains no jobs", path.display()));
    }
    Ok(jobs)
}

/// Encode a single job, turning encoder failures into an error outcome.
pub fn run_job(job: &Job) -> JobOutcome {
    let encoded = job
        .symbology
        .encode(&job.payload, &job.options)
        .and_then(|barcode| {
            let rle = barcode.rle()?;
            Ok(EncodedJob {
                text: barcode.text.clone(),
                pattern: barcode.rendered(),
                rle: rle.to_string(),
            })
        });
    match encoded {
        Ok(done) => JobOutcome::Ok(done),
        Err(err) => {
            warn!(symbology = %job.symbology, error = %err, "job failed");
            JobOutcome::Error(err.to_string())
        }
    }
}

pub fn run_batch(jobs: &[(usize, Job)]) -> Result<BatchReport> {
    let results: Vec<JobResult> = jobs
        .iter()
        .map(|(line, job)| JobResult {
            line: *line,
            symbology: job.symbology,
            payload: job.payload.clone(),
            outcome: run_job(job),
        })
        .collect();
    let digest = results_digest(&results)?;
    let report = BatchReport {
        version: REPORT_VERSION,
        generated_at: Utc::now(),
        results,
        digest,
    };
    info!(
        jobs = report.results.len(),
        failed = report.failed(),
        "batch finished"
    );
    Ok(report)
}

fn results_digest(results: &[JobResult]) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = Vec::new();
    for result in results {
        serde_json::to_writer(&mut buffer, result).context("failed to hash job result")?;
        hasher.update(&buffer);
        buffer.clear();
    }
    let digest = hasher.finalize();
    Ok(format!("{digest:02x}"))
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    /// Recompute the digest and compare it with the stored one.
    pub fn verify_digest(&self) -> Result<bool> {
        Ok(results_digest(&self.results)? == self.digest)
    }

    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse batch report")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const JOBS: &str = r#"
# shelf labels
{"symbology": "ean13", "payload": "400638133393"}
{"symbology": "code39", "payload": "abc"}
{"symbology": "code93", "payload": "ab", "options": {"auto_promote_full_ascii": true}}
"#;

    #[test]
    fn parses_jobs_with_line_numbers() {
        let jobs = parse_jobs(JOBS, "inline").unwrap();
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].0, 3);
        assert_eq!(jobs[0].1.symbology, Symbology::Ean13);
        assert!(jobs[0].1.options.append_check_digit);
        assert!(jobs[2].1.options.auto_promote_full_ascii);
    }

    #[test]
    fn unknown_option_keys_are_rejected() {
        let err = parse_jobs(
            r#"{"symbology": "ean13", "payload": "1", "options": {"checksum": true}}"#,
            "inline",
        )
        .unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn failures_do_not_abort_the_batch() {
        let jobs = parse_jobs(JOBS, "inline").unwrap();
        let report = run_batch(&jobs).unwrap();
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        match &report.results[0].outcome {
            JobOutcome::Ok(done) => {
                assert_eq!(done.text, "4006381333931");
                assert!(done.rle.starts_with("95:"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        match &report.results[1].outcome {
            JobOutcome::Error(msg) => assert!(msg.contains("'a'")),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(report.results[2].outcome, run_job(&jobs[2].1));
    }

    #[test]
    fn digest_ignores_timestamp_and_survives_round_trip() {
        let jobs = parse_jobs(JOBS, "inline").unwrap();
        let first = run_batch(&jobs).unwrap();
        let second = run_batch(&jobs).unwrap();
        assert_eq!(first.digest, second.digest);

        let back = BatchReport::from_json(&first.to_json().unwrap()).unwrap();
        assert_eq!(back, first);
        assert!(back.verify_digest().unwrap());
    }

    #[test]
    fn results_serialize_with_ok_or_error_key() {
        let result = JobResult {
            line: 1,
            symbology: Symbology::Code39,
            payload: "a".into(),
            outcome: JobOutcome::Error("bad".into()),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], "bad");
        assert_eq!(json["symbology"], "code39");
    }
}
