//! Trial-by-trial reading of a decoded recording.
//!
//! [`TrialReader`] drives two sequential decoder sessions over one
//! recording: a preamble scan that captures the display-geometry message
//! emitted before the first recording block, then the trial walk proper,
//! which seeks each trial, reads its header, and pulls records until the
//! trial's end timestamp is exceeded or the stream runs dry.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::warn;

use crate::classify::{classify, Routed};
use crate::columns::{
    EventTable, RecordingBundle, RecordingTable, SampleFields, SampleTable, TrialHeaderTable,
};
use crate::session::{ConsistencyCheck, EdfSession, EdfSource, SessionError};
use crate::types::{Record, RecordKind, TrialHeader};

/// Marker used when the caller leaves the trial start marker empty.
pub const DEFAULT_START_MARKER: &str = "TRIALID";

/// Substring identifying the display-geometry message in the preamble.
pub const DISPLAY_GEOMETRY_MARKER: &str = "DISPLAY_COORDS";

/// Options for one read operation.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Timestamp consistency checking mode
    pub consistency: ConsistencyCheck,
    /// Import discrete events into the events table
    pub import_events: bool,
    /// Import recording-state snapshots into the recordings table
    pub import_recordings: bool,
    /// Import gaze samples into the samples table
    pub import_samples: bool,
    /// Sample field groups to materialize; fixed for the whole read
    pub sample_fields: SampleFields,
    /// Trial start marker; an empty string selects [`DEFAULT_START_MARKER`]
    pub start_marker: String,
    /// Trial end marker; may be empty
    pub end_marker: String,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            consistency: ConsistencyCheck::Fix,
            import_events: true,
            import_recordings: true,
            import_samples: true,
            sample_fields: SampleFields::all(),
            start_marker: DEFAULT_START_MARKER.to_string(),
            end_marker: String::new(),
        }
    }
}

/// Reads a recording into trial-scoped columnar tables.
///
/// # Example
///
/// ```rust,ignore
/// use edf_trials::{ReadOptions, TrialReader};
///
/// let reader = TrialReader::new(ReadOptions::default());
/// let bundle = reader.read_file(&decoder, Path::new("session.edf"))?;
/// println!("{} trials", bundle.headers.len());
/// ```
#[derive(Debug, Clone)]
pub struct TrialReader {
    options: ReadOptions,
    cancel: Option<Arc<AtomicBool>>,
}

impl TrialReader {
    /// Creates a reader with the given options.
    pub fn new(options: ReadOptions) -> Self {
        Self {
            options,
            cancel: None,
        }
    }

    /// Attaches a cancellation flag, checked once per trial. When set, the
    /// walk stops after the current trial and the partial bundle assembled
    /// so far is returned.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Reads all trials of a recording into a [`RecordingBundle`].
    ///
    /// Opens two sessions sequentially: one events-only session for the
    /// preamble scan (the decoder cursor cannot be rewound), then the main
    /// session for the trial walk.
    pub fn read_file<S: EdfSource>(
        &self,
        source: &S,
        path: &Path,
    ) -> Result<RecordingBundle, SessionError> {
        let display_geometry = {
            let mut session = source.open(path, self.options.consistency, true, false)?;
            scan_preamble(&mut session)
        };

        let mut session = source.open(
            path,
            self.options.consistency,
            self.options.import_events,
            self.options.import_samples,
        )?;

        let start_marker = if self.options.start_marker.is_empty() {
            DEFAULT_START_MARKER
        } else {
            self.options.start_marker.as_str()
        };
        session.set_trial_identifier(start_marker, &self.options.end_marker)?;

        let total_trials = session.trial_count();

        let mut headers = TrialHeaderTable::default();
        let mut events = self.options.import_events.then(EventTable::default);
        let mut recordings = self.options.import_recordings.then(RecordingTable::default);
        let mut samples = self
            .options
            .import_samples
            .then(|| SampleTable::new(self.options.sample_fields));
        let mut skipped_trials = Vec::new();

        for trial in 0..total_trials {
            if self.cancelled() {
                break;
            }

            session.seek_trial(trial)?;
            let header = session.trial_header()?;

            if header.end_time <= header.start_time {
                warn!("skipping trial {trial} due to zero or negative duration");
                skipped_trials.push(trial);
                continue;
            }

            headers.append(trial, &header);
            walk_trial(
                &mut session,
                trial,
                &header,
                events.as_mut(),
                recordings.as_mut(),
                samples.as_mut(),
            );
        }

        Ok(RecordingBundle {
            headers,
            events,
            recordings,
            samples,
            display_geometry,
            skipped_trials,
        })
    }
}

/// Pulls records for one trial until its end bound is exceeded or the
/// stream is exhausted. Exhaustion mid-trial completes the trial, not the
/// whole read.
fn walk_trial<S: EdfSession>(
    session: &mut S,
    trial: usize,
    header: &TrialHeader,
    mut events: Option<&mut EventTable>,
    mut recordings: Option<&mut RecordingTable>,
    mut samples: Option<&mut SampleTable>,
) {
    let start = header.start_time;
    let end = header.end_time;

    loop {
        let record = session.next_record();
        let mut timestamp = 0;

        match classify(&record, end) {
            Routed::EndOfStream => break,
            Routed::Skip => {}
            Routed::Sample(data) => {
                timestamp = data.time;
                if data.time > end {
                    // The terminating record belongs to no trial
                    break;
                }
                if let Some(table) = samples.as_deref_mut() {
                    table.append(trial, data, start);
                }
            }
            Routed::Event { data, past_end } => {
                timestamp = data.sttime;
                if past_end {
                    break;
                }
                if let Some(table) = events.as_deref_mut() {
                    table.append(trial, data, start);
                }
            }
            Routed::Recording(data) => {
                timestamp = data.time;
                if let Some(table) = recordings.as_deref_mut() {
                    table.append(trial, data, start);
                }
            }
        }

        // Defensive end-of-trial check mirroring the per-branch ones
        if timestamp > end {
            break;
        }
    }
}

/// Scans records preceding the first recording block for the
/// display-geometry message.
///
/// Stops at the first recording-state record (the recording has begun, no
/// preamble metadata exists) or at a message whose text contains
/// [`DISPLAY_GEOMETRY_MARKER`], whose full text is returned.
fn scan_preamble<S: EdfSession>(session: &mut S) -> Option<String> {
    loop {
        match session.next_record() {
            Record::Exhausted => return None,
            Record::Recording(_) => return None,
            Record::Event(event) if event.kind == RecordKind::Message.code() => {
                if let Some(text) = &event.message {
                    if text.contains(DISPLAY_GEOMETRY_MARKER) {
                        return Some(text.clone());
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ReadOptions::default();
        assert_eq!(options.consistency, ConsistencyCheck::Fix);
        assert!(options.import_events);
        assert!(options.import_recordings);
        assert!(options.import_samples);
        assert_eq!(options.sample_fields, SampleFields::all());
        assert_eq!(options.start_marker, "TRIALID");
        assert!(options.end_marker.is_empty());
    }
}
