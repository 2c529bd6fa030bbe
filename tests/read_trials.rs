//! Integration tests for trial reading over a scripted decoder session.
//!
//! The mock source replays a fixed preamble section and per-trial record
//! runs, honoring the events/samples emission switches the way the real
//! decoder does.

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use edf_trials::types::{SAMPLE_LEFT, SAMPLE_RIGHT};
use edf_trials::{
    read_preamble, scrub_sentinels, ConsistencyCheck, EdfSession, EdfSource, EventData, EyeData,
    ReadOptions, Record, RecordKind, RecordingInfo, SampleData, SampleFields, SessionError,
    TrialHeader, TrialReader,
};

/// Scripted recording: preamble records followed by per-trial record runs.
#[derive(Debug, Clone, Default)]
struct Script {
    preamble: Vec<Record>,
    trials: Vec<(TrialHeader, Vec<Record>)>,
    device_preamble: String,
    reject_markers: bool,
    fail_seek_at: Option<usize>,
    // Sets the flag when the given trial is sought, to exercise
    // between-trial cancellation
    cancel_on_seek: Option<(usize, Arc<AtomicBool>)>,
}

struct ScriptSource {
    script: Script,
    seen_markers: Arc<Mutex<Option<(String, String)>>>,
}

impl ScriptSource {
    fn new(script: Script) -> Self {
        Self {
            script,
            seen_markers: Arc::new(Mutex::new(None)),
        }
    }
}

impl EdfSource for ScriptSource {
    type Session = ScriptSession;

    fn open(
        &self,
        _path: &Path,
        _consistency: ConsistencyCheck,
        want_events: bool,
        want_samples: bool,
    ) -> Result<ScriptSession, SessionError> {
        Ok(ScriptSession {
            script: self.script.clone(),
            want_events,
            want_samples,
            cursor: Cursor::Preamble(0),
            seen_markers: Arc::clone(&self.seen_markers),
        })
    }
}

enum Cursor {
    Preamble(usize),
    Trial { trial: usize, pos: usize },
}

struct ScriptSession {
    script: Script,
    want_events: bool,
    want_samples: bool,
    cursor: Cursor,
    seen_markers: Arc<Mutex<Option<(String, String)>>>,
}

impl ScriptSession {
    fn emits(&self, record: &Record) -> bool {
        match record {
            Record::Event(_) => self.want_events,
            Record::Sample(_) => self.want_samples,
            _ => true,
        }
    }
}

impl EdfSession for ScriptSession {
    fn set_trial_identifier(
        &mut self,
        start_marker: &str,
        end_marker: &str,
    ) -> Result<(), SessionError> {
        if self.script.reject_markers {
            return Err(SessionError::Navigation);
        }
        *self.seen_markers.lock().unwrap() =
            Some((start_marker.to_string(), end_marker.to_string()));
        Ok(())
    }

    fn trial_count(&self) -> usize {
        self.script.trials.len()
    }

    fn seek_trial(&mut self, index: usize) -> Result<(), SessionError> {
        if self.script.fail_seek_at == Some(index) || index >= self.script.trials.len() {
            return Err(SessionError::TrialSeek(index));
        }
        if let Some((trigger, flag)) = &self.script.cancel_on_seek {
            if *trigger == index {
                flag.store(true, Ordering::Relaxed);
            }
        }
        self.cursor = Cursor::Trial {
            trial: index,
            pos: 0,
        };
        Ok(())
    }

    fn trial_header(&mut self) -> Result<TrialHeader, SessionError> {
        match self.cursor {
            Cursor::Trial { trial, .. } => Ok(self.script.trials[trial].0.clone()),
            Cursor::Preamble(_) => Err(SessionError::TrialHeader(0)),
        }
    }

    fn next_record(&mut self) -> Record {
        loop {
            let (records, pos) = match &mut self.cursor {
                Cursor::Preamble(pos) => (&self.script.preamble, pos),
                Cursor::Trial { trial, pos } => (&self.script.trials[*trial].1, pos),
            };
            let Some(record) = records.get(*pos) else {
                return Record::Exhausted;
            };
            *pos += 1;
            if self.emits(record) {
                return record.clone();
            }
        }
    }

    fn preamble_text(&mut self) -> Result<String, SessionError> {
        Ok(self.script.device_preamble.clone())
    }
}

fn header(start: u32, end: u32) -> TrialHeader {
    TrialHeader {
        duration: end.wrapping_sub(start),
        start_time: start,
        end_time: end,
        recording: RecordingInfo {
            time: start,
            sample_rate: 1000.0,
            ..Default::default()
        },
    }
}

fn message(time: u32, text: &str) -> Record {
    Record::Event(EventData {
        time,
        kind: RecordKind::Message.code(),
        sttime: time,
        message: Some(text.to_string()),
        ..Default::default()
    })
}

fn fixation(sttime: u32, entime: u32) -> Record {
    Record::Event(EventData {
        time: entime,
        kind: RecordKind::EndFix.code(),
        sttime,
        entime,
        gavx: 512.0,
        gavy: 384.0,
        ..Default::default()
    })
}

fn sample(time: u32) -> Record {
    Record::Sample(SampleData {
        time,
        flags: SAMPLE_LEFT | SAMPLE_RIGHT,
        ..Default::default()
    })
}

fn recording(time: u32) -> Record {
    Record::Recording(RecordingInfo {
        time,
        sample_rate: 1000.0,
        ..Default::default()
    })
}

#[test]
fn test_reads_trials_into_bundle() {
    let source = ScriptSource::new(Script {
        preamble: vec![message(500, "DISPLAY_COORDS 0 0 1919 1079")],
        trials: vec![
            (
                header(1000, 2000),
                vec![recording(1000), fixation(1200, 1700), sample(1500)],
            ),
            (header(3000, 4000), vec![sample(3500), fixation(3600, 3900)]),
        ],
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    assert_eq!(bundle.headers.len(), 2);
    assert_eq!(bundle.headers.trial, vec![0, 1]);
    assert_eq!(bundle.headers.start_time, vec![1000, 3000]);
    assert!(bundle.skipped_trials.is_empty());
    assert_eq!(
        bundle.display_geometry.as_deref(),
        Some("DISPLAY_COORDS 0 0 1919 1079")
    );

    let events = bundle.events.unwrap();
    assert_eq!(events.trial, vec![0, 1]);
    assert_eq!(events.sttime_rel, vec![200, 600]);
    assert_eq!(events.entime_rel, vec![700, 900]);

    let samples = bundle.samples.unwrap();
    assert_eq!(samples.trial, vec![0, 1]);
    assert_eq!(samples.time_rel, vec![500, 500]);
    assert_eq!(samples.eye, vec![EyeData::Binocular, EyeData::Binocular]);

    let recordings = bundle.recordings.unwrap();
    assert_eq!(recordings.trial, vec![0]);
    assert_eq!(recordings.time_rel, vec![0]);
}

#[test]
fn test_disabled_imports_yield_no_tables() {
    let source = ScriptSource::new(Script {
        trials: vec![(
            header(1000, 2000),
            vec![recording(1000), fixation(1200, 1700), sample(1500)],
        )],
        ..Default::default()
    });

    let options = ReadOptions {
        import_events: false,
        import_recordings: false,
        import_samples: false,
        ..Default::default()
    };
    let bundle = TrialReader::new(options)
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    assert!(bundle.events.is_none());
    assert!(bundle.recordings.is_none());
    assert!(bundle.samples.is_none());
    assert_eq!(bundle.headers.len(), 1);
}

#[test]
fn test_sample_position_sentinel_normalized() {
    let source = ScriptSource::new(Script {
        trials: vec![(
            header(1000, 2000),
            vec![Record::Sample(SampleData {
                time: 1500,
                px: [-32768.0, 50.0],
                ..Default::default()
            })],
        )],
        ..Default::default()
    });

    let options = ReadOptions {
        sample_fields: SampleFields::PX,
        ..Default::default()
    };
    let bundle = TrialReader::new(options)
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    let samples = bundle.samples.unwrap();
    assert_eq!(samples.len(), 1);
    assert!(samples.px_l[0].is_nan());
    assert_eq!(samples.px_r[0], 50.0);
}

#[test]
fn test_rx_only_mask_single_column() {
    let source = ScriptSource::new(Script {
        trials: vec![(
            header(1000, 2000),
            vec![Record::Sample(SampleData {
                time: 1500,
                rx: 12.5,
                ..Default::default()
            })],
        )],
        ..Default::default()
    });

    let options = ReadOptions {
        sample_fields: SampleFields::RX,
        ..Default::default()
    };
    let bundle = TrialReader::new(options)
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    let samples = bundle.samples.unwrap();
    assert_eq!(samples.fields().column_count(), 1);
    assert_eq!(samples.rx, vec![12.5]);
    assert!(samples.ry.is_empty());
    assert!(samples.time.is_empty());
    // Mandatory columns are always present
    assert_eq!(samples.trial, vec![0]);
    assert_eq!(samples.eye.len(), 1);
}

#[test]
fn test_event_past_end_excluded() {
    let source = ScriptSource::new(Script {
        trials: vec![(header(1000, 2000), vec![fixation(2500, 2800)])],
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    assert_eq!(bundle.headers.len(), 1);
    assert!(bundle.events.unwrap().is_empty());
}

#[test]
fn test_event_at_end_bound_included() {
    let source = ScriptSource::new(Script {
        trials: vec![(header(1000, 2000), vec![fixation(2000, 0)])],
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    let events = bundle.events.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events.sttime_rel, vec![1000]);
}

#[test]
fn test_sample_past_end_excluded() {
    let source = ScriptSource::new(Script {
        trials: vec![(header(1000, 2000), vec![sample(1500), sample(2100)])],
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    let samples = bundle.samples.unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples.time, vec![1500]);
}

#[test]
fn test_nonpositive_duration_trial_skipped() {
    let source = ScriptSource::new(Script {
        trials: vec![
            (header(2000, 2000), vec![sample(2000), fixation(2000, 0)]),
            (header(3000, 4000), vec![sample(3500)]),
        ],
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    // The degenerate trial contributes no header row and no body rows
    assert_eq!(bundle.headers.trial, vec![1]);
    assert_eq!(bundle.skipped_trials, vec![0]);
    let samples = bundle.samples.unwrap();
    assert_eq!(samples.trial, vec![1]);
    assert!(bundle.events.unwrap().is_empty());
}

#[test]
fn test_unrecognized_kinds_ignored() {
    let source = ScriptSource::new(Script {
        trials: vec![(
            header(1000, 2000),
            vec![
                Record::Unrecognized(77),
                sample(1500),
                Record::Unrecognized(99),
                fixation(1600, 1900),
            ],
        )],
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    // Skipped records neither append rows nor terminate the walk
    assert_eq!(bundle.samples.unwrap().len(), 1);
    assert_eq!(bundle.events.unwrap().len(), 1);
}

#[test]
fn test_exhaustion_mid_trial_continues_with_next() {
    let source = ScriptSource::new(Script {
        trials: vec![
            (header(1000, 2000), vec![]),
            (header(3000, 4000), vec![sample(3500)]),
        ],
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    assert_eq!(bundle.headers.len(), 2);
    assert_eq!(bundle.samples.unwrap().trial, vec![1]);
}

#[test]
fn test_preamble_scan_not_found() {
    let source = ScriptSource::new(Script {
        preamble: vec![
            message(100, "RECORDED BY host"),
            message(200, "!CAL calibration"),
            message(300, "VALIDATION good"),
            recording(1000),
        ],
        trials: vec![(header(1000, 2000), vec![sample(1500)])],
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    assert!(bundle.display_geometry.is_none());
}

#[test]
fn test_preamble_scan_stops_at_match() {
    let source = ScriptSource::new(Script {
        preamble: vec![
            message(100, "RECORDED BY host"),
            message(200, "DISPLAY_COORDS 0 0 1023 767"),
            recording(1000),
        ],
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    assert_eq!(
        bundle.display_geometry.as_deref(),
        Some("DISPLAY_COORDS 0 0 1023 767")
    );
}

#[test]
fn test_cancellation_stops_after_current_trial() {
    let flag = Arc::new(AtomicBool::new(false));
    let source = ScriptSource::new(Script {
        trials: vec![
            (header(1000, 2000), vec![sample(1500)]),
            (header(3000, 4000), vec![sample(3500)]),
        ],
        cancel_on_seek: Some((0, Arc::clone(&flag))),
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .with_cancel_flag(flag)
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    // Trial 0 completes, trial 1 is never started; partial bundle, no error
    assert_eq!(bundle.headers.trial, vec![0]);
    assert_eq!(bundle.samples.unwrap().trial, vec![0]);
}

#[test]
fn test_preset_cancellation_returns_empty_bundle() {
    let flag = Arc::new(AtomicBool::new(true));
    let source = ScriptSource::new(Script {
        trials: vec![(header(1000, 2000), vec![sample(1500)])],
        ..Default::default()
    });

    let bundle = TrialReader::new(ReadOptions::default())
        .with_cancel_flag(flag)
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    assert!(bundle.headers.is_empty());
}

#[test]
fn test_rejected_markers_abort_read() {
    let source = ScriptSource::new(Script {
        reject_markers: true,
        trials: vec![(header(1000, 2000), vec![])],
        ..Default::default()
    });

    let result = TrialReader::new(ReadOptions::default()).read_file(&source, Path::new("x.edf"));
    assert!(matches!(result, Err(SessionError::Navigation)));
}

#[test]
fn test_seek_failure_aborts_whole_read() {
    let source = ScriptSource::new(Script {
        trials: vec![
            (header(1000, 2000), vec![sample(1500)]),
            (header(3000, 4000), vec![sample(3500)]),
        ],
        fail_seek_at: Some(1),
        ..Default::default()
    });

    let result = TrialReader::new(ReadOptions::default()).read_file(&source, Path::new("x.edf"));
    assert!(matches!(result, Err(SessionError::TrialSeek(1))));
}

#[test]
fn test_empty_start_marker_defaults_to_trialid() {
    let source = ScriptSource::new(Script {
        trials: vec![(header(1000, 2000), vec![])],
        ..Default::default()
    });

    let options = ReadOptions {
        start_marker: String::new(),
        end_marker: "TRIAL_RESULT".to_string(),
        ..Default::default()
    };
    TrialReader::new(options)
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    let markers = source.seen_markers.lock().unwrap().clone();
    assert_eq!(
        markers,
        Some(("TRIALID".to_string(), "TRIAL_RESULT".to_string()))
    );
}

#[test]
fn test_scrub_sentinels_over_event_floats() {
    let source = ScriptSource::new(Script {
        trials: vec![(
            header(1000, 2000),
            vec![Record::Event(EventData {
                time: 1500,
                kind: RecordKind::EndSacc.code(),
                sttime: 1500,
                hstx: -32767.0,
                gstx: 2e8,
                gavx: 640.0,
                ..Default::default()
            })],
        )],
        ..Default::default()
    });

    let mut bundle = TrialReader::new(ReadOptions::default())
        .read_file(&source, Path::new("session.edf"))
        .unwrap();

    // Event floats are appended raw
    assert_eq!(bundle.events.as_ref().unwrap().hstx[0], -32767.0);

    scrub_sentinels(&mut bundle);
    {
        let events = bundle.events.as_ref().unwrap();
        assert!(events.hstx[0].is_nan());
        assert!(events.gstx[0].is_nan());
        assert_eq!(events.gavx[0], 640.0);
    }

    // Idempotent
    scrub_sentinels(&mut bundle);
    let events = bundle.events.as_ref().unwrap();
    assert!(events.hstx[0].is_nan());
    assert_eq!(events.gavx[0], 640.0);
}

#[test]
fn test_read_preamble_returns_device_text() {
    let source = ScriptSource::new(Script {
        device_preamble: "** DATE: Fri Aug 29 10:00:00 2025\n** TYPE: EDF_FILE".to_string(),
        ..Default::default()
    });

    let preamble = read_preamble(&source, Path::new("session.edf")).unwrap();
    assert!(preamble.starts_with("** DATE:"));
}
