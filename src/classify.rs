//! Record classification.
//!
//! Routes each decoded record to its columnar store and, for events,
//! decides whether the record's start timestamp falls beyond the active
//! trial's end bound.

use crate::types::{EventData, Record, RecordingInfo, SampleData};

/// Routing decision for one record against the active trial.
#[derive(Debug, PartialEq)]
pub enum Routed<'a> {
    /// Append to the samples table
    Sample(&'a SampleData),
    /// Append to the events table, unless it starts past the trial end
    Event {
        /// The event payload
        data: &'a EventData,
        /// True when `sttime` exceeds the trial's end bound
        past_end: bool,
    },
    /// Append to the recordings table
    Recording(&'a RecordingInfo),
    /// Stream exhausted, the trial is complete
    EndOfStream,
    /// Record kind with no table, ignore and keep walking
    Skip,
}

/// Classifies one record against the active trial's end bound.
#[inline]
pub fn classify(record: &Record, end_time: u32) -> Routed<'_> {
    match record {
        Record::Sample(data) => Routed::Sample(data),
        Record::Event(data) => Routed::Event {
            data,
            past_end: data.sttime > end_time,
        },
        Record::Recording(data) => Routed::Recording(data),
        Record::Exhausted => Routed::EndOfStream,
        Record::Unrecognized(_) => Routed::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordKind;

    #[test]
    fn test_classify_routes_by_variant() {
        let sample = Record::Sample(SampleData::default());
        assert!(matches!(classify(&sample, 100), Routed::Sample(_)));

        let rec = Record::Recording(RecordingInfo::default());
        assert!(matches!(classify(&rec, 100), Routed::Recording(_)));

        assert_eq!(classify(&Record::Exhausted, 100), Routed::EndOfStream);
        assert_eq!(classify(&Record::Unrecognized(77), 100), Routed::Skip);
    }

    #[test]
    fn test_classify_event_end_bound() {
        let event = Record::Event(EventData {
            kind: RecordKind::StartFix.code(),
            sttime: 2000,
            ..Default::default()
        });

        // At the bound the event still belongs to the trial
        assert!(matches!(
            classify(&event, 2000),
            Routed::Event { past_end: false, .. }
        ));
        assert!(matches!(
            classify(&event, 1999),
            Routed::Event { past_end: true, .. }
        ));
    }
}
