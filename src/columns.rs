//! Columnar stores for trial-scoped output tables.
//!
//! Each table is a struct of column vectors; rows across tables are tied
//! together only by the zero-based `trial` index. The samples table
//! materializes optional column groups according to a [`SampleFields`]
//! mask fixed for the duration of one read.

use bitflags::bitflags;

use crate::normalize::float_or_missing;
use crate::types::{EventData, EyeData, RecordingInfo, SampleData, TrialHeader};

bitflags! {
    /// Selects which optional sample field groups are materialized.
    ///
    /// Each flag gates exactly one column group, independent of the
    /// others. The mask is read once before processing begins.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SampleFields: u32 {
        /// Absolute and trial-relative timestamps
        const TIME = 1 << 0;
        /// Pupil x position (L/R)
        const PX = 1 << 1;
        /// Pupil y position (L/R)
        const PY = 1 << 2;
        /// Headref x position (L/R)
        const HX = 1 << 3;
        /// Headref y position (L/R)
        const HY = 1 << 4;
        /// Pupil size (L/R)
        const PA = 1 << 5;
        /// Gaze x position (L/R)
        const GX = 1 << 6;
        /// Gaze y position (L/R)
        const GY = 1 << 7;
        /// Pixels-per-degree x resolution
        const RX = 1 << 8;
        /// Pixels-per-degree y resolution
        const RY = 1 << 9;
        /// Gaze x velocity (L/R)
        const GXVEL = 1 << 10;
        /// Gaze y velocity (L/R)
        const GYVEL = 1 << 11;
        /// Headref x velocity (L/R)
        const HXVEL = 1 << 12;
        /// Headref y velocity (L/R)
        const HYVEL = 1 << 13;
        /// Raw x velocity (L/R)
        const RXVEL = 1 << 14;
        /// Raw y velocity (L/R)
        const RYVEL = 1 << 15;
        /// Filtered gaze x velocity (L/R)
        const FGXVEL = 1 << 16;
        /// Filtered gaze y velocity (L/R)
        const FGYVEL = 1 << 17;
        /// Filtered headref x velocity (L/R)
        const FHXVEL = 1 << 18;
        /// Filtered headref y velocity (L/R)
        const FHYVEL = 1 << 19;
        /// Filtered raw x velocity (L/R)
        const FRXVEL = 1 << 20;
        /// Filtered raw y velocity (L/R)
        const FRYVEL = 1 << 21;
        /// Head-tracker data channels 1-8
        const HDATA = 1 << 22;
        /// Sample flags
        const FLAGS = 1 << 23;
        /// Input port state
        const INPUT = 1 << 24;
        /// Button state
        const BUTTONS = 1 << 25;
        /// Head-tracker data type
        const HTYPE = 1 << 26;
        /// Process error flags
        const ERRORS = 1 << 27;
    }
}

impl Default for SampleFields {
    fn default() -> Self {
        Self::all()
    }
}

impl SampleFields {
    /// Number of materialized data columns beyond the mandatory
    /// trial and eye columns.
    pub fn column_count(self) -> usize {
        let mut count = 0;
        // Two columns: absolute and trial-relative time
        if self.contains(Self::TIME) {
            count += 2;
        }
        let paired = [
            Self::PX,
            Self::PY,
            Self::HX,
            Self::HY,
            Self::PA,
            Self::GX,
            Self::GY,
            Self::GXVEL,
            Self::GYVEL,
            Self::HXVEL,
            Self::HYVEL,
            Self::RXVEL,
            Self::RYVEL,
            Self::FGXVEL,
            Self::FGYVEL,
            Self::FHXVEL,
            Self::FHYVEL,
            Self::FRXVEL,
            Self::FRYVEL,
        ];
        count += paired.iter().filter(|&&f| self.contains(f)).count() * 2;
        let single = [
            Self::RX,
            Self::RY,
            Self::FLAGS,
            Self::INPUT,
            Self::BUTTONS,
            Self::HTYPE,
            Self::ERRORS,
        ];
        count += single.iter().filter(|&&f| self.contains(f)).count();
        if self.contains(Self::HDATA) {
            count += 8;
        }
        count
    }
}

/// Columnar table of discrete events, one row per qualifying event record.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    /// Owning trial index (zero-based)
    pub trial: Vec<usize>,
    /// Effective event timestamp
    pub time: Vec<u32>,
    /// Event kind code
    pub kind: Vec<u16>,
    /// Decoder read mask
    pub read: Vec<u16>,
    /// Absolute start timestamp
    pub sttime: Vec<u32>,
    /// Trial-relative start timestamp
    pub sttime_rel: Vec<u32>,
    /// Absolute end timestamp, zero when the event reports no end
    pub entime: Vec<u32>,
    /// Trial-relative end timestamp; left unadjusted when `entime` is zero
    pub entime_rel: Vec<u32>,
    /// Headref x at start
    pub hstx: Vec<f32>,
    /// Headref y at start
    pub hsty: Vec<f32>,
    /// Gaze x at start
    pub gstx: Vec<f32>,
    /// Gaze y at start
    pub gsty: Vec<f32>,
    /// Pupil size at start
    pub sta: Vec<f32>,
    /// Headref x at end
    pub henx: Vec<f32>,
    /// Headref y at end
    pub heny: Vec<f32>,
    /// Gaze x at end
    pub genx: Vec<f32>,
    /// Gaze y at end
    pub geny: Vec<f32>,
    /// Pupil size at end
    pub ena: Vec<f32>,
    /// Average headref x
    pub havx: Vec<f32>,
    /// Average headref y
    pub havy: Vec<f32>,
    /// Average gaze x
    pub gavx: Vec<f32>,
    /// Average gaze y
    pub gavy: Vec<f32>,
    /// Average pupil size
    pub ava: Vec<f32>,
    /// Average velocity
    pub avel: Vec<f32>,
    /// Peak velocity
    pub pvel: Vec<f32>,
    /// Velocity at start
    pub svel: Vec<f32>,
    /// Velocity at end
    pub evel: Vec<f32>,
    /// Pupil x update at start
    pub supd_x: Vec<f32>,
    /// Pupil x update at end
    pub eupd_x: Vec<f32>,
    /// Pupil y update at start
    pub supd_y: Vec<f32>,
    /// Pupil y update at end
    pub eupd_y: Vec<f32>,
    /// Eye the event was detected on
    pub eye: Vec<i16>,
    /// Parser status flags
    pub status: Vec<u16>,
    /// Event flags
    pub flags: Vec<u16>,
    /// Input port state
    pub input: Vec<u16>,
    /// Button state
    pub buttons: Vec<u16>,
    /// Parser pass
    pub parsedby: Vec<u16>,
    /// Message payload, empty for non-message events
    pub message: Vec<String>,
}

impl EventTable {
    /// Appends one event row. Float channels are stored raw; sentinel
    /// handling for them happens in the post-pass.
    pub fn append(&mut self, trial: usize, event: &EventData, trial_start: u32) {
        self.trial.push(trial);
        self.time.push(event.time);
        self.kind.push(event.kind);
        self.read.push(event.read);
        self.sttime.push(event.sttime);
        self.sttime_rel.push(event.sttime.wrapping_sub(trial_start));
        self.entime.push(event.entime);
        if event.entime > 0 {
            self.entime_rel.push(event.entime.wrapping_sub(trial_start));
        } else {
            // No end time reported, keep the raw zero
            self.entime_rel.push(event.entime);
        }
        self.hstx.push(event.hstx);
        self.hsty.push(event.hsty);
        self.gstx.push(event.gstx);
        self.gsty.push(event.gsty);
        self.sta.push(event.sta);
        self.henx.push(event.henx);
        self.heny.push(event.heny);
        self.genx.push(event.genx);
        self.geny.push(event.geny);
        self.ena.push(event.ena);
        self.havx.push(event.havx);
        self.havy.push(event.havy);
        self.gavx.push(event.gavx);
        self.gavy.push(event.gavy);
        self.ava.push(event.ava);
        self.avel.push(event.avel);
        self.pvel.push(event.pvel);
        self.svel.push(event.svel);
        self.evel.push(event.evel);
        self.supd_x.push(event.supd_x);
        self.eupd_x.push(event.eupd_x);
        self.supd_y.push(event.supd_y);
        self.eupd_y.push(event.eupd_y);
        self.eye.push(event.eye);
        self.status.push(event.status);
        self.flags.push(event.flags);
        self.input.push(event.input);
        self.buttons.push(event.buttons);
        self.parsedby.push(event.parsedby);
        self.message.push(event.message.clone().unwrap_or_default());
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.trial.len()
    }

    /// Returns true when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.trial.is_empty()
    }

    pub(crate) fn float_columns_mut(&mut self) -> [&mut Vec<f32>; 23] {
        [
            &mut self.hstx,
            &mut self.hsty,
            &mut self.gstx,
            &mut self.gsty,
            &mut self.sta,
            &mut self.henx,
            &mut self.heny,
            &mut self.genx,
            &mut self.geny,
            &mut self.ena,
            &mut self.havx,
            &mut self.havy,
            &mut self.gavx,
            &mut self.gavy,
            &mut self.ava,
            &mut self.avel,
            &mut self.pvel,
            &mut self.svel,
            &mut self.evel,
            &mut self.supd_x,
            &mut self.eupd_x,
            &mut self.supd_y,
            &mut self.eupd_y,
        ]
    }
}

/// Columnar table of gaze samples, one row per qualifying sample record.
///
/// Only the column groups selected by the [`SampleFields`] mask receive
/// data; unselected columns stay empty for the whole read.
#[derive(Debug, Clone)]
pub struct SampleTable {
    fields: SampleFields,
    /// Owning trial index (zero-based)
    pub trial: Vec<usize>,
    /// Eye indicator derived from the sample flags
    pub eye: Vec<EyeData>,
    /// Absolute timestamp
    pub time: Vec<u32>,
    /// Trial-relative timestamp
    pub time_rel: Vec<u32>,
    /// Pupil x, left
    pub px_l: Vec<f32>,
    /// Pupil x, right
    pub px_r: Vec<f32>,
    /// Pupil y, left
    pub py_l: Vec<f32>,
    /// Pupil y, right
    pub py_r: Vec<f32>,
    /// Headref x, left
    pub hx_l: Vec<f32>,
    /// Headref x, right
    pub hx_r: Vec<f32>,
    /// Headref y, left
    pub hy_l: Vec<f32>,
    /// Headref y, right
    pub hy_r: Vec<f32>,
    /// Pupil size, left
    pub pa_l: Vec<f32>,
    /// Pupil size, right
    pub pa_r: Vec<f32>,
    /// Gaze x, left
    pub gx_l: Vec<f32>,
    /// Gaze x, right
    pub gx_r: Vec<f32>,
    /// Gaze y, left
    pub gy_l: Vec<f32>,
    /// Gaze y, right
    pub gy_r: Vec<f32>,
    /// Resolution x
    pub rx: Vec<f32>,
    /// Resolution y
    pub ry: Vec<f32>,
    /// Gaze x velocity, left
    pub gxvel_l: Vec<f32>,
    /// Gaze x velocity, right
    pub gxvel_r: Vec<f32>,
    /// Gaze y velocity, left
    pub gyvel_l: Vec<f32>,
    /// Gaze y velocity, right
    pub gyvel_r: Vec<f32>,
    /// Headref x velocity, left
    pub hxvel_l: Vec<f32>,
    /// Headref x velocity, right
    pub hxvel_r: Vec<f32>,
    /// Headref y velocity, left
    pub hyvel_l: Vec<f32>,
    /// Headref y velocity, right
    pub hyvel_r: Vec<f32>,
    /// Raw x velocity, left
    pub rxvel_l: Vec<f32>,
    /// Raw x velocity, right
    pub rxvel_r: Vec<f32>,
    /// Raw y velocity, left
    pub ryvel_l: Vec<f32>,
    /// Raw y velocity, right
    pub ryvel_r: Vec<f32>,
    /// Filtered gaze x velocity, left
    pub fgxvel_l: Vec<f32>,
    /// Filtered gaze x velocity, right
    pub fgxvel_r: Vec<f32>,
    /// Filtered gaze y velocity, left
    pub fgyvel_l: Vec<f32>,
    /// Filtered gaze y velocity, right
    pub fgyvel_r: Vec<f32>,
    /// Filtered headref x velocity, left
    pub fhxvel_l: Vec<f32>,
    /// Filtered headref x velocity, right
    pub fhxvel_r: Vec<f32>,
    /// Filtered headref y velocity, left
    pub fhyvel_l: Vec<f32>,
    /// Filtered headref y velocity, right
    pub fhyvel_r: Vec<f32>,
    /// Filtered raw x velocity, left
    pub frxvel_l: Vec<f32>,
    /// Filtered raw x velocity, right
    pub frxvel_r: Vec<f32>,
    /// Filtered raw y velocity, left
    pub fryvel_l: Vec<f32>,
    /// Filtered raw y velocity, right
    pub fryvel_r: Vec<f32>,
    /// Head-tracker data channels 1-8
    pub hdata: [Vec<i16>; 8],
    /// Sample flags
    pub flags: Vec<u16>,
    /// Input port state
    pub input: Vec<u16>,
    /// Button state
    pub buttons: Vec<u16>,
    /// Head-tracker data type
    pub htype: Vec<i16>,
    /// Process error flags
    pub errors: Vec<u16>,
}

impl SampleTable {
    /// Creates an empty table materializing the given field groups.
    pub fn new(fields: SampleFields) -> Self {
        Self {
            fields,
            trial: Vec::new(),
            eye: Vec::new(),
            time: Vec::new(),
            time_rel: Vec::new(),
            px_l: Vec::new(),
            px_r: Vec::new(),
            py_l: Vec::new(),
            py_r: Vec::new(),
            hx_l: Vec::new(),
            hx_r: Vec::new(),
            hy_l: Vec::new(),
            hy_r: Vec::new(),
            pa_l: Vec::new(),
            pa_r: Vec::new(),
            gx_l: Vec::new(),
            gx_r: Vec::new(),
            gy_l: Vec::new(),
            gy_r: Vec::new(),
            rx: Vec::new(),
            ry: Vec::new(),
            gxvel_l: Vec::new(),
            gxvel_r: Vec::new(),
            gyvel_l: Vec::new(),
            gyvel_r: Vec::new(),
            hxvel_l: Vec::new(),
            hxvel_r: Vec::new(),
            hyvel_l: Vec::new(),
            hyvel_r: Vec::new(),
            rxvel_l: Vec::new(),
            rxvel_r: Vec::new(),
            ryvel_l: Vec::new(),
            ryvel_r: Vec::new(),
            fgxvel_l: Vec::new(),
            fgxvel_r: Vec::new(),
            fgyvel_l: Vec::new(),
            fgyvel_r: Vec::new(),
            fhxvel_l: Vec::new(),
            fhxvel_r: Vec::new(),
            fhyvel_l: Vec::new(),
            fhyvel_r: Vec::new(),
            frxvel_l: Vec::new(),
            frxvel_r: Vec::new(),
            fryvel_l: Vec::new(),
            fryvel_r: Vec::new(),
            hdata: Default::default(),
            flags: Vec::new(),
            input: Vec::new(),
            buttons: Vec::new(),
            htype: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// The field mask this table was created with.
    pub fn fields(&self) -> SampleFields {
        self.fields
    }

    /// Appends one sample row, materializing only the masked field groups.
    /// Float channels pass through the sentinel normalizer.
    pub fn append(&mut self, trial: usize, sample: &SampleData, trial_start: u32) {
        self.trial.push(trial);
        self.eye.push(EyeData::from_flags(sample.flags));

        if self.fields.contains(SampleFields::TIME) {
            self.time.push(sample.time);
            self.time_rel.push(sample.time.wrapping_sub(trial_start));
        }
        if self.fields.contains(SampleFields::PX) {
            self.px_l.push(float_or_missing(sample.px[0]));
            self.px_r.push(float_or_missing(sample.px[1]));
        }
        if self.fields.contains(SampleFields::PY) {
            self.py_l.push(float_or_missing(sample.py[0]));
            self.py_r.push(float_or_missing(sample.py[1]));
        }
        if self.fields.contains(SampleFields::HX) {
            self.hx_l.push(float_or_missing(sample.hx[0]));
            self.hx_r.push(float_or_missing(sample.hx[1]));
        }
        if self.fields.contains(SampleFields::HY) {
            self.hy_l.push(float_or_missing(sample.hy[0]));
            self.hy_r.push(float_or_missing(sample.hy[1]));
        }
        if self.fields.contains(SampleFields::PA) {
            self.pa_l.push(float_or_missing(sample.pa[0]));
            self.pa_r.push(float_or_missing(sample.pa[1]));
        }
        if self.fields.contains(SampleFields::GX) {
            self.gx_l.push(float_or_missing(sample.gx[0]));
            self.gx_r.push(float_or_missing(sample.gx[1]));
        }
        if self.fields.contains(SampleFields::GY) {
            self.gy_l.push(float_or_missing(sample.gy[0]));
            self.gy_r.push(float_or_missing(sample.gy[1]));
        }
        if self.fields.contains(SampleFields::RX) {
            self.rx.push(float_or_missing(sample.rx));
        }
        if self.fields.contains(SampleFields::RY) {
            self.ry.push(float_or_missing(sample.ry));
        }
        if self.fields.contains(SampleFields::GXVEL) {
            self.gxvel_l.push(float_or_missing(sample.gxvel[0]));
            self.gxvel_r.push(float_or_missing(sample.gxvel[1]));
        }
        if self.fields.contains(SampleFields::GYVEL) {
            self.gyvel_l.push(float_or_missing(sample.gyvel[0]));
            self.gyvel_r.push(float_or_missing(sample.gyvel[1]));
        }
        if self.fields.contains(SampleFields::HXVEL) {
            self.hxvel_l.push(float_or_missing(sample.hxvel[0]));
            self.hxvel_r.push(float_or_missing(sample.hxvel[1]));
        }
        if self.fields.contains(SampleFields::HYVEL) {
            self.hyvel_l.push(float_or_missing(sample.hyvel[0]));
            self.hyvel_r.push(float_or_missing(sample.hyvel[1]));
        }
        if self.fields.contains(SampleFields::RXVEL) {
            self.rxvel_l.push(float_or_missing(sample.rxvel[0]));
            self.rxvel_r.push(float_or_missing(sample.rxvel[1]));
        }
        if self.fields.contains(SampleFields::RYVEL) {
            self.ryvel_l.push(float_or_missing(sample.ryvel[0]));
            self.ryvel_r.push(float_or_missing(sample.ryvel[1]));
        }
        if self.fields.contains(SampleFields::FGXVEL) {
            self.fgxvel_l.push(float_or_missing(sample.fgxvel[0]));
            self.fgxvel_r.push(float_or_missing(sample.fgxvel[1]));
        }
        if self.fields.contains(SampleFields::FGYVEL) {
            self.fgyvel_l.push(float_or_missing(sample.fgyvel[0]));
            self.fgyvel_r.push(float_or_missing(sample.fgyvel[1]));
        }
        if self.fields.contains(SampleFields::FHXVEL) {
            self.fhxvel_l.push(float_or_missing(sample.fhxvel[0]));
            self.fhxvel_r.push(float_or_missing(sample.fhxvel[1]));
        }
        if self.fields.contains(SampleFields::FHYVEL) {
            self.fhyvel_l.push(float_or_missing(sample.fhyvel[0]));
            self.fhyvel_r.push(float_or_missing(sample.fhyvel[1]));
        }
        if self.fields.contains(SampleFields::FRXVEL) {
            self.frxvel_l.push(float_or_missing(sample.frxvel[0]));
            self.frxvel_r.push(float_or_missing(sample.frxvel[1]));
        }
        if self.fields.contains(SampleFields::FRYVEL) {
            self.fryvel_l.push(float_or_missing(sample.fryvel[0]));
            self.fryvel_r.push(float_or_missing(sample.fryvel[1]));
        }
        if self.fields.contains(SampleFields::HDATA) {
            for (column, &value) in self.hdata.iter_mut().zip(sample.hdata.iter()) {
                column.push(value);
            }
        }
        if self.fields.contains(SampleFields::FLAGS) {
            self.flags.push(sample.flags);
        }
        if self.fields.contains(SampleFields::INPUT) {
            self.input.push(sample.input);
        }
        if self.fields.contains(SampleFields::BUTTONS) {
            self.buttons.push(sample.buttons);
        }
        if self.fields.contains(SampleFields::HTYPE) {
            self.htype.push(sample.htype);
        }
        if self.fields.contains(SampleFields::ERRORS) {
            self.errors.push(sample.errors);
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.trial.len()
    }

    /// Returns true when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.trial.is_empty()
    }

    pub(crate) fn float_columns_mut(&mut self) -> Vec<&mut Vec<f32>> {
        vec![
            &mut self.px_l,
            &mut self.px_r,
            &mut self.py_l,
            &mut self.py_r,
            &mut self.hx_l,
            &mut self.hx_r,
            &mut self.hy_l,
            &mut self.hy_r,
            &mut self.pa_l,
            &mut self.pa_r,
            &mut self.gx_l,
            &mut self.gx_r,
            &mut self.gy_l,
            &mut self.gy_r,
            &mut self.rx,
            &mut self.ry,
            &mut self.gxvel_l,
            &mut self.gxvel_r,
            &mut self.gyvel_l,
            &mut self.gyvel_r,
            &mut self.hxvel_l,
            &mut self.hxvel_r,
            &mut self.hyvel_l,
            &mut self.hyvel_r,
            &mut self.rxvel_l,
            &mut self.rxvel_r,
            &mut self.ryvel_l,
            &mut self.ryvel_r,
            &mut self.fgxvel_l,
            &mut self.fgxvel_r,
            &mut self.fgyvel_l,
            &mut self.fgyvel_r,
            &mut self.fhxvel_l,
            &mut self.fhxvel_r,
            &mut self.fhyvel_l,
            &mut self.fhyvel_r,
            &mut self.frxvel_l,
            &mut self.frxvel_r,
            &mut self.fryvel_l,
            &mut self.fryvel_r,
        ]
    }
}

/// Columnar table of recording-state snapshots.
#[derive(Debug, Clone, Default)]
pub struct RecordingTable {
    /// Owning trial index (zero-based)
    pub trial: Vec<usize>,
    /// Absolute timestamp
    pub time: Vec<u32>,
    /// Trial-relative timestamp
    pub time_rel: Vec<u32>,
    /// Acquisition rate (Hz)
    pub sample_rate: Vec<f32>,
    /// Event type flags
    pub eflags: Vec<u16>,
    /// Sample type flags
    pub sflags: Vec<u16>,
    /// Recording state
    pub state: Vec<u16>,
    /// Recorded data type
    pub record_type: Vec<u16>,
    /// Pupil size measure
    pub pupil_type: Vec<u16>,
    /// Recording mode
    pub recording_mode: Vec<u16>,
    /// Sample filter setting
    pub filter_type: Vec<u16>,
    /// Position type
    pub pos_type: Vec<u16>,
    /// Recorded eye(s)
    pub eye: Vec<u16>,
}

impl RecordingTable {
    /// Appends one recording-state row.
    pub fn append(&mut self, trial: usize, rec: &RecordingInfo, trial_start: u32) {
        self.trial.push(trial);
        self.time.push(rec.time);
        self.time_rel.push(rec.time.wrapping_sub(trial_start));
        self.sample_rate.push(rec.sample_rate);
        self.eflags.push(rec.eflags);
        self.sflags.push(rec.sflags);
        self.state.push(rec.state);
        self.record_type.push(rec.record_type);
        self.pupil_type.push(rec.pupil_type);
        self.recording_mode.push(rec.recording_mode);
        self.filter_type.push(rec.filter_type);
        self.pos_type.push(rec.pos_type);
        self.eye.push(rec.eye);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.trial.len()
    }

    /// Returns true when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.trial.is_empty()
    }
}

/// Columnar table of trial headers, one row per walked trial.
#[derive(Debug, Clone, Default)]
pub struct TrialHeaderTable {
    /// Trial index (zero-based)
    pub trial: Vec<usize>,
    /// Trial duration (ms)
    pub duration: Vec<u32>,
    /// Absolute start timestamp
    pub start_time: Vec<u32>,
    /// Absolute end timestamp
    pub end_time: Vec<u32>,
    /// Recording snapshot timestamp
    pub rec_time: Vec<u32>,
    /// Acquisition rate at trial start
    pub rec_sample_rate: Vec<f32>,
    /// Event type flags at trial start
    pub rec_eflags: Vec<u16>,
    /// Sample type flags at trial start
    pub rec_sflags: Vec<u16>,
    /// Recording state at trial start
    pub rec_state: Vec<u16>,
    /// Recorded data type at trial start
    pub rec_record_type: Vec<u16>,
    /// Pupil size measure at trial start
    pub rec_pupil_type: Vec<u16>,
    /// Recording mode at trial start
    pub rec_recording_mode: Vec<u16>,
    /// Sample filter setting at trial start
    pub rec_filter_type: Vec<u16>,
    /// Position type at trial start
    pub rec_pos_type: Vec<u16>,
    /// Recorded eye(s) at trial start
    pub rec_eye: Vec<u16>,
}

impl TrialHeaderTable {
    /// Appends one trial header row.
    pub fn append(&mut self, trial: usize, header: &TrialHeader) {
        self.trial.push(trial);
        self.duration.push(header.duration);
        self.start_time.push(header.start_time);
        self.end_time.push(header.end_time);
        self.rec_time.push(header.recording.time);
        self.rec_sample_rate.push(header.recording.sample_rate);
        self.rec_eflags.push(header.recording.eflags);
        self.rec_sflags.push(header.recording.sflags);
        self.rec_state.push(header.recording.state);
        self.rec_record_type.push(header.recording.record_type);
        self.rec_pupil_type.push(header.recording.pupil_type);
        self.rec_recording_mode.push(header.recording.recording_mode);
        self.rec_filter_type.push(header.recording.filter_type);
        self.rec_pos_type.push(header.recording.pos_type);
        self.rec_eye.push(header.recording.eye);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.trial.len()
    }

    /// Returns true when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.trial.is_empty()
    }
}

/// All output tables of one read, tied together by the trial index.
///
/// Tables for disabled imports are `None`. The bundle is assembled once,
/// after the last trial, and never mutated by the reader afterwards.
#[derive(Debug, Clone)]
pub struct RecordingBundle {
    /// One header row per walked trial
    pub headers: TrialHeaderTable,
    /// Event rows, present when event import was enabled
    pub events: Option<EventTable>,
    /// Recording-state rows, present when recording import was enabled
    pub recordings: Option<RecordingTable>,
    /// Sample rows, present when sample import was enabled
    pub samples: Option<SampleTable>,
    /// Display-geometry message captured before the first recording, if any
    pub display_geometry: Option<String>,
    /// Indices of trials skipped for non-positive duration
    pub skipped_trials: Vec<usize>,
}
