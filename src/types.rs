//! Core record types produced by an EDF decoder session.
//!
//! This module defines the record model as described in the EDF API user
//! manual: high-frequency gaze samples, discrete parser events, and
//! recording-state snapshots, each carrying an absolute device timestamp.

/// Bit set in a sample's `flags` field when left-eye data is present.
pub const SAMPLE_LEFT: u16 = 0x8000;
/// Bit set in a sample's `flags` field when right-eye data is present.
pub const SAMPLE_RIGHT: u16 = 0x4000;

/// EDF record kind codes.
///
/// Each record pulled from a decoder session reports one of these codes.
/// Codes without a variant here are newer decoder record kinds with no
/// corresponding output table and are passed through silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum RecordKind {
    /// End of stream, no more records pending (0)
    NoPending = 0,
    /// Parser started processing (1)
    StartParse = 1,
    /// Parser finished processing (2)
    EndParse = 2,
    /// Blink onset (3)
    StartBlink = 3,
    /// Blink offset (4)
    EndBlink = 4,
    /// Saccade onset (5)
    StartSacc = 5,
    /// Saccade offset (6)
    EndSacc = 6,
    /// Fixation onset (7)
    StartFix = 7,
    /// Fixation offset (8)
    EndFix = 8,
    /// Mid-fixation update (9)
    FixUpdate = 9,
    /// Parser interrupted (10)
    BreakParse = 10,
    /// Start of a samples block (15)
    StartSamples = 15,
    /// End of a samples block (16)
    EndSamples = 16,
    /// Start of an events block (17)
    StartEvents = 17,
    /// End of an events block (18)
    EndEvents = 18,
    /// Free-text message event (24)
    Message = 24,
    /// Button press/release (25)
    Button = 25,
    /// Input port change (28)
    Input = 28,
    /// Recording-state snapshot (30)
    RecordingInfo = 30,
    /// Data loss marker (0x3F)
    LostData = 0x3F,
    /// Gaze/pupil/head telemetry sample (200)
    Sample = 200,
}

/// The columnar store a record kind belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordClass {
    /// Routed to the samples table
    Sample,
    /// Routed to the events table
    Event,
    /// Routed to the recordings table
    Recording,
    /// Terminates iteration
    EndOfStream,
}

impl RecordKind {
    /// Attempts to parse a record kind from its numeric code.
    #[inline]
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::NoPending),
            1 => Some(Self::StartParse),
            2 => Some(Self::EndParse),
            3 => Some(Self::StartBlink),
            4 => Some(Self::EndBlink),
            5 => Some(Self::StartSacc),
            6 => Some(Self::EndSacc),
            7 => Some(Self::StartFix),
            8 => Some(Self::EndFix),
            9 => Some(Self::FixUpdate),
            10 => Some(Self::BreakParse),
            15 => Some(Self::StartSamples),
            16 => Some(Self::EndSamples),
            17 => Some(Self::StartEvents),
            18 => Some(Self::EndEvents),
            24 => Some(Self::Message),
            25 => Some(Self::Button),
            28 => Some(Self::Input),
            30 => Some(Self::RecordingInfo),
            0x3F => Some(Self::LostData),
            200 => Some(Self::Sample),
            _ => None,
        }
    }

    /// Returns the numeric code for this kind.
    #[inline]
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Returns the columnar store this kind is routed to.
    pub fn class(self) -> RecordClass {
        match self {
            Self::NoPending => RecordClass::EndOfStream,
            Self::Sample => RecordClass::Sample,
            Self::RecordingInfo => RecordClass::Recording,
            _ => RecordClass::Event,
        }
    }
}

/// Which eyes contributed data to a sample, derived from its flag bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum EyeData {
    /// Left eye only
    Left = 0,
    /// Right eye only
    Right = 1,
    /// Both eyes
    Binocular = 2,
}

impl EyeData {
    /// Derives the eye indicator from a sample's `flags` bitmask.
    pub fn from_flags(flags: u16) -> Self {
        if flags & SAMPLE_LEFT != 0 {
            if flags & SAMPLE_RIGHT != 0 {
                Self::Binocular
            } else {
                Self::Left
            }
        } else {
            Self::Right
        }
    }

    /// Returns the numeric code stored in the samples table.
    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// One gaze/pupil/head telemetry sample, mirroring the EDF API FSAMPLE
/// struct. Paired channels are `[left, right]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleData {
    /// Absolute device timestamp (ms)
    pub time: u32,
    /// Pupil x position
    pub px: [f32; 2],
    /// Pupil y position
    pub py: [f32; 2],
    /// Headref x position
    pub hx: [f32; 2],
    /// Headref y position
    pub hy: [f32; 2],
    /// Pupil size (area or diameter)
    pub pa: [f32; 2],
    /// Gaze x position
    pub gx: [f32; 2],
    /// Gaze y position
    pub gy: [f32; 2],
    /// Pixels-per-degree x resolution
    pub rx: f32,
    /// Pixels-per-degree y resolution
    pub ry: f32,
    /// Gaze x velocity
    pub gxvel: [f32; 2],
    /// Gaze y velocity
    pub gyvel: [f32; 2],
    /// Headref x velocity
    pub hxvel: [f32; 2],
    /// Headref y velocity
    pub hyvel: [f32; 2],
    /// Raw x velocity
    pub rxvel: [f32; 2],
    /// Raw y velocity
    pub ryvel: [f32; 2],
    /// Filtered gaze x velocity
    pub fgxvel: [f32; 2],
    /// Filtered gaze y velocity
    pub fgyvel: [f32; 2],
    /// Filtered headref x velocity
    pub fhxvel: [f32; 2],
    /// Filtered headref y velocity
    pub fhyvel: [f32; 2],
    /// Filtered raw x velocity
    pub frxvel: [f32; 2],
    /// Filtered raw y velocity
    pub fryvel: [f32; 2],
    /// Head-tracker data channels
    pub hdata: [i16; 8],
    /// Sample flags (eye presence, tracking state)
    pub flags: u16,
    /// Input port state
    pub input: u16,
    /// Button state
    pub buttons: u16,
    /// Head-tracker data type
    pub htype: i16,
    /// Process error flags
    pub errors: u16,
}

/// One discrete parser event, mirroring the EDF API FEVENT struct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventData {
    /// Effective timestamp of the event (ms)
    pub time: u32,
    /// Specific event kind code (see [`RecordKind`])
    pub kind: u16,
    /// Bitmask of fields actually read by the decoder
    pub read: u16,
    /// Eye the event was detected on
    pub eye: i16,
    /// Event start timestamp (ms)
    pub sttime: u32,
    /// Event end timestamp (ms), zero when the event reports no end
    pub entime: u32,
    /// Headref x at event start
    pub hstx: f32,
    /// Headref y at event start
    pub hsty: f32,
    /// Gaze x at event start
    pub gstx: f32,
    /// Gaze y at event start
    pub gsty: f32,
    /// Pupil size at event start
    pub sta: f32,
    /// Headref x at event end
    pub henx: f32,
    /// Headref y at event end
    pub heny: f32,
    /// Gaze x at event end
    pub genx: f32,
    /// Gaze y at event end
    pub geny: f32,
    /// Pupil size at event end
    pub ena: f32,
    /// Average headref x
    pub havx: f32,
    /// Average headref y
    pub havy: f32,
    /// Average gaze x
    pub gavx: f32,
    /// Average gaze y
    pub gavy: f32,
    /// Average pupil size
    pub ava: f32,
    /// Average velocity
    pub avel: f32,
    /// Peak velocity
    pub pvel: f32,
    /// Velocity at event start
    pub svel: f32,
    /// Velocity at event end
    pub evel: f32,
    /// Pupil x size/update at event start
    pub supd_x: f32,
    /// Pupil x size/update at event end
    pub eupd_x: f32,
    /// Pupil y size/update at event start
    pub supd_y: f32,
    /// Pupil y size/update at event end
    pub eupd_y: f32,
    /// Parser status flags
    pub status: u16,
    /// Event flags
    pub flags: u16,
    /// Input port state
    pub input: u16,
    /// Button state
    pub buttons: u16,
    /// Which parser pass produced the event
    pub parsedby: u16,
    /// Free-text message payload, present for message events
    pub message: Option<String>,
}

/// One recording-state snapshot, mirroring the EDF API RECORDINGS struct.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecordingInfo {
    /// Timestamp of the state change (ms)
    pub time: u32,
    /// Acquisition rate (Hz)
    pub sample_rate: f32,
    /// Event type flags
    pub eflags: u16,
    /// Sample type flags
    pub sflags: u16,
    /// Recording state (start/end)
    pub state: u16,
    /// What data is recorded (events, samples, both)
    pub record_type: u16,
    /// Pupil size measure (area or diameter)
    pub pupil_type: u16,
    /// Recording mode (pupil-only or pupil-CR)
    pub recording_mode: u16,
    /// Sample filter setting
    pub filter_type: u16,
    /// Position type (gaze, headref, raw)
    pub pos_type: u16,
    /// Recorded eye(s)
    pub eye: u16,
}

/// Header for one trial as reported by the trial navigator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialHeader {
    /// Trial duration (ms)
    pub duration: u32,
    /// Absolute trial start timestamp (ms)
    pub start_time: u32,
    /// Absolute trial end timestamp (ms)
    pub end_time: u32,
    /// Recording configuration active at trial start
    pub recording: RecordingInfo,
}

/// One decoded record pulled from a session stream.
///
/// `Unrecognized` carries the kind code of a record that has no output
/// table; such records are skipped without terminating iteration.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Gaze/pupil/head telemetry sample
    Sample(SampleData),
    /// Discrete parser event
    Event(EventData),
    /// Recording-state snapshot
    Recording(RecordingInfo),
    /// End of stream
    Exhausted,
    /// Record kind with no corresponding table
    Unrecognized(u16),
}
