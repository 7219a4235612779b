//! Pulse record message definition: the two-part frame a pulse publisher sends
//! and a pulse subscriber receives.
//!
//! Each published message is a 36-byte [`PulseHeader`](header::PulseHeader)
//! followed by a body of little-endian samples. The first two header bytes hold the
//! channel number, so subscribers can filter on a channel with a plain
//! prefix subscription (see [`topic`]).

pub mod header;
pub mod pulse;

use anyhow::{bail, Result};
use bytes::{BufMut, Bytes, BytesMut};
use std::time::{SystemTime, UNIX_EPOCH};

pub use header::{PulseHeader, HEADER_LEN, HEADER_VERSION, WORD_CODE_U16};
pub use pulse::Pulse;

/// One header and one body, in the order they go on the wire
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub header: Bytes,
    pub body: Bytes,
}

/// Fixed packing parameters for one channel's pulse records
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseRecord {
    /// Channel (1-indexed) the records belong to
    pub channel: u16,
    /// Samples preceding the trigger point
    pub presamples: u32,
    /// Sample period in seconds
    pub timebase: f64,
    /// Conversion from raw sample units to volts
    pub volts_per_arb: f64,
}

impl PulseRecord {
    pub fn new(channel: u16, presamples: u32, timebase: f64, volts_per_arb: f64) -> Self {
        PulseRecord {
            channel,
            presamples,
            timebase,
            volts_per_arb,
        }
    }

    /// Pack samples with an explicit trigger time (ns since the epoch) and frame index
    pub fn pack_at(&self, samples: &[u16], trigger_time: u64, trigger_frame: u64) -> Result<Frame> {
        let channel = match i16::try_from(self.channel) {
            Ok(c) => c,
            Err(_) => bail!("channel {} does not fit in a pulse header", self.channel),
        };
        let nsamples = match u32::try_from(samples.len()) {
            Ok(n) => n,
            Err(_) => bail!("record of {} samples is too long to pack", samples.len()),
        };
        let header = PulseHeader {
            channel,
            version: HEADER_VERSION,
            word_code: WORD_CODE_U16,
            presamples: self.presamples,
            nsamples,
            timebase: self.timebase as f32,
            volts_per_arb: self.volts_per_arb as f32,
            trigger_time,
            trigger_frame,
        };

        let mut body = BytesMut::with_capacity(2 * samples.len());
        for &s in samples {
            body.put_u16_le(s);
        }

        Ok(Frame {
            header: header.to_bytes(),
            body: body.freeze(),
        })
    }

    /// Pack samples triggered now, by the system clock
    pub fn pack(&self, samples: &[u16]) -> Result<Frame> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
        let trigger_time = u64::try_from(now.as_nanos())?;
        let frame_ns = self.timebase * 1e9;
        let trigger_frame = if frame_ns > 0. {
            (trigger_time as f64 / frame_ns) as u64
        } else {
            0
        };
        self.pack_at(samples, trigger_time, trigger_frame)
    }
}

/// Turns a channel's samples into a wire frame
pub trait Packer {
    fn pack(&self, record: &PulseRecord, samples: &[u16]) -> Result<Frame>;
}

/// The standard packer: stamps each record with the current time
#[derive(Clone, Copy, Debug, Default)]
pub struct DastardPacker;

impl Packer for DastardPacker {
    fn pack(&self, record: &PulseRecord, samples: &[u16]) -> Result<Frame> {
        record.pack(samples)
    }
}

/// Subscription prefix selecting a single channel's messages
pub fn topic(channel: u16) -> [u8; 2] {
    (channel as i16).to_le_bytes()
}
