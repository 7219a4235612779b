use anyhow::{bail, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Bytes in an encoded header
pub const HEADER_LEN: usize = 36;
/// The only header layout in use
pub const HEADER_VERSION: u8 = 0;

/// Sample word type codes: 0 i8, 1 u8, 2 i16, 3 u16, 4 i32, 5 u32, 6 i64, 7 u64
pub const WORD_CODE_U16: u8 = 3;

/// Fixed-size pulse record header, little-endian on the wire
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseHeader {
    pub channel: i16,
    pub version: u8,
    pub word_code: u8,
    pub presamples: u32,
    pub nsamples: u32,
    /// Seconds per sample
    pub timebase: f32,
    pub volts_per_arb: f32,
    /// Nanoseconds since the UNIX epoch
    pub trigger_time: u64,
    pub trigger_frame: u64,
}

impl PulseHeader {
    pub fn to_bytes(&self) -> Bytes {
        let mut b = BytesMut::with_capacity(HEADER_LEN);
        b.put_i16_le(self.channel);
        b.put_u8(self.version);
        b.put_u8(self.word_code);
        b.put_u32_le(self.presamples);
        b.put_u32_le(self.nsamples);
        b.put_f32_le(self.timebase);
        b.put_f32_le(self.volts_per_arb);
        b.put_u64_le(self.trigger_time);
        b.put_u64_le(self.trigger_frame);
        b.freeze()
    }

    pub fn parse(mut buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_LEN {
            bail!("pulse header is {} bytes, need {}", buf.len(), HEADER_LEN);
        }
        let hdr = PulseHeader {
            channel: buf.get_i16_le(),
            version: buf.get_u8(),
            word_code: buf.get_u8(),
            presamples: buf.get_u32_le(),
            nsamples: buf.get_u32_le(),
            timebase: buf.get_f32_le(),
            volts_per_arb: buf.get_f32_le(),
            trigger_time: buf.get_u64_le(),
            trigger_frame: buf.get_u64_le(),
        };
        if hdr.version != HEADER_VERSION {
            bail!("unknown pulse header version {}", hdr.version);
        }
        Ok(hdr)
    }

    /// Size in bytes of one sample word
    pub fn word_size(&self) -> Result<usize> {
        match self.word_code {
            0 | 1 => Ok(1),
            2 | 3 => Ok(2),
            4 | 5 => Ok(4),
            6 | 7 => Ok(8),
            c => bail!("unknown sample word code {}", c),
        }
    }
}
