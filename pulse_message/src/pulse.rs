use anyhow::{bail, Result};
use bytes::Buf;

use crate::header::{PulseHeader, WORD_CODE_U16};

/// A received pulse record: its header and decoded samples
#[derive(Clone, Debug, PartialEq)]
pub struct Pulse {
    pub header: PulseHeader,
    pub data: Vec<u16>,
}

impl Pulse {
    /// Decode a header part and a body part
    pub fn decode(header: &[u8], mut body: &[u8]) -> Result<Self> {
        let header = PulseHeader::parse(header)?;
        let wordsize = header.word_size()?;
        if header.word_code != WORD_CODE_U16 {
            bail!("only u16 samples are supported, got word code {}", header.word_code);
        }
        let expected = header.nsamples as usize * wordsize;
        if body.len() != expected {
            bail!(
                "channel {}: body is {} bytes but header promises {}",
                header.channel,
                body.len(),
                expected
            );
        }
        let mut data = Vec::with_capacity(header.nsamples as usize);
        while body.has_remaining() {
            data.push(body.get_u16_le());
        }
        Ok(Pulse { header, data })
    }

    pub fn channel(&self) -> i16 {
        self.header.channel
    }

    /// Samples from the trigger point on
    pub fn post_trigger(&self) -> &[u16] {
        let pre = (self.header.presamples as usize).min(self.data.len());
        &self.data[pre..]
    }
}
