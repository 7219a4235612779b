use anyhow::{anyhow, Result};
use pulse_message::{Frame, Packer, PulseRecord};
use rand::Rng;
use std::collections::HashMap;
use tracing::debug;

use crate::template::Template;
use crate::{Config, Event};

/// Samples for one record: a channel-dependent baseline plus the scaled template.
/// Arithmetic wraps at 16 bits.
pub fn sample_buffer(template: &[u16], channel: u16) -> Vec<u16> {
    let base = channel.wrapping_mul(1000);
    let gain = channel.wrapping_add(20).wrapping_mul(1000);
    template
        .iter()
        .map(|&t| base.wrapping_add(gain.wrapping_mul(t)))
        .collect()
}

/// Draws a channel uniformly from `lo..=hi`
pub fn select_channel<R: Rng>(rng: &mut R, lo: u16, hi: u16) -> u16 {
    rng.gen_range(lo..=hi)
}

/// Builds one pulse record per channel in `cfg.chan_min..cfg.chan_max`
pub fn channel_records(cfg: &Config) -> HashMap<u16, PulseRecord> {
    (cfg.chan_min..cfg.chan_max)
        .map(|ch| {
            (
                ch,
                PulseRecord::new(ch, cfg.presamples, cfg.timebase, cfg.volts_per_arb),
            )
        })
        .collect()
}

/// Produces a packed frame for a random channel on each call
pub struct Generator<P, R> {
    template: Template,
    records: HashMap<u16, PulseRecord>,
    select: (u16, u16),
    packer: P,
    rng: R,
}

impl<P: Packer, R: Rng> Generator<P, R> {
    pub fn new(cfg: &Config, packer: P, rng: R) -> Self {
        Generator {
            template: Template::build(cfg.samples, cfg.presamples),
            records: channel_records(cfg),
            select: (cfg.select_min, cfg.select_max),
            packer,
            rng,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn next_frame(&mut self) -> Result<(u16, Frame)> {
        let channel = select_channel(&mut self.rng, self.select.0, self.select.1);
        let record = self
            .records
            .get(&channel)
            .ok_or_else(|| anyhow!("no pulse record for channel {}", channel))?;
        let samples = sample_buffer(&self.template, channel);
        let frame = self.packer.pack(record, &samples)?;
        Ok((channel, frame))
    }
}

/// Generate one frame per tick until either side hangs up
pub fn main<P: Packer, R: Rng>(
    mut generator: Generator<P, R>,
    rx: flume::Receiver<Event>,
    tx: flume::Sender<(u16, Frame)>,
) -> Result<()> {
    loop {
        match rx.recv() {
            Ok(Event::Tick) => {
                let next = generator.next_frame()?;
                if tx.send(next).is_err() {
                    debug!("publisher gone, stopping generator");
                    break;
                }
            }
            Err(_) => break,
        }
    }
    Ok(())
}
