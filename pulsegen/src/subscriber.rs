use anyhow::{bail, Result};
use pulse_message::{topic, Pulse};
use std::collections::HashSet;
use tracing::debug;
use zeromq::{Socket, SocketRecv, SubSocket};

/// A SUB socket decoding pulse records, optionally limited to some channels.
///
/// Channels whose topic prefix is not valid UTF-8 (128 and up) can't be passed
/// to the socket as a subscription string. While any of those are subscribed the
/// socket takes every message and unwanted channels are dropped in [`recv`].
///
/// [`recv`]: Subscription::recv
pub struct Subscription {
    socket: SubSocket,
    /// Taking every channel except the muted ones
    all: bool,
    muted: HashSet<u16>,
    channels: HashSet<u16>,
    /// Socket holds the empty-prefix subscription
    catch_all: bool,
}

impl Subscription {
    /// Connect to `endpoint` (e.g. `tcp://127.0.0.1:5502`). An empty channel
    /// list subscribes to everything.
    pub async fn connect(endpoint: &str, channels: &[u16]) -> Result<Self> {
        let mut socket = SubSocket::new();
        socket.connect(endpoint).await?;
        let mut sub = Subscription {
            socket,
            all: channels.is_empty(),
            muted: HashSet::new(),
            channels: HashSet::new(),
            catch_all: false,
        };
        if sub.all {
            sub.set_catch_all(true).await?;
        }
        for &ch in channels {
            sub.subscribe(ch).await?;
        }
        debug!("subscribed to {} on {}", describe(channels), endpoint);
        Ok(sub)
    }

    /// Start receiving `channel`
    pub async fn subscribe(&mut self, channel: u16) -> Result<()> {
        if self.all {
            self.muted.remove(&channel);
            return Ok(());
        }
        if !self.channels.insert(channel) {
            return Ok(());
        }
        match prefix(channel) {
            Some(p) => self.socket.subscribe(&p).await?,
            None => self.set_catch_all(true).await?,
        }
        debug!("subscribed to channel {}", channel);
        Ok(())
    }

    /// Stop receiving `channel`
    pub async fn unsubscribe(&mut self, channel: u16) -> Result<()> {
        if self.all {
            self.muted.insert(channel);
            return Ok(());
        }
        if !self.channels.remove(&channel) {
            return Ok(());
        }
        match prefix(channel) {
            Some(p) => self.socket.unsubscribe(&p).await?,
            None => {
                if self.channels.iter().all(|&c| prefix(c).is_some()) {
                    self.set_catch_all(false).await?;
                }
            }
        }
        debug!("unsubscribed from channel {}", channel);
        Ok(())
    }

    /// Whether pulses from `channel` are passed on by [`recv`](Subscription::recv)
    pub fn accepts(&self, channel: i16) -> bool {
        let ch = channel as u16;
        if self.all {
            !self.muted.contains(&ch)
        } else {
            self.channels.contains(&ch)
        }
    }

    /// True while the socket itself takes every channel
    pub fn is_catch_all(&self) -> bool {
        self.catch_all
    }

    /// Next pulse on a subscribed channel
    pub async fn recv(&mut self) -> Result<Pulse> {
        loop {
            let msg = self.socket.recv().await?;
            if msg.len() != 2 {
                bail!("expected a 2-part pulse message, got {} parts", msg.len());
            }
            let (header, body) = match (msg.get(0), msg.get(1)) {
                (Some(h), Some(b)) => (h, b),
                _ => bail!("pulse message parts missing"),
            };
            let pulse = Pulse::decode(header, body)?;
            if self.accepts(pulse.channel()) {
                return Ok(pulse);
            }
        }
    }

    async fn set_catch_all(&mut self, on: bool) -> Result<()> {
        if on != self.catch_all {
            if on {
                self.socket.subscribe("").await?;
            } else {
                self.socket.unsubscribe("").await?;
            }
            self.catch_all = on;
        }
        Ok(())
    }
}

/// Topic prefix for `channel` as a subscription string, if it is valid UTF-8
fn prefix(channel: u16) -> Option<String> {
    std::str::from_utf8(&topic(channel)).ok().map(String::from)
}

fn describe(channels: &[u16]) -> String {
    if channels.is_empty() {
        String::from("all channels")
    } else {
        format!("channels {:?}", channels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_only_for_utf8_topics() {
        assert_eq!(prefix(3).as_deref(), Some("\u{3}\u{0}"));
        assert!(prefix(127).is_some());
        assert!(prefix(128).is_none());
        assert!(prefix(200).is_none());
    }
}
