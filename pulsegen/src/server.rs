use anyhow::Result;
use pulse_message::{DastardPacker, Frame, Packer};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::broadcast;
use zeromq::{Endpoint, PubSocket, Socket, SocketSend, ZmqMessage};

#[allow(unused_imports)]
use tracing::{debug, error, info, span, warn, Level};

use crate::generator::{self, Generator};
use crate::Config;

/// The per-message log line: channel and the length of the body as sent
pub fn describe(channel: u16, frame: &Frame) -> String {
    format!("chan {} message length {}", channel, frame.body.len())
}

/// Bind a PUB socket on the configured host and port. The returned endpoint
/// carries the actual port when port 0 was requested.
pub async fn bind(cfg: &Config) -> Result<(PubSocket, Endpoint)> {
    let mut socket = PubSocket::new();
    let endpoint = socket.bind(&cfg.endpoint()).await?;
    info!("Publishing pulses on {}", endpoint);
    Ok((socket, endpoint))
}

/// Publish generated pulses on `socket` until a shutdown signal arrives or the
/// generator fails. The socket is released on return.
pub async fn serve<P>(
    mut socket: PubSocket,
    cfg: Config,
    packer: P,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()>
where
    P: Packer + Send + 'static,
{
    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let pulses = Generator::new(&cfg, packer, rng);

    let (sender_timer, receiver_timer) = flume::bounded(1);
    let (sender_frame, receiver_frame) = flume::bounded(5);
    let _ = crate::timer::main(cfg.period, sender_timer)?;
    let gen_thread = tokio::task::spawn_blocking(move || {
        generator::main(pulses, receiver_timer, sender_frame)
    });

    loop {
        tokio::select! {
            next = receiver_frame.recv_async() => match next {
                Ok((channel, frame)) => {
                    info!("{}", describe(channel, &frame));
                    let mut msg = ZmqMessage::from(frame.header);
                    msg.push_back(frame.body);
                    socket.send(msg).await?;
                }
                // Generator exited; its result is collected below
                Err(_) => break,
            },
            _ = shutdown.recv() => {
                debug!("publisher shutting down");
                break;
            }
        }
    }

    // Generator stops on its next tick once frames have nowhere to go
    drop(receiver_frame);
    gen_thread.await??;
    drop(socket);
    Ok(())
}

/// Bind, publish, and stop on ctrl-c
pub async fn main(cfg: Config) -> Result<()> {
    let (shutdown_sender, shutdown_receiver) = broadcast::channel::<()>(1);

    let (socket, _) = bind(&cfg).await?;

    let publish = serve(socket, cfg, DastardPacker, shutdown_receiver);

    let ctrl_c_watcher = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let span = span!(Level::INFO, "ctrl_c signal");
                let _enter = span.enter();
                info!("Manual shutdown signal received. Goodbye!");
            }
            Err(e) => {
                let span = span!(Level::ERROR, "ctrl_c signal");
                let _enter = span.enter();
                error!("Unable to listen to shutdown signal: {}", e);
            }
        }
        let _ = shutdown_sender.send(());
        Ok::<(), anyhow::Error>(())
    };

    let _: ((), ()) = futures::future::try_join(publish, ctrl_c_watcher).await?;
    Ok(())
}
