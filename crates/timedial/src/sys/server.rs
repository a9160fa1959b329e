use crate::events::AppEvent;
use async_channel::Sender;
use clockhand::command::{ControlCommand, SOCKET_PATH};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    forward_commands(stream, tx).await;
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}

/// Forwards each well-formed line as an event until the peer or the app goes away.
async fn forward_commands<R: AsyncRead + Unpin>(stream: R, tx: Sender<AppEvent>) {
    let mut lines = BufReader::new(stream).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<ControlCommand>() {
            Ok(command) => {
                log::debug!("Control command '{}'", command);
                if tx.send(AppEvent::Control(command)).await.is_err() {
                    break;
                }
            }
            Err(e) => log::warn!("Ignoring control line {:?}: {}", line, e),
        }
    }
}
