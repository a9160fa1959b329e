use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::{Handle, Runtime};

/// Starts the socket server and config watcher on a dedicated runtime thread.
///
/// The returned handle stays valid for the life of the process and is also
/// where the picker schedules its auto-advance.
pub fn start_background_services(tx: Sender<AppEvent>) -> std::io::Result<Handle> {
    let rt = Runtime::new()?;
    let handle = rt.handle().clone();

    thread::Builder::new()
        .name("timedial-services".to_string())
        .spawn(move || {
            rt.block_on(async {
                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::sys::server::run_server(tx).await;
                    });
                }

                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::config::run_async_watcher(tx).await;
                    });
                }

                std::future::pending::<()>().await;
            });
        })?;

    Ok(handle)
}
