use relm4::prelude::*;
use timedial::config;
use timedial::gui::app::AppModel;
use timedial::sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = config::load_or_setup();
    log::info!(
        "Starting at {} with a {:?} auto-advance",
        config.initial_time,
        config.auto_advance()
    );

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    let runtime = runtime::start_background_services(tx)?;

    let app = RelmApp::new("org.troia.timedial");

    app.run::<AppModel>((config, runtime, rx));
    Ok(())
}
