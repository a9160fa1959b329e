use clockhand::command::ControlCommand;

#[derive(Debug, Clone)]
pub enum AppEvent {
    Control(ControlCommand),
    ConfigReload,
}
