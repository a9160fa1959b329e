use crate::config::{self, Config, DialConfig};
use crate::events::AppEvent;
use crate::gui::dial::{self, DIAL_SIZE};
use crate::gui::theme::{self, ThemeColors};
use clockhand::command::ControlCommand;
use clockhand::timer::{AutoAdvance, Ticket};
use clockhand::{PickerProps, Point, SelectionMode, TimePicker, TimeValue};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tokio::runtime::Handle;

/// Host of the picker. It plays the caller: it owns the time value, takes in
/// every change the picker reports and renders the picker's state.
pub struct AppModel {
    pub picker: Rc<RefCell<TimePicker>>,
    pub dial: Rc<Cell<DialConfig>>,
    pub time: TimeValue,
    pub keyboard_visible: bool,
    pub visible: bool,
    pub mode: SelectionMode,
    pub readout: TimeValue,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    DialClick(Point),
    ToggleMode,
    SetMode(SelectionMode),
    RequestKeyboardToggle,
    KeyboardToggled,
    TimeChanged(TimeValue),
    SetTime(TimeValue),
    TextEntry(String),
    AutoAdvance(Ticket),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Control(command) => match command {
                ControlCommand::Show => AppMsg::Show,
                ControlCommand::Hide => AppMsg::Hide,
                ControlCommand::ToggleMode => AppMsg::ToggleMode,
                ControlCommand::Mode(mode) => AppMsg::SetMode(mode),
                ControlCommand::ToggleKeyboard => AppMsg::RequestKeyboardToggle,
                ControlCommand::Set(time) => AppMsg::SetTime(time),
            },
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, Handle, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Timedial"),
            set_resizable: false,
            #[watch]
            set_visible: model.visible,

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Hide);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 16,
                set_margin_all: 16,

                gtk::Label {
                    add_css_class: "timedial-readout",
                    #[watch]
                    set_label: &model.readout.to_string(),
                },

                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_content_width: DIAL_SIZE,
                    set_content_height: DIAL_SIZE,
                    set_halign: gtk::Align::Center,

                    add_controller = gtk::GestureClick {
                        connect_pressed[sender] => move |_, _, x, y| {
                            sender.input(AppMsg::DialClick(Point::new(x, y)));
                        }
                    }
                },

                gtk::Entry {
                    #[watch]
                    set_visible: model.keyboard_visible,
                    set_placeholder_text: Some("HH:MM"),
                    connect_activate[sender] => move |entry| {
                        sender.input(AppMsg::TextEntry(entry.text().to_string()));
                    }
                },

                gtk::CenterBox {
                    #[wrap(Some)]
                    set_start_widget = &gtk::Button {
                        set_icon_name: "preferences-system-time-symbolic",
                        set_tooltip_text: Some("Keyboard entry"),
                        add_css_class: "flat",
                        connect_clicked => AppMsg::RequestKeyboardToggle,
                    },

                    #[wrap(Some)]
                    set_center_widget = &gtk::Label {
                        add_css_class: "timedial-prompt",
                        #[watch]
                        set_label: model.mode.prompt(),
                    },

                    #[wrap(Some)]
                    set_end_widget = &gtk::Button {
                        add_css_class: "flat",
                        #[watch]
                        set_label: model.mode.toggle_label(),
                        connect_clicked => AppMsg::ToggleMode,
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, runtime, rx) = init;

        theme::load_css();

        let (ticket_tx, ticket_rx) = async_channel::unbounded();
        let advance = AutoAdvance::new(runtime, ticket_tx, config.auto_advance());
        let props = PickerProps {
            time: config.initial_time,
            on_change: Box::new({
                let sender = sender.clone();
                move |time| sender.input(AppMsg::TimeChanged(time))
            }),
            keyboard_visible: false,
            on_toggle_keyboard: Box::new({
                let sender = sender.clone();
                move || sender.input(AppMsg::KeyboardToggled)
            }),
        };
        let picker = TimePicker::new(props, advance);

        let model = AppModel {
            mode: picker.mode(),
            readout: picker.readout(),
            picker: Rc::new(RefCell::new(picker)),
            dial: Rc::new(Cell::new(config.dial)),
            time: config.initial_time,
            keyboard_visible: false,
            visible: true,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let (picker_draw, dial_draw) = (model.picker.clone(), model.dial.clone());
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let colors = ThemeColors::from_context(&drawing_area.style_context());
                let rect = dial::face_rect(width as f64, height as f64);
                if let Err(e) = dial::draw(cr, &picker_draw.borrow(), rect, &colors, &dial_draw.get())
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        {
            let sender = sender.clone();
            relm4::spawn(async move {
                while let Ok(event) = rx.recv().await {
                    sender.input(AppMsg::from(event));
                }
            });
        }

        relm4::spawn(async move {
            while let Ok(ticket) = ticket_rx.recv().await {
                sender.input(AppMsg::AutoAdvance(ticket));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => self.visible = true,
            AppMsg::Hide => self.visible = false,
            AppMsg::DialClick(point) => {
                let rect = dial::face_rect(
                    self.drawing_area.width() as f64,
                    self.drawing_area.height() as f64,
                );
                self.picker.borrow_mut().click(point, rect);
            }
            AppMsg::ToggleMode => self.picker.borrow_mut().toggle_mode(),
            AppMsg::SetMode(mode) => self.picker.borrow_mut().set_mode(mode),
            AppMsg::RequestKeyboardToggle => self.picker.borrow_mut().toggle_keyboard(),
            AppMsg::KeyboardToggled => {
                self.keyboard_visible = !self.keyboard_visible;
                self.sync_picker();
            }
            AppMsg::TimeChanged(time) => {
                log::info!("Time changed to {}", time);
                self.time = time;
                self.sync_picker();
            }
            AppMsg::SetTime(time) => self.replace_time(time),
            AppMsg::TextEntry(text) => match text.parse::<TimeValue>() {
                Ok(time) => self.replace_time(time),
                Err(e) => log::warn!("Ignoring keyboard entry {:?}: {}", text, e),
            },
            AppMsg::AutoAdvance(ticket) => {
                self.picker.borrow_mut().on_timer(ticket);
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.picker
                        .borrow_mut()
                        .advance_timer()
                        .set_delay(new_config.auto_advance());
                    self.dial.set(new_config.dial);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
        self.refresh();
    }
}

impl AppModel {
    fn sync_picker(&self) {
        self.picker
            .borrow_mut()
            .sync(self.time, self.keyboard_visible);
    }

    fn replace_time(&mut self, time: TimeValue) {
        log::info!("Time set to {}", time);
        self.time = time;
        self.picker.borrow_mut().reset(time);
        self.sync_picker();
    }

    /// Re-reads the picker after a transition.
    fn refresh(&mut self) {
        {
            let picker = self.picker.borrow();
            self.mode = picker.mode();
            self.readout = picker.readout();
        }
        self.drawing_area.queue_draw();
    }
}
