use crate::config;
use crate::events::AppEvent;
use crate::gui::clipboard::DisplayClipboard;
use crate::gui::deck::{self, Deck, DeckCommand, Point};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::window;
use carousel::{
    CarouselAction, CommandClipboard, CommandOpener, Gesture, Key, PauseReason, UrlOpener,
};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

pub struct AppInit {
    pub deck: Deck,
    pub config_path: PathBuf,
    pub opener: CommandOpener,
    pub fallback_clipboard: CommandClipboard,
    pub events: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub deck: Rc<RefCell<Deck>>,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
    config_path: PathBuf,
    opener: CommandOpener,
    fallback_clipboard: CommandClipboard,
    last_tick: Instant,
    titled: usize,
    tick_source: Option<glib::SourceId>,
}

#[derive(Debug)]
pub enum AppMsg {
    Tick,
    Resize(i32, i32),
    Motion(Point),
    Leave,
    Release { point: Point, n_press: i32 },
    DragBegin,
    DragUpdate(f64),
    DragEnd(f64),
    Key(Key),
    Visibility(bool),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Showcase"),
            add_css_class: "showcase-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, keyval, _, _| {
                    match keyval.name().and_then(|name| name.parse::<Key>().ok()) {
                        Some(key) => {
                            sender.input(AppMsg::Key(key));
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                }
            },

            connect_is_active_notify[sender] => move |window| {
                sender.input(AppMsg::Visibility(window.is_active()));
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "showcase-deck",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::Motion(Point::new(x, y)));
                    },
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::Leave);
                    }
                },

                add_controller = gtk::GestureClick {
                    set_button: 1,
                    connect_released[sender] => move |_, n_press, x, y| {
                        sender.input(AppMsg::Release { point: Point::new(x, y), n_press });
                    }
                },

                add_controller = gtk::GestureDrag {
                    set_button: 1,
                    connect_drag_begin[sender] => move |_, _, _| {
                        sender.input(AppMsg::DragBegin);
                    },
                    connect_drag_update[sender] => move |_, dx, _| {
                        sender.input(AppMsg::DragUpdate(dx));
                    },
                    connect_drag_end[sender] => move |_, dx, _| {
                        sender.input(AppMsg::DragEnd(dx));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            mut deck,
            config_path,
            opener,
            fallback_clipboard,
            events,
        } = init;

        theme::load_css();
        window::init_window(&root);

        if window::prefers_reduced_motion() {
            log::info!("Animations are disabled on this desktop, autoplay stays off");
            deck.carousel.pause(PauseReason::ReducedMotion);
        }
        window::set_title_for(&root, deck.carousel.active_item());
        let titled = deck.carousel.active_index();

        let model = AppModel {
            deck: Rc::new(RefCell::new(deck)),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
            config_path,
            opener,
            fallback_clipboard,
            last_tick: Instant::now(),
            titled,
            tick_source: None,
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let deck_draw = model.deck.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Err(e) = deck::draw(cr, &deck_draw.borrow(), &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let tick_sender = sender.clone();
        model.tick_source = Some(glib::timeout_add_local(deck::TICK_INTERVAL, move || {
            tick_sender.input(AppMsg::Tick);
            glib::ControlFlow::Continue
        }));

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Tick => {
                let now = Instant::now();
                let elapsed = now.duration_since(self.last_tick);
                self.last_tick = now;

                let action = self.deck.borrow_mut().carousel.tick(elapsed);
                self.apply(action);
            }
            AppMsg::Resize(width, height) => {
                self.deck
                    .borrow_mut()
                    .resize(width as f64, height as f64);
                self.drawing_area.queue_draw();
            }
            AppMsg::Motion(point) => {
                let gesture = self.deck.borrow_mut().update_hover(point);
                if let Some(gesture) = gesture {
                    self.dispatch(gesture);
                }
            }
            AppMsg::Leave => {
                let gesture = self.deck.borrow_mut().clear_hover();
                if let Some(gesture) = gesture {
                    self.dispatch(gesture);
                }
            }
            AppMsg::Release { point, n_press } => {
                let command = self
                    .deck
                    .borrow()
                    .command_at(point, n_press, Instant::now());
                match command {
                    Some(DeckCommand::Gesture(gesture)) => self.dispatch(gesture),
                    Some(DeckCommand::Copy) => self.copy_link(),
                    None => {}
                }
            }
            AppMsg::DragBegin => self.deck.borrow_mut().drag.begin(),
            AppMsg::DragUpdate(dx) => {
                let started = self.deck.borrow_mut().drag.update(dx);
                if let Some(gesture) = started {
                    self.dispatch(gesture);
                }
                if self.deck.borrow().drag.is_dragging() {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::DragEnd(dx) => {
                let swipe = self.deck.borrow_mut().drag.end(dx, Instant::now());
                match swipe {
                    Some(gesture) => self.dispatch(gesture),
                    None => self.drawing_area.queue_draw(),
                }
            }
            AppMsg::Key(key) => self.dispatch(Gesture::Key(key)),
            AppMsg::Visibility(visible) => self.dispatch(Gesture::Visibility(visible)),
            AppMsg::ConfigReload => self.reload_config(),
        }
    }

    fn shutdown(&mut self, _widgets: &mut Self::Widgets, _output: relm4::Sender<Self::Output>) {
        if let Some(source) = self.tick_source.take() {
            source.remove();
        }
    }
}

impl AppModel {
    fn dispatch(&mut self, gesture: Gesture) {
        let action = self.deck.borrow_mut().carousel.handle(gesture);
        self.apply(action);
    }

    /// Performs the side effects the carousel asked for.
    fn apply(&mut self, action: CarouselAction) {
        if let Some(url) = &action.open
            && let Err(e) = self.opener.open(url)
        {
            log::error!("Failed to open '{}': {}", url, e);
        }

        if action.should_redraw {
            let deck = self.deck.borrow();
            if deck.carousel.active_index() != self.titled {
                self.titled = deck.carousel.active_index();
                window::set_title_for(&self.root, deck.carousel.active_item());
            }
            self.drawing_area.queue_draw();
        }
    }

    fn copy_link(&mut self) {
        self.deck
            .borrow_mut()
            .carousel
            .copy_active_link(&DisplayClipboard, &self.fallback_clipboard);
        self.drawing_area.queue_draw();
    }

    fn reload_config(&mut self) {
        let new_config = match config::load_config(&self.config_path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };

        let reloaded = self
            .deck
            .borrow_mut()
            .reload(new_config.items.clone(), new_config.tags.clone());
        match reloaded {
            Ok(action) => {
                self.opener = new_config.opener();
                self.fallback_clipboard = new_config.fallback_clipboard();
                self.apply(action);
                window::set_title_for(&self.root, self.deck.borrow().carousel.active_item());
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Rejected reloaded items: {}", e),
        }
    }
}
