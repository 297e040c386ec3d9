//! Full DOM application.
//!
//! Binds the page shell (goal input, level select, generate button, loader,
//! modal) and drives the fetch → layout → mount → connectors cycle. State is
//! shared with event closures through `Rc<RefCell<AppState>>`; closures hold
//! a `Weak` so the state can drop once JS releases the app. No borrow is
//! held across the fetch await.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlButtonElement, HtmlInputElement, HtmlSelectElement, Window};

use crate::config::MapConfig;
use crate::connector::ConnectorRenderer;
use crate::detail::DetailModal;
use crate::fetch::client::post_json;
use crate::fetch::{BeginError, Completion, FetchOrchestrator};
use crate::graph::NodeId;
use crate::layout::{ColumnLayout, ColumnLayoutConfig, MindMapLayout};
use crate::surface::dom::{DomMeasure, DomSurface, HIDDEN_CLASS, ModalElements};

type Listener = Closure<dyn FnMut(Event)>;

struct AppState {
    config: MapConfig,
    window: Window,
    document: Document,
    surface: DomSurface,
    modal_elements: ModalElements,
    button: HtmlButtonElement,
    goal: HtmlInputElement,
    level: HtmlSelectElement,
    loader: Element,

    engine: ColumnLayout,
    layout: MindMapLayout,
    orchestrator: FetchOrchestrator,
    modal: DetailModal,

    node_listeners: Vec<Listener>,
    settle_timer: Option<i32>,
}

impl AppState {
    fn enter_loading(&mut self) -> Result<(), JsValue> {
        self.cancel_settle_timer();
        self.node_listeners.clear();
        self.layout = MindMapLayout::empty();
        self.modal.reset();
        self.modal_elements.hide()?;
        self.surface.clear();

        self.button.set_disabled(true);
        self.button.set_text_content(Some(self.orchestrator.submit_label()));
        self.loader.class_list().remove_1(HIDDEN_CLASS)
    }

    fn leave_loading(&mut self) -> Result<(), JsValue> {
        self.button.set_disabled(false);
        self.button.set_text_content(Some(self.orchestrator.submit_label()));
        self.loader.class_list().add_1(HIDDEN_CLASS)
    }

    fn cancel_settle_timer(&mut self) {
        if let Some(handle) = self.settle_timer.take() {
            self.window.clear_timeout_with_handle(handle);
        }
    }

    fn draw_connectors(&self) -> Result<(), JsValue> {
        let Some(nodes) = self.surface.nodes_container() else {
            return Ok(());
        };
        let measure = DomMeasure::new(&self.document, nodes);
        let set = ConnectorRenderer::new().render(&self.layout, &measure);
        debug!(drawn = set.len(), skipped = set.skipped, "connectors drawn");
        self.surface.draw_connectors(&set)
    }

    fn open_detail(&mut self, id: NodeId) -> Result<(), JsValue> {
        let Some(node) = self.layout.node(id) else {
            return Ok(());
        };
        match self.modal.open(node) {
            Ok(view) => self.modal_elements.show(&self.document, view),
            Err(e) => {
                debug!(error = %e, "detail refused");
                Ok(())
            }
        }
    }

    fn close_detail(&mut self) -> Result<(), JsValue> {
        self.modal.close();
        self.modal_elements.hide()
    }
}

/// The mind-map page application.
#[wasm_bindgen]
pub struct PathMapApp {
    state: Rc<RefCell<AppState>>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl PathMapApp {
    /// Bind to the page shell described by `config` (see `MapConfig`).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PathMapApp, JsValue> {
        let config = crate::config_from_js(config)?;
        Self::mount(config)
    }

    /// Run a generation with the current input values.
    pub fn generate(&self) {
        generate(&self.state);
    }

    /// Give up on the in-flight request. Its reply, if it ever arrives, is
    /// discarded.
    pub fn cancel(&self) -> Result<(), JsValue> {
        let mut s = self.state.borrow_mut();
        if !s.orchestrator.is_busy() {
            return Ok(());
        }
        s.orchestrator.abandon();
        info!("generation request cancelled");
        s.leave_loading()
    }

    /// Recompute and redraw connectors from current measurements.
    #[wasm_bindgen(js_name = redrawConnectors)]
    pub fn redraw_connectors(&self) -> Result<(), JsValue> {
        self.state.borrow().draw_connectors()
    }

    #[wasm_bindgen(js_name = closeDetail)]
    pub fn close_detail(&self) -> Result<(), JsValue> {
        self.state.borrow_mut().close_detail()
    }
}

impl PathMapApp {
    pub fn mount(config: MapConfig) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let ids = &config.elements;

        let container: Element = element_by_id(&document, &ids.container)?;
        let overlay: Element = element_by_id(&document, &ids.modal_overlay)?;
        let close: Element = element_by_id(&document, &ids.modal_close)?;
        let button: HtmlButtonElement = element_by_id(&document, &ids.generate_button)?;

        let state = AppState {
            surface: DomSurface::new(document.clone(), container),
            modal_elements: ModalElements {
                overlay: overlay.clone(),
                title: element_by_id(&document, &ids.modal_title)?,
                description: element_by_id(&document, &ids.modal_description)?,
                resources: element_by_id(&document, &ids.modal_resources)?,
            },
            goal: element_by_id(&document, &ids.goal_input)?,
            level: element_by_id(&document, &ids.level_select)?,
            loader: element_by_id(&document, &ids.loader)?,
            button: button.clone(),
            engine: ColumnLayout::new(ColumnLayoutConfig {
                reveal_step_ms: config.reveal_step_ms,
            }),
            layout: MindMapLayout::empty(),
            orchestrator: FetchOrchestrator::new(),
            modal: DetailModal::new(),
            node_listeners: Vec::new(),
            settle_timer: None,
            window: window.clone(),
            document,
            config,
        };
        let state = Rc::new(RefCell::new(state));

        let mut listeners = Vec::with_capacity(4);

        let weak = Rc::downgrade(&state);
        listeners.push(listen(&button, "click", move |_| {
            if let Some(state) = weak.upgrade() {
                generate(&state);
            }
        })?);

        let weak = Rc::downgrade(&state);
        let backdrop = overlay.clone();
        listeners.push(listen(&overlay, "click", move |event| {
            let on_backdrop = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .is_some_and(|target| target == backdrop);
            if on_backdrop {
                with_state(&weak, AppState::close_detail);
            }
        })?);

        let weak = Rc::downgrade(&state);
        listeners.push(listen(&close, "click", move |_| {
            with_state(&weak, AppState::close_detail);
        })?);

        let weak = Rc::downgrade(&state);
        listeners.push(listen(&window, "resize", move |_| {
            with_state(&weak, |state| state.draw_connectors());
        })?);

        info!("path map app mounted");
        Ok(Self {
            state,
            _listeners: listeners,
        })
    }
}

fn generate(state: &Rc<RefCell<AppState>>) {
    let begun = {
        let mut s = state.borrow_mut();
        let goal = s.goal.value();
        let level = s.level.value();
        s.orchestrator
            .begin(&goal, &level)
            .map(|(token, body)| (token, body, s.config.endpoint.clone()))
    };

    let (token, body, endpoint) = match begun {
        Ok(begun) => begun,
        Err(BeginError::Busy) => {
            debug!("generate ignored while busy");
            return;
        }
        Err(e) => {
            let window = state.borrow().window.clone();
            if let Err(js) = window.alert_with_message(&e.to_string()) {
                error!(?js, "alert failed");
            }
            return;
        }
    };

    if let Err(e) = state.borrow_mut().enter_loading() {
        error!(?e, "failed to enter loading state");
    }

    let state = Rc::clone(state);
    wasm_bindgen_futures::spawn_local(async move {
        let reply = post_json(&endpoint, &body).await;
        let completion = state.borrow_mut().orchestrator.finish(token, reply);
        if let Err(e) = complete(&state, completion) {
            error!(?e, "failed to render generation result");
        }
    });
}

fn complete(state: &Rc<RefCell<AppState>>, completion: Completion) -> Result<(), JsValue> {
    let mut s = state.borrow_mut();
    match completion {
        Completion::Stale => {
            // A cancelled request's reply; restore the controls unless a
            // newer request owns them.
            if !s.orchestrator.is_busy() {
                s.leave_loading()?;
            }
        }
        Completion::Failed(e) => {
            s.leave_loading()?;
            s.surface.show_error(&e.user_message())?;
        }
        Completion::Ready(tree) => {
            s.leave_loading()?;
            let layout = s.engine.layout(Some(tree));
            let clickable = s.surface.mount(&layout)?;
            s.layout = layout;

            // Hubs never get a listener.
            let mut node_listeners = Vec::with_capacity(clickable.len());
            for (id, element) in clickable {
                let weak = Rc::downgrade(state);
                node_listeners.push(listen(&element, "click", move |_| {
                    with_state(&weak, |state| state.open_detail(id));
                })?);
            }
            s.node_listeners = node_listeners;

            let weak = Rc::downgrade(state);
            let settle = Closure::once_into_js(move || {
                with_state(&weak, |state| {
                    state.settle_timer = None;
                    state.draw_connectors()
                });
            });
            let delay = i32::try_from(s.config.settle_delay_ms).unwrap_or(i32::MAX);
            let handle = s
                .window
                .set_timeout_with_callback_and_timeout_and_arguments_0(settle.unchecked_ref::<js_sys::Function>(), delay)?;
            s.settle_timer = Some(handle);
        }
    }
    Ok(())
}

fn with_state(weak: &Weak<RefCell<AppState>>, f: impl FnOnce(&mut AppState) -> Result<(), JsValue>) {
    let Some(state) = weak.upgrade() else {
        return;
    };
    let Ok(mut state) = state.try_borrow_mut() else {
        debug!("state busy; event dropped");
        return;
    };
    if let Err(e) = f(&mut state) {
        error!(?e, "event handler failed");
    }
}

fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<Listener, JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("element #{id} has the wrong type")))
}
