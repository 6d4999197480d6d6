#![cfg(target_arch = "wasm32")]

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use chrono::{DateTime, FixedOffset, Local};
use gloo_timers::callback::Timeout;
use portal_core::{FileCandidate, PortalConfig};
use portal_engine::{Outcome, PortalController, UiEffect};
use web_sys::{
    console, Element, FileList, FormData, HtmlFormElement, HtmlInputElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};
use yew::{Callback, NodeRef};

/// Browser host of a [`PortalController`]: runs deferred tasks on timers,
/// applies DOM effects and asks the view to re-render.
#[derive(Clone)]
pub struct PortalHost {
    inner: Rc<HostInner>,
}

struct HostInner {
    controller: RefCell<PortalController>,
    redraw: RefCell<Option<Callback<()>>>,
    chat_input: NodeRef,
    chat_log: NodeRef,
    file_input: NodeRef,
    appointment_form: NodeRef,
}

impl PartialEq for PortalHost {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PortalHost {
    pub fn new(config: PortalConfig) -> Self {
        Self {
            inner: Rc::new(HostInner {
                controller: RefCell::new(PortalController::new(config)),
                redraw: RefCell::new(None),
                chat_input: NodeRef::default(),
                chat_log: NodeRef::default(),
                file_input: NodeRef::default(),
                appointment_form: NodeRef::default(),
            }),
        }
    }

    pub fn controller(&self) -> Ref<'_, PortalController> {
        self.inner.controller.borrow()
    }

    pub fn chat_input(&self) -> &NodeRef {
        &self.inner.chat_input
    }

    pub fn chat_log(&self) -> &NodeRef {
        &self.inner.chat_log
    }

    pub fn file_input(&self) -> &NodeRef {
        &self.inner.file_input
    }

    pub fn appointment_form(&self) -> &NodeRef {
        &self.inner.appointment_form
    }

    pub fn set_redraw(&self, redraw: Option<Callback<()>>) {
        *self.inner.redraw.borrow_mut() = redraw;
    }

    /// Run an operation, then schedule its tasks and effects.
    pub fn dispatch<F>(&self, operation: F)
    where
        F: FnOnce(&mut PortalController) -> Outcome,
    {
        let outcome = {
            let mut controller = self.inner.controller.borrow_mut();
            operation(&mut controller)
        };
        self.apply(outcome);
    }

    /// Mutate state that schedules nothing.
    pub fn update<F>(&self, change: F)
    where
        F: FnOnce(&mut PortalController),
    {
        change(&mut self.inner.controller.borrow_mut());
        self.redraw();
    }

    pub fn set_drag_active(&self, active: bool) {
        if self.controller().is_drag_active() != active {
            self.update(|controller| controller.set_drag_active(active));
        }
    }

    pub fn upload(&self, files: Option<FileList>) {
        let candidates = file_candidates(files);
        self.dispatch(|controller| controller.upload_files(candidates));
    }

    /// Send whatever is typed in the chat input.
    pub fn submit_chat(&self) {
        let text = self
            .inner
            .chat_input
            .cast::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default();
        self.dispatch(|controller| controller.send_message(&text));
    }

    pub fn submit_booking(&self) {
        let name = self
            .inner
            .appointment_form
            .cast::<HtmlFormElement>()
            .and_then(|form| FormData::new_with_form(&form).ok())
            .and_then(|data| data.get("name").as_string())
            .unwrap_or_default();
        let booked_at = DateTime::<FixedOffset>::from(Local::now());
        self.dispatch(|controller| controller.book_appointment(&name, booked_at));
    }

    pub fn open_file_picker(&self) {
        if let Some(input) = self.inner.file_input.cast::<HtmlInputElement>() {
            input.click();
        }
    }

    fn apply(&self, outcome: Outcome) {
        for scheduled in outcome.scheduled {
            let host = self.clone();
            let task = scheduled.task;
            Timeout::new(scheduled.after_ms, move || {
                host.dispatch(|controller| controller.resolve(task))
            })
            .forget();
        }

        self.redraw();

        if !outcome.effects.is_empty() {
            // Effects target nodes of the next render.
            let host = self.clone();
            let effects = outcome.effects;
            Timeout::new(0, move || host.run_effects(effects)).forget();
        }
    }

    fn redraw(&self) {
        let redraw = self.inner.redraw.borrow().clone();
        if let Some(redraw) = redraw {
            redraw.emit(());
        }
    }

    fn run_effects(&self, effects: Vec<UiEffect>) {
        for effect in effects {
            match effect {
                UiEffect::FocusChatInput => {
                    if let Some(input) = self.inner.chat_input.cast::<HtmlInputElement>() {
                        if let Err(err) = input.focus() {
                            console::error_1(&err);
                        }
                    }
                }
                UiEffect::ClearChatInput => {
                    if let Some(input) = self.inner.chat_input.cast::<HtmlInputElement>() {
                        input.set_value("");
                    }
                }
                UiEffect::ScrollChatToEnd => {
                    if let Some(log) = self.inner.chat_log.cast::<Element>() {
                        log.set_scroll_top(log.scroll_height());
                    }
                }
                UiEffect::ScrollToSection(id) => scroll_to_section(id),
                UiEffect::ResetAppointmentForm => {
                    if let Some(form) = self.inner.appointment_form.cast::<HtmlFormElement>() {
                        form.reset();
                    }
                }
                UiEffect::Alert(message) => {
                    if let Some(window) = web_sys::window() {
                        if let Err(err) = window.alert_with_message(message) {
                            console::error_1(&err);
                        }
                    }
                }
            }
        }
    }
}

/// Smoothly scroll to the element with `id`; missing targets are ignored.
pub fn scroll_to_section(id: &str) {
    let Some(target) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
    else {
        log::debug!("no scroll target #{id}");
        return;
    };

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
}

fn file_candidates(files: Option<FileList>) -> Vec<FileCandidate> {
    let Some(files) = files else {
        return Vec::new();
    };

    (0..files.length())
        .filter_map(|index| files.get(index))
        .map(|file| FileCandidate {
            name: file.name(),
            mime: file.type_(),
            size: file.size() as u64,
        })
        .collect()
}
