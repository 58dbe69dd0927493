//! Browser side of the submitter.
//!
//! The form is bound once the document has parsed: on `DOMContentLoaded`, or
//! right away when the module is instantiated later than that. A bound form
//! is marked with a data attribute so a later `install` call for the same id
//! does not attach a second listener.

use std::rc::Rc;

use futures::future::FutureExt;
use gloo_net::http::{Request, Response};
use gloo_timers::callback::Timeout;
use log::{debug, error, warn};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;
use web_sys::{Document, FormData, HtmlElement, HtmlFormElement};

use crate::{
    error::SubmitError,
    form::{binding_for, payload_from_entries, Binding, FieldValue},
    options::SubmitterOptions,
    submitter::FormSubmitter,
    types::{BoxedFuture, Page, Payload, Scheduler, ServerReply, SubmitRequest, Transport},
};

const BOUND_ATTRIBUTE: &str = "data-resena-bound";

fn dom_error(value: JsValue) -> SubmitError {
    SubmitError::Dom(
        value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}")),
    )
}

fn document() -> Result<Document, SubmitError> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| SubmitError::Dom("no document".to_string()))
}

struct FetchReply(Response);

impl ServerReply for FetchReply {
    fn status(&self) -> u16 {
        self.0.status()
    }

    fn text(self: Box<Self>) -> BoxedFuture<String> {
        async move {
            self.0
                .text()
                .await
                .map_err(|e| SubmitError::Transport(e.to_string()))
        }
        .boxed_local()
    }
}

pub struct FetchTransport;

impl Transport for FetchTransport {
    fn send(&self, req: SubmitRequest) -> BoxedFuture<Box<dyn ServerReply>> {
        async move {
            let response = Request::post(&req.url)
                .header("Content-Type", req.content_type)
                .body(req.body)
                .map_err(|e| SubmitError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| SubmitError::Transport(e.to_string()))?;
            Ok(Box::new(FetchReply(response)) as Box<dyn ServerReply>)
        }
        .boxed_local()
    }
}

pub struct DomPage {
    document: Document,
}

impl Page for DomPage {
    fn show_message(&self, element_id: &str, text: &str) -> bool {
        let Some(element) = self
            .document
            .get_element_by_id(element_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return false;
        };
        if let Err(e) = element.style().set_property("display", "block") {
            warn!("could not show #{element_id}: {e:?}");
        }
        element.set_text_content(Some(text));
        true
    }
}

pub struct LocationReload;

impl Scheduler for LocationReload {
    fn reload_after(&self, delay_millis: u32) {
        Timeout::new(delay_millis, || {
            let reloaded = web_sys::window()
                .ok_or_else(|| JsValue::from_str("no window"))
                .and_then(|w| w.location().reload());
            if let Err(e) = reloaded {
                error!("page reload failed: {e:?}");
            }
        })
        .forget();
    }
}

/// Reads every entry of the form. File entries keep their name.
fn read_form(form: &HtmlFormElement) -> Result<Payload, SubmitError> {
    let data = FormData::new_with_form(form).map_err(dom_error)?;
    let entries = js_sys::try_iter(&data)
        .map_err(dom_error)?
        .ok_or_else(|| SubmitError::Dom("FormData is not iterable".to_string()))?;

    let mut fields = Vec::new();
    for entry in entries {
        let pair = js_sys::Array::from(&entry.map_err(dom_error)?);
        let Some(name) = pair.get(0).as_string() else {
            continue;
        };
        let value = match pair.get(1).as_string() {
            Some(text) => FieldValue::Text(text),
            None => FieldValue::Blob,
        };
        fields.push((name, value));
    }
    Ok(payload_from_entries(fields))
}

/// Attaches the submit listener. Returns `false`, without error, when the
/// page has no such form or it is already bound.
fn bind(options: SubmitterOptions) -> Result<bool, SubmitError> {
    let document = document()?;
    let form = document
        .get_element_by_id(&options.form_id)
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
    let already_bound = form
        .as_ref()
        .map_or(false, |form| form.has_attribute(BOUND_ATTRIBUTE));
    let form = match (binding_for(form.is_some(), already_bound), form) {
        (Binding::Attach, Some(form)) => form,
        (Binding::AlreadyBound, _) => {
            debug!("form #{} already bound", options.form_id);
            return Ok(false);
        }
        _ => {
            debug!("no form #{} on this page", options.form_id);
            return Ok(false);
        }
    };

    let submitter = FormSubmitter::new(
        options,
        Rc::new(FetchTransport),
        Rc::new(DomPage { document }),
        Rc::new(LocationReload),
    );
    let target = form.clone();
    let on_submit = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        event.prevent_default();
        let action = target.get_attribute("action").unwrap_or_default();
        let payload = match read_form(&target) {
            Ok(payload) => payload,
            Err(e) => {
                error!("could not read form: {e}");
                return;
            }
        };
        let submitter = submitter.clone();
        wasm_bindgen_futures::spawn_local(async move {
            // submit logs its own errors
            let _ = submitter.submit(&action, payload).await;
        });
    });

    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    on_submit.forget();
    form.set_attribute(BOUND_ATTRIBUTE, "").map_err(dom_error)?;
    debug!("bound submit handler to form #{}", form.id());
    Ok(true)
}

fn bind_logged(options: SubmitterOptions) {
    if let Err(e) = bind(options) {
        error!("could not bind review form: {e}");
    }
}

/// Runs `bind` now if the document has parsed, otherwise on `DOMContentLoaded`.
fn when_ready(options: SubmitterOptions) -> Result<(), SubmitError> {
    let document = document()?;
    if document.ready_state() != "loading" {
        bind_logged(options);
        return Ok(());
    }

    let mut pending = Some(options);
    let on_ready = Closure::<dyn FnMut()>::new(move || {
        if let Some(options) = pending.take() {
            bind_logged(options);
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        .map_err(dom_error)?;
    on_ready.forget();
    Ok(())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // a second init (e.g. the host already installed a logger) is harmless
    let _ = console_log::init_with_level(level);

    if let Err(e) = when_ready(SubmitterOptions::default()) {
        error!("review form setup failed: {e}");
    }
}

/// Binds a form with custom ids or texts. `options` may be `undefined`.
#[wasm_bindgen]
pub fn install(options: JsValue) -> Result<(), JsValue> {
    let options = if options.is_undefined() || options.is_null() {
        SubmitterOptions::default()
    } else {
        from_value::<SubmitterOptions>(options)
            .map_err(|e| SubmitError::Options(e.to_string()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    when_ready(options).map_err(|e| JsValue::from_str(&e.to_string()))
}
