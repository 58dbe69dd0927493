use std::rc::Rc;

use log::{debug, error, info, warn};

use crate::error::SubmitError;
use crate::options::SubmitterOptions;
use crate::types::{
    Outcome, Page, Payload, Scheduler, ServerReply, SubmitRequest, Transport, JSON_CONTENT_TYPE,
};

/// Posts a review payload and renders the outcome into the message element.
///
/// Cloning shares the transport, page and scheduler, so one submitter can be
/// moved into every submit handler spawned for a form.
#[derive(Clone)]
pub struct FormSubmitter {
    options: SubmitterOptions,
    transport: Rc<dyn Transport>,
    page: Rc<dyn Page>,
    scheduler: Rc<dyn Scheduler>,
}

impl FormSubmitter {
    pub fn new(
        options: SubmitterOptions,
        transport: Rc<dyn Transport>,
        page: Rc<dyn Page>,
        scheduler: Rc<dyn Scheduler>,
    ) -> FormSubmitter {
        FormSubmitter {
            options,
            transport,
            page,
            scheduler,
        }
    }

    pub fn build_request(&self, action: &str, payload: &Payload) -> Result<SubmitRequest, SubmitError> {
        Ok(SubmitRequest {
            url: action.to_string(),
            content_type: JSON_CONTENT_TYPE,
            body: payload.to_json()?,
        })
    }

    /// Sends the payload to `action` and renders whatever the server answers.
    ///
    /// Any failure (encoding, the request itself, or reading an error body)
    /// is logged and returned; the message element is not touched for it.
    pub async fn submit(&self, action: &str, payload: Payload) -> Result<Outcome, SubmitError> {
        let result = self.send_and_render(action, payload).await;
        if let Err(err) = &result {
            error!("review submission failed: {err}");
        }
        result
    }

    async fn send_and_render(&self, action: &str, payload: Payload) -> Result<Outcome, SubmitError> {
        let request = self.build_request(action, &payload)?;
        debug!("posting {} fields to {:?}", payload.len(), request.url);

        let reply = self.transport.send(request).await?;
        let outcome = classify(reply).await?;
        self.render(&outcome);
        Ok(outcome)
    }

    pub fn message_text(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Success => self.options.success_text.clone(),
            Outcome::Unauthorized => self.options.unauthorized_text.clone(),
            Outcome::ServerError(body) => format!("{}{}", self.options.error_prefix, body),
        }
    }

    pub fn render(&self, outcome: &Outcome) {
        info!("review submission outcome: {outcome:?}");
        let text = self.message_text(outcome);
        if !self.page.show_message(&self.options.message_id, &text) {
            warn!(
                "message element #{} not found, outcome not shown",
                self.options.message_id
            );
            return;
        }
        if *outcome == Outcome::Success {
            self.scheduler.reload_after(self.options.reload_delay_millis);
        }
    }
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Maps a response to its outcome. The body is only read for statuses that
/// are neither 2xx nor 401, and a failed read is an error, not an outcome.
pub async fn classify(reply: Box<dyn ServerReply>) -> Result<Outcome, SubmitError> {
    let status = reply.status();
    if is_success(status) {
        return Ok(Outcome::Success);
    }
    if status == 401 {
        return Ok(Outcome::Unauthorized);
    }
    let body = reply.text().await?;
    Ok(Outcome::ServerError(body))
}
