//! The CityPulse app: the update loop tying events to model changes
//! and capability calls.

use crux_core::App;
use tracing::debug;

use crate::capabilities::time::TimerId;
use crate::capabilities::Capabilities;
use crate::chat::{compose_reply, ChatMessage, ResponderStatus, Sender, QUICK_ACTIONS};
use crate::event::Event;
use crate::model::Model;
use crate::remote::{AreaMood, SummaryData};
use crate::upload::{build_payloads, UploadStatus};
use crate::view::ViewModel;
use crate::{AppError, ErrorKind, MessageId, UnixTimeMs};

#[derive(Default)]
pub struct CityPulse;

impl App for CityPulse {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Self::Event, model: &mut Self::Model, caps: &Self::Capabilities) {
        debug!(event = event.name(), "update");
        match event {
            Event::Configure(config) => {
                match config.validate() {
                    Ok(()) => model.config = config,
                    Err(e) => model.set_error(e.into()),
                }
                caps.render.render();
            }
            Event::Boot { now } => {
                model.touch_clock(now);
                if !model.remote.started {
                    model.remote.started = true;
                    self.fetch_summary(model, caps);
                    self.fetch_moods(model, caps);
                }
                caps.render.render();
            }
            Event::Teardown => {
                model.bump_epoch();
                if let ResponderStatus::AwaitingReply { timer } = model.chat.status {
                    caps.time.clear(timer);
                    model.chat.status = ResponderStatus::Idle;
                }
                match model.upload.status {
                    UploadStatus::Succeeded { reset_timer } => {
                        caps.time.clear(reset_timer);
                        model.upload.status = UploadStatus::Idle;
                    }
                    // The epoch bump already orphaned the in-flight
                    // receipt; leaving Submitting would block resubmission
                    // forever.
                    UploadStatus::Submitting => {
                        model.upload.status = UploadStatus::Idle;
                    }
                    UploadStatus::Idle | UploadStatus::Failed { .. } => {}
                }
            }
            Event::DismissError => {
                model.clear_error();
                caps.render.render();
            }

            Event::SelectPanel(panel) => {
                // Switching panels never refetches.
                model.active_panel = panel;
                caps.render.render();
            }

            Event::SetSearchQuery(query) => {
                model.filter.query = query;
                caps.render.render();
            }
            Event::ToggleCategory(category) => {
                model.filter.toggle_category(&category);
                caps.render.render();
            }
            Event::ToggleSeverity(severity) => {
                model.filter.toggle_severity(severity);
                caps.render.render();
            }
            Event::SetDateRange(range) => {
                model.filter.date_range = range;
                caps.render.render();
            }
            Event::ClearFilters => {
                model.filter.clear();
                caps.render.render();
            }

            Event::SelectSummaryCategory(name) => {
                let known = model
                    .remote
                    .summary
                    .as_ref()
                    .is_some_and(|s| s.contains(&name));
                if known {
                    model.remote.active_category = Some(name);
                    caps.render.render();
                } else {
                    debug!(category = %name, "ignoring unknown summary category");
                }
            }

            Event::SelectStoryShelf(shelf) => {
                if crate::catalog::STORY_SHELVES.contains(&shelf.as_str()) {
                    model.story_shelf = shelf;
                    caps.render.render();
                } else {
                    debug!(shelf = %shelf, "ignoring unknown story shelf");
                }
            }
            Event::ToggleBookmark(story_id) => {
                model.toggle_bookmark(&story_id);
                caps.render.render();
            }

            Event::SetChatDraft(draft) => {
                model.chat.draft = draft;
                caps.render.render();
            }
            Event::ApplyQuickAction(index) => {
                if let Some(action) = QUICK_ACTIONS.get(index) {
                    model.chat.draft = action.message.to_string();
                    caps.render.render();
                } else {
                    debug!(index, "ignoring out-of-range quick action");
                }
            }
            Event::SendChatMessage { now } => {
                model.touch_clock(now);
                self.send_chat_message(model, caps, now);
            }
            Event::ChatReplyDue { timer } => {
                self.deliver_chat_reply(model, caps, timer);
            }

            Event::SetUploadDescription(description) => {
                model.upload.description = description;
                caps.render.render();
            }
            Event::SetUploadLocation(location) => {
                model.upload.location = location;
                caps.render.render();
            }
            Event::SetTagDraft(draft) => {
                model.upload.tag_draft = draft;
                caps.render.render();
            }
            Event::AddTag => {
                model.upload.add_tag();
                caps.render.render();
            }
            Event::RemoveTag(tag) => {
                model.upload.remove_tag(&tag);
                caps.render.render();
            }
            Event::AttachFiles(files) => {
                let dropped = model
                    .upload
                    .accept_files(files, &model.config.attachment_limits);
                if dropped > 0 {
                    debug!(dropped, "dropped unacceptable or excess attachments");
                }
                caps.render.render();
            }
            Event::RemoveAttachment(index) => {
                model.upload.remove_attachment(index);
                caps.render.render();
            }
            Event::SubmitUpload { now } => {
                model.touch_clock(now);
                self.submit_upload(model, caps, now);
            }
            Event::UploadResetDue { timer } => {
                if model.upload.status == (UploadStatus::Succeeded { reset_timer: timer }) {
                    model.upload.status = UploadStatus::Idle;
                    caps.render.render();
                } else {
                    debug!(timer = timer.get(), "ignoring stale upload reset timer");
                }
            }

            Event::ToggleEventPin(id) => {
                model.map.toggle_event(&id);
                caps.render.render();
            }
            Event::ToggleAreaMarker(name) => {
                model.map.toggle_area(&name);
                caps.render.render();
            }
            Event::ClearMapSelection => {
                model.map.clear();
                caps.render.render();
            }

            Event::BeginProfileEdit => {
                model.profile.begin_edit();
                caps.render.render();
            }
            Event::SetProfileField(field, value) => {
                model.profile.set_field(field, value);
                caps.render.render();
            }
            Event::SaveProfile => {
                model.profile.save();
                caps.render.render();
            }
            Event::CancelProfileEdit => {
                model.profile.cancel();
                caps.render.render();
            }

            Event::GotSummary { epoch, response } => {
                if epoch != model.epoch {
                    debug!("discarding summary response from a stale epoch");
                    return;
                }
                self.handle_summary_response(model, *response);
                caps.render.render();
            }
            Event::GotMoodMap { epoch, response } => {
                if epoch != model.epoch {
                    debug!("discarding mood response from a stale epoch");
                    return;
                }
                self.handle_mood_response(model, *response);
                caps.render.render();
            }
            Event::GotUploadReceipt { epoch, response } => {
                if epoch != model.epoch {
                    debug!("discarding upload receipt from a stale epoch");
                    return;
                }
                self.handle_upload_response(model, caps, *response);
                caps.render.render();
            }
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        ViewModel::project(model)
    }
}

impl CityPulse {
    fn fetch_summary(&self, model: &Model, caps: &Capabilities) {
        let epoch = model.epoch;
        caps.http
            .post(&model.config.summary_url)
            .expect_json::<SummaryData>()
            .send(move |response| Event::GotSummary {
                epoch,
                response: Box::new(response),
            });
    }

    fn fetch_moods(&self, model: &Model, caps: &Capabilities) {
        let epoch = model.epoch;
        caps.http
            .get(&model.config.mood_url)
            .expect_json::<Vec<AreaMood>>()
            .send(move |response| Event::GotMoodMap {
                epoch,
                response: Box::new(response),
            });
    }

    fn send_chat_message(&self, model: &mut Model, caps: &Capabilities, now: UnixTimeMs) {
        let body = model.chat.draft.trim().to_string();
        if body.is_empty() {
            debug!("rejecting empty chat message");
            return;
        }
        if model.chat.status.is_awaiting() {
            debug!("rejecting chat message while a reply is pending");
            return;
        }

        model.chat.push_message(ChatMessage {
            id: MessageId::generate(),
            sender: Sender::User,
            body,
            sent_at: now,
        });
        model.chat.draft.clear();

        let timer = model.next_timer();
        model.chat.status = ResponderStatus::AwaitingReply { timer };
        caps.time
            .notify_after(timer, model.config.chat_reply_delay_ms, |timer| {
                Event::ChatReplyDue { timer }
            });
        caps.render.render();
    }

    fn deliver_chat_reply(&self, model: &mut Model, caps: &Capabilities, timer: TimerId) {
        if model.chat.status != (ResponderStatus::AwaitingReply { timer }) {
            debug!(timer = timer.get(), "ignoring stale chat reply timer");
            return;
        }

        let Some(user_message) = model.chat.last_user_message() else {
            model.chat.status = ResponderStatus::Idle;
            return;
        };
        let reply = ChatMessage {
            id: MessageId::generate(),
            sender: Sender::Assistant,
            body: compose_reply(&user_message.body).to_string(),
            sent_at: user_message.sent_at.plus_millis(model.config.chat_reply_delay_ms),
        };
        model.chat.push_message(reply);
        model.chat.status = ResponderStatus::Idle;
        caps.render.render();
    }

    fn submit_upload(&self, model: &mut Model, caps: &Capabilities, now: UnixTimeMs) {
        if !model.upload.can_submit() {
            debug!("rejecting upload submission without attachments or while in flight");
            return;
        }

        let payloads = build_payloads(&model.upload, now);
        let epoch = model.epoch;
        match caps.http.post(&model.config.ingest_url).body_json(&payloads) {
            Ok(request) => {
                model.upload.status = UploadStatus::Submitting;
                request.send(move |response| Event::GotUploadReceipt {
                    epoch,
                    response: Box::new(response),
                });
            }
            Err(e) => {
                let error = AppError::new(ErrorKind::Internal, "could not encode upload payload")
                    .with_internal(e.to_string());
                model.upload.status = UploadStatus::Failed {
                    message: error.user_facing_message(),
                };
                model.set_error(error);
            }
        }
        caps.render.render();
    }

    fn handle_summary_response(
        &self,
        model: &mut Model,
        response: crux_http::Result<crux_http::Response<SummaryData>>,
    ) {
        match response {
            Ok(mut response) if response.status().is_success() => {
                if let Some(summary) = response.take_body() {
                    if summary.is_empty() {
                        self.remote_failure(
                            model,
                            AppError::new(ErrorKind::Deserialization, "summary map was empty"),
                        );
                        return;
                    }
                    if model.remote.active_category.is_none() {
                        model.remote.active_category =
                            summary.first_category().map(str::to_string);
                    }
                    model.remote.summary = Some(summary);
                } else {
                    self.remote_failure(
                        model,
                        AppError::new(ErrorKind::Deserialization, "summary response had no body"),
                    );
                }
            }
            Ok(response) => {
                self.remote_failure(
                    model,
                    AppError::from_http_status(response.status().into(), None)
                        .with_context("endpoint", "summary"),
                );
            }
            Err(e) => {
                self.remote_failure(
                    model,
                    AppError::new(ErrorKind::Network, "summary request failed")
                        .with_internal(e.to_string()),
                );
            }
        }
    }

    fn handle_mood_response(
        &self,
        model: &mut Model,
        response: crux_http::Result<crux_http::Response<Vec<AreaMood>>>,
    ) {
        match response {
            Ok(mut response) if response.status().is_success() => {
                if let Some(moods) = response.take_body() {
                    model.remote.moods = Some(moods);
                } else {
                    self.remote_failure(
                        model,
                        AppError::new(ErrorKind::Deserialization, "mood response had no body"),
                    );
                }
            }
            Ok(response) => {
                self.remote_failure(
                    model,
                    AppError::from_http_status(response.status().into(), None)
                        .with_context("endpoint", "mood"),
                );
            }
            Err(e) => {
                self.remote_failure(
                    model,
                    AppError::new(ErrorKind::Network, "mood request failed")
                        .with_internal(e.to_string()),
                );
            }
        }
    }

    fn handle_upload_response(
        &self,
        model: &mut Model,
        caps: &Capabilities,
        response: crux_http::Result<crux_http::Response<Vec<u8>>>,
    ) {
        match response {
            Ok(response) if response.status().is_success() => {
                model.upload.reset_fields();
                let reset_timer = model.next_timer();
                model.upload.status = UploadStatus::Succeeded { reset_timer };
                caps.time
                    .notify_after(reset_timer, model.config.upload_reset_delay_ms, |timer| {
                        Event::UploadResetDue { timer }
                    });
            }
            Ok(mut response) => {
                let body = response.take_body();
                let error = AppError::from_http_status(response.status().into(), body.as_deref())
                    .with_context("endpoint", "ingest");
                model.upload.status = UploadStatus::Failed {
                    message: error.user_facing_message(),
                };
                model.set_error(error);
            }
            Err(e) => {
                let error = AppError::new(ErrorKind::Network, "upload request failed")
                    .with_internal(e.to_string());
                model.upload.status = UploadStatus::Failed {
                    message: error.user_facing_message(),
                };
                model.set_error(error);
            }
        }
    }

    fn remote_failure(&self, model: &mut Model, error: AppError) {
        model.remote.error = Some(error.clone());
        model.set_error(error);
    }
}
