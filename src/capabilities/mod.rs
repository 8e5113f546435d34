//! Capability wiring.
//!
//! Render and HTTP come from Crux; the Time capability is ours. The
//! `Effect` enum the shell consumes is derived from the `Capabilities`
//! struct below. The derive reads the event type straight off each
//! field, so the fields must spell out their generics.

pub mod time;

pub use self::time::{Time, TimeOperation, TimeOutput, TimerId};
pub use crux_core::render::Render;
pub use crux_http::Http;

use crate::app::CityPulse;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
#[effect(app = "CityPulse")]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
    pub time: Time<Event>,
}
