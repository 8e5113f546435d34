//! Time capability: delayed notifications with cancellable handles.
//!
//! The shell owns the actual timers. The core hands out a `TimerId`
//! with every request and checks the id when the notification comes
//! back, so a cleared or superseded timer firing late is harmless.

use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

/// Handle to a scheduled notification. Ids are issued by the model as
/// a monotonically increasing generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TimeOperation {
    NotifyAfter { id: TimerId, millis: u64 },
    Clear { id: TimerId },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "out", rename_all = "snake_case")]
pub enum TimeOutput {
    Elapsed { id: TimerId },
    Cleared { id: TimerId },
}

impl Operation for TimeOperation {
    type Output = TimeOutput;
}

pub struct Time<Ev> {
    context: CapabilityContext<TimeOperation, Ev>,
}

impl<Ev> Capability<Ev> for Time<Ev> {
    type Operation = TimeOperation;
    type MappedSelf<MappedEv> = Time<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Time::new(self.context.map_event(f))
    }
}

impl<Ev> Time<Ev>
where
    Ev: 'static,
{
    #[must_use]
    pub fn new(context: CapabilityContext<TimeOperation, Ev>) -> Self {
        Self { context }
    }

    /// Asks the shell to send `make_event(id)` back after `millis`.
    pub fn notify_after<F>(&self, id: TimerId, millis: u64, make_event: F)
    where
        F: FnOnce(TimerId) -> Ev + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let _fired = context
                .request_from_shell(TimeOperation::NotifyAfter { id, millis })
                .await;
            context.update_app(make_event(id));
        });
    }

    /// Cancels a scheduled notification. Fire-and-forget; the model's
    /// id check covers the race where the timer already fired.
    pub fn clear(&self, id: TimerId) {
        let context = self.context.clone();
        self.context.spawn(async move {
            context.notify_shell(TimeOperation::Clear { id }).await;
        });
    }
}
