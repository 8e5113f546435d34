//! Scripted chat assistant: transcript, responder state machine and
//! keyword-based reply composition.
//!
//! The responder is deliberately canned. Replies are chosen by
//! scanning the lowercased input against ordered keyword groups; the
//! first group that matches wins.

use serde::{Deserialize, Serialize};

use crate::capabilities::time::TimerId;
use crate::{MessageId, UnixTimeMs, MAX_CHAT_MESSAGES};

pub const GREETING: &str = "Hello! I'm your Bangalore News Assistant. I can help you find \
                            news, events, traffic updates, and more. What would you like to \
                            know?";

const TRAFFIC_REPLY: &str = "Current traffic situation: MG Road has heavy congestion due to \
                             construction. ORR is experiencing moderate traffic. I recommend \
                             using Silk Board route for faster travel. Would you like specific \
                             route suggestions?";

const WEATHER_REPLY: &str = "Today's weather in Bangalore: Partly cloudy with a high of 26\u{b0}C \
                             and low of 18\u{b0}C. There's a 30% chance of rain in the evening. \
                             Perfect weather for outdoor activities!";

const EVENTS_REPLY: &str = "Upcoming events in Bangalore: Tech Summit at Palace Grounds (Jan \
                            5-7), Food Festival in Lalbagh (Jan 10), Marathon registration open \
                            for Feb 15. Which type of events interest you most?";

const METRO_REPLY: &str = "Bangalore Metro update: Purple Line is running on schedule. Green \
                           Line has minor delays due to maintenance. New metro station in \
                           Whitefield opens next month. Need specific route information?";

const NEWS_REPLY: &str = "Top news today: New IT park opens in Electronic City, Water supply \
                          disruption in Whitefield, Bangalore FC reaches AFC Cup finals. Would \
                          you like details on any specific story?";

const FALLBACK_REPLY: &str = "I can help you with traffic updates, weather information, local \
                              events, metro schedules, and breaking news in Bangalore. What \
                              specific information are you looking for?";

/// Keyword groups in precedence order; the first match wins.
const KEYWORD_GROUPS: [(&[&str], &str); 5] = [
    (&["traffic", "road"], TRAFFIC_REPLY),
    (&["weather"], WEATHER_REPLY),
    (&["event", "happening"], EVENTS_REPLY),
    (&["metro", "transport"], METRO_REPLY),
    (&["news"], NEWS_REPLY),
];

/// Picks the canned reply for a user message.
#[must_use]
pub fn compose_reply(input: &str) -> &'static str {
    let message = input.to_lowercase();
    for (keywords, reply) in KEYWORD_GROUPS {
        if keywords.iter().any(|keyword| message.contains(keyword)) {
            return reply;
        }
    }
    FALLBACK_REPLY
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub body: String,
    pub sent_at: UnixTimeMs,
}

/// One reply is composed per accepted send; further sends are rejected
/// until the pending reply lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponderStatus {
    Idle,
    AwaitingReply { timer: TimerId },
}

impl ResponderStatus {
    #[must_use]
    pub const fn is_awaiting(self) -> bool {
        matches!(self, Self::AwaitingReply { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub draft: String,
    pub status: ResponderStatus,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage {
                id: MessageId::generate(),
                sender: Sender::Assistant,
                body: GREETING.to_string(),
                sent_at: UnixTimeMs::default(),
            }],
            draft: String::new(),
            status: ResponderStatus::Idle,
        }
    }
}

impl ChatState {
    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if self.messages.len() > MAX_CHAT_MESSAGES {
            let excess = self.messages.len() - MAX_CHAT_MESSAGES;
            self.messages.drain(..excess);
        }
    }

    #[must_use]
    pub fn last_user_message(&self) -> Option<&ChatMessage> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.sender == Sender::User)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub message: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        label: "Traffic Update",
        message: "What's the current traffic situation?",
    },
    QuickAction {
        label: "Weather Today",
        message: "How's the weather today?",
    },
    QuickAction {
        label: "Upcoming Events",
        message: "What events are happening this week?",
    },
    QuickAction {
        label: "Metro Status",
        message: "How is the metro running today?",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_groups_in_precedence_order() {
        assert_eq!(compose_reply("how is the traffic?"), TRAFFIC_REPLY);
        assert_eq!(compose_reply("any roadblocks?"), TRAFFIC_REPLY);
        assert_eq!(compose_reply("weather forecast"), WEATHER_REPLY);
        assert_eq!(compose_reply("what's happening this week"), EVENTS_REPLY);
        assert_eq!(compose_reply("is the metro delayed"), METRO_REPLY);
        assert_eq!(compose_reply("public transport options"), METRO_REPLY);
        assert_eq!(compose_reply("top news please"), NEWS_REPLY);
    }

    #[test]
    fn earlier_group_wins_when_several_match() {
        assert_eq!(compose_reply("traffic and weather"), TRAFFIC_REPLY);
        assert_eq!(compose_reply("weather during the event"), WEATHER_REPLY);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(compose_reply("TRAFFIC on MG ROAD"), TRAFFIC_REPLY);
        assert_eq!(compose_reply("News?"), NEWS_REPLY);
    }

    #[test]
    fn unrecognized_input_gets_the_fallback() {
        assert_eq!(compose_reply("tell me a joke"), FALLBACK_REPLY);
        assert_eq!(compose_reply(""), FALLBACK_REPLY);
    }

    #[test]
    fn quick_action_messages_route_to_their_topics() {
        assert_eq!(compose_reply(QUICK_ACTIONS[0].message), TRAFFIC_REPLY);
        assert_eq!(compose_reply(QUICK_ACTIONS[1].message), WEATHER_REPLY);
        assert_eq!(compose_reply(QUICK_ACTIONS[2].message), EVENTS_REPLY);
        assert_eq!(compose_reply(QUICK_ACTIONS[3].message), METRO_REPLY);
    }

    #[test]
    fn transcript_starts_with_the_greeting() {
        let chat = ChatState::default();
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].sender, Sender::Assistant);
        assert_eq!(chat.messages[0].body, GREETING);
        assert_eq!(chat.status, ResponderStatus::Idle);
    }

    #[test]
    fn transcript_is_capped() {
        let mut chat = ChatState::default();
        for i in 0..(MAX_CHAT_MESSAGES + 10) {
            chat.push_message(ChatMessage {
                id: MessageId::generate(),
                sender: Sender::User,
                body: format!("message {i}"),
                sent_at: UnixTimeMs::new(i as u64),
            });
        }
        assert_eq!(chat.messages.len(), MAX_CHAT_MESSAGES);
    }
}
