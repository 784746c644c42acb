//! Append-only, player-facing record of what happened during play.

use crate::types::Rgb;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub fg: Rgb,
    pub count: u32,
}

impl Message {
    pub fn full_text(&self) -> String {
        if self.count > 1 { format!("{} (x{})", self.text, self.count) } else { self.text.clone() }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MessageLog {
    messages: Vec<Message>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `text`, folding it into the previous entry when the text repeats.
    pub fn add(&mut self, text: impl Into<String>, fg: Rgb) {
        let text = text.into();
        if let Some(last) = self.messages.last_mut()
            && last.text == text
        {
            last.count += 1;
            return;
        }
        self.messages.push(Message { text, fg, count: 1 });
    }

    pub fn add_unstacked(&mut self, text: impl Into<String>, fg: Rgb) {
        self.messages.push(Message { text: text.into(), fg, count: 1 });
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|message| message.text.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    #[test]
    fn identical_consecutive_messages_coalesce() {
        let mut log = MessageLog::new();
        log.add("That way is blocked.", color::WHITE);
        log.add("That way is blocked.", color::WHITE);
        log.add("That way is blocked.", color::WHITE);

        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].count, 3);
        assert_eq!(log.messages()[0].full_text(), "That way is blocked. (x3)");
    }

    #[test]
    fn interleaved_messages_do_not_coalesce() {
        let mut log = MessageLog::new();
        log.add("a", color::WHITE);
        log.add("b", color::WHITE);
        log.add("a", color::WHITE);
        assert_eq!(log.len(), 3);
        assert!(log.messages().iter().all(|message| message.count == 1));
    }

    #[test]
    fn unstacked_messages_always_append() {
        let mut log = MessageLog::new();
        log.add_unstacked("ping", color::WHITE);
        log.add_unstacked("ping", color::WHITE);
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(Message::full_text), Some("ping".to_string()));
    }
}
