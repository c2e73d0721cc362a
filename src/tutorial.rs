//! First-run walkthrough shown over the main menu.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::store::{KeyValueStore, TUTORIAL_DONE_KEY};

pub const MESSAGES: [&str; 5] = [
    "Welcome to BrainDigits! I'll show you how to play.",
    "First, choose a game mode from the main menu.",
    "Each mode will challenge your math skills in a fun way!",
    "In challenge mode, you'll answer as many questions as possible.",
    "Good luck and have fun learning!",
];

/// Which character holds the speech bubble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TutorialStep {
    Message { index: usize, text: &'static str, speaker: Speaker },
    Completed,
}

#[derive(Debug, Clone)]
pub struct Tutorial {
    index: usize,
    completed: bool,
}

impl Tutorial {
    /// Resume from the stored flag: a finished tutorial starts completed.
    pub fn load(store: &impl KeyValueStore) -> Self {
        let completed = store.get_int_or(TUTORIAL_DONE_KEY, 0) == 1;
        if completed {
            log::info!("Tutorial already completed");
        }
        Tutorial { index: 0, completed }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Main-menu buttons stay disabled while the tutorial runs.
    pub fn menu_unlocked(&self) -> bool {
        self.completed
    }

    pub fn current(&self) -> TutorialStep {
        if self.completed {
            return TutorialStep::Completed;
        }
        let speaker = if self.index < 3 { Speaker::Left } else { Speaker::Right };
        TutorialStep::Message { index: self.index, text: MESSAGES[self.index], speaker }
    }

    /// "Next" button. Finishing the last message stores the completion flag.
    pub fn next(&mut self, store: &mut impl KeyValueStore) -> Result<TutorialStep> {
        if self.completed {
            return Ok(TutorialStep::Completed);
        }
        self.index += 1;
        if self.index >= MESSAGES.len() {
            store.set_int(TUTORIAL_DONE_KEY, 1);
            store.flush()?;
            self.completed = true;
            log::info!("Tutorial completed");
        }
        Ok(self.current())
    }

    /// Clear the flag and start over from the first message.
    pub fn replay(&mut self, store: &mut impl KeyValueStore) -> Result<TutorialStep> {
        store.set_int(TUTORIAL_DONE_KEY, 0);
        store.flush()?;
        self.index = 0;
        self.completed = false;
        Ok(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn walks_all_messages_then_persists_completion() {
        let mut store = MemoryStore::new();
        let mut t = Tutorial::load(&store);
        assert!(!t.menu_unlocked());
        assert_eq!(
            t.current(),
            TutorialStep::Message { index: 0, text: MESSAGES[0], speaker: Speaker::Left }
        );
        for i in 1..MESSAGES.len() {
            match t.next(&mut store).unwrap() {
                TutorialStep::Message { index, speaker, .. } => {
                    assert_eq!(index, i);
                    assert_eq!(speaker, if i < 3 { Speaker::Left } else { Speaker::Right });
                }
                TutorialStep::Completed => panic!("finished early at {i}"),
            }
        }
        assert_eq!(t.next(&mut store).unwrap(), TutorialStep::Completed);
        assert!(t.menu_unlocked());
        assert_eq!(store.get_int(TUTORIAL_DONE_KEY), Some(1));
        assert!(Tutorial::load(&store).is_completed());
    }

    #[test]
    fn replay_resets_the_flag() {
        let mut store = MemoryStore::new();
        store.set_int(TUTORIAL_DONE_KEY, 1);
        let mut t = Tutorial::load(&store);
        assert_eq!(t.current(), TutorialStep::Completed);
        let step = t.replay(&mut store).unwrap();
        assert!(matches!(step, TutorialStep::Message { index: 0, .. }));
        assert_eq!(store.get_int(TUTORIAL_DONE_KEY), Some(0));
        assert!(!t.menu_unlocked());
    }
}
