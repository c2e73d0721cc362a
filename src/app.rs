//! Application context: the process-wide state that outlives any one scene.
//!
//! Created once at startup and passed by reference. Owns the store, the
//! settings, the active scene and whether the menu music is playing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::challenge::ChallengeSequencer;
use crate::leaderboard::Leaderboard;
use crate::quiz_engine::models::QuizMode;
use crate::session::PracticeSession;
use crate::settings::Settings;
use crate::store::KeyValueStore;
use crate::tutorial::Tutorial;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scene {
    CompanyLogo,
    IntroScreen,
    MainMenu,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    SquareRoot,
    Pattern,
    MultiplicationChallenge,
    HelperChart,
    Leaderboard,
}

impl Scene {
    /// Menu scenes keep the music going; gameplay scenes are silent.
    pub fn has_music(self) -> bool {
        matches!(self, Scene::CompanyLogo | Scene::IntroScreen | Scene::MainMenu)
    }

    pub fn quiz_mode(self) -> Option<QuizMode> {
        match self {
            Scene::Addition       => Some(QuizMode::Addition),
            Scene::Subtraction    => Some(QuizMode::Subtraction),
            Scene::Multiplication => Some(QuizMode::Multiplication),
            Scene::Division       => Some(QuizMode::Division),
            Scene::SquareRoot     => Some(QuizMode::SquareRoot),
            Scene::Pattern        => Some(QuizMode::Pattern),
            _ => None,
        }
    }

    pub fn for_mode(mode: QuizMode) -> Scene {
        match mode {
            QuizMode::Addition       => Scene::Addition,
            QuizMode::Subtraction    => Scene::Subtraction,
            QuizMode::Multiplication => Scene::Multiplication,
            QuizMode::Division       => Scene::Division,
            QuizMode::SquareRoot     => Scene::SquareRoot,
            QuizMode::Pattern        => Scene::Pattern,
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MusicState {
    pub playing: bool,
}

pub struct AppContext<S: KeyValueStore> {
    pub store: S,
    pub settings: Settings,
    scene: Scene,
    music: MusicState,
}

impl<S: KeyValueStore> AppContext<S> {
    /// Boots on the company logo with the music started.
    pub fn new(store: S, settings: Settings) -> Self {
        log::info!("BrainDigits starting");
        AppContext {
            store,
            settings,
            scene: Scene::CompanyLogo,
            music: MusicState { playing: true },
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn music(&self) -> MusicState {
        self.music
    }

    pub fn navigate(&mut self, scene: Scene) {
        log::info!("Scene {} -> {}", self.scene, scene);
        self.scene = scene;
        self.music.playing = scene.has_music();
    }

    /// Enter a practice scene and build its session.
    pub fn start_practice(&mut self, mode: QuizMode, rng_seed: Option<u64>) -> PracticeSession {
        self.navigate(Scene::for_mode(mode));
        PracticeSession::new(mode, &self.settings, rng_seed)
    }

    pub fn start_challenge(&mut self, rng_seed: Option<u64>) -> ChallengeSequencer {
        self.navigate(Scene::MultiplicationChallenge);
        ChallengeSequencer::new(&self.store, &self.settings, rng_seed)
    }

    pub fn open_leaderboard(&mut self) -> Leaderboard {
        self.navigate(Scene::Leaderboard);
        Leaderboard::load(&self.store)
    }

    pub fn open_main_menu(&mut self) -> Tutorial {
        self.navigate(Scene::MainMenu);
        Tutorial::load(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn music_follows_the_scene() {
        let mut app = AppContext::new(MemoryStore::new(), Settings::default());
        assert!(app.music().playing);
        app.navigate(Scene::MainMenu);
        assert!(app.music().playing);
        app.navigate(Scene::Division);
        assert!(!app.music().playing);
        app.navigate(Scene::MainMenu);
        assert!(app.music().playing);
    }

    #[test]
    fn practice_scenes_map_to_modes() {
        for mode in QuizMode::ALL {
            assert_eq!(Scene::for_mode(mode).quiz_mode(), Some(mode));
        }
        assert_eq!(Scene::Leaderboard.quiz_mode(), None);
    }

    #[test]
    fn helpers_switch_scene() {
        let mut app = AppContext::new(MemoryStore::new(), Settings::default());
        let session = app.start_practice(QuizMode::Pattern, Some(1));
        assert_eq!(app.scene(), Scene::Pattern);
        assert_eq!(session.mode(), QuizMode::Pattern);
        let seq = app.start_challenge(Some(2));
        assert_eq!(app.scene(), Scene::MultiplicationChallenge);
        assert_eq!(seq.best_streak(), 0);
        let tutorial = app.open_main_menu();
        assert!(!tutorial.is_completed());
        assert!(app.open_leaderboard().is_empty());
    }
}
