//! Simulated live chat feed.
//!
//! A background task appends one generated message to the store per tick.
//! There is no real messaging transport behind it.

use std::sync::Arc;
use std::time::Duration;

use mytube_core::{Action, ChatMessage, Store};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Ananya", "Arjun", "Diya", "Ishaan", "Kavya", "Rohan", "Saanvi", "Vihaan", "Meera", "Kabir", "Priya",
    "Aditya", "Nisha", "Karan", "Zoya",
];

const LAST_NAMES: &[&str] = &["Sharma", "Verma", "Iyer", "Patel", "Reddy", "Gupta", "Nair", "Singh", "Das", "Khan"];

const PHRASES: &[&str] = &[
    "This is so good",
    "First time watching live!",
    "Greetings from Pune",
    "Can you explain that again?",
    "LOL",
    "Who else is here in 2026?",
    "The audio is a bit low",
    "Great stream today",
    "Subscribed!",
    "What setup are you using?",
    "Let's go!!",
    "Underrated channel",
    "Hello everyone",
    "That part was crazy",
];

const EMOJI: &[&str] = &["🔥", "😂", "👏", "🚀", "❤️", "🙌"];

/// Random "First Last" display name.
pub fn random_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Guest");
    let last = LAST_NAMES.choose(rng).copied().unwrap_or("User");
    format!("{first} {last}")
}

/// Random chat line, sometimes with a trailing emoji.
pub fn random_message<R: Rng + ?Sized>(rng: &mut R) -> String {
    let phrase = PHRASES.choose(rng).copied().unwrap_or("Hello");
    if rng.gen_bool(0.3)
        && let Some(emoji) = EMOJI.choose(rng)
    {
        return format!("{phrase} {emoji}");
    }
    phrase.to_string()
}

pub fn random_chat_message<R: Rng + ?Sized>(rng: &mut R) -> ChatMessage {
    ChatMessage::new(random_name(rng), random_message(rng))
}

/// Seeded generator, or one seeded from OS entropy.
pub fn chat_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Handle to the running feed. Dropping it stops the feed.
#[derive(Debug)]
pub struct LiveChatFeed {
    task: JoinHandle<()>,
}

impl LiveChatFeed {
    /// Start appending a generated message every `interval`. The first message
    /// arrives one interval after spawning.
    pub fn spawn(store: Arc<Store>, interval: Duration, seed: Option<u64>) -> Self {
        let task = tokio::spawn(async move {
            let mut rng = chat_rng(seed);
            let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            tracing::info!(interval_ms = interval.as_millis() as u64, "live chat feed started");
            loop {
                ticker.tick().await;
                store.dispatch(Action::AddMessage(random_chat_message(&mut rng)));
            }
        });

        Self { task }
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for LiveChatFeed {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a: Vec<_> = {
            let mut rng = chat_rng(Some(7));
            (0..5).map(|_| random_chat_message(&mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = chat_rng(Some(7));
            (0..5).map(|_| random_chat_message(&mut rng)).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_generated_message_shape() {
        let mut rng = chat_rng(Some(1));
        for _ in 0..50 {
            let message = random_chat_message(&mut rng);
            assert_eq!(message.name.split(' ').count(), 2);
            assert!(!message.text.is_empty());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_appends_per_tick() {
        let store = Arc::new(Store::default());
        let feed = LiveChatFeed::spawn(Arc::clone(&store), Duration::from_secs(2), Some(3));

        tokio::time::sleep(Duration::from_millis(1_900)).await;
        assert_eq!(store.select(|s| s.chat.messages.len()), 0);

        tokio::time::sleep(Duration::from_millis(4_200)).await;
        assert_eq!(store.select(|s| s.chat.messages.len()), 3);
        assert!(feed.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_stops_on_drop() {
        let store = Arc::new(Store::default());
        let feed = LiveChatFeed::spawn(Arc::clone(&store), Duration::from_millis(100), None);

        tokio::time::sleep(Duration::from_millis(250)).await;
        drop(feed);
        let count = store.select(|s| s.chat.messages.len());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(store.select(|s| s.chat.messages.len()), count);
    }
}
