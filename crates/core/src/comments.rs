//! Threaded comments shown under the watch page.
//!
//! The thread is static sample data; it is not fetched per video.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A comment with its nested replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Comment {
    pub name: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(name: &str, text: &str) -> Self {
        Self { name: name.to_string(), text: text.to_string(), replies: Vec::new() }
    }

    pub fn with_replies(mut self, replies: Vec<Comment>) -> Self {
        self.replies = replies;
        self
    }

    /// This comment plus every reply below it.
    pub fn total(&self) -> usize {
        1 + self.replies.iter().map(Comment::total).sum::<usize>()
    }

    /// Levels of nesting, counting this comment as 1.
    pub fn depth(&self) -> usize {
        1 + self.replies.iter().map(Comment::depth).max().unwrap_or(0)
    }
}

/// Count every comment in a thread, replies included.
pub fn thread_total(thread: &[Comment]) -> usize {
    thread.iter().map(Comment::total).sum()
}

fn nice() -> Comment {
    Comment::new("Raj", "Very Nice Video")
}

fn awesome() -> Comment {
    Comment::new("Harsh", "Awesome Video")
}

fn perfect(name: &str) -> Comment {
    Comment::new(name, "Perfect")
}

/// The sample thread rendered under every video.
pub fn sample_thread() -> Vec<Comment> {
    vec![
        Comment::new("Siddharth", "Nice Video").with_replies(vec![
            awesome(),
            nice(),
            perfect("Naman").with_replies(vec![
                awesome(),
                nice().with_replies(vec![awesome(), nice(), perfect("Naman")]),
                perfect("Naman"),
            ]),
        ]),
        awesome().with_replies(vec![awesome(), nice(), perfect("Songkiat")]),
        nice(),
        perfect("Dev").with_replies(vec![nice().with_replies(vec![awesome(), nice(), perfect("Kaushik")])]),
    ]
}
