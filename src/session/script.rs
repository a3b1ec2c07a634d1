//! Scripted demo: the pre-recorded generation shown before a live prompt.

use crate::pipeline::{apply_all, parse_patch_line};
use crate::session::{CancelHandle, Event, EventSender};
use crate::types::{Patch, UiTree};
use std::time::Duration;
use tracing::debug;

pub const DEMO_PROMPT: &str = "Create a contact form with name, email, and message";

/// Recorded stream for [`DEMO_PROMPT`]: the root line, then one line per element.
pub const DEMO_LINES: [&str; 6] = [
    r#"{"op":"set","path":"/root","value":"card"}"#,
    r#"{"op":"add","path":"/elements/card","value":{"key":"card","type":"Card","props":{"title":"Contact Us","description":"Send us a message and we'll get back to you."},"children":["name","email","message","submit"]}}"#,
    r#"{"op":"add","path":"/elements/name","value":{"key":"name","type":"Input","props":{"label":"Name","name":"name","placeholder":"Your name"}}}"#,
    r#"{"op":"add","path":"/elements/email","value":{"key":"email","type":"Input","props":{"label":"Email","name":"email","type":"email","placeholder":"you@example.com"}}}"#,
    r#"{"op":"add","path":"/elements/message","value":{"key":"message","type":"Textarea","props":{"label":"Message","name":"message","placeholder":"How can we help?"}}}"#,
    r#"{"op":"add","path":"/elements/submit","value":{"key":"submit","type":"Button","props":{"label":"Send Message","variant":"primary"}}}"#,
];

pub const DEMO_ROOT_CHILDREN: [&str; 4] = ["name", "email", "message", "submit"];

pub fn demo_patches() -> Vec<Patch> {
    DEMO_LINES.iter().filter_map(|l| parse_patch_line(l)).collect()
}

/// Final tree of the scripted demo.
pub fn demo_tree() -> UiTree {
    apply_all(&UiTree::empty(), &demo_patches())
}

/// `false` when cancelled before the delay elapsed.
async fn tick(delay: Duration, cancel: &CancelHandle) -> bool {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

/// Producer task: type the prompt, then reveal the recorded lines.
pub(crate) async fn run_script(
    generation: u64,
    typing_delay: Duration,
    step_delay: Duration,
    cancel: CancelHandle,
    events: EventSender,
) {
    for ch in DEMO_PROMPT.chars() {
        if !tick(typing_delay, &cancel).await {
            debug!(generation, "scripted demo cancelled while typing");
            return;
        }
        if events.send(Event::Typed { generation, ch }).is_err() {
            return;
        }
    }

    for patch in demo_patches() {
        if !tick(step_delay, &cancel).await {
            debug!(generation, "scripted demo cancelled while revealing");
            return;
        }
        if events.send(Event::Revealed { generation, patch }).is_err() {
            return;
        }
    }

    let _ = events.send(Event::ScriptFinished { generation });
}
