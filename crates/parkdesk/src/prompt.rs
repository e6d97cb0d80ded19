// SPDX-FileCopyrightText: 2026 Parkdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal line input shared by the shell and the time-out confirmation.

use std::sync::{Mutex, PoisonError};

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::warn;

use parkdesk_core::Parking;
use parkdesk_workflow::{ConfirmTimeOut, TIME_OUT_PROMPT};

/// The process's single line editor, opened on first read.
#[derive(Default)]
pub struct Terminal {
    editor: Mutex<Option<DefaultEditor>>,
}

impl Terminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read one line. The read blocks, so it is moved off the async worker.
    pub fn read_line(&self, prompt: &str) -> Result<String, ReadlineError> {
        off_worker(|| {
            let mut slot = self.editor.lock().unwrap_or_else(PoisonError::into_inner);
            let editor = match slot.take() {
                Some(editor) => editor,
                None => DefaultEditor::new()?,
            };
            slot.insert(editor).readline(prompt)
        })
    }

    pub fn add_history(&self, line: &str) {
        let mut slot = self.editor.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(editor) = slot.as_mut() {
            let _ = editor.add_history_entry(line);
        }
    }
}

/// Asks on the terminal. Anything but an explicit yes declines.
impl ConfirmTimeOut for Terminal {
    fn confirm(&self, parking: &Parking) -> bool {
        println!("Time out {} (parking {})?", parking.plate_number(), parking.id);
        match self.read_line(&format!("{TIME_OUT_PROMPT} [y/N] ")) {
            Ok(answer) => is_yes(&answer),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => false,
            Err(e) => {
                warn!(error = %e, "cannot read time-out confirmation");
                false
            }
        }
    }
}

/// `block_in_place` panics on a current-thread runtime, so those run inline.
fn off_worker<T>(read: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(read)
        }
        _ => read(),
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
