use std::sync::mpsc::Receiver;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Input the drill loop reacts to.
#[derive(Clone, Debug)]
pub enum DrillEvent {
    Key(KeyEvent),
    Resize,
}

/// Blocking source of drill events. `None` means input is closed.
pub trait DrillEventSource {
    fn next_event(&self) -> Option<DrillEvent>;
}

/// Reads the terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl DrillEventSource for CrosstermEventSource {
    fn next_event(&self) -> Option<DrillEvent> {
        loop {
            match event::read().ok()? {
                // Windows reports releases too
                CtEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    return Some(DrillEvent::Key(key))
                }
                CtEvent::Resize(_, _) => return Some(DrillEvent::Resize),
                _ => continue,
            }
        }
    }
}

/// Replays events sent over a channel, for headless runs.
pub struct ScriptedEventSource {
    rx: Receiver<DrillEvent>,
}

impl ScriptedEventSource {
    pub fn new(rx: Receiver<DrillEvent>) -> Self {
        Self { rx }
    }
}

impl DrillEventSource for ScriptedEventSource {
    fn next_event(&self) -> Option<DrillEvent> {
        self.rx.recv().ok()
    }
}
