#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Cursor;
use std::rc::Rc;

use menutree::{Action, Console};

pub type ScriptedConsole = Console<Cursor<Vec<u8>>, Vec<u8>>;

/// Console fed with one line per entry of `lines`.
pub fn scripted(lines: &[&str]) -> ScriptedConsole {
    let mut input = String::new();
    for line in lines {
        input.push_str(line);
        input.push('\n');
    }
    Console::new(Cursor::new(input.into_bytes()), Vec::new())
}

pub fn output(console: ScriptedConsole) -> String {
    let (_, out) = console.into_parts();
    String::from_utf8(out).expect("console output is utf-8")
}

/// Records which callbacks ran, in order.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl Recorder {
    pub fn action(&self, name: &'static str) -> Option<Action> {
        let calls = Rc::clone(&self.calls);
        Some(Action::callback(move || {
            calls.borrow_mut().push(name);
            Ok(())
        }))
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }
}
