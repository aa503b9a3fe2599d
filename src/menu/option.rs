use std::fmt;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::cli::io::Console;
use crate::errors::{ActionError, MenuError};

use super::tree::MenuId;

pub const OPT_ID_NULL: u32 = 0;
pub const OPT_ID_NAVP: u32 = 9902;
pub const OPT_ID_NAVC: u32 = 9903;
pub const OPT_ID_NAVE: u32 = 9904;

/// Zero-argument callback bound to a caller-defined option.
pub type Callback = Rc<dyn Fn() -> Result<(), ActionError>>;

/// What happens when an option is selected.
#[derive(Clone)]
pub enum Action {
    Callback(Callback),
    NavigateParent,
    NavigateChild,
    /// Navigate to one specific menu of the same tree.
    Open(MenuId),
}

impl Action {
    pub fn callback<F>(f: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + 'static,
    {
        Action::Callback(Rc::new(f))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Callback(_) => f.write_str("Callback(..)"),
            Action::NavigateParent => f.write_str("NavigateParent"),
            Action::NavigateChild => f.write_str("NavigateChild"),
            Action::Open(id) => f.debug_tuple("Open").field(id).finish(),
        }
    }
}

/// Option ids with library-defined behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedId {
    Parent,
    Child,
    Exit,
}

impl ReservedId {
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            OPT_ID_NAVP => Some(ReservedId::Parent),
            OPT_ID_NAVC => Some(ReservedId::Child),
            OPT_ID_NAVE => Some(ReservedId::Exit),
            _ => None,
        }
    }

    pub fn id(self) -> u32 {
        match self {
            ReservedId::Parent => OPT_ID_NAVP,
            ReservedId::Child => OPT_ID_NAVC,
            ReservedId::Exit => OPT_ID_NAVE,
        }
    }

    /// Action an option with this id ends up with when added through
    /// [`Menu::add_option`](super::Menu::add_option).
    ///
    /// Parent and child navigation ignore `supplied`; exit keeps the caller's
    /// cleanup action.
    pub fn bind(self, supplied: Option<Action>) -> Option<Action> {
        match self {
            ReservedId::Parent => Some(Action::NavigateParent),
            ReservedId::Child => Some(Action::NavigateChild),
            ReservedId::Exit => supplied,
        }
    }
}

/// A selectable menu entry.
#[derive(Debug, Clone)]
pub struct MenuOption {
    id: u32,
    text: String,
    selectors: Vec<String>,
    action: Option<Action>,
}

impl MenuOption {
    pub fn new(
        id: u32,
        text: impl Into<String>,
        selectors: &[&str],
        action: Option<Action>,
    ) -> Result<Self, MenuError> {
        validate_id(id)?;
        Ok(Self {
            id,
            text: text.into(),
            selectors: selectors.iter().map(|s| s.to_string()).collect(),
            action,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selectors(&self) -> &[String] {
        &self.selectors
    }

    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    pub fn reserved(&self) -> Option<ReservedId> {
        ReservedId::from_id(self.id)
    }

    pub fn matches(&self, input: &str) -> bool {
        self.selectors.iter().any(|selector| selector == input)
    }

    pub fn set_id(&mut self, id: u32) -> Result<(), MenuError> {
        validate_id(id)?;
        self.id = id;
        Ok(())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_selectors(&mut self, selectors: Vec<String>) {
        self.selectors = selectors;
    }

    pub fn set_action(&mut self, action: Option<Action>) {
        self.action = action;
    }

    pub fn render<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        console.println_text(&self.text)
    }
}

fn validate_id(id: u32) -> Result<(), MenuError> {
    if id == OPT_ID_NULL {
        Err(MenuError::option("Option id cannot be zero"))
    } else {
        Ok(())
    }
}
