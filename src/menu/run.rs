use std::io::{BufRead, Write};

use tracing::{debug, info, trace};

use crate::cli::io::Console;
use crate::errors::MenuError;

use super::menu::Menu;
use super::option::{Action, MenuOption, ReservedId};
use super::tree::{MenuId, MenuTree};

/// How a completed [`MenuTree::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// A caller-defined option's callback ran; carries the option id.
    Completed(u32),
    /// The exit option's callback ran. The caller decides whether to end the process.
    Exited,
}

impl MenuTree {
    /// Runs the render / await-input / dispatch cycle starting at `start`.
    ///
    /// Navigation options switch the active menu and restart the cycle there,
    /// so "back" shows the parent's options again without growing the call
    /// stack. The call returns once a callback option has run.
    pub fn run<R: BufRead, W: Write>(
        &self,
        start: MenuId,
        console: &mut Console<R, W>,
    ) -> Result<RunOutcome, MenuError> {
        let mut current = start;

        loop {
            let menu = self.menu(current).ok_or_else(|| {
                MenuError::runtime(format!("menu {} does not exist", current.index()))
            })?;
            if menu.options().is_empty() {
                return Err(MenuError::runtime("Called menu has no options"));
            }

            menu.render(console)?;
            let option = await_selection(menu, console)?;
            console.blank_line()?;

            let action = option.action().ok_or_else(|| {
                MenuError::runtime(format!("Called menu option {} has no action", option.id()))
            })?;

            match action {
                Action::Callback(callback) => {
                    debug!(menu = current.index(), option = option.id(), "dispatching option");
                    callback().map_err(|source| MenuError::Action {
                        id: option.id(),
                        source,
                    })?;
                    return Ok(match option.reserved() {
                        Some(ReservedId::Exit) => {
                            info!(menu = current.index(), "exit option selected");
                            RunOutcome::Exited
                        }
                        _ => RunOutcome::Completed(option.id()),
                    });
                }
                navigation => {
                    let next = self.navigation_target(current, navigation)?;
                    debug!(from = current.index(), to = next.index(), "navigating");
                    current = next;
                }
            }
        }
    }

    /// Runs the only child of `id`.
    ///
    /// Fails when no child is attached, or when several are and the target
    /// would be ambiguous; bind [`Action::Open`] to reach a specific child.
    pub fn navigate_to_child<R: BufRead, W: Write>(
        &self,
        id: MenuId,
        console: &mut Console<R, W>,
    ) -> Result<RunOutcome, MenuError> {
        let target = self.navigation_target(id, &Action::NavigateChild)?;
        self.run(target, console)
    }

    /// Runs the parent of `id`.
    pub fn navigate_to_parent<R: BufRead, W: Write>(
        &self,
        id: MenuId,
        console: &mut Console<R, W>,
    ) -> Result<RunOutcome, MenuError> {
        let target = self.navigation_target(id, &Action::NavigateParent)?;
        self.run(target, console)
    }

    fn navigation_target(&self, from: MenuId, action: &Action) -> Result<MenuId, MenuError> {
        let menu = self
            .menu(from)
            .ok_or_else(|| MenuError::navigation(format!("menu {} does not exist", from.index())))?;

        match action {
            Action::NavigateParent => menu
                .parent()
                .ok_or_else(|| MenuError::navigation("parent menu does not exist")),
            Action::NavigateChild => match menu.children() {
                [] => Err(MenuError::navigation("child menu does not exist")),
                [only] => Ok(*only),
                many => Err(MenuError::navigation(format!(
                    "{} child menus attached; bind the option to a specific menu",
                    many.len()
                ))),
            },
            Action::Open(target) => {
                if self.menu(*target).is_none() {
                    return Err(MenuError::navigation(format!(
                        "menu {} does not exist",
                        target.index()
                    )));
                }
                Ok(*target)
            }
            Action::Callback(_) => Err(MenuError::navigation("option is not a navigation action")),
        }
    }
}

fn await_selection<'m, R: BufRead, W: Write>(
    menu: &'m Menu,
    console: &mut Console<R, W>,
) -> Result<&'m MenuOption, MenuError> {
    loop {
        let input = console
            .read_selection(menu.prompt())?
            .ok_or(MenuError::EndOfInput)?;
        match menu.find_selection(&input) {
            Some(option) => return Ok(option),
            None => trace!(input = %input, "unrecognized selection"),
        }
    }
}
