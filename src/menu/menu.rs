use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::cli::io::Console;
use crate::config::MenuConfig;
use crate::errors::MenuError;

use super::option::{Action, MenuOption, ReservedId, OPT_ID_NAVP};
use super::tree::MenuId;

/// Level of a menu with no parent.
pub const MENU_ROOT: u32 = 1;

/// A node of the navigation tree: prompt, level, and an ordered option set.
///
/// Parent and child links are only set through [`MenuTree`](super::MenuTree).
#[derive(Debug, Clone)]
pub struct Menu {
    prompt: String,
    level: u32,
    options: Vec<MenuOption>,
    pub(super) parent: Option<MenuId>,
    pub(super) children: Vec<MenuId>,
}

impl Menu {
    /// Creates an empty menu, adding a back option when `add_back` is set.
    pub fn new(prompt: impl Into<String>, level: u32, add_back: bool) -> Result<Self, MenuError> {
        Self::with_config(prompt, level, add_back, &MenuConfig::default())
    }

    /// Like [`Menu::new`], taking the back option's text and selectors from `config`.
    pub fn with_config(
        prompt: impl Into<String>,
        level: u32,
        add_back: bool,
        config: &MenuConfig,
    ) -> Result<Self, MenuError> {
        if level < MENU_ROOT {
            return Err(MenuError::creation(format!(
                "Menu level {level} is below the root level"
            )));
        }
        if add_back && level == MENU_ROOT {
            return Err(MenuError::creation(
                "Root level menu cannot have a back option",
            ));
        }

        let mut menu = Self {
            prompt: prompt.into(),
            level,
            options: Vec::new(),
            parent: None,
            children: Vec::new(),
        };

        if add_back {
            let selectors: Vec<&str> = config.back_selectors.iter().map(String::as_str).collect();
            menu.add_option(OPT_ID_NAVP, config.back_text.as_str(), &selectors, None)?;
        }
        Ok(menu)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub(super) fn force_level(&mut self, level: u32) {
        self.level = level;
    }

    pub fn parent(&self) -> Option<MenuId> {
        self.parent
    }

    pub fn children(&self) -> &[MenuId] {
        &self.children
    }

    pub fn options(&self) -> &[MenuOption] {
        &self.options
    }

    pub fn option(&self, id: u32) -> Option<&MenuOption> {
        self.options.iter().find(|opt| opt.id() == id)
    }

    pub fn option_exists(&self, id: u32) -> bool {
        self.option(id).is_some()
    }

    /// Adds an option. The parent and child navigation ids are always bound to
    /// this menu's navigation, whatever `action` is passed.
    pub fn add_option(
        &mut self,
        id: u32,
        text: impl Into<String>,
        selectors: &[&str],
        action: Option<Action>,
    ) -> Result<(), MenuError> {
        if self.option_exists(id) {
            return Err(MenuError::option(format!("Option {id} already exists")));
        }
        let action = match ReservedId::from_id(id) {
            Some(reserved) => reserved.bind(action),
            None => action,
        };
        self.options.push(MenuOption::new(id, text, selectors, action)?);
        debug!(option = id, "option added");
        Ok(())
    }

    /// Adds a prebuilt option as-is; reserved ids are not rebound.
    pub fn add_option_object(&mut self, option: MenuOption) -> Result<(), MenuError> {
        if self.option_exists(option.id()) {
            return Err(MenuError::option(format!(
                "Option {} already exists",
                option.id()
            )));
        }
        debug!(option = option.id(), "option object added");
        self.options.push(option);
        Ok(())
    }

    /// Adds every option or none of them.
    pub fn add_options(&mut self, options: Vec<MenuOption>) -> Result<(), MenuError> {
        let mut seen = HashSet::new();
        for option in &options {
            if self.option_exists(option.id()) || !seen.insert(option.id()) {
                return Err(MenuError::option(format!(
                    "Option {} already exists",
                    option.id()
                )));
            }
        }
        debug!(count = options.len(), "options added");
        self.options.extend(options);
        Ok(())
    }

    /// Edits an existing option. Empty `text`, empty `selectors`, and a `None`
    /// action keep the option's current value.
    pub fn edit_option(
        &mut self,
        id: u32,
        text: impl Into<String>,
        selectors: &[&str],
        action: Option<Action>,
    ) -> Result<(), MenuError> {
        let option = self
            .options
            .iter_mut()
            .find(|opt| opt.id() == id)
            .ok_or_else(|| MenuError::option(format!("Option {id} does not exist")))?;

        let text = text.into();
        if !text.is_empty() {
            option.set_text(text);
        }
        if !selectors.is_empty() {
            option.set_selectors(selectors.iter().map(|s| s.to_string()).collect());
        }
        if action.is_some() {
            option.set_action(action);
        }
        Ok(())
    }

    pub fn remove_option(&mut self, id: u32) {
        self.options.retain(|opt| opt.id() != id);
    }

    pub fn clear_options(&mut self) {
        self.options.clear();
    }

    /// Options in display order: plain options as inserted, then the parent
    /// navigation option, then the exit option.
    pub fn display_order(&self) -> Vec<&MenuOption> {
        let mut ordered: Vec<&MenuOption> = self
            .options
            .iter()
            .filter(|opt| {
                !matches!(
                    opt.reserved(),
                    Some(ReservedId::Parent) | Some(ReservedId::Exit)
                )
            })
            .collect();
        for trailing in [ReservedId::Parent, ReservedId::Exit] {
            ordered.extend(self.options.iter().filter(|opt| opt.reserved() == Some(trailing)));
        }
        ordered
    }

    /// Prints every option in display order followed by a blank line.
    pub fn render<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> io::Result<()> {
        for option in self.display_order() {
            option.render(console)?;
        }
        console.blank_line()
    }

    /// First option, in insertion order, with a selector equal to `input`.
    pub fn find_selection(&self, input: &str) -> Option<&MenuOption> {
        self.options.iter().find(|opt| opt.matches(input))
    }
}
