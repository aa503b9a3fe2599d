use std::collections::HashMap;

use tracing::debug;

use crate::config::MenuConfig;
use crate::errors::MenuError;

use super::menu::{Menu, MENU_ROOT};

/// Handle to a menu owned by a [`MenuTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(usize);

impl MenuId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns every menu of a navigation tree.
///
/// Child lists are the owning edges; a menu's parent is a plain [`MenuId`]
/// back-reference into the same arena.
#[derive(Debug, Default)]
pub struct MenuTree {
    menus: Vec<Menu>,
    config: MenuConfig,
}

impl MenuTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MenuConfig) -> Self {
        Self {
            menus: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Takes ownership of `menu` and returns its handle.
    pub fn insert(&mut self, menu: Menu) -> MenuId {
        let id = MenuId(self.menus.len());
        debug!(menu = id.0, level = menu.level(), "menu inserted");
        self.menus.push(menu);
        id
    }

    /// Builds a menu with this tree's config and inserts it.
    pub fn create_menu(
        &mut self,
        prompt: impl Into<String>,
        level: u32,
        add_back: bool,
    ) -> Result<MenuId, MenuError> {
        let menu = Menu::with_config(prompt, level, add_back, &self.config)?;
        Ok(self.insert(menu))
    }

    pub fn menu(&self, id: MenuId) -> Option<&Menu> {
        self.menus.get(id.0)
    }

    pub fn menu_mut(&mut self, id: MenuId) -> Option<&mut Menu> {
        self.menus.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    fn lookup(&self, id: MenuId, err: fn(String) -> MenuError) -> Result<&Menu, MenuError> {
        self.menus
            .get(id.0)
            .ok_or_else(|| err(format!("menu {} does not belong to this tree", id.0)))
    }

    /// Attaches a child menu to `parent` and returns its handle.
    ///
    /// Without `use_menu` a child is synthesized with the parent's prompt and a
    /// back option. The child's level is forced to the parent's level plus one
    /// and its descendants follow; the attach fails with [`MenuError::Edit`] if
    /// that would put a menu at or above a parent it is already linked to. With
    /// `link_parent` the child's back-reference points to `parent`.
    pub fn add_child_menu(
        &mut self,
        parent: MenuId,
        use_menu: Option<MenuId>,
        link_parent: bool,
    ) -> Result<MenuId, MenuError> {
        let parent_menu = self.lookup(parent, MenuError::Creation)?;
        let child_level = parent_menu.level() + 1;

        let child = match use_menu {
            Some(child) => {
                let child_menu = self.lookup(child, MenuError::Creation)?;
                if parent_menu.children().contains(&child) {
                    return Err(MenuError::creation("Child menu already exists"));
                }
                if child == parent || self.is_ancestor(child, parent) {
                    return Err(MenuError::creation(
                        "Child menu is an ancestor of its new parent",
                    ));
                }
                if link_parent && child_menu.parent().is_some_and(|p| p != parent) {
                    return Err(MenuError::creation("Parent menu already exists"));
                }
                let plan = self.plan_relevel(child, child_level)?;
                self.apply_levels(plan);
                child
            }
            None => {
                let prompt = parent_menu.prompt().to_string();
                self.create_menu(prompt, child_level, true)?
            }
        };

        if link_parent {
            self.menus[child.0].parent = Some(parent);
        }
        self.menus[parent.0].children.push(child);
        debug!(parent = parent.0, child = child.0, level = child_level, "child menu attached");
        Ok(child)
    }

    /// Sets the back-reference of `child`, forcing the parent's level to the
    /// child's level minus one. Without `use_menu` a parent is synthesized.
    ///
    /// The parent's child list is left untouched; use
    /// [`MenuTree::add_child_menu`] to link both directions.
    pub fn add_parent_menu(
        &mut self,
        child: MenuId,
        use_menu: Option<MenuId>,
    ) -> Result<MenuId, MenuError> {
        let child_menu = self.lookup(child, MenuError::Creation)?;
        if child_menu.parent().is_some() {
            return Err(MenuError::creation("Parent menu already exists"));
        }
        if child_menu.level() == MENU_ROOT {
            return Err(MenuError::creation(
                "Parent menu cannot exist on a root level menu",
            ));
        }
        let parent_level = child_menu.level() - 1;

        let parent = match use_menu {
            Some(parent) => {
                self.lookup(parent, MenuError::Creation)?;
                if parent == child || self.is_ancestor(child, parent) {
                    return Err(MenuError::creation(
                        "Parent menu is a descendant of the child",
                    ));
                }
                let plan = self.plan_relevel(parent, parent_level)?;
                self.apply_levels(plan);
                parent
            }
            None => {
                let prompt = child_menu.prompt().to_string();
                self.create_menu(prompt, parent_level, false)?
            }
        };

        self.menus[child.0].parent = Some(parent);
        debug!(parent = parent.0, child = child.0, "parent menu linked");
        Ok(parent)
    }

    /// Detaches `child` from `parent`. No-op when it is not attached.
    pub fn remove_child_menu(&mut self, parent: MenuId, child: MenuId) -> Result<(), MenuError> {
        self.lookup(parent, MenuError::Edit)?;
        self.lookup(child, MenuError::Edit)?;
        self.menus[parent.0].children.retain(|id| *id != child);
        if self.menus[child.0].parent == Some(parent) {
            self.menus[child.0].parent = None;
        }
        Ok(())
    }

    /// Clears the back-reference of `child` and drops it from its former
    /// parent's child list.
    pub fn remove_parent_menu(&mut self, child: MenuId) -> Result<(), MenuError> {
        self.lookup(child, MenuError::Edit)?;
        if let Some(parent) = self.menus[child.0].parent.take() {
            self.menus[parent.0].children.retain(|id| *id != child);
        }
        Ok(())
    }

    /// Changes a menu's level without touching linked menus.
    ///
    /// The level must stay above the parent's and below every child's.
    pub fn set_level(&mut self, id: MenuId, level: u32) -> Result<(), MenuError> {
        let menu = self.lookup(id, MenuError::Edit)?;
        if level < MENU_ROOT {
            return Err(MenuError::edit(format!(
                "Menu level {level} is below the root level"
            )));
        }
        if let Some(parent) = menu.parent() {
            if self.menus[parent.0].level() >= level {
                return Err(MenuError::edit(
                    "Menu level lower than the parent menu level",
                ));
            }
        }
        if menu
            .children()
            .iter()
            .any(|child| self.menus[child.0].level() <= level)
        {
            return Err(MenuError::edit(
                "Menu level higher than the child menu level",
            ));
        }
        self.menus[id.0].force_level(level);
        Ok(())
    }

    pub fn set_prompt(&mut self, id: MenuId, prompt: impl Into<String>) -> Result<(), MenuError> {
        self.lookup(id, MenuError::Edit)?;
        self.menus[id.0].set_prompt(prompt);
        Ok(())
    }

    /// True when `ancestor` is reachable from `id` by following parent links
    /// or is a registered ancestor through child lists.
    fn is_ancestor(&self, ancestor: MenuId, id: MenuId) -> bool {
        let mut seen = vec![false; self.menus.len()];
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if seen[current.0] {
                continue;
            }
            seen[current.0] = true;
            if let Some(parent) = self.menus[current.0].parent() {
                if parent == ancestor {
                    return true;
                }
                stack.push(parent);
            }
            for (index, menu) in self.menus.iter().enumerate() {
                if menu.children().contains(&current) {
                    if MenuId(index) == ancestor {
                        return true;
                    }
                    stack.push(MenuId(index));
                }
            }
        }
        false
    }

    /// Levels `root` and everything below it would take if `root` moved to
    /// `level`. Menus below are reached through child lists and through
    /// back-references pointing at a planned menu.
    ///
    /// Fails when a planned level is not greater than the level of a parent the
    /// menu stays linked to.
    fn plan_relevel(
        &self,
        root: MenuId,
        level: u32,
    ) -> Result<HashMap<MenuId, u32>, MenuError> {
        let mut plan = HashMap::new();
        let mut stack = vec![(root, level)];
        while let Some((id, level)) = stack.pop() {
            if plan.contains_key(&id) {
                continue;
            }
            plan.insert(id, level);
            for child in self.menus[id.0].children() {
                stack.push((*child, level + 1));
            }
            for (index, menu) in self.menus.iter().enumerate() {
                if menu.parent() == Some(id) {
                    stack.push((MenuId(index), level + 1));
                }
            }
        }

        let level_of = |id: MenuId| plan.get(&id).copied().unwrap_or(self.menus[id.0].level());
        for (&id, &level) in &plan {
            let linked_parents = self.menus[id.0].parent().into_iter().chain(
                (0..self.menus.len())
                    .map(MenuId)
                    .filter(|candidate| self.menus[candidate.0].children().contains(&id)),
            );
            for parent in linked_parents {
                if level_of(parent) >= level {
                    return Err(MenuError::edit(format!(
                        "Menu {} would sit at level {level}, not below its parent menu {}",
                        id.0, parent.0
                    )));
                }
            }
        }
        Ok(plan)
    }

    fn apply_levels(&mut self, plan: HashMap<MenuId, u32>) {
        for (id, level) in plan {
            self.menus[id.0].force_level(level);
        }
    }
}
