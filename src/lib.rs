#![doc(test(attr(deny(warnings))))]

//! menutree builds hierarchical text menus for interactive command-line tools
//! and drives a read-print-dispatch loop over a line console.
//!
//! ```no_run
//! use menutree::{Action, Console, Menu, MenuTree, RunOutcome, MENU_ROOT, OPT_ID_NAVE};
//!
//! # fn main() -> Result<(), menutree::MenuError> {
//! let mut tree = MenuTree::new();
//! let root = tree.insert(Menu::new("Interrogate>", MENU_ROOT, false)?);
//! let survey = tree.add_child_menu(root, None, true)?;
//!
//! let root_menu = tree.menu_mut(root).expect("root was just inserted");
//! root_menu.add_option(1, "[s]urvey target", &["s", "survey"], Some(Action::Open(survey)))?;
//! root_menu.add_option(OPT_ID_NAVE, "[q]uit", &["q", "quit"], Some(Action::callback(|| Ok(()))))?;
//!
//! let survey_menu = tree.menu_mut(survey).expect("child was just attached");
//! survey_menu.add_option(2, "[l]ist processes", &["l", "list"], Some(Action::callback(|| Ok(()))))?;
//!
//! if tree.run(root, &mut Console::stdio())? == RunOutcome::Exited {
//!     std::process::exit(0);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod menu;
pub mod utils;

pub use cli::Console;
pub use config::MenuConfig;
pub use errors::{ActionError, MenuError};
pub use menu::{
    Action, Menu, MenuId, MenuOption, MenuTree, ReservedId, RunOutcome, MENU_ROOT, OPT_ID_NAVC,
    OPT_ID_NAVE, OPT_ID_NAVP, OPT_ID_NULL,
};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing from [`MenuConfig::from_env`] and emits a startup log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        let config = MenuConfig::from_env();
        utils::init_tracing(&config.log_filter);
        tracing::info!("menutree tracing initialized.");
    });
}
