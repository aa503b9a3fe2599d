#[allow(clippy::module_inception)]
pub mod menu;
pub mod option;
pub mod run;
pub mod tree;

pub use menu::{Menu, MENU_ROOT};
pub use option::{
    Action, Callback, MenuOption, ReservedId, OPT_ID_NAVC, OPT_ID_NAVE, OPT_ID_NAVP, OPT_ID_NULL,
};
pub use run::RunOutcome;
pub use tree::{MenuId, MenuTree};
