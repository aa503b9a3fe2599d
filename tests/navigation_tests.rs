mod common;

use common::{output, scripted, Recorder};
use menutree::{
    Action, MenuError, MenuId, MenuTree, RunOutcome, MENU_ROOT, OPT_ID_NAVC, OPT_ID_NAVE,
};
use predicates::prelude::*;

fn survey_root(recorder: &Recorder) -> (MenuTree, MenuId) {
    let mut tree = MenuTree::new();
    let root = tree.create_menu("Interrogate>", MENU_ROOT, false).unwrap();
    let menu = tree.menu_mut(root).unwrap();
    menu.add_option(1, "[s]urvey target", &["s", "survey"], recorder.action("survey")).unwrap();
    menu.add_option(OPT_ID_NAVE, "[q]uit", &["q", "quit"], recorder.action("exit")).unwrap();
    (tree, root)
}

/// Root reaches child `Survey>` through option 1; the child has a back option.
fn two_level_tree(recorder: &Recorder) -> (MenuTree, MenuId, MenuId) {
    let mut tree = MenuTree::new();
    let root = tree.create_menu("Root>", MENU_ROOT, false).unwrap();
    let child = tree.create_menu("Survey>", 2, true).unwrap();
    tree.add_child_menu(root, Some(child), true).unwrap();

    let root_menu = tree.menu_mut(root).unwrap();
    root_menu
        .add_option(1, "[s]urvey target", &["s", "survey"], Some(Action::Open(child)))
        .unwrap();
    root_menu
        .add_option(OPT_ID_NAVE, "[q]uit", &["q", "quit"], recorder.action("exit"))
        .unwrap();

    tree.menu_mut(child)
        .unwrap()
        .add_option(2, "[l]ist processes", &["l", "list"], recorder.action("list"))
        .unwrap();
    (tree, root, child)
}

#[test]
fn selector_dispatches_bound_callback() {
    let recorder = Recorder::default();
    let (tree, root) = survey_root(&recorder);
    let mut console = scripted(&["survey"]);
    assert_eq!(tree.run(root, &mut console).unwrap(), RunOutcome::Completed(1));
    assert_eq!(recorder.calls(), vec!["survey"]);
}

#[test]
fn exit_selector_reports_exit() {
    let recorder = Recorder::default();
    let (tree, root) = survey_root(&recorder);
    let mut console = scripted(&["quit"]);
    assert_eq!(tree.run(root, &mut console).unwrap(), RunOutcome::Exited);
    assert_eq!(recorder.calls(), vec!["exit"]);
}

#[test]
fn unknown_input_keeps_waiting() {
    let recorder = Recorder::default();
    let (tree, root) = survey_root(&recorder);
    let mut console = scripted(&["xyz", "Survey", "surv", "s"]);
    assert_eq!(tree.run(root, &mut console).unwrap(), RunOutcome::Completed(1));
    assert_eq!(recorder.calls(), vec!["survey"]);
    assert_eq!(
        output(console),
        "[s]urvey target\n[q]uit\n\n\
         Interrogate>Interrogate>Interrogate>Interrogate>\n"
    );
}

#[test]
fn exhausted_input_is_end_of_input() {
    let recorder = Recorder::default();
    let (tree, root) = survey_root(&recorder);
    let mut console = scripted(&["xyz"]);
    let err = tree.run(root, &mut console).unwrap_err();
    assert!(matches!(err, MenuError::EndOfInput));
    assert!(recorder.calls().is_empty());
}

#[test]
fn back_reenters_parent_menu() {
    let recorder = Recorder::default();
    let (tree, root, _) = two_level_tree(&recorder);
    let mut console = scripted(&["survey", "back", "quit"]);
    assert_eq!(tree.run(root, &mut console).unwrap(), RunOutcome::Exited);
    assert_eq!(recorder.calls(), vec!["exit"]);

    let root_screen = "[s]urvey target\n[q]uit\n\nRoot>\n";
    let child_screen = "[l]ist processes\n[b]ack\n\nSurvey>\n";
    assert_eq!(
        output(console),
        format!("{root_screen}{child_screen}{root_screen}")
    );
}

#[test]
fn reserved_child_id_navigates_to_single_child() {
    let recorder = Recorder::default();
    let mut tree = MenuTree::new();
    let root = tree.create_menu("Root>", MENU_ROOT, false).unwrap();
    let child = tree.add_child_menu(root, None, true).unwrap();
    tree.menu_mut(root)
        .unwrap()
        .add_option(OPT_ID_NAVC, "[n]ext", &["n"], recorder.action("ignored"))
        .unwrap();
    tree.menu_mut(child)
        .unwrap()
        .add_option(1, "[l]ist", &["l"], recorder.action("list"))
        .unwrap();

    let mut console = scripted(&["n", "b", "n", "l"]);
    assert_eq!(tree.run(root, &mut console).unwrap(), RunOutcome::Completed(1));
    assert_eq!(recorder.calls(), vec!["list"]);
}

#[test]
fn reserved_child_id_with_several_children_is_ambiguous() {
    let recorder = Recorder::default();
    let mut tree = MenuTree::new();
    let root = tree.create_menu("Root>", MENU_ROOT, false).unwrap();
    tree.add_child_menu(root, None, true).unwrap();
    tree.add_child_menu(root, None, true).unwrap();
    tree.menu_mut(root)
        .unwrap()
        .add_option(OPT_ID_NAVC, "[n]ext", &["n"], None)
        .unwrap();

    let mut console = scripted(&["n"]);
    assert!(matches!(
        tree.run(root, &mut console),
        Err(MenuError::Navigation(_))
    ));
    assert!(recorder.calls().is_empty());
}

#[test]
fn open_reaches_a_specific_child_among_several() {
    let recorder = Recorder::default();
    let mut tree = MenuTree::new();
    let root = tree.create_menu("Interrogate>", MENU_ROOT, false).unwrap();
    let processes = tree.create_menu("Interrogate>", 2, true).unwrap();
    let dlls = tree.create_menu("Interrogate>", 2, true).unwrap();
    tree.add_child_menu(root, Some(processes), true).unwrap();
    tree.add_child_menu(root, Some(dlls), true).unwrap();

    let root_menu = tree.menu_mut(root).unwrap();
    root_menu
        .add_option(1, "[s]urvey target", &["s"], Some(Action::Open(processes)))
        .unwrap();
    root_menu
        .add_option(2, "[e]xamine process", &["e"], Some(Action::Open(dlls)))
        .unwrap();
    tree.menu_mut(processes)
        .unwrap()
        .add_option(1, "[l]ist processes", &["l", "list"], recorder.action("processes"))
        .unwrap();
    tree.menu_mut(dlls)
        .unwrap()
        .add_option(1, "[d]ll list", &["d", "list"], recorder.action("dlls"))
        .unwrap();

    let mut console = scripted(&["e", "back", "s", "b", "e", "list"]);
    assert_eq!(tree.run(root, &mut console).unwrap(), RunOutcome::Completed(1));
    assert_eq!(recorder.calls(), vec!["dlls"]);
}

#[test]
fn back_without_parent_link_fails() {
    let mut tree = MenuTree::new();
    let root = tree.create_menu("Root>", MENU_ROOT, false).unwrap();
    let orphan = tree.add_child_menu(root, None, false).unwrap();

    let mut console = scripted(&["back"]);
    let err = tree.run(orphan, &mut console).unwrap_err();
    assert!(matches!(err, MenuError::Navigation(_)));
}

#[test]
fn direct_navigation_requires_links() {
    let recorder = Recorder::default();
    let (tree, root, child) = two_level_tree(&recorder);

    let mut console = scripted(&[]);
    assert!(matches!(
        tree.navigate_to_parent(root, &mut console),
        Err(MenuError::Navigation(_))
    ));

    let mut console = scripted(&["list"]);
    assert_eq!(
        tree.navigate_to_child(root, &mut console).unwrap(),
        RunOutcome::Completed(2)
    );
    assert_eq!(recorder.calls(), vec!["list"]);

    let mut console = scripted(&["quit"]);
    assert_eq!(
        tree.navigate_to_parent(child, &mut console).unwrap(),
        RunOutcome::Exited
    );

    let mut lone = MenuTree::new();
    let menu = lone.create_menu("x", MENU_ROOT, false).unwrap();
    let mut console = scripted(&[]);
    assert!(matches!(
        lone.navigate_to_child(menu, &mut console),
        Err(MenuError::Navigation(_))
    ));
}

#[test]
fn empty_menu_fails_before_any_io() {
    let mut tree = MenuTree::new();
    let root = tree.create_menu("Root>", MENU_ROOT, false).unwrap();
    let mut console = scripted(&["anything"]);
    let err = tree.run(root, &mut console).unwrap_err();
    assert!(matches!(err, MenuError::Runtime(_)));
    assert_eq!(output(console), "");
}

#[test]
fn option_without_action_is_runtime_error() {
    let mut tree = MenuTree::new();
    let root = tree.create_menu("Root>", MENU_ROOT, false).unwrap();
    let menu = tree.menu_mut(root).unwrap();
    menu.add_option(1, "[l]ist processes", &["l"], None).unwrap();
    menu.add_option(OPT_ID_NAVE, "[q]uit", &["q"], None).unwrap();

    for input in ["l", "q"] {
        let mut console = scripted(&[input]);
        let err = tree.run(root, &mut console).unwrap_err();
        assert!(matches!(err, MenuError::Runtime(_)));
    }
}

#[test]
fn callback_failure_is_reported_with_option_id() {
    let mut tree = MenuTree::new();
    let root = tree.create_menu("Root>", MENU_ROOT, false).unwrap();
    tree.menu_mut(root)
        .unwrap()
        .add_option(
            4,
            "[n]etwork connections",
            &["n"],
            Some(Action::callback(|| Err("enumeration failed".into()))),
        )
        .unwrap();

    let mut console = scripted(&["n"]);
    let err = tree.run(root, &mut console).unwrap_err();
    assert!(predicate::str::contains("enumeration failed").eval(&err.to_string()));
    match err {
        MenuError::Action { id, .. } => assert_eq!(id, 4),
        other => panic!("expected action error, got {other:?}"),
    }
}

#[test]
fn long_navigation_sessions_do_not_grow_the_stack() {
    let recorder = Recorder::default();
    let (tree, root, _) = two_level_tree(&recorder);

    let mut script = Vec::new();
    for _ in 0..20_000 {
        script.push("s");
        script.push("b");
    }
    script.push("q");

    let mut console = scripted(&script);
    assert_eq!(tree.run(root, &mut console).unwrap(), RunOutcome::Exited);
    assert_eq!(recorder.calls(), vec!["exit"]);
}
