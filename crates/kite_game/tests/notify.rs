mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::{entries, headless_game, journal, Journal, Probe};
use kite_core::{ComponentId, EngineError};
use kite_game::testing::HeadlessLauncher;
use kite_game::{ComponentInfo, Game, ALL};

fn register(game: &mut Game, probe: Probe) -> Rc<RefCell<Probe>> {
    let shared = probe.shared();
    game.add_component(shared.clone()).expect("register");
    shared
}

fn three_probes(game: &mut Game, log: &Journal) -> Vec<ComponentId> {
    ["a", "b", "c"]
        .into_iter()
        .map(|label| {
            let id = game.ids().component();
            register(game, Probe::new(ComponentInfo::new(id), label, log));
            id
        })
        .collect()
}

#[test]
fn broadcast_from_a_component_skips_the_sender() {
    let launcher = HeadlessLauncher::new();
    let mut game = headless_game(&launcher);
    let log = journal();
    let ids = three_probes(&mut game, &log);

    game.notify(Some(ids[1]), ALL, "ping").expect("notify");
    assert_eq!(entries(&log), vec!["a notify ping", "c notify ping"]);
}

#[test]
fn broadcast_without_sender_reaches_everyone() {
    let launcher = HeadlessLauncher::new();
    let mut game = headless_game(&launcher);
    let log = journal();
    three_probes(&mut game, &log);

    game.notify(None, ALL, "ping").expect("notify");
    assert_eq!(
        entries(&log),
        vec!["a notify ping", "b notify ping", "c notify ping"]
    );
}

#[test]
fn targeted_notify_reaches_every_component_with_that_name() {
    let launcher = HeadlessLauncher::new();
    let mut game = headless_game(&launcher);
    let log = journal();
    let first = game.ids().component();
    register(&mut game, Probe::new(ComponentInfo::named(first, "score"), "s1", &log));
    let other = game.ids().component();
    register(&mut game, Probe::new(ComponentInfo::named(other, "hud"), "hud", &log));
    let second = game.ids().component();
    register(&mut game, Probe::new(ComponentInfo::named(second, "score"), "s2", &log));

    game.notify(Some(other), "score", "+10").expect("notify");
    assert_eq!(entries(&log), vec!["s1 notify +10", "s2 notify +10"]);

    log.borrow_mut().clear();
    game.notify(None, "nobody", "hello").expect("no recipients is fine");
    assert!(entries(&log).is_empty());
}

#[test]
fn recipient_errors_are_rewrapped_as_notify_dispatch() {
    let launcher = HeadlessLauncher::new();
    let mut game = headless_game(&launcher);
    let log = journal();
    let id = game.ids().component();
    register(
        &mut game,
        Probe::new(ComponentInfo::named(id, "broken"), "x", &log)
            .notified(|_, _, _| Err(EngineError::Component("cannot handle it".to_string()))),
    );
    let later = game.ids().component();
    register(&mut game, Probe::new(ComponentInfo::new(later), "y", &log));

    let err = game.notify(None, ALL, "ping").expect_err("recipient fails");
    assert!(matches!(err, EngineError::NotifyDispatch(ref msg) if msg.contains("cannot handle it")));
    assert_eq!(err.to_string(), "error in notify: component error: cannot handle it");
    // The failing delivery aborts the pass.
    assert_eq!(entries(&log), vec!["x notify ping"]);
}

#[test]
fn broadcast_from_an_update_reaches_the_caller_after_its_callback() {
    let launcher = HeadlessLauncher::new();
    let mut game = headless_game(&launcher);
    let log = journal();
    let a = game.ids().component();
    register(&mut game, Probe::new(ComponentInfo::new(a), "a", &log));
    let b = game.ids().component();
    register(
        &mut game,
        Probe::new(ComponentInfo::new(b), "b", &log)
            .updating(|ctx| ctx.notify(None, ALL, "hello")),
    );
    let c = game.ids().component();
    register(&mut game, Probe::new(ComponentInfo::new(c), "c", &log));
    game.setup().expect("setup");
    log.borrow_mut().clear();

    game.frame().expect("frame survives the broadcast");
    assert_eq!(
        entries(&log),
        vec![
            "a update",
            "b update",
            "a notify hello",
            "c notify hello",
            "b notify hello",
            "c update",
            "a draw",
            "b draw",
            "c draw",
        ]
    );
}

#[test]
fn notifying_your_own_name_is_delivered_once_the_callback_returns() {
    let launcher = HeadlessLauncher::new();
    let mut game = headless_game(&launcher);
    let log = journal();
    let id = game.ids().component();
    register(
        &mut game,
        Probe::new(ComponentInfo::named(id, "echo"), "echo", &log)
            .updating(move |ctx| ctx.notify(Some(id), "echo", "me?")),
    );
    game.setup().expect("setup");
    log.borrow_mut().clear();

    game.frame().expect("frame");
    assert_eq!(
        entries(&log),
        vec!["echo update", "echo notify me?", "echo draw"]
    );
}

#[test]
fn callbacks_can_notify_their_peers() {
    let launcher = HeadlessLauncher::new();
    let mut game = headless_game(&launcher);
    let log = journal();
    let relay = game.ids().component();
    register(
        &mut game,
        Probe::new(ComponentInfo::named(relay, "relay"), "relay", &log).notified(
            move |ctx, _, message| {
                if message == "start" {
                    ctx.notify(Some(relay), "sink", "forwarded")?;
                }
                Ok(())
            },
        ),
    );
    let sink = game.ids().component();
    register(&mut game, Probe::new(ComponentInfo::named(sink, "sink"), "sink", &log));

    game.notify(None, "relay", "start").expect("notify");
    assert_eq!(
        entries(&log),
        vec!["relay notify start", "sink notify forwarded"]
    );
}

#[test]
fn notify_needs_an_initialized_game() {
    let mut game = Game::default();
    assert!(matches!(
        game.notify(None, ALL, "ping"),
        Err(EngineError::NotInitialized)
    ));
}
