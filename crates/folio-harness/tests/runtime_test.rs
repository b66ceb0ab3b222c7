//! End-to-end runtime tests on the paused clock.
//!
//! # Test Strategy
//!
//! Each test scripts what a visitor does (scroll, click, type) against the
//! production `Runtime`, with tokio's clock paused so delays resolve exactly
//! and instantly. The driver records every rendered frame and checks the
//! standard invariants on each one.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks over the recorded frames:
//! - Reveal children appear no earlier than their stagger slot
//! - The navbar link and the router agree on every frame
//! - Form confirmations last exactly as long as configured

use std::time::Duration;

use folio_app::{AppEvent, KeyInput, Runtime, Screen};
use folio_core::{
    config::SiteConfig,
    contact::Field,
    reveal::RevealStage,
    router::ViewId,
    viewport::Region,
};
use folio_harness::{Frame, InvariantRegistry, Script, SimDriver, SimDriverError, SimEnv, SimHandle};

/// Hero block as laid out at the top of the home page.
const HERO: Region = Region { top: 2, height: 12 };

async fn run(script: Script) -> SimHandle {
    run_with(SiteConfig::default(), script).await.unwrap()
}

async fn run_with(config: SiteConfig, script: Script) -> Result<SimHandle, SimDriverError> {
    let env = SimEnv::new();
    let driver = SimDriver::new(env.clone(), script).with_invariants(InvariantRegistry::standard());
    let handle = driver.handle();

    let runtime = Runtime::new(driver, env, config).unwrap();
    runtime.run().await?;
    Ok(handle)
}

fn first_with_children(handle: &SimHandle, count: usize) -> Frame {
    handle.first_frame(|s| s.visible_children() >= count).unwrap()
}

#[tokio::test(start_paused = true)]
async fn hero_children_follow_stagger_slots() {
    let handle = run(Script::new().at(0, AppEvent::Layout { region: Some(HERO) })).await;

    for (index, expected_ms) in [300, 500, 700, 900].into_iter().enumerate() {
        let frame = first_with_children(&handle, index + 1);
        let expected = Duration::from_millis(expected_ms);
        assert!(frame.at >= expected, "child {index} shown at {:?}, before {expected:?}", frame.at);
        assert!(frame.at < expected + Duration::from_millis(5), "child {index} late: {:?}", frame.at);
    }

    let last = handle.last_frame().unwrap();
    assert_eq!(last.snapshot.page_reveal.map(|r| r.stage), Some(RevealStage::Visible));
    assert!(handle.stopped());
}

#[tokio::test(start_paused = true)]
async fn hero_stays_hidden_until_in_view() {
    let script = Script::new()
        .at(0, AppEvent::Resize { height: 10 })
        .then(AppEvent::Scroll { offset: 40 })
        .then(AppEvent::Layout { region: Some(HERO) })
        .at(2_000, AppEvent::Scroll { offset: 0 });
    let handle = run(script).await;

    let first_visible = first_with_children(&handle, 1);
    assert!(first_visible.at >= Duration::from_millis(2_300));
}

#[tokio::test(start_paused = true)]
async fn reentry_mid_sequence_restarts_from_scratch() {
    let script = Script::new()
        .at(0, AppEvent::Layout { region: Some(HERO) })
        .at(550, AppEvent::Scroll { offset: 100 })
        .at(600, AppEvent::Scroll { offset: 0 });
    let handle = run(script).await;

    // Two children had appeared before the region left
    let before_exit = handle.frames().into_iter().filter(|f| f.at < Duration::from_millis(550));
    assert_eq!(before_exit.map(|f| f.snapshot.visible_children()).max(), Some(2));

    // After re-entry at 600ms the first slot is 300ms later, not earlier
    let restarted: Vec<Frame> =
        handle.frames().into_iter().filter(|f| f.at >= Duration::from_millis(600)).collect();
    let shown_again = restarted.iter().find(|f| f.snapshot.visible_children() == 1).unwrap();
    assert!(shown_again.at >= Duration::from_millis(900));

    let last = handle.last_frame().unwrap().snapshot.page_reveal.unwrap();
    assert_eq!(last.epoch, 2);
    assert_eq!(last.visible, 4);
}

#[tokio::test(start_paused = true)]
async fn selecting_link_from_open_menu() {
    let script = Script::new()
        .at(0, AppEvent::Scroll { offset: 30 })
        .at(10, AppEvent::ToggleMenu)
        .at(400, AppEvent::Navigate { path: "/about".into() });
    let handle = run(script).await;

    let menu_open = handle.first_frame(|s| s.menu_open).unwrap();
    assert_eq!(menu_open.snapshot.active_path, "/");

    let about = handle.first_frame(|s| s.active_path == "/about").unwrap();
    assert!(!about.snapshot.menu_open);
    assert_eq!(about.snapshot.screen, Screen::Page(ViewId::About));
    assert_eq!(about.snapshot.scroll_offset, 0);
    assert_eq!(handle.scroll_requests(), vec![0]);
}

#[tokio::test(start_paused = true)]
async fn about_page_reveals_on_mount() {
    let handle = run(Script::new().at(100, AppEvent::Navigate { path: "/about".into() })).await;

    let frames = handle.frames();
    let offsets: Vec<Duration> = (1..=3)
        .map(|n| {
            frames
                .iter()
                .find(|f| f.snapshot.page_view == Some(ViewId::About) && f.snapshot.visible_children() >= n)
                .unwrap()
                .at
        })
        .collect();

    assert_eq!(offsets, vec![
        Duration::from_millis(400),
        Duration::from_millis(500),
        Duration::from_millis(600)
    ]);
}

#[tokio::test(start_paused = true)]
async fn unknown_route_shows_fallback() {
    let script = Script::new()
        .at(0, AppEvent::Navigate { path: "/xyz".into() })
        .at(100, AppEvent::Navigate { path: "/location".into() });
    let handle = run(script).await;

    let fallback = handle.first_frame(|s| matches!(s.screen, Screen::NotFound { .. })).unwrap();
    assert_eq!(fallback.snapshot.screen, Screen::NotFound { path: "/xyz".into() });
    assert_eq!(fallback.snapshot.router_path, "/");
    assert_eq!(fallback.snapshot.page_view, None);

    let last = handle.last_frame().unwrap();
    assert_eq!(last.snapshot.screen, Screen::Page(ViewId::Location));
}

#[tokio::test(start_paused = true)]
async fn contact_confirmation_lasts_three_seconds() {
    let script = Script::new()
        .at(0, AppEvent::Navigate { path: "/contact".into() })
        .at(50, AppEvent::FormInput { field: Field::Name, value: "Ada".into() })
        .then(AppEvent::FormInput { field: Field::Email, value: "ada@example.com".into() })
        .then(AppEvent::FormInput { field: Field::Message, value: "Hello there".into() })
        .at(100, AppEvent::SubmitForm);
    let handle = run(script).await;

    let submitted = handle.first_frame(|s| s.form.as_ref().is_some_and(|f| f.submitted)).unwrap();
    assert_eq!(submitted.at, Duration::from_millis(100));
    assert_eq!(submitted.snapshot.status.as_deref(), Some("Message sent"));

    let reset = handle
        .frames()
        .into_iter()
        .find(|f| f.at > submitted.at && f.snapshot.form.as_ref().is_some_and(|form| !form.submitted))
        .unwrap();
    assert_eq!(reset.at, Duration::from_millis(3_100));
    assert!(reset.snapshot.form.as_ref().is_some_and(|f| f.is_blank()));
    assert_eq!(reset.snapshot.status, None);
}

#[tokio::test(start_paused = true)]
async fn incomplete_form_is_not_submitted() {
    let script = Script::new()
        .at(0, AppEvent::Navigate { path: "/contact".into() })
        .then(AppEvent::Key(KeyInput::Tab))
        .then(AppEvent::Key(KeyInput::Char('A')))
        .then(AppEvent::Key(KeyInput::Enter));
    let handle = run(script).await;

    let rejected = handle.first_frame(|s| s.status.is_some()).unwrap();
    assert_eq!(rejected.snapshot.status.as_deref(), Some("email is required"));
    assert!(handle.frames().iter().all(|f| f.snapshot.form.as_ref().is_none_or(|form| !form.submitted)));
}

#[tokio::test(start_paused = true)]
async fn history_keys_move_navbar_with_router() {
    let script = Script::new()
        .at(0, AppEvent::Key(KeyInput::Char('2')))
        .at(10, AppEvent::Key(KeyInput::Char('3')))
        .at(20, AppEvent::Key(KeyInput::Left))
        .at(30, AppEvent::Key(KeyInput::Left))
        .at(40, AppEvent::Key(KeyInput::Right));
    let handle = run(script).await;

    let paths: Vec<String> = handle
        .frames()
        .into_iter()
        .filter(|f| f.at <= Duration::from_millis(40))
        .map(|f| f.snapshot.active_path)
        .collect();
    let mut distinct = paths.clone();
    distinct.dedup();

    assert_eq!(distinct, vec!["/", "/about", "/contact", "/about", "/", "/about"]);
}

#[tokio::test(start_paused = true)]
async fn hover_tracks_pointer_on_home_only() {
    let script = Script::new()
        .at(0, AppEvent::HeroCardHover { hovered: true })
        .at(10, AppEvent::HeroCardHover { hovered: false })
        .at(20, AppEvent::Navigate { path: "/location".into() })
        .at(30, AppEvent::HeroCardHover { hovered: true });
    let handle = run(script).await;

    assert!(handle.first_frame(|s| s.hero_hovered == Some(true)).is_some());
    let last = handle.last_frame().unwrap();
    assert_eq!(last.snapshot.hero_hovered, None);
}

#[tokio::test(start_paused = true)]
async fn quit_key_stops_runtime_early() {
    let script = Script::new()
        .at(0, AppEvent::Key(KeyInput::Char('q')))
        .at(5_000, AppEvent::Navigate { path: "/about".into() });
    let handle = run(script).await;

    assert!(handle.stopped());
    assert_eq!(handle.remaining_events(), 1);
    assert!(handle.frames().iter().all(|f| f.snapshot.active_path == "/"));
}

#[tokio::test(start_paused = true)]
async fn bad_config_never_starts() {
    let mut config = SiteConfig::default();
    config.initial_path = "/nowhere".into();

    let env = SimEnv::new();
    let driver = SimDriver::new(env.clone(), Script::new());
    assert!(Runtime::new(driver, env, config).is_err());
}

#[tokio::test(start_paused = true)]
async fn runtime_opens_on_initial_path() {
    let config = SiteConfig { initial_path: "/location".into(), ..SiteConfig::default() };
    let env = SimEnv::new();
    let driver = SimDriver::new(env.clone(), Script::new());

    let runtime = Runtime::new(driver, env, config).unwrap();
    assert_eq!(runtime.app().screen(), Screen::Page(ViewId::Location));
    assert_eq!(runtime.app().nav().active_path(), "/location");
}

#[tokio::test(start_paused = true)]
async fn menu_links_leave_last_first() {
    let script = Script::new().at(0, AppEvent::ToggleMenu).at(500, AppEvent::CloseMenu);
    let handle = run(script).await;

    let open = handle.first_frame(|s| s.menu.stage == RevealStage::Visible).unwrap();
    assert_eq!(open.at, Duration::from_millis(300));

    let leaving: Vec<(Duration, usize)> = handle
        .frames()
        .into_iter()
        .filter(|f| f.at >= Duration::from_millis(500))
        .map(|f| (f.at, f.snapshot.menu.visible))
        .collect();
    assert_eq!(leaving, vec![
        (Duration::from_millis(500), 3),
        (Duration::from_millis(550), 2),
        (Duration::from_millis(600), 1),
        (Duration::from_millis(650), 0),
    ]);
    assert!(handle.frames().iter().filter(|f| f.at >= Duration::from_millis(500)).all(|f| !f.snapshot.menu_open));
}

#[tokio::test(start_paused = true)]
async fn about_skill_bars_fill_after_sections() {
    let handle = run(Script::new().at(0, AppEvent::Navigate { path: "/about".into() })).await;

    let growing = handle.first_frame(|s| s.skills_complete == Some(false)).unwrap();
    assert_eq!(growing.at, Duration::ZERO);

    // Last section at 500ms, last bar starts 600ms later and fills in 1.5s
    let full = handle.first_frame(|s| s.skills_complete == Some(true)).unwrap();
    assert_eq!(full.at, Duration::from_millis(2_600));
    assert_eq!(full.snapshot.visible_children(), 3);
}
