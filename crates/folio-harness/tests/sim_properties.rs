//! Property-based simulation of random visitor sessions.
//!
//! Random scripts run through the production runtime on a paused clock with
//! the standard invariants checked on every rendered frame.

use folio_app::{AppEvent, KeyInput, Runtime};
use folio_core::{config::SiteConfig, contact::Field, viewport::Region};
use folio_harness::{InvariantRegistry, Script, SimDriver, SimEnv};
use proptest::prelude::*;

const PATHS: [&str; 5] = ["/", "/about", "/contact", "/location", "/missing"];

fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        3 => (0usize..PATHS.len()).prop_map(|i| AppEvent::Navigate { path: PATHS[i].to_string() }),
        1 => Just(AppEvent::HistoryBack),
        1 => Just(AppEvent::HistoryForward),
        2 => Just(AppEvent::ToggleMenu),
        2 => (0u32..80).prop_map(|offset| AppEvent::Scroll { offset }),
        1 => (1u32..50).prop_map(|height| AppEvent::Resize { height }),
        2 => (0u32..40, 1u32..20)
            .prop_map(|(top, height)| AppEvent::Layout { region: Some(Region::new(top, height)) }),
        1 => any::<bool>().prop_map(|hovered| AppEvent::HeroCardHover { hovered }),
        1 => (0usize..3).prop_map(|i| AppEvent::FormInput {
            field: Field::ALL[i],
            value: ["Ada", "ada@example.com", "Hi"][i].to_string(),
        }),
        1 => Just(AppEvent::SubmitForm),
        1 => Just(AppEvent::Key(KeyInput::Tab)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_random_sessions_hold_invariants(
        steps in prop::collection::vec((0u64..700, event_strategy()), 0..30),
    ) {
        let script = steps
            .into_iter()
            .fold(Script::new(), |script, (delay, event)| script.after(delay, event));

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .unwrap();

        let (result, handle) = rt.block_on(async {
            let env = SimEnv::new();
            let driver =
                SimDriver::new(env.clone(), script).with_invariants(InvariantRegistry::standard());
            let handle = driver.handle();
            let runtime = Runtime::new(driver, env, SiteConfig::default()).unwrap();
            (runtime.run().await, handle)
        });

        prop_assert_eq!(result, Ok(()));
        prop_assert!(handle.stopped());
        prop_assert!(!handle.frames().is_empty());
    }
}
