use kline::resolve_window;
use kline_mock::MockBehavior;
use proptest::prelude::*;

use crate::helpers::{PUFA, d, dynamic_kline, strings};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn failures_never_leave_a_session_connected(fail_mask in proptest::collection::vec(any::<bool>(), 1..12)) {
        tokio_test::block_on(async {
            let (k, ctl) = dynamic_kline();
            let window = resolve_window("D", 5, d(2024, 1, 5)).unwrap();
            let mut expected_connects = 0;
            let mut connected = false;
            for fail in &fail_mask {
                let behavior = if *fail {
                    MockBehavior::Fail(kline::ProviderError::new(-1, "scripted"))
                } else {
                    MockBehavior::Return(kline::RawTabularResponse {
                        fields: strings(&["close"]),
                        ..Default::default()
                    })
                };
                ctl.set_series_behavior(PUFA, behavior).await;
                if !connected {
                    expected_connects += 1;
                }
                let res = k.history(PUFA, &strings(&["close"]), &window).await;
                prop_assert_eq!(res.is_err(), *fail);
                connected = !*fail;
                prop_assert_eq!(k.session().state() == kline::ConnectionState::Connected, connected);
            }
            prop_assert_eq!(ctl.connect_calls(), expected_connects);
            Ok(())
        })?;
    }
}
