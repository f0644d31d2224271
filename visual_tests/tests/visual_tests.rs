use visual_tests::{run_visual_test, Step, VisualTestConfig, VisualTestResult};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn describe(name: &str, result: &VisualTestResult) -> String {
    format!(
        "'{}': similarity {:.4}%\n\
         Expected: {}\n\
         Captured: {}\n\
         Diff:     {}",
        name,
        result.similarity * 100.0,
        result.expected_path.display(),
        result.captured_path.display(),
        result
            .diff_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "N/A".to_string())
    )
}

/// Helper macro for scenarios whose final frames must match
macro_rules! visual_match {
    ($name:ident, $expected:expr, $actual:expr) => {
        #[test]
        fn $name() {
            init_logger();
            let config = VisualTestConfig::new(stringify!($name), $expected, $actual);
            let result = run_visual_test(&config).expect("Visual test failed to run");
            assert!(
                result.passed,
                "Visual regression detected for {}",
                describe(stringify!($name), &result)
            );
        }
    };
}

visual_match!(
    test_full_cycle_returns_to_rest,
    vec![],
    vec![
        Step::Press { x: 60.0, y: 25.0 },
        Step::Wait(600),
        Step::Release { x: 60.0, y: 25.0 },
        Step::Wait(600),
    ]
);

visual_match!(
    test_interrupted_press_returns_to_rest,
    vec![],
    vec![
        Step::Press { x: 300.0, y: 10.0 },
        Step::Wait(120),
        Step::Release { x: 300.0, y: 10.0 },
        Step::Wait(600),
    ]
);

visual_match!(
    test_covered_button_ignores_touch_point,
    vec![Step::Press { x: 5.0, y: 5.0 }, Step::Wait(600)],
    vec![Step::Press { x: 340.0, y: 45.0 }, Step::Wait(600)]
);

#[test]
fn test_held_press_differs_from_rest() {
    init_logger();
    let config = VisualTestConfig::new(
        "test_held_press_differs_from_rest",
        vec![],
        vec![Step::Press { x: 60.0, y: 25.0 }, Step::Wait(600)],
    );
    let result = run_visual_test(&config).expect("Visual test failed to run");
    assert!(
        !result.passed,
        "Pressed frame should not match the resting frame: {}",
        describe("test_held_press_differs_from_rest", &result)
    );
}
