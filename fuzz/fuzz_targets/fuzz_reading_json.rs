#![no_main]

use libfuzzer_sys::fuzz_target;
use proximity_monitor::Reading;
use proximity_monitor::display::render;

fuzz_target!(|data: &[u8]| {
    // Arbitrary response bodies must either decode or fail cleanly
    if let Ok(reading) = Reading::from_json(data) {
        assert!(reading.distance_cm().is_finite());
        assert!(reading.distance_cm() >= 0.0);

        let model = render(&reading);
        assert_eq!(model.indicators.visible_count(), 1);
        assert_eq!(model.palette, model.state.palette());
    }
});
