#![no_main]

use libfuzzer_sys::fuzz_target;
use proximity_monitor::config::AppConfig;

fuzz_target!(|data: &[u8]| {
    // Whatever parses must come out of validation usable
    if let Ok(mut config) = serde_json::from_slice::<AppConfig>(data) {
        config.validate();
        assert!(config.endpoint.starts_with("http://") || config.endpoint.starts_with("https://"));
        assert!(config.request_timeout_ms > 0 && config.request_timeout_ms < 1000);
    }
});
