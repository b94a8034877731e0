#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let _ = workout_spec::load(&s);

    // Generic trees straight from JSON reach nodes YAML text rarely produces.
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) {
        let _ = workout_spec::validate(&value);
        let _ = workout_spec::validate::validate_job(&value);
    }
});
