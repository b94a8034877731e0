#![no_main]

use libfuzzer_sys::fuzz_target;
use workout_spec::registry::{lookup, resolve};

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);

    match resolve(&raw) {
        Ok(id) => {
            let rule = lookup(&raw).expect("resolved mode must have a rule");
            assert_eq!(rule.id, id);
        }
        Err(err) => {
            assert_eq!(err.message, format!("unsupported MODE '{}'", raw));
        }
    }
});
