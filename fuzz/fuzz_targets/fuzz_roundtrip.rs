#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let workout = match workout_spec::load(&s) {
        Ok(w) => w,
        Err(_) => return,
    };

    let document = workout_spec::serialize::to_document(&workout);
    match workout_spec::validate(&document) {
        Ok(again) if again == workout => {}
        Ok(again) => panic!(
            "Roundtrip failure: re-validated model differs.\n\
             Input (lossy): {:?}\n\
             First: {:?}\n\
             Second: {:?}",
            s.get(..200).unwrap_or(&s),
            workout,
            again,
        ),
        Err(err) => panic!(
            "Roundtrip failure: serialized document no longer validates: {}\n\
             Input (lossy): {:?}",
            err,
            s.get(..200).unwrap_or(&s),
        ),
    }
});
