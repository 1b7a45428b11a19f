#![no_main]
use er_blocking::blocking::{BlockingMethodKind, KeyGenerator};
use er_blocking::ExtendedQGramsBlocking;
use libfuzzer_sys::fuzz_target;

/// Fuzz key generation for every blocking method.
///
/// The first byte picks the q-gram size and the second the threshold, so the
/// extended method is exercised over its whole parameter range.
fuzz_target!(|data: &[u8]| {
    let Some((&[q, t], rest)) = data.split_first_chunk::<2>() else {
        return;
    };
    let Ok(value) = std::str::from_utf8(rest) else {
        return;
    };

    for kind in BlockingMethodKind::all() {
        let _ = kind.default_method().blocking_keys(value);
    }

    let q_gram_size = usize::from(q % 8) + 1;
    let threshold = f64::from(t.max(1)) / 255.0;
    if let Ok(method) = ExtendedQGramsBlocking::new(q_gram_size, threshold) {
        let _ = method.blocking_keys(value);
    }
});
