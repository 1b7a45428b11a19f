#![no_main]
use er_blocking::{BlockBuilding, EntityProfile, StandardBlocking};
use libfuzzer_sys::fuzz_target;

/// Fuzz profile deserialization followed by block building.
fuzz_target!(|data: &[u8]| {
    if let Ok(profiles) = serde_json::from_slice::<Vec<EntityProfile>>(data) {
        let _ = StandardBlocking.build_blocks(&profiles, None);
    }
});
