#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut list = hycs::NameList::new();
    if list.read(data).is_ok() {
        let mut out = Vec::new();
        list.write(&mut out, None).unwrap();
        let _ = list.particle_mode();
    }
});
