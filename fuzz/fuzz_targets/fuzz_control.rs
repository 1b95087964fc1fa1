#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };

    let lines: Vec<&str> = text.lines().collect();
    if let Ok(decoded) = hycs::ControlFile::decode(&lines) {
        for annotate in [false, true].iter() {
            let options = hycs::EncodeOptions {
                annotate: *annotate,
                ..hycs::EncodeOptions::new()
            };
            let encoded = decoded.control.encode(&options);
            let redecoded = hycs::ControlFile::decode(&encoded).unwrap();
            assert_eq!(redecoded.control.species_count(), decoded.control.species_count());
            assert!(redecoded.control.grid_count() <= decoded.control.grid_count());
        }
    }
});
