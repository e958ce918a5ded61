#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header parsing and decode must never panic
    let _ = bmpedit::BitmapHeader::parse(data).map(|h| h.validate());
    let _ = bmpedit::decode(data, None, &enough::Unstoppable);

    // Neither may any operation on whatever decodes
    for op in bmpedit::Operation::ALL {
        let _ = bmpedit::process(op, data, None, &enough::Unstoppable);
    }
});
