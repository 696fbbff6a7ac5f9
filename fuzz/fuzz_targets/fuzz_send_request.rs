#![no_main]

use libfuzzer_sys::fuzz_target;
use telebridge::bus::codec::decode_send_request;

fuzz_target!(|data: &str| {
    if let Ok(request) = decode_send_request(data) {
        assert!(request.chat_id != 0);
        assert!(!request.text.is_empty());
    }
});
