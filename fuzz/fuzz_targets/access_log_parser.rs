#![no_main]

use libfuzzer_sys::fuzz_target;
use logscope_access_log::{CommonLogParser, TimezoneMode};

fuzz_target!(|data: &[u8]| {
    let line = String::from_utf8_lossy(data);

    // 어떤 입력에도 패닉 없이 레코드를 반환해야 한다
    for mode in [TimezoneMode::Local, TimezoneMode::Offset] {
        let record = CommonLogParser::new().with_timezone(mode).parse(&line);
        if !record.parsed {
            assert!(record.request.is_empty());
            assert_eq!(record.status, 0);
        }
    }
});
