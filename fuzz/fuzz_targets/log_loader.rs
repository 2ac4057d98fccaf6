#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use logscope_access_log::LogLoader;

fuzz_target!(|data: &[u8]| {
    let records = LogLoader::new()
        .load_reader(Cursor::new(data))
        .expect("in-memory reader never fails");

    // 라인 수와 레코드 수가 일치해야 한다
    let newlines = data.iter().filter(|&&b| b == b'\n').count();
    let lines = newlines + usize::from(!data.is_empty() && !data.ends_with(b"\n"));
    assert_eq!(records.len(), lines);
});
