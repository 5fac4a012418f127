#![no_main]

use libfuzzer_sys::fuzz_target;
use stubgen_syntax::{diagnostics, lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        match lexer::lex(s) {
            Ok(tokens) => {
                if let Err(errors) = parser::parse(&tokens) {
                    // Diagnostics must render for any span the parser reports
                    for error in &errors {
                        let _ = diagnostics::format_error("fuzz.cs", s, error);
                    }
                }
            }
            Err(errors) => {
                for error in &errors {
                    let _ = diagnostics::format_error("fuzz.cs", s, error);
                }
            }
        }
    }
});
