use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

// Source line echoed under the diagnostic, e.g. ` #include <Servo.h>`
static INCLUDE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*(?:\d+\s*\|\s*)?#\s*include\s*[<"]([^>"\s]+)[>"]"#)
        .expect("include line regex")
});

// gcc: `fatal error: Servo.h: No such file or directory`
// clang: `fatal error: 'Servo.h' file not found`
static MISSING_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"fatal error: (?:([^:'\s]+): No such file or directory|'([^']+)' file not found)")
        .expect("missing header regex")
});

/// Include names the preprocessor reported as missing in `stderr`
pub fn missing_includes(stderr: &str) -> BTreeSet<String> {
    let mut includes = BTreeSet::new();

    for caps in MISSING_HEADER.captures_iter(stderr) {
        if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
            includes.insert(name.as_str().to_string());
        }
    }
    for caps in INCLUDE_LINE.captures_iter(stderr) {
        includes.insert(caps[1].to_string());
    }

    includes
}
