use depfind_resolver::{LibraryHandle, LibraryLayout, Resolution};
use std::fmt::Write;

pub fn render_resolution(resolution: &Resolution) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Libraries ({}):", resolution.libraries.len());
    for entry in &resolution.libraries {
        let via = match &entry.include {
            Some(include) => format!("via {include}"),
            None => "requested".to_string(),
        };
        let _ = writeln!(out, "  {}  ({via})", describe(&entry.library));
    }

    let _ = writeln!(out, "Source files: {}", resolution.source_files.len());

    if !resolution.unresolved.is_empty() {
        let _ = writeln!(out, "Unresolved includes:");
        for (file, includes) in &resolution.unresolved {
            let names: Vec<&str> = includes.iter().map(String::as_str).collect();
            let _ = writeln!(out, "  {}: {}", file.display(), names.join(", "));
        }
    }

    let stats = &resolution.stats;
    let _ = writeln!(
        out,
        "{} files scanned, {} preprocessor runs ({} finalize)",
        stats.files_processed,
        stats.oracle_calls + stats.finalize_calls,
        stats.finalize_calls
    );
    out
}

pub fn render_libraries(libraries: &[LibraryHandle]) -> String {
    let mut out = String::new();
    for library in libraries {
        let _ = writeln!(
            out,
            "{}  [{} headers]",
            describe(library),
            library.headers.len()
        );
    }
    out
}

fn describe(library: &LibraryHandle) -> String {
    let layout = match library.layout {
        LibraryLayout::Flat => "flat",
        LibraryLayout::Recursive => "src",
    };
    match &library.version {
        Some(version) => format!(
            "{} {} ({layout}) {}",
            library.name,
            version,
            library.root.display()
        ),
        None => format!("{} ({layout}) {}", library.name, library.root.display()),
    }
}
