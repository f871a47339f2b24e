//! Frame resolution: symbol splitting, filtering and in-app classification
//!
//! Demangled Rust symbols look like `app::db::Pool::get`,
//! `app::run::{{closure}}`, `app::load::<alloc::string::String>` or
//! `<app::Handler as core::ops::Fn<()>>::call`. Each is split into a
//! *package* (the module path) and a *function* (the item path inside it).

use crate::stack::frame::StackFrame;

/// Module prefix of this crate's own frames
const CRATE_NAME: &str = env!("CARGO_CRATE_NAME");

/// Runtime, harness and unwinder modules never shown in a trace
const RUNTIME_MODULES: &[&str] = &[
    "std::rt",
    "std::sys",
    "std::sys_common",
    "std::panicking",
    "std::panic",
    "std::thread",
    "std::backtrace",
    "std::backtrace_rs",
    "core::ops::function",
    "core::panic",
    "alloc::boxed",
    "backtrace",
    "test",
];

/// Unpathed process and thread entry symbols
const RUNTIME_SYMBOLS: &[&str] = &[
    "main",
    "_start",
    "__libc_start_main",
    "__libc_start_call_main",
    "start_thread",
    "thread_start",
    "clone",
    "clone3",
    "__clone",
    "BaseThreadInitThunk",
    "RtlUserThreadStart",
    "mainCRTStartup",
    "invoke_main",
    "__scrt_common_main_seh",
];

/// Path fragments of standard library sources
const STD_PATH_MARKERS: &[&str] = &[
    "/rustc/",
    "/library/std/",
    "/library/core/",
    "/library/alloc/",
    "/.rustup/toolchains/",
];

/// Path fragments of third-party sources fetched by cargo
const THIRD_PARTY_PATH_MARKERS: &[&str] = &["/.cargo/registry/", "/.cargo/git/"];

/// A symbol as reported by the unwinder, before filtering
#[derive(Debug, Clone, Default)]
pub struct RawSymbol {
    /// Demangled name without hash
    pub name: String,
    /// Source file, if debug info has one
    pub file: Option<String>,
    /// Line in `file`
    pub line: Option<u32>,
    /// Instruction pointer
    pub address: usize,
}

/// Turn resolved symbols into frames, dropping runtime and crate-internal ones.
///
/// Input order is preserved.
pub fn resolve_frames<I>(symbols: I, app_prefix: &str) -> Vec<StackFrame>
where
    I: IntoIterator<Item = RawSymbol>,
{
    symbols
        .into_iter()
        .filter_map(|symbol| {
            let (package, function) = split_package_and_function(&symbol.name);
            if should_skip_frame(&package, &function) {
                return None;
            }
            Some(new_frame(package, function, symbol, app_prefix))
        })
        .collect()
}

fn new_frame(package: String, function: String, symbol: RawSymbol, app_prefix: &str) -> StackFrame {
    let file = symbol
        .file
        .filter(|file| !file.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let mut frame = StackFrame {
        file,
        line_number: symbol.line.unwrap_or(0),
        function,
        package,
        in_app: false,
        address: symbol.address,
    };
    frame.in_app = is_in_app(&frame, app_prefix);
    frame
}

/// Split a demangled symbol into `(package, function)`.
///
/// The package is the leading run of module-like segments before the item
/// name; closures and generic arguments stay with the function.
pub fn split_package_and_function(name: &str) -> (String, String) {
    let segments = split_path(name);
    if segments.is_empty() {
        return (String::new(), String::new());
    }

    let base = segments
        .iter()
        .rposition(|segment| !is_suffix_segment(segment))
        .unwrap_or(0);

    let split = segments[..base]
        .iter()
        .position(|segment| !is_module_segment(segment))
        .unwrap_or(base);

    if split == 0 {
        if let Some(qualified) = segments.first().and_then(|s| qualified_package(s)) {
            return (qualified, name.to_string());
        }
        return (String::new(), name.to_string());
    }

    (segments[..split].join("::"), segments[split..].join("::"))
}

/// Package of a `<Type as Trait>` segment: the type's module path, or the
/// trait's when the type has none.
fn qualified_package(segment: &str) -> Option<String> {
    let inner = segment.strip_prefix('<')?.strip_suffix('>')?;
    let (self_ty, trait_path) = match find_top_level(inner, " as ") {
        Some(at) => (&inner[..at], Some(&inner[at + 4..])),
        None => (inner, None),
    };

    let package = type_package(self_ty);
    if !package.is_empty() {
        return Some(package);
    }
    trait_path.map(type_package).filter(|package| !package.is_empty())
}

fn type_package(ty: &str) -> String {
    let ty = ty
        .trim_start_matches('&')
        .trim_start_matches("mut ")
        .trim_start_matches("dyn ");
    let segments = split_path(ty);
    let last = segments.len().saturating_sub(1);
    segments[..last]
        .iter()
        .take_while(|segment| is_module_segment(segment))
        .copied()
        .collect::<Vec<_>>()
        .join("::")
}

/// Split at `::` outside of `<..>`, `(..)` and `[..]`
fn split_path(name: &str) -> Vec<&str> {
    let bytes = name.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' | b'(' | b'[' => depth += 1,
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&name[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&name[start..]);
    segments.retain(|segment| !segment.is_empty());
    segments
}

fn find_top_level(haystack: &str, needle: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in haystack.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            _ if depth == 0 && haystack[i..].starts_with(needle) => return Some(i),
            _ => {}
        }
    }
    None
}

/// Closure markers and turbofish arguments trail the function they belong to
fn is_suffix_segment(segment: &str) -> bool {
    segment.starts_with('{') || segment.starts_with('<')
}

fn is_module_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn has_module_prefix(package: &str, module: &str) -> bool {
    package
        .strip_prefix(module)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

fn is_test_module(package: &str) -> bool {
    package.split("::").any(|segment| segment == "tests")
}

/// Whether a frame belongs to the runtime, the harness or this crate.
///
/// Frames of this crate's own `tests` modules are kept.
pub fn should_skip_frame(package: &str, function: &str) -> bool {
    if function.is_empty() {
        return true;
    }

    if package.is_empty() {
        return RUNTIME_SYMBOLS.contains(&function)
            || function.starts_with("_Unwind")
            || function.starts_with("__rust");
    }

    if RUNTIME_MODULES
        .iter()
        .any(|module| has_module_prefix(package, module))
    {
        return true;
    }

    let internal = has_module_prefix(package, CRATE_NAME)
        || function.contains(&format!(" as {CRATE_NAME}::"));
    internal && !is_test_module(package)
}

/// Standard library sources live under the toolchain or the remapped `/rustc/` root
pub fn is_std_file(file: &str) -> bool {
    let file = file.replace('\\', "/");
    STD_PATH_MARKERS.iter().any(|marker| file.contains(marker))
}

/// Vendored or cargo-fetched code
pub fn is_third_party(package: &str, file: &str) -> bool {
    if package.contains("vendor") || package.contains("third_party") {
        return true;
    }
    let file = file.replace('\\', "/");
    THIRD_PARTY_PATH_MARKERS
        .iter()
        .any(|marker| file.contains(marker))
}

/// In-app iff the package matches `app_prefix` and the frame is neither
/// standard library nor third-party code
pub fn is_in_app(frame: &StackFrame, app_prefix: &str) -> bool {
    if is_std_file(&frame.file) || is_third_party(&frame.package, &frame.file) {
        return false;
    }
    !app_prefix.is_empty() && frame.package.starts_with(app_prefix)
}
