//! Stack capturer: snapshot the current call stack as [`StackFrame`]s

use crate::config::ChainConfig;
use crate::stack::frame::StackFrame;
use crate::stack::resolve::{RawSymbol, resolve_frames};

/// Raw frames dropped before resolution: the unwinder's own entry frame.
/// Remaining frames of this crate are removed by the module filter.
pub(crate) const CAPTURE_SKIP: usize = 1;

/// Raw frames walked beyond the requested depth to make room for frames the
/// filter drops (unwinder, capture internals, runtime glue).
const FILTERED_FRAME_ALLOWANCE: usize = 64;

/// Capture the call stack of the caller.
///
/// Drops the first `skip` raw frames, then resolves and filters the rest
/// innermost first until `config.max_stack_depth` frames survive. Runtime and
/// crate-internal frames never count against the depth. The result reads
/// oldest frame first; the innermost frame (the direct caller of the
/// capturing operation) is the last element. Never fails: an unresolvable
/// stack yields an empty sequence.
#[inline(never)]
pub fn capture(skip: usize, config: &ChainConfig) -> Vec<StackFrame> {
    let depth = config.max_stack_depth;
    let limit = skip
        .saturating_add(depth)
        .saturating_add(FILTERED_FRAME_ALLOWANCE);
    let mut raw = Vec::with_capacity(limit.min(128));

    backtrace::trace(|frame| {
        raw.push(frame.clone());
        raw.len() < limit
    });

    let walked = raw.len();
    let mut frames = Vec::with_capacity(depth.min(walked));
    for frame in raw.iter().skip(skip) {
        if frames.len() >= depth {
            break;
        }
        let address = frame.ip() as usize;
        let mut symbols = Vec::new();
        backtrace::resolve_frame(frame, |symbol| {
            let Some(name) = symbol.name() else {
                return;
            };
            symbols.push(RawSymbol {
                name: format!("{name:#}"),
                file: symbol.filename().map(|path| path.display().to_string()),
                line: symbol.lineno(),
                address,
            });
        });
        let room = depth - frames.len();
        frames.extend(resolve_frames(symbols, &config.app_prefix).into_iter().take(room));
    }
    frames.reverse();

    tracing::trace!(walked, kept = frames.len(), "captured stack");
    frames
}
