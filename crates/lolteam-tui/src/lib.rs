// Library root: exposes the terminal dashboard so the binary and tests can
// reach it.

pub mod tui;
