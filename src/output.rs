// src/output.rs
// =============================================================================
// This module prints the extracted module list.
//
// Default form is ready to paste after `xk6 build`:
//   " --with github.com/foo/bar --with gitlab.com/baz/qux@v1.2.3"
// (no separators, no trailing newline, nothing at all for an empty list)
//
// With --json it's a plain JSON array of the same strings.
// =============================================================================

use anyhow::Result;
use std::io::Write;

use crate::extract::ModulePath;

// Writes each module as ` --with <module>`
//
// Parameters:
//   out: where to write (stdout in main.rs, a Vec<u8> in tests)
//   modules: the extracted module paths, in order
//
// Example output:
//   " --with github.com/foo/bar --with gitlab.com/baz/qux@v1.2.3"
pub fn write_flags<W: Write>(out: &mut W, modules: &[ModulePath]) -> Result<()> {
    for module in modules {
        write!(out, " --with {}", module)?;
    }
    Ok(())
}

// Writes the modules as a pretty-printed JSON array, newline terminated
//
// An empty list prints "[]" (unlike write_flags, which prints nothing).
pub fn write_json<W: Write>(out: &mut W, modules: &[ModulePath]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, modules)?;
    writeln!(out)?;
    Ok(())
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why take `W: Write` instead of printing directly?
//    - Any writer works: stdout, a file, or a Vec<u8>
//    - Tests write into a Vec<u8> and check the bytes
//
// 2. What is `&mut *out`?
//    - serde_json::to_writer_pretty takes the writer by value
//    - &mut *out re-borrows it, so we can still use `out` afterwards
// -----------------------------------------------------------------------------
